use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::{ContactSample, DispatchContext, GestureHsmEvent};
use crate::{config::HoldConfig, geometry::Vec2};

pub(super) struct HoldMatcher {
    config: HoldConfig,
    machine: statig::blocking::StateMachine<HoldHsm>,
}

impl HoldMatcher {
    pub(super) fn new(config: HoldConfig) -> Self {
        Self {
            config,
            machine: HoldHsm::new(config).state_machine(),
        }
    }

    pub(super) fn handle(
        &mut self,
        context: &mut DispatchContext,
        now_ms: u64,
        contacts: ContactSample,
    ) {
        self.machine
            .handle_with_context(&GestureHsmEvent::Sample { now_ms, contacts }, context);
    }

    pub(super) fn reset(&mut self) {
        self.machine = HoldHsm::new(self.config).state_machine();
    }
}

struct HoldHsm {
    config: HoldConfig,
    down_ms: u64,
    start: Vec2,
}

impl HoldHsm {
    fn new(config: HoldConfig) -> Self {
        Self {
            config,
            down_ms: 0,
            start: Vec2::ZERO,
        }
    }
}

#[state_machine(initial = "State::idle()")]
impl HoldHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::Sample { now_ms, contacts } => {
                let Some(point) = contacts.primary else {
                    return Handled;
                };
                self.down_ms = *now_ms;
                self.start = point.position;
                context.start(point.position);
                Transition(State::pressing())
            }
        }
    }

    #[state]
    fn pressing(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Sample { now_ms, contacts } => {
                let Some(point) = contacts.primary else {
                    // Lifted before the hold duration: not a hold.
                    context.fail();
                    return Transition(State::idle());
                };
                if (point.position - self.start).exceeds(self.config.threshold) {
                    context.fail();
                    return Transition(State::idle());
                }
                if now_ms.saturating_sub(self.down_ms) >= self.config.hold_ms {
                    context.activate();
                    return Transition(State::held());
                }
                Handled
            }
        }
    }

    #[state]
    fn held(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::Sample { contacts, .. } => {
                // Motion after activation does not cancel the hold.
                if contacts.primary.is_none() {
                    context.complete();
                    return Transition(State::idle());
                }
                Handled
            }
        }
    }
}
