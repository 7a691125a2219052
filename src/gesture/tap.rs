use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::{ContactSample, DispatchContext, GestureHsmEvent};
use crate::{config::TapConfig, geometry::Vec2};

pub(super) struct TapMatcher {
    config: TapConfig,
    machine: statig::blocking::StateMachine<TapHsm>,
}

impl TapMatcher {
    pub(super) fn new(config: TapConfig) -> Self {
        Self {
            config,
            machine: TapHsm::new(config).state_machine(),
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
        self.machine = TapHsm::new(self.config).state_machine();
    }
}

struct TapHsm {
    config: TapConfig,
    down_ms: u64,
    start: Vec2,
}

impl TapHsm {
    fn new(config: TapConfig) -> Self {
        Self {
            config,
            down_ms: 0,
            start: Vec2::ZERO,
        }
    }
}

#[state_machine(initial = "State::idle()")]
impl TapHsm {
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
                Transition(State::pressed())
            }
        }
    }

    #[state]
    fn pressed(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Sample { now_ms, contacts } => {
                // The deadline wins over a lift seen on the same late frame.
                if now_ms.saturating_sub(self.down_ms) > self.config.deadline_ms {
                    context.fail();
                    return Transition(State::idle());
                }
                match contacts.primary {
                    None => {
                        context.complete();
                        Transition(State::idle())
                    }
                    Some(point) if (point.position - self.start).exceeds(self.config.threshold) => {
                        context.fail();
                        Transition(State::idle())
                    }
                    Some(_) => Handled,
                }
            }
        }
    }
}
