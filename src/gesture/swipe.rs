use statig::{blocking::IntoStateMachineExt as _, prelude::*};
use tracing::trace;

use super::{
    types::SwipeDirection, utils::classify_direction, ContactSample, DispatchContext,
    GestureHsmEvent,
};
use crate::{config::SwipeConfig, geometry::Vec2};

pub(super) struct SwipeMatcher {
    config: SwipeConfig,
    machine: statig::blocking::StateMachine<SwipeHsm>,
}

impl SwipeMatcher {
    pub(super) fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            machine: SwipeHsm::new(config).state_machine(),
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
        self.machine = SwipeHsm::new(self.config).state_machine();
    }

    pub(super) fn direction(&self) -> Option<SwipeDirection> {
        self.machine.inner().direction
    }
}

struct SwipeHsm {
    config: SwipeConfig,
    down_ms: u64,
    start: Vec2,
    direction: Option<SwipeDirection>,
}

impl SwipeHsm {
    fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            down_ms: 0,
            start: Vec2::ZERO,
            direction: None,
        }
    }
}

#[state_machine(initial = "State::idle()")]
impl SwipeHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::Sample { now_ms, contacts } => {
                let Some(point) = contacts.primary else {
                    return Handled;
                };
                self.down_ms = *now_ms;
                self.start = point.position;
                self.direction = None;
                context.start(point.position);
                Transition(State::tracking())
            }
        }
    }

    #[state]
    fn tracking(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Sample { now_ms, contacts } => {
                if now_ms.saturating_sub(self.down_ms) > self.config.deadline_ms {
                    context.fail();
                    return Transition(State::idle());
                }
                let Some(point) = contacts.primary else {
                    // Lifted before covering the threshold distance.
                    context.fail();
                    return Transition(State::idle());
                };
                let displacement = point.position - self.start;
                if !displacement.exceeds(self.config.threshold) {
                    return Handled;
                }
                let direction = classify_direction(displacement);
                trace!(
                    direction = direction.as_str(),
                    dx = displacement.x,
                    dy = displacement.y,
                    "swipe classified"
                );
                self.direction = Some(direction);
                context.activate();
                context.swiped(direction);
                context.complete();
                Transition(State::idle())
            }
        }
    }
}
