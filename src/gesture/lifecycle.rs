use tracing::debug;

use super::types::{EventBuffer, GestureEvent, GestureProgress, SwipeDirection};
use crate::geometry::Vec2;

/// The four lifecycle flags of one attempt. Within an attempt each flag only
/// ever goes from `false` to `true`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LifecycleFlags {
    pub started: bool,
    pub activated: bool,
    pub ended: bool,
    pub completed: bool,
}

impl LifecycleFlags {
    pub fn phase(self) -> GesturePhase {
        match (self.started, self.activated, self.ended, self.completed) {
            (_, _, true, true) => GesturePhase::Completed,
            (_, _, true, false) => GesturePhase::Failed,
            (_, true, false, _) => GesturePhase::Activated,
            (true, false, false, _) => GesturePhase::Started,
            _ => GesturePhase::Idle,
        }
    }

    /// An attempt is in flight: started and not yet ended.
    pub fn is_active(self) -> bool {
        self.started && !self.ended
    }

    /// Marks every flag whose value differs from `before`.
    pub fn changed_since(self, before: Self) -> Self {
        Self {
            started: self.started != before.started,
            activated: self.activated != before.activated,
            ended: self.ended != before.ended,
            completed: self.completed != before.completed,
        }
    }

    pub fn any(self) -> bool {
        self.started || self.activated || self.ended || self.completed
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Started,
    Activated,
    Completed,
    Failed,
}

/// Shared lifecycle record. Every flag change pushes exactly one event.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Lifecycle {
    flags: LifecycleFlags,
}

impl Lifecycle {
    pub(crate) fn flags(&self) -> LifecycleFlags {
        self.flags
    }

    pub(crate) fn reset(&mut self) {
        self.flags = LifecycleFlags::default();
    }

    pub(crate) fn start(&mut self, events: &mut EventBuffer, start_position: Vec2) {
        if self.flags.started || self.flags.ended {
            return;
        }
        self.flags.started = true;
        debug!(x = start_position.x, y = start_position.y, "gesture started");
        events.push(GestureEvent::Started { start_position });
    }

    pub(crate) fn activate(&mut self, events: &mut EventBuffer) {
        if self.flags.activated || self.flags.ended {
            return;
        }
        self.flags.activated = true;
        debug!("gesture activated");
        events.push(GestureEvent::Activated);
    }

    pub(crate) fn progress(&mut self, events: &mut EventBuffer, progress: GestureProgress) {
        if self.flags.is_active() {
            events.push(GestureEvent::Progress(progress));
        }
    }

    pub(crate) fn swiped(&mut self, events: &mut EventBuffer, direction: SwipeDirection) {
        if self.flags.is_active() {
            events.push(GestureEvent::Swiped { direction });
        }
    }

    /// Successful end. Completion never skips activation.
    pub(crate) fn complete(&mut self, events: &mut EventBuffer) {
        if self.flags.ended {
            return;
        }
        self.activate(events);
        self.flags.completed = true;
        events.push(GestureEvent::Completed);
        self.flags.ended = true;
        debug!("gesture completed");
        events.push(GestureEvent::Ended { completed: true });
    }

    /// Unsuccessful end; a no-op once the attempt has ended.
    pub(crate) fn fail(&mut self, events: &mut EventBuffer) {
        if self.flags.ended {
            return;
        }
        self.flags.ended = true;
        debug!(started = self.flags.started, "gesture ended without completing");
        events.push(GestureEvent::Ended { completed: false });
    }
}
