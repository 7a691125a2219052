use crate::{
    frame::MAX_TOUCHES,
    geometry::{ContactId, TouchPoint},
};

/// The tracked contacts of one gesture for the current frame, in claim order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct ContactSample {
    pub(crate) primary: Option<TouchPoint>,
    pub(crate) secondary: Option<TouchPoint>,
}

impl ContactSample {
    pub(crate) fn pair(&self) -> Option<(TouchPoint, TouchPoint)> {
        self.primary.zip(self.secondary)
    }
}

/// Follows contact identity across frames for one gesture instance.
///
/// Contacts that took part in a finished attempt are spent and stay ignored by
/// this gesture until they lift.
#[derive(Clone, Debug)]
pub(crate) struct ContactTracker {
    capacity: usize,
    tracked: heapless::Vec<ContactId, 2>,
    spent: heapless::Vec<ContactId, MAX_TOUCHES>,
}

impl ContactTracker {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.clamp(1, 2),
            tracked: heapless::Vec::new(),
            spent: heapless::Vec::new(),
        }
    }

    pub(crate) fn tracked(&self) -> &[ContactId] {
        &self.tracked
    }

    pub(crate) fn select(&mut self, points: &[TouchPoint]) -> ContactSample {
        self.spent.retain(|id| points.iter().any(|p| p.id == *id));

        for point in points {
            if self.tracked.len() >= self.capacity {
                break;
            }
            if self.tracked.contains(&point.id) || self.spent.contains(&point.id) {
                continue;
            }
            let _ = self.tracked.push(point.id);
        }

        let find = |slot: usize| {
            self.tracked
                .get(slot)
                .and_then(|id| points.iter().copied().find(|p| p.id == *id))
        };
        ContactSample {
            primary: find(0),
            secondary: find(1),
        }
    }

    /// Drop tracked contacts that are gone. Used while no attempt is in
    /// flight, so a contact that never qualified does not block a new one.
    pub(crate) fn release_lifted(&mut self, points: &[TouchPoint]) {
        self.tracked.retain(|id| points.iter().any(|p| p.id == *id));
    }

    /// The attempt is over: everything tracked becomes spent, and so does any
    /// other contact still down, so a bystander finger is not claimed as the
    /// start of the next attempt.
    pub(crate) fn retire(&mut self, present: &[TouchPoint]) {
        let ids = self.tracked.iter().copied().chain(present.iter().map(|p| p.id));
        for id in ids {
            if !self.spent.contains(&id) {
                let _ = self.spent.push(id);
            }
        }
        self.tracked.clear();
    }
}
