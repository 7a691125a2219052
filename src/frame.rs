use tracing::warn;

use crate::geometry::{ContactId, TouchPoint};

pub const MAX_TOUCHES: usize = 10;
pub const RAW_REPORT_CAPACITY: usize = 64;

pub type TouchPoints = heapless::Vec<TouchPoint, MAX_TOUCHES>;

/// One synchronous sample of every active contact. A contact missing from a
/// frame has lifted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TouchFrame {
    touches: TouchPoints,
    raw: heapless::Vec<u8, RAW_REPORT_CAPACITY>,
}

impl TouchFrame {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = TouchPoint>,
    {
        let mut frame = Self::default();
        for point in points {
            frame.push(point);
        }
        frame
    }

    /// Attach the raw report bytes. Reports longer than the capacity are
    /// truncated; they are only kept for diagnostics.
    pub fn with_raw(mut self, raw: &[u8]) -> Self {
        let len = raw.len().min(RAW_REPORT_CAPACITY);
        if len < raw.len() {
            warn!(len = raw.len(), "raw touch report truncated");
        }
        self.raw.clear();
        let _ = self.raw.extend_from_slice(&raw[..len]);
        self
    }

    fn push(&mut self, point: TouchPoint) {
        if self.contains(point.id) {
            warn!(id = point.id, "duplicate contact id in frame, keeping first");
            return;
        }
        if self.touches.push(point).is_err() {
            warn!(id = point.id, capacity = MAX_TOUCHES, "touch frame full, contact dropped");
        }
    }

    pub fn touches(&self) -> &[TouchPoint] {
        &self.touches
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.touches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }

    pub fn contains(&self, id: ContactId) -> bool {
        self.touches.iter().any(|p| p.id == id)
    }

    pub fn point(&self, id: ContactId) -> Option<TouchPoint> {
        self.touches.iter().copied().find(|p| p.id == id)
    }
}
