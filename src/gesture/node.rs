#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    geometry::{Area, Vec2},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(rename_all = "snake_case"))]
pub enum NodeShape {
    #[default]
    Rectangle,
    /// Ellipse inscribed in the node's size box.
    Circle,
}

/// One spatial-temporal waypoint of a node-based gesture. Timestamps are
/// offsets from the moment the first node was entered.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct GestureNode {
    pub index: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shape: NodeShape,
    pub position: Vec2,
    pub size: Vec2,
    #[cfg_attr(feature = "serde", serde(default))]
    pub timestamp_ms: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub timestamp_tolerance_ms: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_gesture_start: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_gesture_end: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_hold: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hold_duration_ms: u64,
}

impl GestureNode {
    pub fn new(index: usize, shape: NodeShape, position: Vec2, size: Vec2) -> Self {
        Self {
            index,
            shape,
            position,
            size,
            timestamp_ms: 0,
            timestamp_tolerance_ms: 0,
            is_gesture_start: false,
            is_gesture_end: false,
            is_hold: false,
            hold_duration_ms: 0,
        }
    }

    pub fn at(self, timestamp_ms: u64, tolerance_ms: u64) -> Self {
        Self {
            timestamp_ms,
            timestamp_tolerance_ms: tolerance_ms,
            ..self
        }
    }

    pub fn hold(self, duration_ms: u64) -> Self {
        Self {
            is_hold: true,
            hold_duration_ms: duration_ms,
            ..self
        }
    }

    pub fn start(self) -> Self {
        Self {
            is_gesture_start: true,
            ..self
        }
    }

    pub fn end(self) -> Self {
        Self {
            is_gesture_end: true,
            ..self
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        match self.shape {
            NodeShape::Rectangle => Area::new(self.position, self.size.x, self.size.y).contains(point),
            NodeShape::Circle => {
                let radii = self.size / 2.0;
                let d = (point - self.position).component_div(radii);
                d.length_squared() <= 1.0
            }
        }
    }

    pub fn is_on_time(&self, elapsed_ms: u64) -> bool {
        elapsed_ms.abs_diff(self.timestamp_ms) <= self.timestamp_tolerance_ms
    }

    /// Inside the shape and inside the timestamp window. Hold dwell is tracked
    /// by the sequencer across frames.
    pub fn is_within(&self, point: Vec2, elapsed_ms: u64) -> bool {
        self.contains(point) && self.is_on_time(elapsed_ms)
    }

    /// Last elapsed time at which this node can still be entered.
    pub fn window_end_ms(&self) -> u64 {
        self.timestamp_ms.saturating_add(self.timestamp_tolerance_ms)
    }
}

pub(crate) fn validate_nodes(nodes: &[GestureNode]) -> Result<()> {
    if nodes.is_empty() {
        return Err(Error::EmptyNodeSequence);
    }
    let last = nodes.len() - 1;
    let mut previous_ms = 0;
    for (index, node) in nodes.iter().enumerate() {
        let invalid = |reason| Err(Error::InvalidNode { index, reason });
        if node.index != index {
            return invalid("index does not match its position in the sequence");
        }
        if !node.position.is_finite() {
            return invalid("position must be finite");
        }
        if !node.size.is_finite() || node.size.x <= 0.0 || node.size.y <= 0.0 {
            return invalid("size must be positive");
        }
        if index == 0 && !node.is_on_time(0) {
            return invalid("first node must be reachable at time zero");
        }
        if index > 0 && node.is_gesture_start {
            return invalid("only the first node can start the gesture");
        }
        if index < last && node.is_gesture_end {
            return invalid("only the last node can end the gesture");
        }
        if node.timestamp_ms < previous_ms {
            return invalid("timestamps must not decrease");
        }
        previous_ms = node.timestamp_ms;
    }
    Ok(())
}
