#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::geometry::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(rename_all = "snake_case"))]
pub enum GestureType {
    Tap,
    Hold,
    Swipe,
    Pan,
    Pinch,
    Rotate,
    NodeBased,
}

impl GestureType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::Hold => "hold",
            Self::Swipe => "swipe",
            Self::Pan => "pan",
            Self::Pinch => "pinch",
            Self::Rotate => "rotate",
            Self::NodeBased => "node_based",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl SwipeDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::UpRight => "up_right",
            Self::Right => "right",
            Self::DownRight => "down_right",
            Self::Down => "down",
            Self::DownLeft => "down_left",
            Self::Left => "left",
            Self::UpLeft => "up_left",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureProgress {
    Node { last_completed_node_index: usize },
    Pan { delta: Vec2, total: Vec2 },
    Pinch { scale: f32, delta: f32 },
    Rotate { angle_deg: f32, delta_deg: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    Started { start_position: Vec2 },
    Activated,
    Progress(GestureProgress),
    Swiped { direction: SwipeDirection },
    Completed,
    Ended { completed: bool },
}

/// Events raised by one call, in emission order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventBuffer {
    len: usize,
    slots: [Option<GestureEvent>; Self::MAX],
}

impl EventBuffer {
    // started, progress, activated, swiped, completed, ended
    pub const MAX: usize = 6;

    pub const fn new() -> Self {
        Self {
            len: 0,
            slots: [None; Self::MAX],
        }
    }

    pub fn push(&mut self, event: GestureEvent) {
        if self.len >= Self::MAX {
            tracing::warn!(?event, "gesture event buffer full, event dropped");
            return;
        }
        self.slots[self.len] = Some(event);
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &GestureEvent> {
        self.slots[..self.len].iter().filter_map(Option::as_ref)
    }

    pub fn contains(&self, predicate: impl Fn(&GestureEvent) -> bool) -> bool {
        self.iter().any(predicate)
    }
}

impl Default for EventBuffer {
    fn default() -> Self {
        Self::new()
    }
}
