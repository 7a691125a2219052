#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    geometry::{Area, Vec2},
    gesture::{node, GestureNode, GestureType},
};

// Thresholds are in millimetres: the dispatcher converts device units before any
// gesture sees a point.
pub const TAP_MAX_MS: u64 = 280;
pub const TAP_MAX_TRAVEL_MM: f32 = 3.0;
pub const HOLD_MS: u64 = 700;
pub const HOLD_MAX_TRAVEL_MM: f32 = 3.0;
pub const SWIPE_MIN_DISTANCE_MM: f32 = 20.0;
pub const SWIPE_MAX_DURATION_MS: u64 = 1_000;
pub const PAN_MIN_DISTANCE_MM: f32 = 5.0;
pub const PINCH_MIN_SCALE_DELTA: f32 = 0.1;
pub const ROTATE_MIN_ANGLE_DEG: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct TapConfig {
    pub threshold: Vec2,
    pub deadline_ms: u64,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            threshold: Vec2::new(TAP_MAX_TRAVEL_MM, TAP_MAX_TRAVEL_MM),
            deadline_ms: TAP_MAX_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct HoldConfig {
    pub threshold: Vec2,
    pub hold_ms: u64,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            threshold: Vec2::new(HOLD_MAX_TRAVEL_MM, HOLD_MAX_TRAVEL_MM),
            hold_ms: HOLD_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct SwipeConfig {
    pub threshold: Vec2,
    pub deadline_ms: u64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold: Vec2::new(SWIPE_MIN_DISTANCE_MM, SWIPE_MIN_DISTANCE_MM),
            deadline_ms: SWIPE_MAX_DURATION_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct PanConfig {
    pub threshold: Vec2,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            threshold: Vec2::new(PAN_MIN_DISTANCE_MM, PAN_MIN_DISTANCE_MM),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct PinchConfig {
    /// Minimum |scale - 1| before the pinch activates.
    pub scale_threshold: f32,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            scale_threshold: PINCH_MIN_SCALE_DELTA,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct RotateConfig {
    pub angle_threshold_deg: f32,
}

impl Default for RotateConfig {
    fn default() -> Self {
        Self {
            angle_threshold_deg: ROTATE_MIN_ANGLE_DEG,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct NodeBasedConfig {
    pub nodes: Vec<GestureNode>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum GestureKindConfig {
    Tap(TapConfig),
    Hold(HoldConfig),
    Swipe(SwipeConfig),
    Pan(PanConfig),
    Pinch(PinchConfig),
    Rotate(RotateConfig),
    NodeBased(NodeBasedConfig),
}

impl GestureKindConfig {
    pub fn gesture_type(&self) -> GestureType {
        match self {
            Self::Tap(_) => GestureType::Tap,
            Self::Hold(_) => GestureType::Hold,
            Self::Swipe(_) => GestureType::Swipe,
            Self::Pan(_) => GestureType::Pan,
            Self::Pinch(_) => GestureType::Pinch,
            Self::Rotate(_) => GestureType::Rotate,
            Self::NodeBased(_) => GestureType::NodeBased,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct GestureConfig {
    pub bounds: Area,
    /// Relative mode: points are delivered in bounds-local coordinates and a
    /// contact leaving the bounds counts as lifted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub restrained: bool,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: GestureKindConfig,
}

impl GestureConfig {
    pub fn new(bounds: Area, kind: GestureKindConfig) -> Self {
        Self {
            bounds,
            restrained: false,
            kind,
        }
    }

    pub fn restrained(self, restrained: bool) -> Self {
        Self { restrained, ..self }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.bounds.is_valid() {
            return Err(Error::InvalidBounds {
                width: self.bounds.width,
                height: self.bounds.height,
            });
        }
        match &self.kind {
            GestureKindConfig::Tap(cfg) => {
                check_vec_threshold("tap", cfg.threshold)?;
                check_duration("tap deadline", cfg.deadline_ms)
            }
            GestureKindConfig::Hold(cfg) => {
                check_vec_threshold("hold", cfg.threshold)?;
                check_duration("hold duration", cfg.hold_ms)
            }
            GestureKindConfig::Swipe(cfg) => {
                check_vec_threshold("swipe", cfg.threshold)?;
                check_duration("swipe deadline", cfg.deadline_ms)
            }
            GestureKindConfig::Pan(cfg) => check_vec_threshold("pan", cfg.threshold),
            GestureKindConfig::Pinch(cfg) => check_scalar_threshold("pinch", cfg.scale_threshold),
            GestureKindConfig::Rotate(cfg) => {
                check_scalar_threshold("rotate", cfg.angle_threshold_deg)
            }
            GestureKindConfig::NodeBased(cfg) => node::validate_nodes(&cfg.nodes),
        }
    }
}

fn check_scalar_threshold(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidThreshold { name })
    }
}

fn check_vec_threshold(name: &'static str, value: Vec2) -> Result<()> {
    check_scalar_threshold(name, value.x)?;
    check_scalar_threshold(name, value.y)
}

fn check_duration(name: &'static str, value_ms: u64) -> Result<()> {
    if value_ms == 0 {
        Err(Error::InvalidDuration { name })
    } else {
        Ok(())
    }
}
