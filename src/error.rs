pub type Result<T> = core::result::Result<T, Error>;

/// Configuration errors. Recognition failures are never reported here; they
/// surface as an `ended` lifecycle transition without `completed`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("gesture bounds must have a positive, finite area (got {width}x{height})")]
    InvalidBounds { width: f32, height: f32 },

    #[error("{name} threshold must be finite and non-negative")]
    InvalidThreshold { name: &'static str },

    #[error("{name} must be greater than zero")]
    InvalidDuration { name: &'static str },

    #[error("node-based gesture needs at least one node")]
    EmptyNodeSequence,

    #[error("node {index} is invalid: {reason}")]
    InvalidNode { index: usize, reason: &'static str },

    #[error("tablet geometry '{name}' is invalid: {reason}")]
    InvalidGeometry { name: String, reason: &'static str },

    #[error("no gesture registered for handle {0}")]
    UnknownHandle(u32),
}
