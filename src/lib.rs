//! Multi-touch gesture recognition for tablet digitizers.
//!
//! Touch frames in device units go into a [`GestureDispatcher`], which
//! converts them to millimetres, routes each contact to the gesture instances
//! whose bounds contain it and returns the lifecycle events they raise.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod gesture;
pub mod tablet;
pub mod trace;

pub use config::{GestureConfig, GestureKindConfig};
pub use dispatcher::{BindingId, DispatchOutput, DispatchedEvent, GestureDispatcher, GestureHandle};
pub use error::{Error, Result};
pub use frame::TouchFrame;
pub use geometry::{Area, ContactId, TouchPoint, Vec2};
pub use gesture::{
    Gesture, GestureEvent, GestureOutput, GesturePhase, GestureProgress, GestureType,
    LifecycleFlags, SwipeDirection,
};
pub use tablet::{DigitizerSpec, TabletGeometry, UnitConverter};
