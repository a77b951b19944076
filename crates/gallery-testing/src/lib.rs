//! Testing utilities for the touch gallery
//!
//! [`TouchRobot`] scripts finger sequences against anything implementing
//! [`TouchTarget`], stamping events with a virtual [`FrameClock`] and running
//! frames while time passes. [`RecordingListener`] keeps every gallery
//! notification for later assertions.
//!
//! [`FrameClock`]: gallery_core::FrameClock

pub mod recording;
pub mod robot;
pub mod robot_assertions;

pub use recording::RecordingListener;
pub use robot::*;

pub mod prelude {
    pub use crate::recording::RecordingListener;
    pub use crate::robot::*;
    pub use crate::robot_assertions::*;
}
