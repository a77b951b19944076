//! Runtime services shared by the gallery crates: time sources, the frame
//! tick scheduler and the injected logging configuration.

mod config;
mod frame_clock;
mod platform;
mod scheduler;

pub use config::LogConfig;
pub use frame_clock::FrameClock;
pub use platform::{Clock, SystemClock};
pub use scheduler::{DelayedTask, FrameScheduler};

pub const NANOS_PER_MILLI: u64 = 1_000_000;

pub mod prelude {
    pub use crate::{Clock, DelayedTask, FrameClock, FrameScheduler, LogConfig, SystemClock};
}
