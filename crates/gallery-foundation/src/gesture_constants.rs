//! Thresholds shared by gesture classification.
//!
//! Distances are in logical pixels, times in milliseconds.

/// Longest press that can still count as a tap, and the window in which a
/// second tap turns into a double tap.
///
/// A single tap is only confirmed once this much time has passed after the
/// release without another tap following.
pub const TAP_UP_TIME_THRESHOLD_MS: u64 = 400;

/// Displacement on either axis at which a press stops being a tap.
pub const TAP_MOVE_THRESHOLD: f32 = 10.0;

/// Displacement on either axis before single-finger moves are reported.
///
/// Some digitizers report a stationary finger as moving by a pixel or so;
/// without this slop every tap would also look like a tiny drag.
pub const MOVE_THRESHOLD: f32 = 2.0;

/// Time a finger must rest before a long press fires.
pub const LONG_PRESS_TIMEOUT_MS: u64 = 600;

/// Intervals larger than this are assumed to be nanoseconds.
///
/// Some platforms timestamp touches in nanoseconds and others in
/// milliseconds; no real gesture lasts a million milliseconds.
pub const NANOS_INTERVAL_CUTOFF: u64 = 1_000_000;
