use std::cell::Cell;
use std::rc::Rc;

use crate::{Clock, NANOS_PER_MILLI};

/// Virtual clock advanced once per display frame.
///
/// Clones share the same time cell: the host (or a test) advances one handle
/// and every scroller and timeout holding another handle observes the new
/// frame time. Time never moves backwards.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    nanos: Rc<Cell<u64>>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at_millis(millis: u64) -> Self {
        let clock = Self::new();
        clock.advance_to(millis * NANOS_PER_MILLI);
        clock
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.nanos.get()
    }

    pub fn frame_time_millis(&self) -> u64 {
        self.nanos.get() / NANOS_PER_MILLI
    }

    /// Moves the clock to `frame_time_nanos`. Earlier times are ignored.
    pub fn advance_to(&self, frame_time_nanos: u64) {
        if frame_time_nanos > self.nanos.get() {
            self.nanos.set(frame_time_nanos);
        }
    }

    pub fn advance_by_millis(&self, millis: u64) {
        self.nanos
            .set(self.nanos.get().saturating_add(millis * NANOS_PER_MILLI));
    }
}

impl Clock for FrameClock {
    fn now_nanos(&self) -> u64 {
        self.nanos.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_time() {
        let clock = FrameClock::new();
        let handle = clock.clone();
        clock.advance_by_millis(16);
        assert_eq!(handle.frame_time_millis(), 16);
        assert_eq!(handle.now_nanos(), 16 * NANOS_PER_MILLI);
    }

    #[test]
    fn never_moves_backwards() {
        let clock = FrameClock::starting_at_millis(100);
        clock.advance_to(5);
        assert_eq!(clock.frame_time_millis(), 100);
        clock.advance_to(120 * NANOS_PER_MILLI);
        assert_eq!(clock.now_millis(), 120);
    }
}
