//! Frame-stepped scroll and fling simulation.

use std::fmt;
use std::rc::Rc;

use gallery_core::Clock;

use crate::{FlingCalculator, FlingSpline, ViscousFluidInterpolator};

pub const DEFAULT_DURATION_MS: u64 = 250;

/// Per-step callback receiving the rounded `(dx, dy)` since the previous step.
pub type ScrollListener = Box<dyn FnMut(f32, f32, &Scroller)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollMode {
    Scroll,
    Fling,
}

/// Two axis scroll simulator.
///
/// Starting a motion only records its parameters. The owner then calls
/// [`Scroller::compute_scroll_offset`] once per frame until it returns `false`.
/// Positions are whole pixels: every step rounds to the nearest integer.
pub struct Scroller {
    clock: Rc<dyn Clock>,
    calculator: FlingCalculator,
    mode: ScrollMode,
    finished: bool,
    flywheel: bool,

    start_x: f32,
    start_y: f32,
    final_x: f32,
    final_y: f32,
    delta_x: f32,
    delta_y: f32,
    min_x: f32,
    max_x: f32,
    min_y: f32,
    max_y: f32,

    curr_x: f32,
    curr_y: f32,
    last_x: f32,
    last_y: f32,
    last_delta: (f32, f32),

    start_time_ms: u64,
    duration_ms: f32,
    duration_reciprocal: f32,

    curr_velocity: f32,
    distance: f32,

    on_scroll: Option<ScrollListener>,
}

impl Scroller {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            calculator: FlingCalculator::default(),
            mode: ScrollMode::Scroll,
            finished: true,
            flywheel: false,
            start_x: 0.0,
            start_y: 0.0,
            final_x: 0.0,
            final_y: 0.0,
            delta_x: 0.0,
            delta_y: 0.0,
            min_x: 0.0,
            max_x: 0.0,
            min_y: 0.0,
            max_y: 0.0,
            curr_x: 0.0,
            curr_y: 0.0,
            last_x: 0.0,
            last_y: 0.0,
            last_delta: (0.0, 0.0),
            start_time_ms: 0,
            duration_ms: 0.0,
            duration_reciprocal: 0.0,
            curr_velocity: 0.0,
            distance: 0.0,
            on_scroll: None,
        }
    }

    /// Lets a fling started mid-flight inherit the residual velocity when it
    /// points the same way.
    pub fn with_flywheel(mut self, flywheel: bool) -> Self {
        self.flywheel = flywheel;
        self
    }

    pub fn is_flywheel(&self) -> bool {
        self.flywheel
    }

    pub fn with_calculator(mut self, calculator: FlingCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn set_on_scroll(&mut self, listener: impl FnMut(f32, f32, &Scroller) + 'static) {
        self.on_scroll = Some(Box::new(listener));
    }

    pub fn clear_on_scroll(&mut self) {
        self.on_scroll = None;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn force_finished(&mut self, finished: bool) {
        self.finished = finished;
    }

    pub fn mode(&self) -> ScrollMode {
        self.mode
    }

    pub fn curr_x(&self) -> f32 {
        self.curr_x
    }

    pub fn curr_y(&self) -> f32 {
        self.curr_y
    }

    pub fn start_x(&self) -> f32 {
        self.start_x
    }

    pub fn start_y(&self) -> f32 {
        self.start_y
    }

    pub fn final_x(&self) -> f32 {
        self.final_x
    }

    pub fn final_y(&self) -> f32 {
        self.final_y
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    /// Delta reported by the most recent step.
    pub fn last_delta(&self) -> (f32, f32) {
        self.last_delta
    }

    /// Current fling speed in px/s. Duration based scrolls report zero.
    pub fn curr_velocity(&self) -> f32 {
        match self.mode {
            ScrollMode::Fling => self.curr_velocity,
            ScrollMode::Scroll => 0.0,
        }
    }

    pub fn time_passed(&self) -> u64 {
        self.clock.now_millis().saturating_sub(self.start_time_ms)
    }

    /// Advances to the current clock time.
    ///
    /// Returns `true` while motion continues. Every call reports the step's
    /// delta to the listener, including a `(0, 0)` step once finished.
    pub fn compute_scroll_offset(&mut self) -> bool {
        if self.finished {
            self.last_delta = (0.0, 0.0);
            self.notify(0.0, 0.0);
            return false;
        }

        let time_passed = self.time_passed() as f32;
        if time_passed < self.duration_ms {
            match self.mode {
                ScrollMode::Scroll => {
                    let x = ViscousFluidInterpolator::interpolation(
                        time_passed * self.duration_reciprocal,
                    );
                    self.curr_x = self.start_x + (x * self.delta_x).round();
                    self.curr_y = self.start_y + (x * self.delta_y).round();
                }
                ScrollMode::Fling => {
                    let sample = FlingSpline::sample(time_passed / self.duration_ms);
                    self.curr_velocity =
                        sample.velocity_coefficient * self.distance / self.duration_ms * 1000.0;

                    let coef = sample.distance_coefficient;
                    self.curr_x = self.start_x + (coef * (self.final_x - self.start_x)).round();
                    self.curr_y = self.start_y + (coef * (self.final_y - self.start_y)).round();
                    // A fling may start outside its bounds; it is then allowed
                    // to travel back in from where it began.
                    self.curr_x = self.curr_x.clamp(
                        self.min_x.min(self.start_x),
                        self.max_x.max(self.start_x),
                    );
                    self.curr_y = self.curr_y.clamp(
                        self.min_y.min(self.start_y),
                        self.max_y.max(self.start_y),
                    );

                    if self.curr_x == self.final_x && self.curr_y == self.final_y {
                        self.finished = true;
                    }
                }
            }
        } else {
            self.curr_x = self.final_x;
            self.curr_y = self.final_y;
            self.finished = true;
        }

        let dx = self.curr_x - self.last_x;
        let dy = self.curr_y - self.last_y;
        self.last_x = self.curr_x;
        self.last_y = self.curr_y;
        self.last_delta = (dx, dy);
        self.notify(dx, dy);

        !(dx == 0.0 && dy == 0.0 && self.finished)
    }

    fn notify(&mut self, dx: f32, dy: f32) {
        if let Some(mut listener) = self.on_scroll.take() {
            listener(dx, dy, self);
            if self.on_scroll.is_none() {
                self.on_scroll = Some(listener);
            }
        }
    }

    pub fn start_scroll_default(&mut self, start_x: f32, start_y: f32, dx: f32, dy: f32) {
        self.start_scroll(start_x, start_y, dx, dy, DEFAULT_DURATION_MS);
    }

    /// Eased motion from `(start_x, start_y)` by `(dx, dy)`. A zero duration
    /// lands on the target at the next step.
    pub fn start_scroll(&mut self, start_x: f32, start_y: f32, dx: f32, dy: f32, duration_ms: u64) {
        self.mode = ScrollMode::Scroll;
        self.finished = false;
        self.duration_ms = duration_ms as f32;
        self.duration_reciprocal = if duration_ms == 0 {
            0.0
        } else {
            1.0 / self.duration_ms
        };
        self.start_time_ms = self.clock.now_millis();
        self.start_x = start_x;
        self.start_y = start_y;
        self.final_x = start_x + dx;
        self.final_y = start_y + dy;
        self.delta_x = dx;
        self.delta_y = dy;
        self.last_x = start_x;
        self.last_y = start_y;
    }

    /// Ballistic motion from `(start_x, start_y)` with velocities in px/s.
    /// The landing position is pinned to the given bounds.
    #[allow(clippy::too_many_arguments)]
    pub fn fling(
        &mut self,
        start_x: f32,
        start_y: f32,
        velocity_x: f32,
        velocity_y: f32,
        min_x: f32,
        max_x: f32,
        min_y: f32,
        max_y: f32,
    ) {
        let (mut velocity_x, mut velocity_y) = (velocity_x, velocity_y);

        if self.flywheel && !self.finished && self.mode == ScrollMode::Fling {
            let old_velocity = self.curr_velocity();
            let dx = self.final_x - self.start_x;
            let dy = self.final_y - self.start_y;
            let hypot = dx.hypot(dy);
            if hypot > 0.0 {
                let old_velocity_x = dx / hypot * old_velocity;
                let old_velocity_y = dy / hypot * old_velocity;
                if sign(velocity_x) == sign(old_velocity_x)
                    && sign(velocity_y) == sign(old_velocity_y)
                {
                    velocity_x += old_velocity_x;
                    velocity_y += old_velocity_y;
                }
            }
        }

        self.mode = ScrollMode::Fling;
        self.finished = false;

        let velocity = velocity_x.hypot(velocity_y);
        self.curr_velocity = velocity;
        self.duration_ms = self.calculator.fling_duration(velocity);
        self.start_time_ms = self.clock.now_millis();
        self.start_x = start_x;
        self.start_y = start_y;

        let (coeff_x, coeff_y) = if velocity == 0.0 {
            (1.0, 1.0)
        } else {
            (velocity_x / velocity, velocity_y / velocity)
        };

        let total_distance = self.calculator.fling_distance(velocity);
        self.distance = total_distance;

        self.min_x = min_x;
        self.max_x = max_x;
        self.min_y = min_y;
        self.max_y = max_y;

        self.final_x = (start_x + (total_distance * coeff_x).round()).min(max_x).max(min_x);
        self.final_y = (start_y + (total_distance * coeff_y).round()).min(max_y).max(min_y);
        self.delta_x = self.final_x - start_x;
        self.delta_y = self.final_y - start_y;

        self.last_x = start_x;
        self.last_y = start_y;

        log::trace!(
            "fling v={velocity:.1} duration={:.0}ms distance={total_distance:.1} final=({}, {})",
            self.duration_ms,
            self.final_x,
            self.final_y
        );
    }

    /// Jumps to the final position. The jump is not reported as a delta.
    pub fn abort_animation(&mut self) {
        self.curr_x = self.final_x;
        self.curr_y = self.final_y;
        self.finished = true;
    }

    /// Makes the motion last `extend_ms` longer than the time already passed.
    pub fn extend_duration(&mut self, extend_ms: u64) {
        self.duration_ms = (self.time_passed() + extend_ms) as f32;
        self.duration_reciprocal = if self.duration_ms > 0.0 {
            1.0 / self.duration_ms
        } else {
            0.0
        };
        self.finished = false;
    }

    pub fn set_final_x(&mut self, final_x: f32) {
        self.final_x = final_x;
        self.delta_x = final_x - self.start_x;
        self.finished = false;
    }

    pub fn set_final_y(&mut self, final_y: f32) {
        self.final_y = final_y;
        self.delta_y = final_y - self.start_y;
        self.finished = false;
    }
}

/// Like `f32::signum`, but zero (of either sign) maps to zero.
fn sign(value: f32) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

impl fmt::Debug for Scroller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scroller")
            .field("mode", &self.mode)
            .field("finished", &self.finished)
            .field("curr", &(self.curr_x, self.curr_y))
            .field("final", &(self.final_x, self.final_y))
            .field("duration_ms", &self.duration_ms)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/scroller_tests.rs"]
mod tests;
