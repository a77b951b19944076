//! Deceleration curve and closed-form fling metrics.
//!
//! Same physics as `android.widget.Scroller`: a fling's duration and distance
//! follow analytically from its initial speed, and the position over time is
//! read from a precomputed spline.

use std::sync::LazyLock;

/// Friction applied to flings, twice the platform default for a snappier stop.
pub const SCROLL_FRICTION: f32 = 0.03;

const INFLECTION: f32 = 0.35;
const START_TENSION: f32 = 0.5;
const END_TENSION: f32 = 1.0;
const P1: f32 = START_TENSION * INFLECTION;
const P2: f32 = 1.0 - END_TENSION * (1.0 - INFLECTION);

const NB_SAMPLES: usize = 100;

const GRAVITY_EARTH: f32 = 9.80665;
const INCHES_PER_METER: f32 = 39.37;
/// `ln(0.78) / ln(0.9)`
const DECELERATION_RATE: f64 = 2.358_201_6;
/// Physical coefficient tuning, shared with the platform scroller.
const PHYSICAL_FRICTION: f32 = 0.84;

/// Normalized distance travelled per normalized time sample.
static SPLINE_POSITIONS: LazyLock<[f32; NB_SAMPLES + 1]> = LazyLock::new(|| {
    let mut positions = [0.0f32; NB_SAMPLES + 1];
    let mut x_min = 0.0f32;

    for (i, position) in positions.iter_mut().take(NB_SAMPLES).enumerate() {
        let alpha = i as f32 / NB_SAMPLES as f32;

        // Bisect for the curve parameter whose time component equals alpha.
        let mut x_max = 1.0f32;
        let (x, coef) = loop {
            let x_mid = x_min + (x_max - x_min) / 2.0;
            let c = 3.0 * x_mid * (1.0 - x_mid);
            let tx = c * ((1.0 - x_mid) * P1 + x_mid * P2) + x_mid * x_mid * x_mid;
            if (tx - alpha).abs() < 1e-5 {
                break (x_mid, c);
            }
            if tx > alpha {
                x_max = x_mid;
            } else {
                x_min = x_mid;
            }
        };
        *position = coef * ((1.0 - x) * START_TENSION + x) + x * x * x;
    }

    positions[NB_SAMPLES] = 1.0;
    positions
});

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplineSample {
    /// Fraction of the total fling distance covered, `0.0..=1.0`.
    pub distance_coefficient: f32,
    /// Slope of the curve at this point.
    pub velocity_coefficient: f32,
}

pub struct FlingSpline;

impl FlingSpline {
    /// Samples the curve at a normalized time in `[0, 1]`.
    pub fn sample(time: f32) -> SplineSample {
        let clamped = time.clamp(0.0, 1.0);
        let index = (NB_SAMPLES as f32 * clamped) as usize;
        if index >= NB_SAMPLES {
            return SplineSample {
                distance_coefficient: 1.0,
                velocity_coefficient: 0.0,
            };
        }

        let t_inf = index as f32 / NB_SAMPLES as f32;
        let t_sup = (index + 1) as f32 / NB_SAMPLES as f32;
        let d_inf = SPLINE_POSITIONS[index];
        let d_sup = SPLINE_POSITIONS[index + 1];
        let velocity = (d_sup - d_inf) / (t_sup - t_inf);
        SplineSample {
            distance_coefficient: d_inf + (clamped - t_inf) * velocity,
            velocity_coefficient: velocity,
        }
    }
}

/// Duration and distance of a fling for a given initial speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingCalculator {
    friction: f32,
    physical_coefficient: f32,
}

impl FlingCalculator {
    /// `density` is the display density relative to 160 ppi.
    pub fn new(friction: f32, density: f32) -> Self {
        Self {
            friction,
            physical_coefficient: compute_deceleration(PHYSICAL_FRICTION, density),
        }
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// Linear deceleration for the given friction, in px/s².
    pub fn deceleration(&self, density: f32) -> f32 {
        compute_deceleration(self.friction, density)
    }

    fn spline_deceleration(&self, velocity: f32) -> f64 {
        (INFLECTION as f64 * velocity.abs() as f64
            / (self.friction as f64 * self.physical_coefficient as f64))
            .ln()
    }

    /// Flight time in milliseconds. Zero velocity yields zero.
    pub fn fling_duration(&self, velocity: f32) -> f32 {
        let l = self.spline_deceleration(velocity);
        (1000.0 * (l / (DECELERATION_RATE - 1.0)).exp()) as f32
    }

    /// Unsigned travel distance in pixels. Zero velocity yields zero.
    pub fn fling_distance(&self, velocity: f32) -> f32 {
        let l = self.spline_deceleration(velocity);
        let decel_minus_one = DECELERATION_RATE - 1.0;
        (self.friction as f64
            * self.physical_coefficient as f64
            * (DECELERATION_RATE / decel_minus_one * l).exp()) as f32
    }
}

impl Default for FlingCalculator {
    fn default() -> Self {
        Self::new(SCROLL_FRICTION, 1.0)
    }
}

fn compute_deceleration(friction: f32, density: f32) -> f32 {
    GRAVITY_EARTH * INCHES_PER_METER * density * 160.0 * friction
}
