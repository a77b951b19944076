//! Motion for the gallery.
//!
//! [`Scroller`] reproduces platform scroll physics: duration based scrolls eased
//! by a viscous-fluid curve and velocity based flings that follow the Android
//! deceleration spline. [`RectAnimation`] tweens a rectangle towards a target
//! for zoom and bounce animations.

mod easing;
mod fling_spline;
mod rect_animation;
mod scroller;
mod viscous_fluid;

pub use easing::Easing;
pub use fling_spline::{FlingCalculator, FlingSpline, SplineSample, SCROLL_FRICTION};
pub use rect_animation::RectAnimation;
pub use scroller::{ScrollListener, ScrollMode, Scroller, DEFAULT_DURATION_MS};
pub use viscous_fluid::ViscousFluidInterpolator;
