use std::sync::LazyLock;

const VISCOUS_FLUID_SCALE: f32 = 8.0;

/// `(normalize, offset)` so the curve maps 0 to 0 and 1 to 1.
static NORMALIZATION: LazyLock<(f32, f32)> = LazyLock::new(|| {
    let normalize = 1.0 / viscous_fluid(1.0);
    let offset = 1.0 - normalize * viscous_fluid(1.0);
    (normalize, offset)
});

fn viscous_fluid(x: f32) -> f32 {
    let x = x * VISCOUS_FLUID_SCALE;
    if x < 1.0 {
        x - (1.0 - (-x).exp())
    } else {
        let start = std::f32::consts::E.recip();
        let tail = 1.0 - (1.0 - x).exp();
        start + tail * (1.0 - start)
    }
}

/// Ease-out curve for duration based scrolls: a quadratic-like start followed
/// by an exponential approach to rest, so velocity reaches zero at the end.
pub struct ViscousFluidInterpolator;

impl ViscousFluidInterpolator {
    pub fn interpolation(input: f32) -> f32 {
        let (normalize, offset) = *NORMALIZATION;
        let interpolated = normalize * viscous_fluid(input);
        if interpolated > 0.0 {
            interpolated + offset
        } else {
            interpolated
        }
    }
}
