//! Assertion helpers for gallery tests.

use gallery_graphics::Transform;

/// Assert that a value is within `tolerance` of the expected one.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that a transform matches scale and translation within `tolerance`.
pub fn assert_transform_approx_eq(
    actual: Transform,
    expected: Transform,
    tolerance: f32,
    msg: &str,
) {
    assert_approx_eq(actual.scale, expected.scale, tolerance, &format!("{} - scale", msg));
    assert_approx_eq(
        actual.translate_x,
        expected.translate_x,
        tolerance,
        &format!("{} - translate_x", msg),
    );
    assert_approx_eq(
        actual.translate_y,
        expected.translate_y,
        tolerance,
        &format!("{} - translate_y", msg),
    );
}
