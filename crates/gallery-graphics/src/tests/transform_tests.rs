use super::*;

const EPSILON: f32 = 1e-3;

fn sample_rects() -> Vec<Rect> {
    vec![
        Rect::new(0.0, 0.0, 300.0, 500.0),
        Rect::new(-40.0, 12.5, 260.0, 180.0),
        Rect::new(100.0, 100.0, 101.0, 400.0),
        Rect::new(-1000.0, -750.0, 1000.0, 750.0),
    ]
}

fn sample_transforms() -> Vec<Transform> {
    vec![
        Transform::IDENTITY,
        Transform::new(2.0, 0.0, 0.0),
        Transform::new(0.5, 30.0, -12.0),
        Transform::new(3.0, -7.5, 44.0),
        Transform::new(1.25, 0.0, 100.0),
    ]
}

fn assert_rect_near(actual: Rect, expected: Rect) {
    assert!(
        actual.approx_eq(&expected, EPSILON),
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn fit_center_reduces_height_for_wide_content() {
    let container = Rect::new(0.0, 0.0, 300.0, 600.0);
    let fitted = fit_center_rect(2.0, container).unwrap();
    assert_rect_near(fitted, Rect::new(0.0, 225.0, 300.0, 375.0));
}

#[test]
fn fit_center_reduces_width_for_tall_content() {
    let container = Rect::new(0.0, 0.0, 400.0, 200.0);
    let fitted = fit_center_rect(0.5, container).unwrap();
    assert_rect_near(fitted, Rect::new(150.0, 0.0, 250.0, 200.0));
}

#[test]
fn fit_center_on_empty_container_is_empty() {
    let fitted = fit_center_rect(1.5, Rect::new(10.0, 10.0, 10.0, 10.0)).unwrap();
    assert!(fitted.is_empty());
    assert_eq!(fitted.center(), Point::new(10.0, 10.0));
}

#[test]
fn fit_center_rejects_bad_ratio() {
    let container = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert_eq!(
        fit_center_rect(0.0, container),
        Err(InvalidGeometry::AspectRatio(0.0))
    );
    assert!(fit_center_rect(f32::NAN, container).is_err());
}

#[test]
fn centered_scaling_moves_center_by_scaled_translation() {
    for rect in sample_rects() {
        for transform in sample_transforms() {
            let result = transformed_rect(rect, transform).unwrap();
            let expected_cx = rect.center_x() + transform.translate_x * transform.scale;
            let expected_cy = rect.center_y() + transform.translate_y * transform.scale;
            assert!((result.center_x() - expected_cx).abs() < EPSILON);
            assert!((result.center_y() - expected_cy).abs() < EPSILON);
            assert!((result.width() - rect.width() * transform.scale).abs() < EPSILON);
            assert!((result.height() - rect.height() * transform.scale).abs() < EPSILON);
        }
    }
}

#[test]
fn pivot_point_stays_fixed() {
    let pivots = [
        Point::new(0.0, 0.0),
        Point::new(150.0, 250.0),
        Point::new(-20.0, 90.0),
    ];
    for rect in sample_rects() {
        for scale in [0.5f32, 1.0, 2.0, 3.0] {
            for pivot in pivots {
                let transform = Transform::new(scale, 0.0, 0.0).with_pivot(pivot);
                let result = transformed_rect(rect, transform).unwrap();
                // Every edge obeys x' = p + s * (x - p), so p maps onto itself.
                let expected = Rect::new(
                    pivot.x + scale * (rect.left - pivot.x),
                    pivot.y + scale * (rect.top - pivot.y),
                    pivot.x + scale * (rect.right - pivot.x),
                    pivot.y + scale * (rect.bottom - pivot.y),
                );
                let tolerance = EPSILON * rect.width().abs().max(rect.height()).max(1.0);
                assert!(
                    result.approx_eq(&expected, tolerance),
                    "pivot {pivot:?} drifted: {result:?} vs {expected:?}"
                );
            }
        }
    }
}

#[test]
fn pivot_with_translation_is_translate_then_scale_about_pivot() {
    let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
    let pivot = Point::new(50.0, 20.0);
    let transform = Transform::new(2.0, 10.0, -5.0).with_pivot(pivot);
    let result = transformed_rect(rect, transform).unwrap();

    // Translate by t * s pixels first, then scale about the pivot.
    let moved = rect.translate(20.0, -10.0);
    let expected = Rect::new(
        pivot.x + 2.0 * (moved.left - pivot.x),
        pivot.y + 2.0 * (moved.top - pivot.y),
        pivot.x + 2.0 * (moved.right - pivot.x),
        pivot.y + 2.0 * (moved.bottom - pivot.y),
    );
    assert_rect_near(result, expected);
}

#[test]
fn get_transform_round_trips() {
    for from in sample_rects() {
        for to in sample_rects() {
            // Only the width ratio drives the scale, so keep the aspect ratio.
            let scale = to.width() / from.width();
            let target = Rect::from_center(to.center(), from.width() * scale, from.height() * scale);
            let transform = get_transform(from, target).unwrap();
            let result = transformed_rect(from, transform).unwrap();
            let tolerance = 1e-4 * target.width().max(target.height()).max(1.0);
            assert!(result.approx_eq(&target, tolerance), "{result:?} vs {target:?}");
        }
    }
}

#[test]
fn get_transform_rejects_empty_source() {
    let empty = Rect::new(5.0, 5.0, 5.0, 20.0);
    assert!(matches!(
        get_transform(empty, Rect::new(0.0, 0.0, 10.0, 10.0)),
        Err(InvalidGeometry::EmptySource(_))
    ));
}

#[test]
fn aligned_rect_centers_smaller_axes() {
    let viewport = Rect::new(0.0, 0.0, 300.0, 500.0);
    let rect = Rect::new(10.0, 10.0, 110.0, 60.0);
    let aligned = aligned_rect(rect, viewport).unwrap();
    assert_eq!(aligned.center(), viewport.center());
    assert_eq!(aligned.size(), rect.size());
}

#[test]
fn aligned_rect_pulls_near_edge_back() {
    let viewport = Rect::new(0.0, 0.0, 300.0, 500.0);

    // Oversized horizontally, left edge drifted inside the viewport.
    let rect = Rect::new(40.0, -100.0, 640.0, 600.0);
    let aligned = aligned_rect(rect, viewport).unwrap();
    assert_eq!(aligned.left, 0.0);
    assert_eq!(aligned.top, -100.0);

    // Right edge drifted inside.
    let rect = Rect::new(-400.0, -100.0, 200.0, 600.0);
    let aligned = aligned_rect(rect, viewport).unwrap();
    assert_eq!(aligned.right, 300.0);

    // Bottom edge drifted inside.
    let rect = Rect::new(-100.0, -400.0, 500.0, 450.0);
    let aligned = aligned_rect(rect, viewport).unwrap();
    assert_eq!(aligned.bottom, 500.0);
    assert_eq!(aligned.left, -100.0);
}

#[test]
fn aligned_rect_leaves_covering_rect_alone() {
    let viewport = Rect::new(0.0, 0.0, 300.0, 500.0);
    let rect = Rect::new(-50.0, -60.0, 400.0, 700.0);
    assert_eq!(aligned_rect(rect, viewport).unwrap(), rect);
}

#[test]
fn translate_space_signs() {
    let viewport = Rect::new(0.0, 0.0, 300.0, 500.0);
    let rect = Rect::new(-100.0, -20.0, 350.0, 500.0);
    let space = available_translate_space(rect, viewport).unwrap();
    assert_eq!(
        space,
        TranslateSpace {
            left: 100.0,
            top: 20.0,
            right: 50.0,
            bottom: 0.0,
        }
    );
}

#[test]
fn non_finite_input_fails_fast() {
    let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(transformed_rect(rect, Transform::new(f32::INFINITY, 0.0, 0.0)).is_err());
    assert!(transformed_rect(rect, Transform::new(0.0, 0.0, 0.0)).is_err());
    assert!(matches!(
        transformed_rect(
            rect,
            Transform::new(2.0, 0.0, 0.0).with_pivot(Point::new(f32::NAN, 1.0))
        ),
        Err(InvalidGeometry::Pivot(_))
    ));
    assert!(aligned_rect(Rect::new(0.0, f32::NAN, 1.0, 1.0), rect).is_err());
    assert!(available_translate_space(rect, Rect::new(0.0, 0.0, -1.0, 1.0)).is_err());
}
