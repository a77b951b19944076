use super::*;

use std::cell::RefCell;

use gallery_core::FrameClock;

const FRAME_MS: u64 = 16;

fn scroller() -> (FrameClock, Scroller) {
    let clock = FrameClock::starting_at_millis(1_000);
    let scroller = Scroller::new(Rc::new(clock.clone()));
    (clock, scroller)
}

/// Steps the scroller once per frame until it stops, collecting the deltas.
fn run_to_rest(clock: &FrameClock, scroller: &mut Scroller) -> Vec<(f32, f32)> {
    let mut deltas = Vec::new();
    while scroller.compute_scroll_offset() {
        deltas.push(scroller.last_delta());
        clock.advance_by_millis(FRAME_MS);
        assert!(deltas.len() < 1_000, "scroller never settled");
    }
    deltas
}

fn total(deltas: &[(f32, f32)]) -> (f32, f32) {
    deltas
        .iter()
        .fold((0.0, 0.0), |acc, (dx, dy)| (acc.0 + dx, acc.1 + dy))
}

#[test]
fn zero_duration_scroll_lands_immediately() {
    let (_clock, mut scroller) = scroller();
    scroller.start_scroll(10.0, 20.0, 100.0, -40.0, 0);

    assert!(scroller.compute_scroll_offset());
    assert_eq!(scroller.last_delta(), (100.0, -40.0));
    assert!(scroller.is_finished());
    assert_eq!((scroller.curr_x(), scroller.curr_y()), (110.0, -20.0));

    assert!(!scroller.compute_scroll_offset());
    assert_eq!(scroller.last_delta(), (0.0, 0.0));
}

#[test]
fn eased_scroll_covers_exact_distance_in_whole_pixels() {
    let (clock, mut scroller) = scroller();
    scroller.start_scroll(0.0, 0.0, 300.0, 0.0, 250);

    let deltas = run_to_rest(&clock, &mut scroller);
    assert_eq!(total(&deltas), (300.0, 0.0));
    assert!(deltas.iter().all(|(dx, _)| *dx >= 0.0 && dx.fract() == 0.0));
    assert_eq!(scroller.curr_x(), 300.0);

    // Early frames move further than late ones.
    let moving: Vec<f32> = deltas.iter().map(|(dx, _)| *dx).filter(|dx| *dx > 0.0).collect();
    assert!(moving.len() > 4);
    assert!(moving[1] > moving[moving.len() - 1]);
}

#[test]
fn default_scroll_lasts_250ms() {
    let (clock, mut scroller) = scroller();
    scroller.start_scroll_default(0.0, 0.0, 0.0, 80.0);
    clock.advance_by_millis(249);
    scroller.compute_scroll_offset();
    assert!(!scroller.is_finished());
    clock.advance_by_millis(1);
    scroller.compute_scroll_offset();
    assert!(scroller.is_finished());
    assert_eq!(scroller.curr_y(), 80.0);
}

#[test]
fn finished_scroller_reports_zero_every_time() {
    let (clock, mut scroller) = scroller();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    scroller.set_on_scroll(move |dx, dy, scroller| {
        sink.borrow_mut().push((dx, dy, scroller.is_finished()));
    });

    scroller.start_scroll(0.0, 0.0, 50.0, 0.0, 100);
    run_to_rest(&clock, &mut scroller);
    calls.borrow_mut().clear();

    for _ in 0..3 {
        assert!(!scroller.compute_scroll_offset());
        assert_eq!(scroller.last_delta(), (0.0, 0.0));
    }
    assert_eq!(calls.borrow().as_slice(), &[(0.0, 0.0, true); 3]);
}

#[test]
fn listener_sees_every_step_including_settle() {
    let (clock, mut scroller) = scroller();
    let sum = Rc::new(RefCell::new((0.0f32, 0usize)));
    let sink = Rc::clone(&sum);
    scroller.set_on_scroll(move |dx, _, _| {
        let mut sum = sink.borrow_mut();
        sum.0 += dx;
        sum.1 += 1;
    });

    scroller.start_scroll(0.0, 0.0, -120.0, 0.0, 200);
    let steps = run_to_rest(&clock, &mut scroller).len();
    let (distance, calls) = *sum.borrow();
    assert_eq!(distance, -120.0);
    // The final call that returned false also reached the listener.
    assert_eq!(calls, steps + 1);
}

#[test]
fn fling_travels_to_its_computed_final_position() {
    let (clock, mut scroller) = scroller();
    scroller.fling(0.0, 0.0, 2_000.0, 0.0, -10_000.0, 10_000.0, 0.0, 0.0);
    assert_eq!(scroller.mode(), ScrollMode::Fling);
    assert!(scroller.duration_ms() > 0.0);

    let expected = FlingCalculator::default().fling_distance(2_000.0).round();
    assert_eq!(scroller.final_x(), expected);

    let deltas = run_to_rest(&clock, &mut scroller);
    assert_eq!(total(&deltas).0, expected);
    assert_eq!(scroller.curr_x(), scroller.final_x());
}

#[test]
fn fling_final_position_is_pinned_to_bounds() {
    let (clock, mut scroller) = scroller();
    scroller.fling(0.0, 0.0, 5_000.0, -5_000.0, 0.0, 100.0, -30.0, 0.0);
    assert_eq!(scroller.final_x(), 100.0);
    assert_eq!(scroller.final_y(), -30.0);

    while scroller.compute_scroll_offset() {
        assert!((0.0..=100.0).contains(&scroller.curr_x()));
        assert!((-30.0..=0.0).contains(&scroller.curr_y()));
        clock.advance_by_millis(FRAME_MS);
    }
}

#[test]
fn fling_pinned_to_a_single_target_still_reaches_it() {
    // The pager flings with min == max == the target page offset.
    let (clock, mut scroller) = scroller();
    scroller.fling(50.0, 0.0, 800.0, 0.0, 300.0, 300.0, 0.0, 0.0);
    assert_eq!(scroller.final_x(), 300.0);

    let mut previous = 50.0;
    while scroller.compute_scroll_offset() {
        assert!(scroller.curr_x() >= previous);
        previous = scroller.curr_x();
        clock.advance_by_millis(FRAME_MS);
    }
    assert_eq!(scroller.curr_x(), 300.0);
}

#[test]
fn faster_flings_go_further() {
    let mut previous_final = 0.0;
    let mut previous_duration = 0.0;
    for velocity in [100.0f32, 400.0, 1_000.0, 3_000.0, 9_000.0] {
        let (_clock, mut scroller) = scroller();
        scroller.fling(0.0, 0.0, velocity, 0.0, 0.0, 1.0e6, 0.0, 0.0);
        assert!(scroller.final_x() >= previous_final);
        assert!(scroller.duration_ms() > previous_duration);
        previous_final = scroller.final_x();
        previous_duration = scroller.duration_ms();
    }
}

#[test]
fn zero_velocity_fling_finishes_in_place() {
    let (_clock, mut scroller) = scroller();
    scroller.fling(42.0, 7.0, 0.0, 0.0, 0.0, 100.0, 0.0, 100.0);
    assert!(scroller.compute_scroll_offset() || scroller.is_finished());
    assert!(scroller.is_finished());
    assert_eq!((scroller.curr_x(), scroller.curr_y()), (42.0, 7.0));
    assert!(!scroller.compute_scroll_offset());
}

#[test]
fn flywheel_adds_residual_velocity_in_the_same_direction() {
    let (clock, scroller) = scroller();
    let mut scroller = scroller.with_flywheel(true);
    let baseline_clock = FrameClock::starting_at_millis(0);
    let mut baseline = Scroller::new(Rc::new(baseline_clock.clone()));

    scroller.fling(0.0, 0.0, 1_000.0, 0.0, -1.0e6, 1.0e6, 0.0, 0.0);
    clock.advance_by_millis(50);
    scroller.compute_scroll_offset();
    assert!(scroller.curr_velocity() > 0.0);

    let from = scroller.curr_x();
    scroller.fling(from, 0.0, 1_000.0, 0.0, -1.0e6, 1.0e6, 0.0, 0.0);
    baseline.fling(from, 0.0, 1_000.0, 0.0, -1.0e6, 1.0e6, 0.0, 0.0);
    assert!(scroller.final_x() > baseline.final_x());
}

#[test]
fn flywheel_ignores_opposite_direction() {
    let (clock, scroller) = scroller();
    let mut scroller = scroller.with_flywheel(true);
    let mut baseline = Scroller::new(Rc::new(FrameClock::new()));

    scroller.fling(0.0, 0.0, 1_000.0, 0.0, -1.0e6, 1.0e6, 0.0, 0.0);
    clock.advance_by_millis(50);
    scroller.compute_scroll_offset();

    let from = scroller.curr_x();
    scroller.fling(from, 0.0, -1_000.0, 0.0, -1.0e6, 1.0e6, 0.0, 0.0);
    baseline.fling(from, 0.0, -1_000.0, 0.0, -1.0e6, 1.0e6, 0.0, 0.0);
    assert_eq!(scroller.final_x(), baseline.final_x());
}

#[test]
fn abort_jumps_to_final_without_a_delta() {
    let (clock, mut scroller) = scroller();
    scroller.start_scroll(0.0, 0.0, 500.0, 0.0, 1_000);
    clock.advance_by_millis(FRAME_MS);
    scroller.compute_scroll_offset();

    scroller.abort_animation();
    assert!(scroller.is_finished());
    assert_eq!(scroller.curr_x(), 500.0);
    assert!(!scroller.compute_scroll_offset());
}

#[test]
fn force_finished_stops_motion() {
    let (clock, mut scroller) = scroller();
    scroller.fling(0.0, 0.0, 3_000.0, 0.0, -1.0e6, 1.0e6, 0.0, 0.0);
    clock.advance_by_millis(FRAME_MS);
    scroller.compute_scroll_offset();
    let stopped_at = scroller.curr_x();

    scroller.force_finished(true);
    clock.advance_by_millis(FRAME_MS);
    assert!(!scroller.compute_scroll_offset());
    assert_eq!(scroller.curr_x(), stopped_at);
}

#[test]
fn retargeting_and_extending() {
    let (clock, mut scroller) = scroller();
    scroller.start_scroll(0.0, 0.0, 100.0, 0.0, 100);
    scroller.set_final_x(200.0);
    scroller.set_final_y(-10.0);

    clock.advance_by_millis(60);
    scroller.compute_scroll_offset();
    assert_eq!(scroller.time_passed(), 60);
    scroller.extend_duration(100);
    assert_eq!(scroller.duration_ms(), 160.0);

    clock.advance_by_millis(60);
    scroller.compute_scroll_offset();
    assert!(!scroller.is_finished());

    clock.advance_by_millis(40);
    scroller.compute_scroll_offset();
    assert!(scroller.is_finished());
    assert_eq!((scroller.curr_x(), scroller.curr_y()), (200.0, -10.0));
}

#[test]
fn scroll_mode_reports_no_velocity() {
    let (_clock, mut scroller) = scroller();
    scroller.start_scroll(0.0, 0.0, 100.0, 0.0, 100);
    assert_eq!(scroller.curr_velocity(), 0.0);
}
