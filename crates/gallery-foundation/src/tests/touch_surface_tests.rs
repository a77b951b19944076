use super::*;

use gallery_core::FrameClock;

/// Claims gestures only once a move crosses the slop, and can refuse to be
/// interrupted.
#[derive(Default)]
struct LazyClaimer {
    claim_on_start: bool,
    refuse_termination: bool,
    granted: usize,
    moves: usize,
    released: usize,
    terminated: usize,
    rejected: usize,
}

impl ResponderHandler for LazyClaimer {
    fn start_should_set_responder(&mut self, _state: &GestureState) -> bool {
        self.claim_on_start
    }

    fn move_should_set_responder(&mut self, _state: &GestureState) -> bool {
        true
    }

    fn responder_grant(&mut self, _state: &mut GestureState) {
        self.granted += 1;
    }

    fn responder_move(&mut self, _state: &mut GestureState) {
        self.moves += 1;
    }

    fn responder_release(&mut self, _state: &mut GestureState) {
        self.released += 1;
    }

    fn responder_terminate(&mut self, _state: &mut GestureState) {
        self.terminated += 1;
    }

    fn responder_termination_request(&mut self, _state: &GestureState) -> bool {
        !self.refuse_termination
    }

    fn responder_reject(&mut self, _state: &GestureState) {
        self.rejected += 1;
    }
}

fn surface() -> TouchSurface {
    TouchSurface::new(ResponderOptions::default(), Rc::new(FrameClock::new()))
}

#[test]
fn bubble_start_claim_grants_immediately() {
    let mut surface = surface();
    let mut handler = LazyClaimer {
        claim_on_start: true,
        ..Default::default()
    };
    assert!(surface.dispatch(&TouchEvent::start(1, 0.0, 0.0, 10), &mut handler));
    assert_eq!(handler.granted, 1);

    assert!(!surface.dispatch(&TouchEvent::end(1, 0.0, 0.0, 20), &mut handler));
    assert_eq!(handler.released, 1);
}

#[test]
fn move_claim_waits_for_an_effective_move() {
    let mut surface = surface();
    let mut handler = LazyClaimer::default();

    assert!(!surface.dispatch(&TouchEvent::start(1, 0.0, 0.0, 10), &mut handler));
    assert!(!surface.dispatch(&TouchEvent::moved(1, 1.0, 0.0, 20), &mut handler));
    assert_eq!(handler.granted, 0);

    assert!(surface.dispatch(&TouchEvent::moved(1, 5.0, 0.0, 30), &mut handler));
    assert_eq!(handler.granted, 1);
    // The claiming event itself was already folded into the gesture state.
    assert_eq!(handler.moves, 0);

    surface.dispatch(&TouchEvent::moved(1, 9.0, 0.0, 40), &mut handler);
    assert_eq!(handler.moves, 1);
    assert_eq!(surface.gesture_state().move_x(), 9.0);
}

#[test]
fn events_without_a_responder_are_only_recorded() {
    let mut surface = surface();
    let mut handler = LazyClaimer::default();
    surface.dispatch(&TouchEvent::start(1, 0.0, 0.0, 10), &mut handler);
    surface.dispatch(&TouchEvent::end(1, 0.0, 0.0, 20), &mut handler);
    surface.dispatch(&TouchEvent::cancel(1, 0.0, 0.0, 30), &mut handler);
    assert_eq!((handler.released, handler.terminated), (0, 0));
    assert_eq!(surface.history().number_active_touches(), 0);
}

#[test]
fn termination_request_respects_refusal() {
    let mut surface = surface();
    let mut handler = LazyClaimer {
        claim_on_start: true,
        refuse_termination: true,
        ..Default::default()
    };
    surface.dispatch(&TouchEvent::start(1, 0.0, 0.0, 10), &mut handler);

    assert!(!surface.request_termination(&mut handler));
    assert!(surface.is_responder());

    handler.refuse_termination = false;
    assert!(surface.request_termination(&mut handler));
    assert!(!surface.is_responder());
    assert_eq!(handler.terminated, 1);
}

#[test]
fn reject_reaches_the_handler() {
    let mut surface = surface();
    let mut handler = LazyClaimer::default();
    surface.reject(&mut handler);
    assert_eq!(handler.rejected, 1);
}
