use std::rc::Rc;

use gallery_core::Clock;

use crate::{
    GestureResponder, GestureState, ResponderHandler, ResponderOptions, TouchEvent, TouchHistory,
    TouchPhase,
};

/// A touchable region running responder negotiation for one handler.
///
/// The surface records every event into its [`TouchHistory`], asks the handler
/// (capture first, then bubble) whether it wants to become the responder, and
/// once granted routes start/move/end events to it until the last finger lifts
/// or the gesture is cancelled.
pub struct TouchSurface {
    history: TouchHistory,
    responder: GestureResponder,
    granted: bool,
}

impl TouchSurface {
    pub fn new(options: ResponderOptions, clock: Rc<dyn Clock>) -> Self {
        Self {
            history: TouchHistory::new(),
            responder: GestureResponder::new(options, clock),
            granted: false,
        }
    }

    pub fn is_responder(&self) -> bool {
        self.granted
    }

    pub fn history(&self) -> &TouchHistory {
        &self.history
    }

    pub fn gesture_state(&self) -> &GestureState {
        self.responder.state()
    }

    pub fn responder(&self) -> &GestureResponder {
        &self.responder
    }

    /// Feeds one raw event through negotiation and the responder lifecycle.
    /// Returns whether this surface is the responder afterwards.
    pub fn dispatch<H: ResponderHandler + ?Sized>(
        &mut self,
        event: &TouchEvent,
        handler: &mut H,
    ) -> bool {
        self.history.record(event);

        match event.phase {
            TouchPhase::Start => {
                if !self.granted && self.wants_start(handler) {
                    self.grant(handler);
                }
                if self.granted {
                    self.responder.on_responder_start(&self.history, handler);
                }
            }
            TouchPhase::Move => {
                if !self.granted && self.wants_move(handler) {
                    self.grant(handler);
                }
                if self.granted {
                    self.responder.on_responder_move(&self.history, handler);
                }
            }
            TouchPhase::End => {
                if self.granted {
                    self.responder.on_responder_end(&self.history, handler);
                    if self.history.number_active_touches() == 0 {
                        self.granted = false;
                        self.responder.on_responder_release(&self.history, handler);
                    }
                }
            }
            TouchPhase::Cancel => {
                if self.granted {
                    self.granted = false;
                    self.responder.on_responder_terminate(handler);
                }
            }
        }

        self.granted
    }

    fn wants_start<H: ResponderHandler + ?Sized>(&mut self, handler: &mut H) -> bool {
        self.responder
            .on_start_should_set_responder_capture(&self.history, handler)
            || self.responder.on_start_should_set_responder(handler)
    }

    fn wants_move<H: ResponderHandler + ?Sized>(&mut self, handler: &mut H) -> bool {
        self.responder
            .on_move_should_set_responder_capture(&self.history, handler)
            || self.responder.on_move_should_set_responder(handler)
    }

    fn grant<H: ResponderHandler + ?Sized>(&mut self, handler: &mut H) {
        self.granted = true;
        self.responder.on_responder_grant(&self.history, handler);
    }

    /// Another view asks to take over the gesture. The handler may refuse;
    /// if it agrees the gesture is terminated here.
    pub fn request_termination<H: ResponderHandler + ?Sized>(&mut self, handler: &mut H) -> bool {
        if !self.granted {
            return true;
        }
        if self.responder.on_responder_termination_request(handler) {
            self.granted = false;
            self.responder.on_responder_terminate(handler);
            true
        } else {
            false
        }
    }

    /// This surface asked for the gesture but another responder kept it.
    pub fn reject<H: ResponderHandler + ?Sized>(&mut self, handler: &mut H) {
        self.responder.on_responder_reject(handler);
    }

    /// Runs due timers (single-tap confirmation).
    pub fn poll_timers<H: ResponderHandler + ?Sized>(&mut self, handler: &mut H) -> bool {
        self.responder.poll_timers(handler)
    }

    pub fn next_timer_deadline(&self) -> Option<u64> {
        self.responder.pending_tap_confirm_deadline()
    }
}

#[cfg(test)]
#[path = "tests/touch_surface_tests.rs"]
mod tests;
