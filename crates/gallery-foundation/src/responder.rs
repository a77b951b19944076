//! Gesture stream processor.
//!
//! [`GestureResponder`] sits in front of a [`ResponderHandler`]: each lifecycle
//! call first updates the shared [`GestureState`] (centroid, velocity, pinch,
//! tap classification) and then forwards to the handler.

use std::rc::Rc;

use gallery_core::{Clock, DelayedTask, LogConfig};
use log::Level;

use crate::gesture_constants::{MOVE_THRESHOLD, TAP_MOVE_THRESHOLD, TAP_UP_TIME_THRESHOLD_MS};
use crate::touch_math::{convert_to_millis_if_needed, current_centroid};
use crate::{GestureState, TouchHistory};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResponderOptions {
    /// Single-finger displacement before moves are forwarded.
    pub move_threshold: f32,
    /// Displacement that disqualifies a tap.
    pub tap_move_threshold: f32,
    /// Longest tap and the double-tap window.
    pub tap_up_time_threshold_ms: u64,
    pub log: LogConfig,
}

impl ResponderOptions {
    pub fn with_move_threshold(mut self, threshold: f32) -> Self {
        self.move_threshold = threshold;
        self
    }

    pub fn with_tap_move_threshold(mut self, threshold: f32) -> Self {
        self.tap_move_threshold = threshold;
        self
    }

    pub fn with_tap_up_time_threshold_ms(mut self, millis: u64) -> Self {
        self.tap_up_time_threshold_ms = millis;
        self
    }

    pub fn with_log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }
}

impl Default for ResponderOptions {
    fn default() -> Self {
        Self {
            move_threshold: MOVE_THRESHOLD,
            tap_move_threshold: TAP_MOVE_THRESHOLD,
            tap_up_time_threshold_ms: TAP_UP_TIME_THRESHOLD_MS,
            log: LogConfig::default(),
        }
    }
}

/// Caller logic behind a [`GestureResponder`]. Every hook is optional.
pub trait ResponderHandler {
    fn start_should_set_responder(&mut self, _state: &GestureState) -> bool {
        false
    }

    fn move_should_set_responder(&mut self, _state: &GestureState) -> bool {
        false
    }

    fn start_should_set_responder_capture(&mut self, _state: &GestureState) -> bool {
        false
    }

    fn move_should_set_responder_capture(&mut self, _state: &GestureState) -> bool {
        false
    }

    fn responder_grant(&mut self, _state: &mut GestureState) {}

    /// Whether the grant should also block native handlers (scroll views and
    /// the like) further up.
    fn should_block_native_responder(&mut self) -> bool {
        true
    }

    fn responder_reject(&mut self, _state: &GestureState) {}

    fn responder_start(&mut self, _state: &mut GestureState) {}

    fn responder_move(&mut self, _state: &mut GestureState) {}

    fn responder_end(&mut self, _state: &mut GestureState) {}

    fn responder_release(&mut self, _state: &mut GestureState) {}

    fn responder_terminate(&mut self, _state: &mut GestureState) {}

    fn responder_termination_request(&mut self, _state: &GestureState) -> bool {
        true
    }

    /// A tap that was not followed by a second one in time. Receives the
    /// state as it was at the tap's release.
    fn single_tap_confirmed(&mut self, _snapshot: &GestureState) {}
}

pub struct GestureResponder {
    options: ResponderOptions,
    clock: Rc<dyn Clock>,
    state: GestureState,
    last_single_tap_up: bool,
    last_release_timestamp: u64,
    single_tap_confirm: Option<DelayedTask<GestureState>>,
}

impl GestureResponder {
    pub fn new(options: ResponderOptions, clock: Rc<dyn Clock>) -> Self {
        Self {
            options,
            clock,
            state: GestureState::new(),
            last_single_tap_up: false,
            last_release_timestamp: 0,
            single_tap_confirm: None,
        }
    }

    pub fn options(&self) -> &ResponderOptions {
        &self.options
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Deadline (clock milliseconds) of the pending single-tap confirmation.
    pub fn pending_tap_confirm_deadline(&self) -> Option<u64> {
        self.single_tap_confirm
            .as_ref()
            .map(DelayedTask::deadline_millis)
    }

    fn cancel_single_tap_confirm(&mut self) {
        if self.single_tap_confirm.take().is_some() {
            log::trace!("single tap confirmation cancelled");
        }
    }

    fn effective_move(&self) -> bool {
        if self.state.number_active_touches() > 1 {
            // A pinch may leave the centroid in place.
            return true;
        }
        let threshold = self.options.move_threshold;
        self.state.dx().abs() >= threshold || self.state.dy().abs() >= threshold
    }

    fn dump(&self, phase: &str) {
        if self.options.log.enabled(Level::Debug) {
            log::debug!("{phase}: {:?}", self.state);
        }
    }

    pub fn on_start_should_set_responder<H: ResponderHandler + ?Sized>(
        &mut self,
        handler: &mut H,
    ) -> bool {
        self.cancel_single_tap_confirm();
        handler.start_should_set_responder(&self.state)
    }

    pub fn on_move_should_set_responder<H: ResponderHandler + ?Sized>(
        &mut self,
        handler: &mut H,
    ) -> bool {
        self.effective_move() && handler.move_should_set_responder(&self.state)
    }

    pub fn on_start_should_set_responder_capture<H: ResponderHandler + ?Sized>(
        &mut self,
        history: &TouchHistory,
        handler: &mut H,
    ) -> bool {
        self.cancel_single_tap_confirm();
        if history.number_active_touches() == 1 {
            self.state.reset();
        }
        self.state
            .set_number_active_touches(history.number_active_touches());
        handler.start_should_set_responder_capture(&self.state)
    }

    pub fn on_move_should_set_responder_capture<H: ResponderHandler + ?Sized>(
        &mut self,
        history: &TouchHistory,
        handler: &mut H,
    ) -> bool {
        if self.state.has_seen(history) {
            return false;
        }
        self.state.update_on_move(history);
        self.effective_move() && handler.move_should_set_responder_capture(&self.state)
    }

    /// Returns whether native responders should be blocked.
    pub fn on_responder_grant<H: ResponderHandler + ?Sized>(
        &mut self,
        history: &TouchHistory,
        handler: &mut H,
    ) -> bool {
        self.cancel_single_tap_confirm();
        let origin = current_centroid(history)
            .map(|centroid| (centroid.x, centroid.y))
            .unwrap_or((self.state.x0(), self.state.y0()));
        self.state
            .grant(history.most_recent_timestamp(), origin.0, origin.1);
        self.dump("grant");
        handler.responder_grant(&mut self.state);
        handler.should_block_native_responder()
    }

    pub fn on_responder_reject<H: ResponderHandler + ?Sized>(&mut self, handler: &mut H) {
        log::debug!("responder rejected");
        handler.responder_reject(&self.state);
    }

    pub fn on_responder_start<H: ResponderHandler + ?Sized>(
        &mut self,
        history: &TouchHistory,
        handler: &mut H,
    ) {
        self.state
            .set_number_active_touches(history.number_active_touches());
        handler.responder_start(&mut self.state);
    }

    pub fn on_responder_move<H: ResponderHandler + ?Sized>(
        &mut self,
        history: &TouchHistory,
        handler: &mut H,
    ) {
        // Several fingers changing at once may arrive as separate events with
        // one timestamp; the first already carried the whole geometry.
        if self.state.has_seen(history) {
            return;
        }
        self.state.update_on_move(history);
        self.dump("move");
        if self.effective_move() {
            handler.responder_move(&mut self.state);
        }
    }

    pub fn on_responder_end<H: ResponderHandler + ?Sized>(
        &mut self,
        history: &TouchHistory,
        handler: &mut H,
    ) {
        self.state
            .set_number_active_touches(history.number_active_touches());

        let held_ms = convert_to_millis_if_needed(
            history
                .most_recent_timestamp()
                .saturating_sub(self.state.grant_timestamp()),
        );
        let tap_move = self.options.tap_move_threshold;
        if history.number_active_touches() > 0
            || held_ms > self.options.tap_up_time_threshold_ms as f32
            || self.state.dx().abs() >= tap_move
            || self.state.dy().abs() >= tap_move
        {
            self.state.fail_single_tap();
        }
        self.state.settle_single_tap();

        self.dump("end");
        handler.responder_end(&mut self.state);
    }

    pub fn on_responder_release<H: ResponderHandler + ?Sized>(
        &mut self,
        history: &TouchHistory,
        handler: &mut H,
    ) {
        let timestamp = history.most_recent_timestamp();
        if self.state.single_tap_up() {
            let since_last_release =
                convert_to_millis_if_needed(timestamp.saturating_sub(self.last_release_timestamp));
            if self.last_single_tap_up
                && since_last_release < self.options.tap_up_time_threshold_ms as f32
            {
                self.state.mark_double_tap();
            }

            // A double tap consumes the pair, so a third tap starts a new one.
            if self.state.double_tap_up() {
                self.last_single_tap_up = false;
            } else {
                self.last_single_tap_up = true;
                self.single_tap_confirm = Some(DelayedTask::new(
                    self.clock.now_millis(),
                    self.options.tap_up_time_threshold_ms,
                    self.state.clone(),
                ));
            }
        } else {
            // Any release that is not a tap breaks the pair.
            self.last_single_tap_up = false;
        }
        self.last_release_timestamp = timestamp;

        self.dump("release");
        handler.responder_release(&mut self.state);
        self.state.reset();
    }

    pub fn on_responder_terminate<H: ResponderHandler + ?Sized>(&mut self, handler: &mut H) {
        log::debug!("responder terminated");
        handler.responder_terminate(&mut self.state);
        self.state.reset();
    }

    pub fn on_responder_termination_request<H: ResponderHandler + ?Sized>(
        &mut self,
        handler: &mut H,
    ) -> bool {
        handler.responder_termination_request(&self.state)
    }

    /// Fires the single-tap confirmation once its deadline has passed.
    /// Returns whether it fired.
    pub fn poll_timers<H: ResponderHandler + ?Sized>(&mut self, handler: &mut H) -> bool {
        match DelayedTask::take_due(&mut self.single_tap_confirm, self.clock.now_millis()) {
            Some(snapshot) => {
                log::debug!("single tap confirmed");
                handler.single_tap_confirmed(&snapshot);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "tests/responder_tests.rs"]
mod tests;
