use crate::touch_math::{
    convert_to_millis_if_needed, current_centroid_of_touches_changed_after, pinch_distance,
    previous_centroid_of_touches_changed_after,
};
use crate::TouchHistory;

/// Rolling summary of the current touch sequence.
///
/// Owned by one [`GestureResponder`](crate::GestureResponder), which is its only
/// writer. Handlers read it through the accessors; the one mutation they are
/// allowed is [`GestureState::consume_move_x`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureState {
    move_x: f32,
    move_y: f32,
    previous_move_x: f32,
    previous_move_y: f32,
    x0: f32,
    y0: f32,
    dx: f32,
    dy: f32,
    vx: f32,
    vy: f32,
    number_active_touches: usize,
    pinch: Option<f32>,
    previous_pinch: Option<f32>,
    single_tap_up: bool,
    double_tap_up: bool,

    accounts_for_moves_up_to: u64,
    grant_timestamp: u64,
    single_tap_failed: bool,
}

impl GestureState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest centroid of the fingers.
    pub fn move_x(&self) -> f32 {
        self.move_x
    }

    pub fn move_y(&self) -> f32 {
        self.move_y
    }

    /// Centroid of the same fingers one event earlier.
    pub fn previous_move_x(&self) -> f32 {
        self.previous_move_x
    }

    pub fn previous_move_y(&self) -> f32 {
        self.previous_move_y
    }

    /// Centroid when the responder was granted.
    pub fn x0(&self) -> f32 {
        self.x0
    }

    pub fn y0(&self) -> f32 {
        self.y0
    }

    /// Accumulated displacement since the grant.
    pub fn dx(&self) -> f32 {
        self.dx
    }

    pub fn dy(&self) -> f32 {
        self.dy
    }

    /// Latest velocity in px/ms.
    pub fn vx(&self) -> f32 {
        self.vx
    }

    pub fn vy(&self) -> f32 {
        self.vy
    }

    pub fn number_active_touches(&self) -> usize {
        self.number_active_touches
    }

    /// Widest finger spread, present only while several fingers are down.
    pub fn pinch(&self) -> Option<f32> {
        self.pinch
    }

    pub fn previous_pinch(&self) -> Option<f32> {
        self.previous_pinch
    }

    pub fn single_tap_up(&self) -> bool {
        self.single_tap_up
    }

    pub fn double_tap_up(&self) -> bool {
        self.double_tap_up
    }

    /// Centroid movement reported by the latest event.
    pub fn move_delta(&self) -> (f32, f32) {
        (
            self.move_x - self.previous_move_x,
            self.move_y - self.previous_move_y,
        )
    }

    /// Removes `offset` pixels from the latest horizontal move, after another
    /// handler has already consumed them.
    pub fn consume_move_x(&mut self, offset: f32) {
        self.move_x -= offset;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn set_number_active_touches(&mut self, count: usize) {
        self.number_active_touches = count;
    }

    /// `true` when this history event is not newer than the moves already folded in.
    pub(crate) fn has_seen(&self, history: &TouchHistory) -> bool {
        history.most_recent_timestamp() <= self.accounts_for_moves_up_to
    }

    pub(crate) fn accounts_for_moves_up_to(&self) -> u64 {
        self.accounts_for_moves_up_to
    }

    pub(crate) fn update_on_move(&mut self, history: &TouchHistory) {
        let moved_after = self.accounts_for_moves_up_to;
        let current = current_centroid_of_touches_changed_after(history, moved_after);
        let previous = previous_centroid_of_touches_changed_after(history, moved_after);

        self.number_active_touches = history.number_active_touches();

        let most_recent = history.most_recent_timestamp();
        if let (Some(current), Some(previous)) = (current, previous) {
            let dx = current.x - previous.x;
            let dy = current.y - previous.y;
            let dt = convert_to_millis_if_needed(most_recent.saturating_sub(moved_after));

            self.move_x = current.x;
            self.move_y = current.y;
            self.previous_move_x = previous.x;
            self.previous_move_y = previous.y;
            if dt > 0.0 {
                self.vx = dx / dt;
                self.vy = dy / dt;
            }
            self.dx += dx;
            self.dy += dy;
        } else {
            self.previous_move_x = self.move_x;
            self.previous_move_y = self.move_y;
        }
        self.accounts_for_moves_up_to = most_recent;

        self.pinch = pinch_distance(history, moved_after, true);
        self.previous_pinch = pinch_distance(history, moved_after, false);
    }

    pub(crate) fn grant(&mut self, timestamp: u64, x0: f32, y0: f32) {
        self.grant_timestamp = timestamp;
        self.x0 = x0;
        self.y0 = y0;
        self.dx = 0.0;
        self.dy = 0.0;
    }

    pub(crate) fn grant_timestamp(&self) -> u64 {
        self.grant_timestamp
    }

    pub(crate) fn fail_single_tap(&mut self) {
        self.single_tap_failed = true;
    }

    pub(crate) fn settle_single_tap(&mut self) {
        if !self.single_tap_failed {
            self.single_tap_up = true;
        }
    }

    pub(crate) fn mark_double_tap(&mut self) {
        self.double_tap_up = true;
    }
}
