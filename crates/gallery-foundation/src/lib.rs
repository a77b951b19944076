//! Touch input for the gallery.
//!
//! Raw [`TouchEvent`]s are recorded into a [`TouchHistory`]; the
//! [`GestureResponder`] folds that history into a [`GestureState`] (centroid,
//! displacement, velocity, pinch, tap classification) and forwards lifecycle
//! callbacks to a [`ResponderHandler`]. [`TouchSurface`] runs the grant/release
//! negotiation that decides when those callbacks fire.

pub mod gesture_constants;
mod gesture_state;
mod responder;
mod touch;
mod touch_history;
pub mod touch_math;
mod touch_surface;

pub use gesture_state::GestureState;
pub use responder::{GestureResponder, ResponderHandler, ResponderOptions};
pub use touch::{Touch, TouchEvent, TouchId, TouchPhase};
pub use touch_history::{TouchHistory, TouchTrack};
pub use touch_surface::TouchSurface;

pub mod prelude {
    pub use crate::{
        GestureResponder, GestureState, ResponderHandler, ResponderOptions, Touch, TouchEvent,
        TouchHistory, TouchId, TouchPhase, TouchSurface,
    };
}
