use gallery_foundation::GestureState;
use gallery_graphics::Transform;

use crate::{PageScroll, PageScrollState};

/// Receiver of gallery notifications. Every method is optional.
pub trait GalleryListener {
    fn on_page_selected(&mut self, _page: usize) {}

    fn on_page_scroll_state_changed(&mut self, _state: PageScrollState) {}

    fn on_page_scroll(&mut self, _scroll: PageScroll) {}

    /// Called on every transform change of a page, animations included.
    fn on_view_transformed(&mut self, _page: usize, _transform: Transform) {}

    /// Called when a pan or zoom gesture on `page` ends. Returning `true`
    /// suppresses the default fling, bounce and double-tap zoom.
    fn on_transform_gesture_released(&mut self, _page: usize, _transform: Transform) -> bool {
        false
    }

    fn on_single_tap_confirmed(&mut self, _page: usize) {}

    /// `false` when a gesture starts moving, `true` once it ends.
    fn on_gallery_state_changed(&mut self, _idle: bool) {}

    fn on_long_press(&mut self, _state: &GestureState) {}
}

impl GalleryListener for () {}
