//! Listener that records every gallery notification.

use std::cell::RefCell;
use std::rc::Rc;

use gallery_foundation::GestureState;
use gallery_graphics::Transform;
use gallery_ui::{GalleryEvent, GalleryListener, PageScroll, PageScrollState};

/// Records notifications into a shared log.
///
/// Clones share the log, so a test keeps one clone and hands the other to
/// the gallery.
#[derive(Clone, Default)]
pub struct RecordingListener {
    events: Rc<RefCell<Vec<GalleryEvent>>>,
    claim_transform_release: Rc<RefCell<bool>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `on_transform_gesture_released` report the release as handled.
    pub fn claim_transform_release(&self, claim: bool) {
        *self.claim_transform_release.borrow_mut() = claim;
    }

    pub fn events(&self) -> Vec<GalleryEvent> {
        self.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<GalleryEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn selected_pages(&self) -> Vec<usize> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                GalleryEvent::PageSelected(page) => Some(*page),
                _ => None,
            })
            .collect()
    }

    pub fn scroll_states(&self) -> Vec<PageScrollState> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                GalleryEvent::PageScrollStateChanged(state) => Some(*state),
                _ => None,
            })
            .collect()
    }

    /// Latest transform reported for `page`.
    pub fn last_transform(&self, page: usize) -> Option<Transform> {
        self.events
            .borrow()
            .iter()
            .rev()
            .find_map(|event| match event {
                GalleryEvent::ViewTransformed { page: p, transform } if *p == page => {
                    Some(*transform)
                }
                _ => None,
            })
    }

    fn push(&self, event: GalleryEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl GalleryListener for RecordingListener {
    fn on_page_selected(&mut self, page: usize) {
        self.push(GalleryEvent::PageSelected(page));
    }

    fn on_page_scroll_state_changed(&mut self, state: PageScrollState) {
        self.push(GalleryEvent::PageScrollStateChanged(state));
    }

    fn on_page_scroll(&mut self, scroll: PageScroll) {
        self.push(GalleryEvent::PageScroll(scroll));
    }

    fn on_view_transformed(&mut self, page: usize, transform: Transform) {
        self.push(GalleryEvent::ViewTransformed { page, transform });
    }

    fn on_transform_gesture_released(&mut self, page: usize, transform: Transform) -> bool {
        self.push(GalleryEvent::TransformGestureReleased { page, transform });
        *self.claim_transform_release.borrow()
    }

    fn on_single_tap_confirmed(&mut self, page: usize) {
        self.push(GalleryEvent::SingleTapConfirmed(page));
    }

    fn on_gallery_state_changed(&mut self, idle: bool) {
        self.push(GalleryEvent::GalleryStateChanged { idle });
    }

    fn on_long_press(&mut self, state: &GestureState) {
        self.push(GalleryEvent::LongPress {
            x0: state.x0(),
            y0: state.y0(),
        });
    }
}
