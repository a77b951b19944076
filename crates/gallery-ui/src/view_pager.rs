//! Horizontal paging driven by a [`Scroller`].

use std::rc::Rc;

use gallery_animation::Scroller;
use gallery_core::Clock;
use gallery_foundation::GestureState;
use smallvec::SmallVec;

use crate::{PageScroll, PageScrollState, PagerConfig, PagerEvent};

/// Share of a page a slow drag must cover to move to the neighbour.
const SETTLE_PROGRESS_THRESHOLD: f32 = 1.0 / 3.0;

/// Owns the current page and the horizontal scroll position of the pages.
///
/// Pages sit side by side, `page_width + page_margin` apart. The scroller's x
/// coordinate is the scroll offset; each scroller step is turned into a
/// [`PagerEvent::Scrolled`], and a settled scroller with no finger down into
/// [`PageScrollState::Idle`]. Events queue up until
/// [`ViewPager::drain_events`].
pub struct ViewPager {
    config: PagerConfig,
    scroller: Scroller,
    page_count: usize,
    page_width: f32,
    page_height: f32,
    current_page: Option<usize>,
    active_gesture: bool,
    scroll_state: PageScrollState,
    frame_requested: bool,
    events: SmallVec<[PagerEvent; 4]>,
}

impl ViewPager {
    pub fn new(config: PagerConfig, clock: Rc<dyn Clock>) -> Self {
        Self {
            config,
            scroller: Scroller::new(clock).with_flywheel(true),
            page_count: 0,
            page_width: 0.0,
            page_height: 0.0,
            current_page: None,
            active_gesture: false,
            scroll_state: PageScrollState::Idle,
            frame_requested: false,
            events: SmallVec::new(),
        }
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn page_width(&self) -> f32 {
        self.page_width
    }

    pub fn page_height(&self) -> f32 {
        self.page_height
    }

    pub fn current_page(&self) -> Option<usize> {
        self.current_page
    }

    pub fn scroll_state(&self) -> PageScrollState {
        self.scroll_state
    }

    pub fn scroll_x(&self) -> f32 {
        self.scroller.curr_x()
    }

    pub fn is_gesture_active(&self) -> bool {
        self.active_gesture
    }

    /// Whether touches should reach the pager at all.
    pub fn accepts_gestures(&self) -> bool {
        self.config.scroll_enabled && self.page_count > 0
    }

    pub fn needs_frame(&self) -> bool {
        self.frame_requested
    }

    pub fn drain_events(&mut self) -> SmallVec<[PagerEvent; 4]> {
        std::mem::take(&mut self.events)
    }

    /// Scroll offset at which `page` fills the viewport.
    pub fn page_offset(&self, page: usize) -> f32 {
        (self.page_width + self.config.page_margin) * page as f32
    }

    /// How far the pages have scrolled past the current page. Positive when
    /// the next page is coming in.
    pub fn scroll_offset_from_current_page(&self) -> f32 {
        let current = self.current_page.map_or(0.0, |page| self.page_offset(page));
        self.scroller.curr_x() - current
    }

    fn valid_page(&self, page: usize) -> Option<usize> {
        self.page_count.checked_sub(1).map(|last| page.min(last))
    }

    /// Selects the initial page and jumps to it.
    pub fn mount(&mut self, page_count: usize) {
        self.page_count = page_count;
        self.set_scroll_state(PageScrollState::Settling);
        if let Some(page) = self.valid_page(self.config.initial_page) {
            self.on_page_changed(page);
        }
        let target = self.current_page.map_or(0.0, |page| self.page_offset(page));
        let from = self.scroller.curr_x();
        self.scroller.start_scroll(from, 0.0, target - from, 0.0, 0);
        self.perform_animation();
    }

    /// New viewport size. The pages re-snap to the current page without
    /// animating.
    pub fn set_layout(&mut self, width: f32, height: f32) {
        if width == self.page_width && height == self.page_height {
            return;
        }
        self.page_width = width;
        self.page_height = height;
        if let Some(page) = self.current_page {
            self.scroll_to_page(page, true);
        }
    }

    /// New number of pages. When the current page is at or past the new last
    /// page, the last page is selected at once; a pager that had no pages
    /// selects its initial page.
    pub fn set_page_count(&mut self, page_count: usize) {
        if page_count == self.page_count {
            return;
        }
        self.page_count = page_count;
        if page_count == 0 {
            self.current_page = None;
            return;
        }
        match self.current_page {
            Some(current) if current + 1 >= page_count => self.scroll_to_page(page_count, true),
            None => self.scroll_to_page(self.config.initial_page, true),
            _ => {}
        }
    }

    pub fn on_responder_grant(&mut self) {
        self.active_gesture = true;
        self.set_scroll_state(PageScrollState::Dragging);
    }

    pub fn on_responder_move(&mut self, state: &GestureState) {
        let (dx, _) = state.move_delta();
        self.scroll_by_offset(dx);
    }

    /// Ends the drag. With `disable_settle` the pages stay where they are and
    /// the caller decides what happens next.
    pub fn on_responder_release(&mut self, vx: f32, disable_settle: bool) {
        self.active_gesture = false;
        if !disable_settle {
            self.settle_page(vx);
        }
    }

    /// Moves the pages with the finger: a finger moving right by `dx` scrolls
    /// back by `dx`.
    pub fn scroll_by_offset(&mut self, dx: f32) {
        let from = self.scroller.curr_x();
        self.scroller.start_scroll(from, 0.0, -dx, 0.0, 0);
        self.perform_animation();
    }

    /// Picks the page to rest on after a drag released with velocity `vx`
    /// (px/ms).
    pub fn settle_page(&mut self, vx: f32) {
        let Some(current) = self.current_page else {
            return;
        };
        let min_velocity = self.config.min_fling_velocity;
        if vx < -min_velocity {
            self.fling_to_page(current.saturating_add(1), vx);
        } else if vx > min_velocity {
            self.fling_to_page(current.saturating_sub(1), vx);
        } else {
            let progress = if self.page_width > 0.0 {
                self.scroll_offset_from_current_page() / self.page_width
            } else {
                0.0
            };
            let page = if progress > SETTLE_PROGRESS_THRESHOLD {
                current.saturating_add(1)
            } else if progress < -SETTLE_PROGRESS_THRESHOLD {
                current.saturating_sub(1)
            } else {
                current
            };
            self.scroll_to_page(page, false);
        }
    }

    /// Flings towards `page` (clamped) with the finger velocity `vx` in px/ms.
    pub fn fling_to_page(&mut self, page: usize, vx: f32) {
        self.set_scroll_state(PageScrollState::Settling);
        let Some(page) = self.valid_page(page) else {
            return;
        };
        self.on_page_changed(page);

        let target = self.page_offset(page);
        // The pages move against the finger; the scroller wants px/s.
        let velocity = vx * -1000.0;
        log::trace!("pager fling to {page} v={velocity}");
        self.scroller.fling(
            self.scroller.curr_x(),
            0.0,
            velocity,
            0.0,
            target,
            target,
            0.0,
            0.0,
        );
        self.perform_animation();
    }

    /// Scrolls to `page` (clamped), either at once or over the settle duration.
    pub fn scroll_to_page(&mut self, page: usize, immediate: bool) {
        self.set_scroll_state(PageScrollState::Settling);
        let Some(page) = self.valid_page(page) else {
            return;
        };
        self.on_page_changed(page);

        let from = self.scroller.curr_x();
        let duration = if immediate {
            0
        } else {
            self.config.settle_duration_ms
        };
        self.scroller
            .start_scroll(from, 0.0, self.page_offset(page) - from, 0.0, duration);
        self.perform_animation();
    }

    pub fn on_frame(&mut self) {
        self.perform_animation();
    }

    fn perform_animation(&mut self) {
        self.frame_requested = self.scroller.compute_scroll_offset();
        let (dx, dy) = self.scroller.last_delta();
        if dx == 0.0 && dy == 0.0 && self.scroller.is_finished() {
            if !self.active_gesture {
                self.set_scroll_state(PageScrollState::Idle);
            }
        } else {
            self.report_scroll();
        }
    }

    fn report_scroll(&mut self) {
        let stride = self.page_width + self.config.page_margin;
        if stride <= 0.0 {
            return;
        }
        let curr_x = self.scroller.curr_x();
        let position = (curr_x / stride).floor().max(0.0) as usize;
        let Some(position) = self.valid_page(position) else {
            return;
        };
        let page_offset = self.page_offset(position);
        let offset = (curr_x - page_offset) / stride;
        let fraction = if self.page_width > 0.0 {
            ((curr_x - page_offset - self.config.page_margin) / self.page_width).max(0.0)
        } else {
            0.0
        };
        self.events.push(PagerEvent::Scrolled(PageScroll {
            position,
            offset,
            fraction,
        }));
    }

    fn set_scroll_state(&mut self, state: PageScrollState) {
        self.scroll_state = state;
        self.events.push(PagerEvent::ScrollStateChanged(state));
    }

    fn on_page_changed(&mut self, page: usize) {
        if self.current_page != Some(page) {
            log::debug!("page selected: {page}");
            self.current_page = Some(page);
            self.events.push(PagerEvent::PageSelected(page));
        }
    }
}

#[cfg(test)]
#[path = "tests/view_pager_tests.rs"]
mod tests;
