//! The gallery: one touch surface, one pager and a transformer per page, with
//! the arbitration that decides which of them a gesture moves.

use std::rc::Rc;

use gallery_core::{Clock, DelayedTask, FrameScheduler};
use gallery_foundation::{GestureState, ResponderHandler, TouchEvent, TouchSurface};
use gallery_graphics::{Point, Size, Transform};

use crate::{
    GalleryConfig, GalleryError, GalleryListener, ImageSpec, PageScrollState, PagerEvent,
    ProbeError, SizeProbe, TransformableImage, ViewPager,
};

/// Work that runs on the next frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FrameTask {
    Pager,
    Page(usize),
}

/// The handler that currently owns the gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveResponder {
    Pager,
    Image,
}

/// A horizontally paged gallery of pannable, zoomable images.
///
/// The host feeds it touch events in gallery coordinates through
/// [`Gallery::dispatch_touch`], calls [`Gallery::on_frame`] once per display
/// frame while [`Gallery::needs_frame`] is `true`, and reports layout and image
/// state changes. Everything the gallery has to say goes to its
/// [`GalleryListener`].
pub struct Gallery {
    clock: Rc<dyn Clock>,
    scheduler: FrameScheduler<FrameTask>,
    surface: TouchSurface,
    core: GalleryCore,
}

impl Gallery {
    pub fn new(config: GalleryConfig, clock: Rc<dyn Clock>) -> Self {
        Self {
            scheduler: FrameScheduler::new(),
            surface: TouchSurface::new(config.responder, clock.clone()),
            core: GalleryCore {
                pager: ViewPager::new(config.pager, clock.clone()),
                pages: Vec::new(),
                listener: Box::new(()),
                probe: None,
                active: None,
                first_move: true,
                long_press: None,
                viewport: Size::ZERO,
                mounted: false,
                error: None,
                clock: clock.clone(),
                config,
            },
            clock,
        }
    }

    pub fn with_listener(mut self, listener: impl GalleryListener + 'static) -> Self {
        self.core.listener = Box::new(listener);
        self
    }

    pub fn with_size_probe(mut self, probe: impl SizeProbe + 'static) -> Self {
        self.core.probe = Some(Box::new(probe));
        for page in 0..self.core.pages.len() {
            self.core.request_size(page);
        }
        self
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.core.config
    }

    pub fn pager(&self) -> &ViewPager {
        &self.core.pager
    }

    pub fn current_page(&self) -> Option<usize> {
        self.core.pager.current_page()
    }

    pub fn page_count(&self) -> usize {
        self.core.pages.len()
    }

    pub fn page(&self, page: usize) -> Option<&TransformableImage> {
        self.core.pages.get(page)
    }

    pub fn transform_of(&self, page: usize) -> Option<Transform> {
        self.page(page).map(|image| image.transformer().transform())
    }

    pub fn active_responder(&self) -> Option<ActiveResponder> {
        self.core.active
    }

    pub fn gesture_state(&self) -> &GestureState {
        self.surface.gesture_state()
    }

    /// Replaces the page list. The first call also selects the initial page.
    pub fn set_images(&mut self, images: Vec<ImageSpec>) {
        self.core.set_images(images);
        self.finish_update();
    }

    /// New gallery size; every page is as large as the gallery.
    pub fn set_viewport(&mut self, size: Size) {
        self.core.viewport = size;
        for page in &mut self.core.pages {
            page.set_view_size(size);
        }
        self.core.pager.set_layout(size.width, size.height);
        self.finish_update();
    }

    pub fn on_image_load_start(&mut self, page: usize) -> Result<(), GalleryError> {
        self.core.page_mut(page)?.on_load_start();
        Ok(())
    }

    pub fn on_image_loaded(&mut self, page: usize) -> Result<(), GalleryError> {
        self.core.page_mut(page)?.on_load();
        Ok(())
    }

    /// Delivers the answer to a [`SizeProbe`] request.
    pub fn on_image_size_resolved(
        &mut self,
        page: usize,
        result: Result<Size, ProbeError>,
    ) -> Result<(), GalleryError> {
        self.core.page_mut(page)?.on_size_resolved(result);
        Ok(())
    }

    pub fn scroll_to_page(&mut self, page: usize, immediate: bool) {
        self.core.pager.scroll_to_page(page, immediate);
        self.finish_update();
    }

    /// Feeds one touch event. Returns whether the gallery holds the gesture.
    pub fn dispatch_touch(&mut self, event: &TouchEvent) -> Result<bool, GalleryError> {
        if !self.core.pager.accepts_gestures() && !self.surface.is_responder() {
            return Ok(false);
        }
        let granted = self.surface.dispatch(event, &mut self.core);
        self.finish_update();
        self.core.take_error().map(|()| granted)
    }

    /// Another view wants the gesture. The gallery never gives it up.
    pub fn request_termination(&mut self) -> bool {
        self.surface.request_termination(&mut self.core)
    }

    /// Whether [`Gallery::on_frame`] has work to do: a running animation or a
    /// pending timer.
    pub fn needs_frame(&self) -> bool {
        self.scheduler.has_pending() || self.next_timer_deadline().is_some()
    }

    /// Earliest pending timer (tap confirmation or long press), in clock
    /// milliseconds.
    pub fn next_timer_deadline(&self) -> Option<u64> {
        let long_press = self
            .core
            .long_press
            .as_ref()
            .map(DelayedTask::deadline_millis);
        match (self.surface.next_timer_deadline(), long_press) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Advances animations to the clock's time and fires due timers.
    pub fn on_frame(&mut self) -> Result<(), GalleryError> {
        for task in self.scheduler.begin_frame(self.clock.now_nanos()) {
            match task {
                FrameTask::Pager => self.core.pager.on_frame(),
                FrameTask::Page(index) => {
                    if let Some(page) = self.core.pages.get_mut(index) {
                        if let Err(error) = page.transformer_mut().on_frame() {
                            self.core.record_error(error);
                        }
                    }
                }
            }
        }
        self.surface.poll_timers(&mut self.core);
        self.core.poll_long_press(self.surface.gesture_state());
        self.finish_update();
        self.core.take_error()
    }

    fn finish_update(&mut self) {
        self.core.flush_events();

        if self.core.pager.needs_frame() {
            self.scheduler.request(FrameTask::Pager);
        } else {
            self.scheduler.cancel(FrameTask::Pager);
        }
        for (index, page) in self.core.pages.iter().enumerate() {
            if page.transformer().needs_frame() {
                self.scheduler.request(FrameTask::Page(index));
            } else {
                self.scheduler.cancel(FrameTask::Page(index));
            }
        }
    }
}

struct GalleryCore {
    config: GalleryConfig,
    clock: Rc<dyn Clock>,
    pager: ViewPager,
    pages: Vec<TransformableImage>,
    listener: Box<dyn GalleryListener>,
    probe: Option<Box<dyn SizeProbe>>,
    active: Option<ActiveResponder>,
    first_move: bool,
    long_press: Option<DelayedTask<()>>,
    viewport: Size,
    mounted: bool,
    error: Option<GalleryError>,
}

impl GalleryCore {
    fn page_mut(&mut self, page: usize) -> Result<&mut TransformableImage, GalleryError> {
        let page_count = self.pages.len();
        self.pages
            .get_mut(page)
            .ok_or(GalleryError::UnknownPage { page, page_count })
    }

    fn set_images(&mut self, images: Vec<ImageSpec>) {
        let count = images.len();
        self.pages.truncate(count);
        for (index, spec) in images.into_iter().enumerate() {
            match self.pages.get_mut(index) {
                Some(page) => {
                    if page.replace(spec, self.clock.clone()) {
                        self.request_size(index);
                    }
                }
                None => {
                    let mut page =
                        TransformableImage::new(spec, self.config.transformer, self.clock.clone());
                    page.set_view_size(self.viewport);
                    self.pages.push(page);
                    self.request_size(index);
                }
            }
        }

        if self.mounted {
            self.pager.set_page_count(count);
        } else {
            self.mounted = true;
            self.pager.mount(count);
        }
    }

    fn request_size(&mut self, index: usize) {
        let Some(page) = self.pages.get(index) else {
            return;
        };
        match (page.probe_uri(), self.probe.as_mut()) {
            (Some(uri), Some(probe)) => probe.request_size(index, uri),
            (Some(uri), None) => log::debug!("no size probe installed for {uri}"),
            (None, _) if page.dimensions().is_none() => {
                log::warn!("page {index}: dimensions are required for bundled images")
            }
            (None, _) => {}
        }
    }

    fn record_error(&mut self, error: GalleryError) {
        log::error!("gallery operation failed: {error}");
        self.error.get_or_insert(error);
    }

    fn take_error(&mut self) -> Result<(), GalleryError> {
        match self.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn flush_events(&mut self) {
        for event in self.pager.drain_events() {
            match event {
                PagerEvent::PageSelected(page) => self.listener.on_page_selected(page),
                PagerEvent::ScrollStateChanged(state) => {
                    if state == PageScrollState::Idle {
                        self.reset_neighbours();
                    }
                    self.listener.on_page_scroll_state_changed(state);
                }
                PagerEvent::Scrolled(scroll) => self.listener.on_page_scroll(scroll),
            }
        }
        for (index, page) in self.pages.iter_mut().enumerate() {
            for transform in page.transformer_mut().drain_transformed() {
                self.listener.on_view_transformed(index, transform);
            }
        }
    }

    /// Pages next to the current one go back to identity once the pager rests.
    fn reset_neighbours(&mut self) {
        let Some(current) = self.pager.current_page() else {
            return;
        };
        for index in [current.checked_sub(1), current.checked_add(1)]
            .into_iter()
            .flatten()
        {
            if let Some(page) = self.pages.get_mut(index) {
                page.transformer_mut()
                    .force_update_transform(Transform::IDENTITY);
            }
        }
    }

    fn poll_long_press(&mut self, state: &GestureState) {
        if DelayedTask::take_due(&mut self.long_press, self.clock.now_millis()).is_some() {
            log::debug!("long press");
            self.listener.on_long_press(state);
        }
    }

    /// Whether the gesture should move the pages rather than the current
    /// image: one finger, the image cannot pan further that way, and there is
    /// a page to go to.
    fn should_scroll_view_pager(&mut self, state: &GestureState) -> bool {
        if state.number_active_touches() > 1 {
            return false;
        }
        let Some(current) = self.pager.current_page() else {
            return false;
        };
        let Some(page) = self.pages.get(current) else {
            return false;
        };
        let space = match page.transformer().available_translate_space() {
            Ok(space) => space,
            Err(error) => {
                self.record_error(error);
                return false;
            }
        };
        let (dx, _) = state.move_delta();
        (dx > 0.0 && space.left <= 0.0 && current > 0)
            || (dx < 0.0 && space.right <= 0.0 && current + 1 < self.pages.len())
    }

    fn activate_pager(&mut self, state: &GestureState) {
        match self.active {
            Some(ActiveResponder::Pager) => return,
            Some(ActiveResponder::Image) => self.end_image(state),
            None => {}
        }
        self.active = Some(ActiveResponder::Pager);
        self.pager.on_responder_grant();
    }

    fn activate_image(&mut self, state: &GestureState) {
        match self.active {
            Some(ActiveResponder::Image) => return,
            Some(ActiveResponder::Pager) => self.pager.on_responder_release(state.vx(), true),
            None => {}
        }
        self.active = Some(ActiveResponder::Image);
        self.start_image();
    }

    fn start_image(&mut self) {
        if let Some(timeout) = self.config.long_press_timeout_ms {
            self.long_press = Some(DelayedTask::new(self.clock.now_millis(), timeout, ()));
        }
        let Some(current) = self.pager.current_page() else {
            return;
        };
        let origin = Point::new(
            self.pager.page_offset(current) - self.pager.scroll_x(),
            0.0,
        );
        if let Some(page) = self.pages.get_mut(current) {
            page.transformer_mut().on_responder_grant(origin);
        }
    }

    fn move_image(&mut self, state: &GestureState) {
        self.long_press = None;
        let Some(current) = self.pager.current_page() else {
            return;
        };
        if let Some(page) = self.pages.get_mut(current) {
            if let Err(error) = page.transformer_mut().on_responder_move(state) {
                self.record_error(error);
            }
        }
    }

    fn end_image(&mut self, state: &GestureState) {
        self.long_press = None;
        let Some(current) = self.pager.current_page() else {
            return;
        };
        let Some(page) = self.pages.get_mut(current) else {
            return;
        };
        let listener = &mut self.listener;
        let result = page
            .transformer_mut()
            .on_responder_release(state, &mut |transform| {
                listener.on_transform_gesture_released(current, transform)
            });
        if let Err(error) = result {
            self.record_error(error);
        }
    }

    fn finish_gesture(&mut self, state: &GestureState) {
        if let Some(active) = self.active.take() {
            let vx = state.vx();
            if active == ActiveResponder::Pager
                && !self.should_scroll_view_pager(state)
                && vx.abs() > self.config.pager.min_fling_velocity
            {
                // The finger turned back towards the current page: the image
                // keeps its pan and the pages fling home.
                self.pager.on_responder_release(vx, true);
                if let Some(current) = self.pager.current_page() {
                    self.pager.fling_to_page(current, vx);
                }
            } else {
                match active {
                    ActiveResponder::Image => self.end_image(state),
                    ActiveResponder::Pager => self.pager.on_responder_release(vx, false),
                }
            }
        }
        self.first_move = true;
        self.listener.on_gallery_state_changed(true);
    }
}

impl ResponderHandler for GalleryCore {
    fn start_should_set_responder(&mut self, _state: &GestureState) -> bool {
        true
    }

    fn start_should_set_responder_capture(&mut self, _state: &GestureState) -> bool {
        true
    }

    fn responder_grant(&mut self, state: &mut GestureState) {
        self.activate_image(state);
    }

    fn responder_move(&mut self, state: &mut GestureState) {
        if self.first_move {
            self.first_move = false;
            if self.should_scroll_view_pager(state) {
                self.activate_pager(state);
            }
            self.listener.on_gallery_state_changed(false);
        }

        if self.active == Some(ActiveResponder::Pager) {
            let (dx, _) = state.move_delta();
            let offset = self.pager.scroll_offset_from_current_page();
            // The pages are back at the current page and the finger keeps
            // going: the pager takes what is left of its offset and the image
            // gets the rest.
            let overshoots = (dx > 0.0 && offset > 0.0 && dx > offset)
                || (dx < 0.0 && offset < 0.0 && dx < offset);
            if overshoots && !self.should_scroll_view_pager(state) {
                self.pager.scroll_by_offset(offset);
                state.consume_move_x(offset);
                self.activate_image(state);
            }
        }

        match self.active {
            Some(ActiveResponder::Pager) => self.pager.on_responder_move(state),
            Some(ActiveResponder::Image) => self.move_image(state),
            None => {}
        }
    }

    fn responder_release(&mut self, state: &mut GestureState) {
        self.finish_gesture(state);
    }

    fn responder_terminate(&mut self, state: &mut GestureState) {
        self.finish_gesture(state);
    }

    fn responder_termination_request(&mut self, _state: &GestureState) -> bool {
        false
    }

    fn single_tap_confirmed(&mut self, _snapshot: &GestureState) {
        if let Some(page) = self.pager.current_page() {
            self.listener.on_single_tap_confirmed(page);
        }
    }
}

#[cfg(test)]
#[path = "tests/gallery_tests.rs"]
mod tests;
