//! Scripted touch input with virtual time
//!
//! ```
//! use std::rc::Rc;
//!
//! use gallery_core::FrameClock;
//! use gallery_graphics::Size;
//! use gallery_testing::TouchRobot;
//! use gallery_ui::{Gallery, GalleryConfig, ImageSpec};
//!
//! let clock = FrameClock::starting_at_millis(1_000);
//! let mut gallery = Gallery::new(GalleryConfig::default(), Rc::new(clock.clone()));
//! gallery.set_images(vec![ImageSpec::bundled(1).with_dimensions(300.0, 600.0)]);
//! gallery.set_viewport(Size::new(300.0, 600.0));
//!
//! let mut robot = TouchRobot::new(gallery, clock);
//! robot.tap(150.0, 300.0);
//! robot.wait_for_idle();
//! ```

use gallery_core::FrameClock;
use gallery_foundation::{TouchEvent, TouchId};
use gallery_ui::Gallery;

/// Frame interval the robot advances time by, about 60 Hz.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Upper bound on frames pumped by [`TouchRobot::wait_for_idle`].
const MAX_IDLE_FRAMES: usize = 1_000;

/// Something that consumes touches and runs frames.
pub trait TouchTarget {
    fn dispatch_touch(&mut self, event: &TouchEvent);

    fn on_frame(&mut self);

    fn needs_frame(&self) -> bool;
}

impl TouchTarget for Gallery {
    fn dispatch_touch(&mut self, event: &TouchEvent) {
        if let Err(error) = Gallery::dispatch_touch(self, event) {
            panic!("touch {:?} failed: {error}", event.phase);
        }
    }

    fn on_frame(&mut self) {
        if let Err(error) = Gallery::on_frame(self) {
            panic!("frame failed: {error}");
        }
    }

    fn needs_frame(&self) -> bool {
        Gallery::needs_frame(self)
    }
}

/// Drives a [`TouchTarget`] with finger events stamped in clock milliseconds.
///
/// Time only moves when the robot is told to wait; each wait runs one frame
/// per [`FRAME_INTERVAL_MS`].
pub struct TouchRobot<T: TouchTarget> {
    target: T,
    clock: FrameClock,
}

impl<T: TouchTarget> TouchRobot<T> {
    pub fn new(target: T, clock: FrameClock) -> Self {
        Self { target, clock }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn now_millis(&self) -> u64 {
        self.clock.frame_time_millis()
    }

    /// Puts finger `id` down at `(x, y)`.
    pub fn down(&mut self, id: TouchId, x: f32, y: f32) -> &mut Self {
        let event = TouchEvent::start(id, x, y, self.now_millis());
        self.target.dispatch_touch(&event);
        self
    }

    pub fn move_to(&mut self, id: TouchId, x: f32, y: f32) -> &mut Self {
        let event = TouchEvent::moved(id, x, y, self.now_millis());
        self.target.dispatch_touch(&event);
        self
    }

    /// Moves several fingers in one event.
    pub fn move_all(&mut self, touches: &[(TouchId, f32, f32)]) -> &mut Self {
        let mut iter = touches.iter();
        let Some(&(id, x, y)) = iter.next() else {
            return self;
        };
        let event = iter.fold(
            TouchEvent::moved(id, x, y, self.now_millis()),
            |event, &(id, x, y)| event.with_touch(id, x, y),
        );
        self.target.dispatch_touch(&event);
        self
    }

    pub fn up(&mut self, id: TouchId, x: f32, y: f32) -> &mut Self {
        let event = TouchEvent::end(id, x, y, self.now_millis());
        self.target.dispatch_touch(&event);
        self
    }

    pub fn cancel(&mut self, id: TouchId, x: f32, y: f32) -> &mut Self {
        let event = TouchEvent::cancel(id, x, y, self.now_millis());
        self.target.dispatch_touch(&event);
        self
    }

    /// Lets `millis` pass, running a frame every [`FRAME_INTERVAL_MS`].
    pub fn wait(&mut self, millis: u64) -> &mut Self {
        let mut remaining = millis;
        while remaining > 0 {
            let step = remaining.min(FRAME_INTERVAL_MS);
            self.clock.advance_by_millis(step);
            remaining -= step;
            self.target.on_frame();
        }
        self
    }

    /// Runs frames until the target has nothing left to do.
    ///
    /// Returns `false` if it was still busy after the frame limit.
    pub fn wait_for_idle(&mut self) -> bool {
        for _ in 0..MAX_IDLE_FRAMES {
            if !self.target.needs_frame() {
                return true;
            }
            self.wait(FRAME_INTERVAL_MS);
        }
        log::warn!("target still busy after {MAX_IDLE_FRAMES} frames");
        !self.target.needs_frame()
    }

    /// A quick single-finger tap.
    pub fn tap(&mut self, x: f32, y: f32) -> &mut Self {
        self.down(1, x, y).wait(50).up(1, x, y)
    }

    /// Two taps 150 ms apart.
    pub fn double_tap(&mut self, x: f32, y: f32) -> &mut Self {
        self.tap(x, y).wait(100).tap(x, y)
    }

    /// Drags one finger from `from` to `to` in `steps` moves spread over
    /// `duration_ms`, then lifts it.
    pub fn swipe(&mut self, from: (f32, f32), to: (f32, f32), duration_ms: u64, steps: u32) -> &mut Self {
        let steps = steps.max(1);
        let step_ms = (duration_ms / u64::from(steps)).max(1);
        self.down(1, from.0, from.1);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let x = from.0 + (to.0 - from.0) * t;
            let y = from.1 + (to.1 - from.1) * t;
            self.wait(step_ms).move_to(1, x, y);
        }
        self.up(1, to.0, to.1)
    }
}
