//! Pan and zoom state of a single page.

use std::rc::Rc;

use gallery_animation::{RectAnimation, Scroller};
use gallery_core::Clock;
use gallery_foundation::GestureState;
use gallery_graphics::{
    aligned_rect, available_translate_space, fit_center_rect, get_transform, transformed_rect,
    Point, Rect, Size, Transform, TranslateSpace,
};
use smallvec::SmallVec;

use crate::{GalleryError, TransformerConfig};

/// Strength of a pan that pushes content further past an edge.
const RESISTANCE_FACTOR: f32 = 3.0;
/// Rects closer than this are treated as already at the animation target.
const ANIMATION_EPSILON: f32 = 0.01;

enum Motion {
    Idle,
    /// Momentum panning after release, driven by the scroller.
    Fling,
    /// Zoom or bounce tween towards a target rect.
    Tween(RectAnimation),
}

/// Owns the scale and translation of one page's content.
///
/// Gesture input arrives through the `on_responder_*` methods. Flings and
/// animations are advanced by [`ViewTransformer::on_frame`] while
/// [`ViewTransformer::needs_frame`] is `true`. Every change to the transform is
/// queued and handed out by [`ViewTransformer::drain_transformed`].
pub struct ViewTransformer {
    config: TransformerConfig,
    clock: Rc<dyn Clock>,
    viewport: Size,
    page_origin: Point,
    transform: Transform,
    scroller: Scroller,
    motion: Motion,
    transformed: SmallVec<[Transform; 4]>,
}

impl ViewTransformer {
    pub fn new(config: TransformerConfig, clock: Rc<dyn Clock>) -> Self {
        Self {
            config,
            scroller: Scroller::new(clock.clone()).with_flywheel(true),
            clock,
            viewport: Size::ZERO,
            page_origin: Point::ZERO,
            transform: Transform::IDENTITY,
            motion: Motion::Idle,
            transformed: SmallVec::new(),
        }
    }

    pub fn config(&self) -> &TransformerConfig {
        &self.config
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enable_transform = enabled;
    }

    pub fn set_max_scale(&mut self, max_scale: f32) {
        self.config.max_scale = max_scale;
    }

    pub fn set_content_aspect_ratio(&mut self, aspect_ratio: Option<f32>) {
        self.config.content_aspect_ratio = aspect_ratio;
    }

    /// Screen position of the page's top-left corner, used to turn touch
    /// coordinates into pivots inside the page.
    pub fn page_origin(&self) -> Point {
        self.page_origin
    }

    pub fn needs_frame(&self) -> bool {
        !matches!(self.motion, Motion::Idle)
    }

    /// Transforms applied since the last call, oldest first.
    pub fn drain_transformed(&mut self) -> SmallVec<[Transform; 4]> {
        std::mem::take(&mut self.transformed)
    }

    /// Replaces the transform without notifying anyone and stops any motion.
    pub fn force_update_transform(&mut self, transform: Transform) {
        self.stop_motion();
        self.transform = transform;
    }

    fn is_active(&self) -> bool {
        self.config.enable_transform && !self.viewport.is_empty()
    }

    fn viewport_rect(&self) -> Rect {
        Rect::from_size(self.viewport)
    }

    /// The content as laid out at identity transform.
    pub fn content_rect(&self) -> Result<Rect, GalleryError> {
        let viewport = self.viewport_rect();
        match self.config.content_aspect_ratio {
            Some(aspect_ratio) => Ok(fit_center_rect(aspect_ratio, viewport)?),
            None => Ok(viewport),
        }
    }

    /// The content as currently shown on screen, relative to the page.
    pub fn transformed_content_rect(&self) -> Result<Rect, GalleryError> {
        let rect = transformed_rect(self.viewport_rect(), self.transform)?;
        match self.config.content_aspect_ratio {
            Some(aspect_ratio) => Ok(fit_center_rect(aspect_ratio, rect)?),
            None => Ok(rect),
        }
    }

    pub fn available_translate_space(&self) -> Result<TranslateSpace, GalleryError> {
        Ok(available_translate_space(
            self.transformed_content_rect()?,
            self.viewport_rect(),
        )?)
    }

    pub fn on_responder_grant(&mut self, page_origin: Point) {
        self.stop_motion();
        self.page_origin = page_origin;
    }

    pub fn on_responder_move(&mut self, state: &GestureState) -> Result<(), GalleryError> {
        if !self.is_active() {
            return Ok(());
        }
        self.motion = Motion::Idle;

        let (mut dx, mut dy) = state.move_delta();
        if self.config.enable_resistance {
            let space = self.available_translate_space()?;
            if (dx > 0.0 && space.left < 0.0) || (dx < 0.0 && space.right < 0.0) {
                dx /= RESISTANCE_FACTOR;
            }
            if (dy > 0.0 && space.top < 0.0) || (dy < 0.0 && space.bottom < 0.0) {
                dy /= RESISTANCE_FACTOR;
            }
        }
        if !self.config.enable_translate {
            dx = 0.0;
            dy = 0.0;
        }

        let pinch = match (state.previous_pinch(), state.pinch()) {
            (Some(previous), Some(current)) if previous > 0.0 && current > 0.0 => {
                Some(current / previous)
            }
            _ => None,
        };

        let transform = match pinch {
            Some(scale_by) if self.config.enable_scale => {
                let pivot = Point::new(
                    state.move_x() - self.page_origin.x,
                    state.move_y() - self.page_origin.y,
                );
                let content = self.content_rect()?;
                let shown = transformed_rect(content, self.transform)?;
                let rect = transformed_rect(
                    shown,
                    Transform::new(scale_by, dx, dy).with_pivot(pivot),
                )?;
                get_transform(content, rect)?
            }
            _ => {
                if dx.abs() > 2.0 * dy.abs() {
                    dy = 0.0;
                } else if dy.abs() > 2.0 * dx.abs() {
                    dx = 0.0;
                }
                let scale = self.transform.scale;
                Transform::new(
                    scale,
                    self.transform.translate_x + dx / scale,
                    self.transform.translate_y + dy / scale,
                )
            }
        };
        self.update_transform(transform);
        Ok(())
    }

    /// Ends a gesture. `released` sees the final transform first and may claim
    /// the release by returning `true`.
    pub fn on_responder_release(
        &mut self,
        state: &GestureState,
        released: &mut dyn FnMut(Transform) -> bool,
    ) -> Result<(), GalleryError> {
        if !self.is_active() {
            return Ok(());
        }
        if released(self.transform) {
            return Ok(());
        }

        if state.double_tap_up() {
            if !self.config.enable_scale {
                return self.animate_bounce();
            }
            let pivot = if state.dx() != 0.0 || state.dy() != 0.0 {
                Point::new(
                    state.move_x() - self.page_origin.x,
                    state.move_y() - self.page_origin.y,
                )
            } else {
                Point::new(
                    state.x0() - self.page_origin.x,
                    state.y0() - self.page_origin.y,
                )
            };
            self.perform_double_tap_up(pivot)
        } else if self.config.enable_translate {
            self.perform_fling(state.vx(), state.vy())
        } else {
            self.animate_bounce()
        }
    }

    /// Zooms in to the max scale around `pivot`, or back out to 1 when already
    /// past the midpoint, then centers the pivot and aligns the result.
    pub fn perform_double_tap_up(&mut self, pivot: Point) -> Result<(), GalleryError> {
        let current = self.transform.scale;
        let max_scale = self.config.max_scale;
        let scale_by = if current > (1.0 + max_scale) / 2.0 {
            1.0 / current
        } else {
            max_scale / current
        };

        let viewport = self.viewport_rect();
        let zoomed = transformed_rect(
            self.transformed_content_rect()?,
            Transform::new(scale_by, 0.0, 0.0).with_pivot(pivot),
        )?;
        let centered = transformed_rect(
            zoomed,
            Transform::new(
                1.0,
                viewport.center_x() - pivot.x,
                viewport.center_y() - pivot.y,
            ),
        )?;
        let target = aligned_rect(centered, viewport)?;
        self.animate(target)
    }

    fn perform_fling(&mut self, vx: f32, vy: f32) -> Result<(), GalleryError> {
        let space = self.available_translate_space()?;
        let overscroll = self.config.max_overscroll_distance;

        let (min_x, max_x) = if vx > 0.0 {
            let max = if space.left > 0.0 {
                space.left + overscroll
            } else {
                0.0
            };
            (0.0, max)
        } else {
            let min = if space.right > 0.0 {
                -space.right - overscroll
            } else {
                0.0
            };
            (min, 0.0)
        };
        let (min_y, max_y) = if vy > 0.0 {
            let max = if space.top > 0.0 {
                space.top + overscroll
            } else {
                0.0
            };
            (0.0, max)
        } else {
            let min = if space.bottom > 0.0 {
                -space.bottom - overscroll
            } else {
                0.0
            };
            (min, 0.0)
        };

        // px/ms to px/s
        let mut vx = vx * 1000.0;
        let mut vy = vy * 1000.0;
        if vx.abs() > 2.0 * vy.abs() {
            vy = 0.0;
        } else if vy.abs() > 2.0 * vx.abs() {
            vx = 0.0;
        }

        log::trace!("transformer fling v=({vx}, {vy}) x=[{min_x}, {max_x}] y=[{min_y}, {max_y}]");
        self.scroller
            .fling(0.0, 0.0, vx, vy, min_x, max_x, min_y, max_y);
        self.motion = Motion::Fling;
        self.step_fling()
    }

    /// Brings the scale back into `[1, max_scale]` around the viewport center and
    /// aligns the content to the viewport edges.
    pub fn animate_bounce(&mut self) -> Result<(), GalleryError> {
        let current = self.transform.scale;
        let max_scale = self.config.max_scale.max(1.0);
        let scale_by = current.clamp(1.0, max_scale) / current;

        let viewport = self.viewport_rect();
        let rect = transformed_rect(
            self.transformed_content_rect()?,
            Transform::new(scale_by, 0.0, 0.0).with_pivot(viewport.center()),
        )?;
        let target = aligned_rect(rect, viewport)?;
        self.animate(target)
    }

    /// Tweens the shown content towards `target`. Does nothing when the content
    /// is already there.
    pub fn animate(&mut self, target: Rect) -> Result<(), GalleryError> {
        let from = self.transformed_content_rect()?;
        if from.approx_eq(&target, ANIMATION_EPSILON) {
            self.motion = Motion::Idle;
            return Ok(());
        }
        self.motion = Motion::Tween(RectAnimation::new(
            from,
            target.validate()?,
            self.clock.now_millis(),
            self.config.animation_duration_ms,
        ));
        Ok(())
    }

    /// Advances the running fling or animation to the clock's time.
    pub fn on_frame(&mut self) -> Result<(), GalleryError> {
        if matches!(self.motion, Motion::Fling) {
            return self.step_fling();
        }
        let now = self.clock.now_millis();
        let (rect, finished) = match &self.motion {
            Motion::Tween(animation) => (animation.value_at(now), animation.is_finished(now)),
            _ => return Ok(()),
        };
        if finished {
            self.motion = Motion::Idle;
        }
        let transform = get_transform(self.content_rect()?, rect)?;
        self.update_transform(transform);
        Ok(())
    }

    fn step_fling(&mut self) -> Result<(), GalleryError> {
        self.scroller.compute_scroll_offset();
        let (dx, dy) = self.scroller.last_delta();
        if dx == 0.0 && dy == 0.0 && self.scroller.is_finished() {
            self.motion = Motion::Idle;
            return self.animate_bounce();
        }
        let scale = self.transform.scale;
        self.update_transform(Transform::new(
            scale,
            self.transform.translate_x + dx / scale,
            self.transform.translate_y + dy / scale,
        ));
        Ok(())
    }

    fn stop_motion(&mut self) {
        self.scroller.force_finished(true);
        self.motion = Motion::Idle;
    }

    fn update_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.transformed.push(transform);
    }
}

#[cfg(test)]
#[path = "tests/view_transformer_tests.rs"]
mod tests;
