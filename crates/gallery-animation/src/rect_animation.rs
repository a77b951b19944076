use gallery_graphics::Rect;

use crate::Easing;

/// Tween between two rectangles over a fixed wall-clock duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectAnimation {
    from: Rect,
    to: Rect,
    start_ms: u64,
    duration_ms: u64,
    easing: Easing,
}

impl RectAnimation {
    pub fn new(from: Rect, to: Rect, start_ms: u64, duration_ms: u64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
            easing: Easing::EaseInOut,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn from(&self) -> Rect {
        self.from
    }

    pub fn target(&self) -> Rect {
        self.to
    }

    /// Linear progress in `[0, 1]` at `now_ms`.
    pub fn progress(&self, now_ms: u64) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        (elapsed as f32 / self.duration_ms as f32).min(1.0)
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Interpolated rect at `now_ms`; exactly the target once finished.
    pub fn value_at(&self, now_ms: u64) -> Rect {
        let progress = self.progress(now_ms);
        if progress >= 1.0 {
            return self.to;
        }
        self.from.lerp(&self.to, self.easing.transform(progress))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_from_start_to_target() {
        let from = Rect::new(0.0, 0.0, 100.0, 100.0);
        let to = Rect::new(-100.0, -100.0, 200.0, 200.0);
        let animation = RectAnimation::new(from, to, 1_000, 200);

        assert_eq!(animation.value_at(900), from);
        assert_eq!(animation.value_at(1_000), from);
        let middle = animation.value_at(1_100);
        assert!(middle.approx_eq(&from.lerp(&to, 0.5), 0.1));
        assert!(!animation.is_finished(1_199));
        assert!(animation.is_finished(1_200));
        assert_eq!(animation.value_at(5_000), to);
    }

    #[test]
    fn zero_duration_is_immediately_done() {
        let to = Rect::new(1.0, 2.0, 3.0, 4.0);
        let animation = RectAnimation::new(Rect::default(), to, 0, 0);
        assert!(animation.is_finished(0));
        assert_eq!(animation.value_at(0), to);
    }
}
