//! Tunables for the pager, the per-page transformers and the gallery.

use gallery_foundation::gesture_constants::LONG_PRESS_TIMEOUT_MS;
use gallery_foundation::ResponderOptions;

/// Fling overscroll past the content edge, in pixels.
pub const MAX_OVERSCROLL_DISTANCE: f32 = 20.0;
/// Duration of zoom and bounce animations.
pub const TRANSFORM_ANIMATION_DURATION_MS: u64 = 200;
/// Release velocity (px/ms) above which the pager flings to the adjacent page.
pub const MIN_FLING_VELOCITY: f32 = 0.5;
/// Duration of a non-immediate page snap.
pub const PAGE_SETTLE_DURATION_MS: u64 = 400;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformerConfig {
    pub enable_transform: bool,
    pub enable_scale: bool,
    pub enable_translate: bool,
    pub enable_resistance: bool,
    pub max_scale: f32,
    pub max_overscroll_distance: f32,
    /// Width over height of the content. `None` fills the viewport.
    pub content_aspect_ratio: Option<f32>,
    pub animation_duration_ms: u64,
}

impl TransformerConfig {
    pub fn with_enable_transform(mut self, enable: bool) -> Self {
        self.enable_transform = enable;
        self
    }

    pub fn with_enable_scale(mut self, enable: bool) -> Self {
        self.enable_scale = enable;
        self
    }

    pub fn with_enable_translate(mut self, enable: bool) -> Self {
        self.enable_translate = enable;
        self
    }

    pub fn with_enable_resistance(mut self, enable: bool) -> Self {
        self.enable_resistance = enable;
        self
    }

    pub fn with_max_scale(mut self, max_scale: f32) -> Self {
        self.max_scale = max_scale;
        self
    }

    pub fn with_max_overscroll_distance(mut self, distance: f32) -> Self {
        self.max_overscroll_distance = distance;
        self
    }

    pub fn with_content_aspect_ratio(mut self, aspect_ratio: Option<f32>) -> Self {
        self.content_aspect_ratio = aspect_ratio;
        self
    }

    pub fn with_animation_duration_ms(mut self, millis: u64) -> Self {
        self.animation_duration_ms = millis;
        self
    }
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            enable_transform: true,
            enable_scale: true,
            enable_translate: true,
            enable_resistance: false,
            max_scale: 1.0,
            max_overscroll_distance: MAX_OVERSCROLL_DISTANCE,
            content_aspect_ratio: None,
            animation_duration_ms: TRANSFORM_ANIMATION_DURATION_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PagerConfig {
    pub initial_page: usize,
    /// Gap between neighbouring pages, in pixels.
    pub page_margin: f32,
    pub scroll_enabled: bool,
    pub min_fling_velocity: f32,
    pub settle_duration_ms: u64,
}

impl PagerConfig {
    pub fn with_initial_page(mut self, page: usize) -> Self {
        self.initial_page = page;
        self
    }

    pub fn with_page_margin(mut self, margin: f32) -> Self {
        self.page_margin = margin;
        self
    }

    pub fn with_scroll_enabled(mut self, enabled: bool) -> Self {
        self.scroll_enabled = enabled;
        self
    }

    pub fn with_min_fling_velocity(mut self, velocity: f32) -> Self {
        self.min_fling_velocity = velocity;
        self
    }

    pub fn with_settle_duration_ms(mut self, millis: u64) -> Self {
        self.settle_duration_ms = millis;
        self
    }
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            initial_page: 0,
            page_margin: 0.0,
            scroll_enabled: true,
            min_fling_velocity: MIN_FLING_VELOCITY,
            settle_duration_ms: PAGE_SETTLE_DURATION_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GalleryConfig {
    pub pager: PagerConfig,
    /// Template for every page's transformer. Max scale and aspect ratio are
    /// replaced per page once the image size is known.
    pub transformer: TransformerConfig,
    /// `None` disables long-press detection.
    pub long_press_timeout_ms: Option<u64>,
    pub responder: ResponderOptions,
}

impl GalleryConfig {
    pub fn with_pager(mut self, pager: PagerConfig) -> Self {
        self.pager = pager;
        self
    }

    pub fn with_transformer(mut self, transformer: TransformerConfig) -> Self {
        self.transformer = transformer;
        self
    }

    pub fn with_long_press_timeout_ms(mut self, timeout: Option<u64>) -> Self {
        self.long_press_timeout_ms = timeout;
        self
    }

    pub fn with_responder(mut self, responder: ResponderOptions) -> Self {
        self.responder = responder;
        self
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            pager: PagerConfig::default(),
            transformer: TransformerConfig::default().with_enable_resistance(true),
            long_press_timeout_ms: Some(LONG_PRESS_TIMEOUT_MS),
            responder: ResponderOptions::default(),
        }
    }
}
