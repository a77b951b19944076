use std::rc::Rc;

use gallery_core::Clock;
use gallery_graphics::Size;

use crate::{ProbeError, TransformerConfig, ViewTransformer};

/// Where a page's pixels come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// Remote or file image; its size can be probed.
    Uri(String),
    /// Image bundled with the host, identified by its asset id.
    Bundled(u32),
}

/// Description of one page, as supplied by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageSpec {
    pub source: ImageSource,
    /// Intrinsic pixel size, when the host already knows it.
    pub dimensions: Option<Size>,
}

impl ImageSpec {
    pub fn uri(uri: impl Into<String>) -> Self {
        Self {
            source: ImageSource::Uri(uri.into()),
            dimensions: None,
        }
    }

    pub fn bundled(asset: u32) -> Self {
        Self {
            source: ImageSource::Bundled(asset),
            dimensions: None,
        }
    }

    pub fn with_dimensions(mut self, width: f32, height: f32) -> Self {
        self.dimensions = Some(Size::new(width, height));
        self
    }
}

/// Looks up image sizes on behalf of the gallery.
///
/// The answer is delivered later through
/// [`Gallery::on_image_size_resolved`](crate::Gallery::on_image_size_resolved).
pub trait SizeProbe {
    fn request_size(&mut self, page: usize, uri: &str);
}

/// One page: its image description plus the transformer that pans and zooms it.
///
/// The transformer only reacts to gestures once the image reports loaded, and
/// its zoom limit follows the image resolution: an image larger than the
/// viewport may be zoomed until one image pixel covers one screen pixel.
pub struct TransformableImage {
    spec: ImageSpec,
    dimensions: Option<Size>,
    view_size: Size,
    loaded: bool,
    error: Option<ProbeError>,
    template: TransformerConfig,
    transformer: ViewTransformer,
}

impl TransformableImage {
    pub fn new(spec: ImageSpec, template: TransformerConfig, clock: Rc<dyn Clock>) -> Self {
        let mut image = Self {
            dimensions: spec.dimensions,
            spec,
            view_size: Size::ZERO,
            loaded: false,
            error: None,
            template,
            transformer: ViewTransformer::new(template, clock),
        };
        image.refresh();
        image
    }

    pub fn spec(&self) -> &ImageSpec {
        &self.spec
    }

    pub fn dimensions(&self) -> Option<Size> {
        self.dimensions
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&ProbeError> {
        self.error.as_ref()
    }

    pub fn transformer(&self) -> &ViewTransformer {
        &self.transformer
    }

    pub fn transformer_mut(&mut self) -> &mut ViewTransformer {
        &mut self.transformer
    }

    /// Uri to probe when the size is still unknown.
    pub fn probe_uri(&self) -> Option<&str> {
        match (&self.dimensions, &self.spec.source) {
            (None, ImageSource::Uri(uri)) => Some(uri),
            _ => None,
        }
    }

    pub fn max_scale(&self) -> f32 {
        match self.dimensions {
            Some(dimensions) if !dimensions.is_empty() && !self.view_size.is_empty() => 1.0f32
                .max(dimensions.width / self.view_size.width)
                .max(dimensions.height / self.view_size.height),
            _ => 1.0,
        }
    }

    pub fn content_aspect_ratio(&self) -> Option<f32> {
        self.dimensions.and_then(|dimensions| dimensions.aspect_ratio())
    }

    pub fn set_view_size(&mut self, size: Size) {
        self.view_size = size;
        self.transformer.set_viewport(size);
        self.refresh();
    }

    pub fn on_load_start(&mut self) {
        self.loaded = false;
        self.refresh();
    }

    pub fn on_load(&mut self) {
        self.loaded = true;
        self.refresh();
    }

    pub fn on_size_resolved(&mut self, result: Result<Size, ProbeError>) {
        match result {
            Ok(size) if size.is_empty() => {
                let uri = match &self.spec.source {
                    ImageSource::Uri(uri) => uri.clone(),
                    ImageSource::Bundled(asset) => format!("asset:{asset}"),
                };
                self.fail(ProbeError::EmptySize(uri));
            }
            Ok(size) => {
                self.dimensions = Some(size);
                self.error = None;
                self.refresh();
            }
            Err(error) => self.fail(error),
        }
    }

    /// Swaps in a new image. A different image starts over with a fresh
    /// transformer; returns whether anything changed.
    pub fn replace(&mut self, spec: ImageSpec, clock: Rc<dyn Clock>) -> bool {
        if spec.source == self.spec.source {
            if spec.dimensions.is_some() && spec.dimensions != self.dimensions {
                self.dimensions = spec.dimensions;
                self.spec = spec;
                self.refresh();
            }
            return false;
        }

        self.dimensions = spec.dimensions;
        self.spec = spec;
        self.loaded = false;
        self.error = None;
        self.transformer = ViewTransformer::new(self.template, clock);
        self.transformer.set_viewport(self.view_size);
        self.refresh();
        true
    }

    fn fail(&mut self, error: ProbeError) {
        log::warn!("{error}");
        self.error = Some(error);
    }

    fn refresh(&mut self) {
        let max_scale = self.max_scale();
        let aspect_ratio = self.content_aspect_ratio();
        self.transformer.set_max_scale(max_scale);
        self.transformer.set_content_aspect_ratio(aspect_ratio);
        self.transformer
            .set_enabled(self.template.enable_transform && self.loaded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use gallery_core::FrameClock;

    fn image(spec: ImageSpec) -> TransformableImage {
        let clock: Rc<dyn Clock> = Rc::new(FrameClock::new());
        let mut image = TransformableImage::new(spec, TransformerConfig::default(), clock);
        image.set_view_size(Size::new(300.0, 600.0));
        image
    }

    #[test]
    fn max_scale_follows_image_resolution() {
        let large = image(ImageSpec::uri("a.jpg").with_dimensions(1200.0, 900.0));
        assert_eq!(large.max_scale(), 4.0);
        assert_eq!(large.transformer().config().max_scale, 4.0);

        let small = image(ImageSpec::uri("b.jpg").with_dimensions(100.0, 100.0));
        assert_eq!(small.max_scale(), 1.0);
    }

    #[test]
    fn aspect_ratio_comes_from_dimensions() {
        let image = image(ImageSpec::bundled(7).with_dimensions(400.0, 200.0));
        assert_eq!(image.content_aspect_ratio(), Some(2.0));
        assert_eq!(image.transformer().config().content_aspect_ratio, Some(2.0));
    }

    #[test]
    fn transform_waits_for_the_image_to_load() {
        let mut image = image(ImageSpec::uri("a.jpg").with_dimensions(600.0, 600.0));
        assert!(!image.transformer().config().enable_transform);

        image.on_load();
        assert!(image.transformer().config().enable_transform);

        image.on_load_start();
        assert!(!image.transformer().config().enable_transform);
    }

    #[test]
    fn only_unsized_uris_are_probed() {
        assert_eq!(image(ImageSpec::uri("a.jpg")).probe_uri(), Some("a.jpg"));
        assert_eq!(
            image(ImageSpec::uri("a.jpg").with_dimensions(1.0, 1.0)).probe_uri(),
            None
        );
        assert_eq!(image(ImageSpec::bundled(1)).probe_uri(), None);
    }

    #[test]
    fn probe_result_updates_limits() {
        let mut image = image(ImageSpec::uri("a.jpg"));
        assert_eq!(image.max_scale(), 1.0);

        image.on_size_resolved(Ok(Size::new(900.0, 600.0)));
        assert_eq!(image.dimensions(), Some(Size::new(900.0, 600.0)));
        assert_eq!(image.max_scale(), 3.0);
        assert!(image.probe_uri().is_none());
    }

    #[test]
    fn probe_failure_sets_the_error_flag() {
        let mut image = image(ImageSpec::uri("broken.jpg"));
        image.on_size_resolved(Err(ProbeError::Failed {
            uri: "broken.jpg".into(),
            reason: "404".into(),
        }));
        assert!(image.has_error());
        assert_eq!(image.dimensions(), None);

        let mut empty = self::image(ImageSpec::uri("empty.jpg"));
        empty.on_size_resolved(Ok(Size::ZERO));
        assert_eq!(
            empty.error(),
            Some(&ProbeError::EmptySize("empty.jpg".into()))
        );
    }

    #[test]
    fn replacing_the_image_resets_the_transform() {
        let mut image = image(ImageSpec::uri("a.jpg").with_dimensions(600.0, 600.0));
        image.on_load();
        image
            .transformer_mut()
            .force_update_transform(gallery_graphics::Transform::new(2.0, 5.0, 0.0));

        let clock: Rc<dyn Clock> = Rc::new(FrameClock::new());
        assert!(!image.replace(
            ImageSpec::uri("a.jpg").with_dimensions(600.0, 600.0),
            clock.clone()
        ));
        assert_eq!(image.transformer().transform().scale, 2.0);

        assert!(image.replace(ImageSpec::uri("b.jpg"), clock));
        assert_eq!(
            image.transformer().transform(),
            gallery_graphics::Transform::IDENTITY
        );
        assert!(!image.is_loaded());
        assert_eq!(image.transformer().viewport(), Size::new(300.0, 600.0));
    }
}
