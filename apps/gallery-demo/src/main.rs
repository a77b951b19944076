//! Replays a few gestures against a four-page gallery on a virtual clock and
//! logs what the gallery reports. Set `RUST_LOG=debug` for the arbitration
//! details.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use gallery_core::FrameClock;
use gallery_foundation::GestureState;
use gallery_graphics::{Size, Transform};
use gallery_testing::TouchRobot;
use gallery_ui::{
    Gallery, GalleryConfig, GalleryListener, ImageSpec, PageScroll, PageScrollState, ProbeError,
    SizeProbe,
};

const VIEWPORT: Size = Size {
    width: 360.0,
    height: 640.0,
};

/// Known sizes of the demo images, standing in for a network probe.
const CATALOG: &[(&str, f32, f32)] = &[
    ("https://example.com/harbour.jpg", 1080.0, 1920.0),
    ("https://example.com/skyline.jpg", 2400.0, 1600.0),
    ("https://example.com/missing.jpg", 0.0, 0.0),
];

/// Queues size requests; `main` answers them between gestures.
#[derive(Clone, Default)]
struct CatalogProbe {
    pending: Rc<RefCell<VecDeque<(usize, String)>>>,
}

impl SizeProbe for CatalogProbe {
    fn request_size(&mut self, page: usize, uri: &str) {
        self.pending.borrow_mut().push_back((page, uri.to_owned()));
    }
}

impl CatalogProbe {
    fn resolve_all(&self, gallery: &mut Gallery) -> Result<()> {
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some((page, uri)) = next else {
                return Ok(());
            };
            let size = CATALOG
                .iter()
                .find(|(known, _, _)| *known == uri)
                .map(|&(_, width, height)| Size::new(width, height))
                .ok_or_else(|| ProbeError::Failed {
                    uri: uri.clone(),
                    reason: "not in catalog".into(),
                });
            gallery
                .on_image_size_resolved(page, size)
                .with_context(|| format!("resolving size of page {page}"))?;
        }
    }
}

/// Logs every notification.
struct LogListener;

impl GalleryListener for LogListener {
    fn on_page_selected(&mut self, page: usize) {
        log::info!("page selected: {page}");
    }

    fn on_page_scroll_state_changed(&mut self, state: PageScrollState) {
        log::info!("scroll state: {state:?}");
    }

    fn on_page_scroll(&mut self, scroll: PageScroll) {
        log::trace!(
            "scroll: page {} offset {:.3} fraction {:.3}",
            scroll.position,
            scroll.offset,
            scroll.fraction
        );
    }

    fn on_view_transformed(&mut self, page: usize, transform: Transform) {
        log::debug!("page {page} transform: {transform:?}");
    }

    fn on_transform_gesture_released(&mut self, page: usize, transform: Transform) -> bool {
        log::info!(
            "page {page} released at scale {:.2} ({:.1}, {:.1})",
            transform.scale,
            transform.translate_x,
            transform.translate_y
        );
        false
    }

    fn on_single_tap_confirmed(&mut self, page: usize) {
        log::info!("single tap on page {page}");
    }

    fn on_gallery_state_changed(&mut self, idle: bool) {
        log::info!("gallery {}", if idle { "idle" } else { "busy" });
    }

    fn on_long_press(&mut self, state: &GestureState) {
        log::info!("long press at ({:.0}, {:.0})", state.x0(), state.y0());
    }
}

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let clock = FrameClock::starting_at_millis(0);
    let probe = CatalogProbe::default();
    let mut gallery = Gallery::new(GalleryConfig::default(), Rc::new(clock.clone()))
        .with_listener(LogListener)
        .with_size_probe(probe.clone());

    gallery.set_images(vec![
        ImageSpec::uri(CATALOG[0].0),
        ImageSpec::uri(CATALOG[1].0),
        ImageSpec::bundled(7).with_dimensions(720.0, 1280.0),
        ImageSpec::uri(CATALOG[2].0),
    ]);
    gallery.set_viewport(VIEWPORT);
    probe.resolve_all(&mut gallery)?;
    for page in 0..gallery.page_count() {
        gallery.on_image_loaded(page)?;
    }
    if let Some(page) = gallery.page(3).filter(|page| page.has_error()) {
        log::warn!("page 3 could not be sized: {:?}", page.error());
    }

    let mut robot = TouchRobot::new(gallery, clock);
    if !robot.wait_for_idle() {
        bail!("gallery did not settle after mount");
    }

    log::info!("-- swipe to the next page");
    robot.swipe((300.0, 320.0), (60.0, 320.0), 80, 5);
    robot.wait_for_idle();

    log::info!("-- double tap to zoom");
    robot.double_tap(180.0, 320.0);
    robot.wait_for_idle();

    log::info!("-- pan the zoomed image");
    robot.swipe((180.0, 320.0), (260.0, 300.0), 160, 8);
    robot.wait_for_idle();

    log::info!("-- pinch back out");
    robot
        .down(1, 100.0, 320.0)
        .down(2, 260.0, 320.0)
        .wait(16)
        .move_all(&[(1, 150.0, 320.0), (2, 210.0, 320.0)])
        .up(1, 150.0, 320.0)
        .up(2, 210.0, 320.0);
    robot.wait_for_idle();

    log::info!("-- single tap");
    robot.tap(180.0, 320.0);
    robot.wait_for_idle();

    log::info!("-- long press");
    robot.down(1, 180.0, 320.0).wait(700).up(1, 180.0, 320.0);
    robot.wait_for_idle();

    let gallery = robot.target();
    let page = gallery
        .current_page()
        .context("gallery has no current page")?;
    log::info!(
        "finished on page {page} of {} with transform {:?}",
        gallery.page_count(),
        gallery.transform_of(page)
    );
    Ok(())
}
