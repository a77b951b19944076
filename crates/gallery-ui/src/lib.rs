//! Touch-driven image gallery.
//!
//! A [`Gallery`] pages horizontally through images with a [`ViewPager`] while
//! each page's [`ViewTransformer`] pans and zooms its image. On every touch
//! move the gallery decides which of the two owns the gesture: the pager when
//! the image cannot pan further towards a neighbouring page, the image
//! otherwise, with ownership handed back mid-gesture once the pages return
//! to the current page.

mod config;
mod error;
mod events;
mod gallery;
mod listener;
mod transformable_image;
mod view_pager;
mod view_transformer;

pub use config::*;
pub use error::{GalleryError, ProbeError};
pub use events::{GalleryEvent, PageScroll, PageScrollState, PagerEvent};
pub use gallery::{ActiveResponder, Gallery};
pub use listener::GalleryListener;
pub use transformable_image::{ImageSource, ImageSpec, SizeProbe, TransformableImage};
pub use view_pager::ViewPager;
pub use view_transformer::ViewTransformer;

pub mod prelude {
    pub use crate::{
        Gallery, GalleryConfig, GalleryError, GalleryEvent, GalleryListener, ImageSpec,
        PageScroll, PageScrollState, PagerConfig, TransformerConfig,
    };
    pub use gallery_core::{Clock, FrameClock};
    pub use gallery_foundation::{GestureState, TouchEvent};
    pub use gallery_graphics::{Size, Transform};
}
