//! Pure math for the gallery: points, sizes, rectangles and the scale/translate
//! transforms applied to image pages.
//!
//! Nothing in this crate holds state. Every function either returns a new
//! value or fails with [`InvalidGeometry`] when handed non-finite input.

mod error;
mod geometry;
mod transform;

pub use error::*;
pub use geometry::*;
pub use transform::*;

pub mod prelude {
    pub use crate::error::InvalidGeometry;
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::transform::{
        aligned_rect, available_translate_space, fit_center_rect, get_transform,
        transformed_rect, Transform, TranslateSpace,
    };
}
