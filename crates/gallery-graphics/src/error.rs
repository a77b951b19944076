use crate::{Point, Rect};

/// Raised when geometry input is malformed.
///
/// This always indicates a caller bug, so nothing in the gallery tries to
/// recover from it: the operation that produced it is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InvalidGeometry {
    #[error("invalid rect {0:?}")]
    Rect(Rect),
    #[error("invalid transform scale={scale} translate=({translate_x}, {translate_y})")]
    Transform {
        scale: f32,
        translate_x: f32,
        translate_y: f32,
    },
    #[error("invalid pivot x={}, y={}", .0.x, .0.y)]
    Pivot(Point),
    #[error("invalid aspect ratio {0}")]
    AspectRatio(f32),
    #[error("cannot derive a transform from an empty rect {0:?}")]
    EmptySource(Rect),
}
