//! Scale/translate transforms and the rectangle algebra built on them.
//!
//! Transforms follow the host renderer's convention: the content is scaled
//! around its own center and translations are expressed in the unscaled
//! coordinate space, so a translation of `t` moves the content `t * scale`
//! pixels on screen.

use crate::{InvalidGeometry, Point, Rect};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    /// Point kept fixed while scaling. `None` scales around the rect center.
    pub pivot: Option<Point>,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
        pivot: None,
    };

    pub const fn new(scale: f32, translate_x: f32, translate_y: f32) -> Self {
        Self {
            scale,
            translate_x,
            translate_y,
            pivot: None,
        }
    }

    pub const fn with_pivot(mut self, pivot: Point) -> Self {
        self.pivot = Some(pivot);
        self
    }

    pub fn validate(self) -> Result<Self, InvalidGeometry> {
        if !(self.scale.is_finite()
            && self.scale > 0.0
            && self.translate_x.is_finite()
            && self.translate_y.is_finite())
        {
            return Err(InvalidGeometry::Transform {
                scale: self.scale,
                translate_x: self.translate_x,
                translate_y: self.translate_y,
            });
        }
        match self.pivot {
            Some(pivot) if !pivot.is_finite() => Err(InvalidGeometry::Pivot(pivot)),
            _ => Ok(self),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Remaining pan distance on each edge. Positive means the content still
/// extends past the viewport on that side.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TranslateSpace {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// Largest rect with `aspect_ratio` centered inside `container`.
///
/// An empty container yields an empty rect at its center.
pub fn fit_center_rect(aspect_ratio: f32, container: Rect) -> Result<Rect, InvalidGeometry> {
    if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
        return Err(InvalidGeometry::AspectRatio(aspect_ratio));
    }
    let container = container.validate()?;
    let mut width = container.width();
    let mut height = container.height();
    if container.is_empty() {
        return Ok(Rect::from_center(container.center(), 0.0, 0.0));
    }

    if aspect_ratio > width / height {
        height = width / aspect_ratio;
    } else {
        width = height * aspect_ratio;
    }
    Ok(Rect::from_center(container.center(), width, height))
}

/// Applies `transform` to `rect`.
///
/// With a pivot the rect is first transformed around its center, then shifted
/// back by `(scale - 1) * (pivot - center)` so the pivot stays put. This is
/// exactly "translate, then scale about the pivot".
pub fn transformed_rect(rect: Rect, transform: Transform) -> Result<Rect, InvalidGeometry> {
    let rect = rect.validate()?;
    let transform = transform.validate()?;
    let scale = transform.scale;

    let centered = Rect::from_center(
        Point::new(
            rect.center_x() + transform.translate_x * scale,
            rect.center_y() + transform.translate_y * scale,
        ),
        rect.width() * scale,
        rect.height() * scale,
    );

    match transform.pivot {
        None => Ok(centered),
        Some(pivot) => {
            let dx = (scale - 1.0) * (pivot.x - centered.center_x());
            let dy = (scale - 1.0) * (pivot.y - centered.center_y());
            Ok(centered.translate(-dx, -dy))
        }
    }
}

/// Solves for the pivot-less transform mapping `from` onto `to`.
///
/// The scale comes from the width ratio alone.
pub fn get_transform(from: Rect, to: Rect) -> Result<Transform, InvalidGeometry> {
    let from = from.validate()?;
    let to = to.validate()?;
    if from.width() <= 0.0 {
        return Err(InvalidGeometry::EmptySource(from));
    }
    let scale = to.width() / from.width();
    if scale <= 0.0 {
        return Err(InvalidGeometry::Transform {
            scale,
            translate_x: 0.0,
            translate_y: 0.0,
        });
    }
    Transform::new(
        scale,
        (to.center_x() - from.center_x()) / scale,
        (to.center_y() - from.center_y()) / scale,
    )
    .validate()
}

/// Slides `rect` so it leaves no avoidable blank space inside `viewport`.
///
/// No scaling happens here. On an axis where the rect is larger than the
/// viewport, a near edge that has drifted inside is pulled back to the
/// viewport edge; on an axis where it is smaller it gets centered.
pub fn aligned_rect(rect: Rect, viewport: Rect) -> Result<Rect, InvalidGeometry> {
    let rect = rect.validate()?;
    let viewport = viewport.validate()?;

    let dx = if rect.width() > viewport.width() {
        if rect.left > viewport.left {
            viewport.left - rect.left
        } else if rect.right < viewport.right {
            viewport.right - rect.right
        } else {
            0.0
        }
    } else {
        viewport.center_x() - rect.center_x()
    };

    let dy = if rect.height() > viewport.height() {
        if rect.top > viewport.top {
            viewport.top - rect.top
        } else if rect.bottom < viewport.bottom {
            viewport.bottom - rect.bottom
        } else {
            0.0
        }
    } else {
        viewport.center_y() - rect.center_y()
    };

    Ok(rect.translate(dx, dy))
}

pub fn available_translate_space(
    rect: Rect,
    viewport: Rect,
) -> Result<TranslateSpace, InvalidGeometry> {
    let rect = rect.validate()?;
    let viewport = viewport.validate()?;
    Ok(TranslateSpace {
        left: viewport.left - rect.left,
        top: viewport.top - rect.top,
        right: rect.right - viewport.right,
        bottom: rect.bottom - viewport.bottom,
    })
}

#[cfg(test)]
#[path = "tests/transform_tests.rs"]
mod tests;
