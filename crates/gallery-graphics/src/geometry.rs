//! Geometric primitives: Point, Size, Rect

use crate::InvalidGeometry;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Width over height, `None` for an empty size.
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.is_empty() {
            None
        } else {
            Some(self.width / self.height)
        }
    }
}

/// Axis-aligned rectangle stored as its four edges, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    /// Rectangle of the given size centered on `center`.
    pub fn from_center(center: Point, width: f32, height: f32) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            center.x + width / 2.0,
            center.y + height / 2.0,
        )
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    /// Moves the rectangle in place.
    pub fn offset(&mut self, dx: f32, dy: f32) -> &mut Self {
        self.left += dx;
        self.right += dx;
        self.top += dy;
        self.bottom += dy;
        self
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        let mut moved = *self;
        moved.offset(dx, dy);
        moved
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && y >= self.top && x <= self.right && y <= self.bottom
    }

    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }

    /// Finite with `right >= left` and `bottom >= top`.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.right >= self.left && self.bottom >= self.top
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    pub fn validate(self) -> Result<Self, InvalidGeometry> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(InvalidGeometry::Rect(self))
        }
    }

    /// Edge-wise comparison with a tolerance.
    pub fn approx_eq(&self, other: &Rect, epsilon: f32) -> bool {
        (self.left - other.left).abs() <= epsilon
            && (self.top - other.top).abs() <= epsilon
            && (self.right - other.right).abs() <= epsilon
            && (self.bottom - other.bottom).abs() <= epsilon
    }

    /// Edge-wise linear interpolation towards `target`.
    pub fn lerp(&self, target: &Rect, fraction: f32) -> Rect {
        Rect::new(
            self.left + (target.left - self.left) * fraction,
            self.top + (target.top - self.top) * fraction,
            self.right + (target.right - self.right) * fraction,
            self.bottom + (target.bottom - self.bottom) * fraction,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_dimensions() {
        let rect = Rect::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(rect.width(), 100.0);
        assert_eq!(rect.height(), 50.0);
        assert_eq!(rect.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn offset_mutates_in_place() {
        let mut rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        rect.offset(5.0, -5.0).offset(1.0, 1.0);
        assert_eq!(rect, Rect::new(6.0, -4.0, 16.0, 6.0));
    }

    #[test]
    fn validate_rejects_nan_and_inverted() {
        assert!(Rect::new(0.0, 0.0, f32::NAN, 1.0).validate().is_err());
        assert!(Rect::new(5.0, 0.0, 1.0, 1.0).validate().is_err());
        assert!(Rect::new(0.0, 0.0, 0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn approx_eq_uses_tolerance() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(0.005, 0.0, 100.009, 99.995);
        assert!(a.approx_eq(&b, 0.01));
        assert!(!a.approx_eq(&b.translate(0.5, 0.0), 0.01));
    }

    #[test]
    fn lerp_halfway() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(100.0, 50.0, 300.0, 250.0);
        assert_eq!(a.lerp(&b, 0.5), Rect::new(50.0, 25.0, 200.0, 175.0));
    }
}
