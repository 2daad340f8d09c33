//! Two dimensional point coordinates.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An immutable point in the (normalized) plane of a context.
///
/// Points are scaled once, at construction, and never change afterwards.
///
/// # Example
///
/// ```
/// use lumen_core::Point;
///
/// let p = Point::scaled(4.0, 2.0, 0.25);
/// assert_eq!(p.position(), (1.0, 0.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a point at (x, y).
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a point at (x * scale, y * scale).
    #[inline]
    pub fn scaled(x: f32, y: f32, scale: f32) -> Self {
        Self::new(x * scale, y * scale)
    }

    /// Returns a copy of this point multiplied by `scale`.
    #[inline]
    pub fn scale(self, scale: f32) -> Self {
        Self::scaled(self.x, self.y, scale)
    }

    /// X coordinate.
    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Y coordinate.
    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Both coordinates as a tuple.
    #[inline]
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Squared euclidean distance to another point.
    #[inline]
    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl From<(f32, f32)> for Point {
    #[inline]
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f32; 2]> for Point {
    #[inline]
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for [f32; 2] {
    #[inline]
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled() {
        let p = Point::scaled(3.0, 5.0, 2.0);
        assert_eq!(p.x(), 6.0);
        assert_eq!(p.y(), 10.0);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Point::from((1.0, 2.0)), Point::new(1.0, 2.0));
        assert_eq!(Point::from([1.0, 2.0]), Point::new(1.0, 2.0));
        let arr: [f32; 2] = Point::new(0.5, 0.25).into();
        assert_eq!(arr, [0.5, 0.25]);
    }

    #[test]
    fn test_distance_squared() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_squared(&b), 25.0);
    }
}
