//! Circular context.

use std::f32::consts::TAU;

use super::{Cloud, Context};
use crate::{PaletteCollection, Point, Result};

/// Options for [`Circle::with_options`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleOptions {
    /// Angle of the first point, in radians.
    pub offset: f32,
    /// Width of the box the circle is centered in.
    pub width: f32,
    /// Height of the box the circle is centered in.
    pub height: f32,
    /// Radius in unnormalized units. `None` selects `min(width, height) / 2`.
    pub radius: Option<f32>,
}

impl Default for CircleOptions {
    fn default() -> Self {
        Self {
            offset: 0.0,
            width: 1.0,
            height: 1.0,
            radius: None,
        }
    }
}

/// Points placed counter clockwise on a circle, equidistant in angle.
///
/// Point `i` sits at angle `i * 2pi / n + offset` around the center of the
/// box. Adjusting the offset moves where the two ends of the point array meet.
///
/// # Example
///
/// ```
/// use lumen_core::{Circle, CircleOptions, Context};
///
/// let circle = Circle::with_options(4, CircleOptions { radius: Some(0.5), ..Default::default() })?;
/// let (x, y) = circle.position(1);
/// assert!((x - 0.5).abs() < 1e-6);
/// assert!((y - 1.0).abs() < 1e-6);
/// # Ok::<(), lumen_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Circle {
    cloud: Cloud,
    radius: f32,
    offset: f32,
}

impl Circle {
    /// Creates `point_count` points on the circle inscribed in the unit box.
    pub fn new(point_count: usize) -> Result<Self> {
        Self::with_options(point_count, CircleOptions::default())
    }

    /// Creates `point_count` points on a circle.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContext`](crate::Error::EmptyContext) if `point_count` is
    /// zero, [`Error::InvalidDimensions`](crate::Error::InvalidDimensions) for
    /// a degenerate box.
    pub fn with_options(point_count: usize, options: CircleOptions) -> Result<Self> {
        let CircleOptions {
            offset,
            width,
            height,
            radius,
        } = options;
        let radius = radius.unwrap_or(width.min(height) / 2.0);
        let (x0, y0) = (width / 2.0, height / 2.0);
        let step = TAU / point_count as f32;

        let points = (0..point_count).map(|index| {
            let angle = index as f32 * step + offset;
            Point::new(x0 + radius * angle.cos(), y0 + radius * angle.sin())
        });
        let cloud = Cloud::with_size(points, width, height)?;
        let scale = 1.0 / width.max(height);

        Ok(Self {
            cloud,
            radius: radius * scale,
            offset,
        })
    }

    /// Replaces the palette collection.
    pub fn with_palettes(mut self, palettes: PaletteCollection) -> Self {
        self.cloud = self.cloud.with_palettes(palettes);
        self
    }

    /// Normalized radius.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Angle of the first point, in radians.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// The normalized points.
    #[inline]
    pub fn points(&self) -> &[Point] {
        self.cloud.points()
    }
}

impl Context for Circle {
    #[inline]
    fn point_count(&self) -> usize {
        self.cloud.point_count()
    }

    #[inline]
    fn position(&self, index: usize) -> (f32, f32) {
        self.cloud.position(index)
    }

    #[inline]
    fn width(&self) -> f32 {
        self.cloud.width()
    }

    #[inline]
    fn height(&self) -> f32 {
        self.cloud.height()
    }

    #[inline]
    fn palettes(&self) -> &PaletteCollection {
        self.cloud.palettes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    fn assert_position(circle: &Circle, index: usize, expected: (f32, f32)) {
        let (x, y) = circle.position(index);
        assert_abs_diff_eq!(x, expected.0, epsilon = 1e-6);
        assert_abs_diff_eq!(y, expected.1, epsilon = 1e-6);
    }

    #[test]
    fn test_four_points() {
        let circle = Circle::with_options(
            4,
            CircleOptions {
                radius: Some(0.5),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(circle.point_count(), 4);
        assert_position(&circle, 0, (1.0, 0.5));
        assert_position(&circle, 1, (0.5, 1.0));
        assert_position(&circle, 2, (0.0, 0.5));
        assert_position(&circle, 3, (0.5, 0.0));
    }

    #[test]
    fn test_default_radius() {
        let circle = Circle::new(8).unwrap();
        assert_abs_diff_eq!(circle.radius(), 0.5);
        for (x, y) in circle.points().iter().map(|p| p.position()) {
            let r = ((x - 0.5).powi(2) + (y - 0.5).powi(2)).sqrt();
            assert_abs_diff_eq!(r, 0.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_offset_rotates_points() {
        let circle = Circle::with_options(
            2,
            CircleOptions {
                offset: FRAC_PI_2,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(circle.offset(), FRAC_PI_2);
        assert_position(&circle, 0, (0.5, 1.0));
        assert_position(&circle, 1, (0.5, 0.0));
    }

    #[test]
    fn test_wide_box_is_normalized() {
        let circle = Circle::with_options(
            4,
            CircleOptions {
                width: 4.0,
                height: 2.0,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(circle.width(), 1.0);
        assert_eq!(circle.height(), 0.5);
        assert_abs_diff_eq!(circle.radius(), 0.25);
        assert_position(&circle, 0, (0.75, 0.25));
    }

    #[test]
    fn test_zero_points() {
        assert_eq!(Circle::new(0).unwrap_err(), Error::EmptyContext);
    }
}
