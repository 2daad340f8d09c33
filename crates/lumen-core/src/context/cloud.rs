//! Point cloud context with arbitrary coordinates.

use rand::Rng;
use tracing::debug;

use super::{Context, Extent};
use crate::{Error, PaletteCollection, Point, Result};

/// Options for [`Cloud::scatter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterOptions {
    /// Width of the area points are drawn from.
    pub width: f32,
    /// Height of the area points are drawn from.
    pub height: f32,
    /// Minimum distance between any two points, in unnormalized units.
    ///
    /// `None` selects `sqrt(width * height / (2 * n))`.
    pub distance: Option<f32>,
}

impl Default for ScatterOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            distance: None,
        }
    }
}

/// Points at explicit coordinates.
///
/// Input coordinates are expressed in a `width x height` box (1x1 unless
/// stated otherwise) and rescaled so that the larger side becomes 1.
///
/// # Example
///
/// ```
/// use lumen_core::{Cloud, Context};
///
/// let cloud = Cloud::with_size([(0.0, 0.0), (4.0, 1.0)], 4.0, 2.0)?;
/// assert_eq!(cloud.point_count(), 2);
/// assert_eq!(cloud.position(1), (1.0, 0.25));
/// assert_eq!(cloud.height(), 0.5);
/// # Ok::<(), lumen_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Cloud {
    points: Vec<Point>,
    width: f32,
    height: f32,
    palettes: PaletteCollection,
}

impl Cloud {
    /// Creates a cloud in the unit box.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContext`] if `points` is empty.
    pub fn new<I, P>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        Self::with_size(points, 1.0, 1.0)
    }

    /// Creates a cloud whose coordinates live in a `width x height` box.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContext`] if `points` is empty,
    /// [`Error::InvalidDimensions`] for a degenerate box.
    pub fn with_size<I, P>(points: I, width: f32, height: f32) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        let extent = Extent::normalize(width, height)?;
        let points: Vec<Point> = points
            .into_iter()
            .map(|p| p.into().scale(extent.scale))
            .collect();
        if points.is_empty() {
            return Err(Error::EmptyContext);
        }

        debug!(
            points = points.len(),
            width = extent.width,
            height = extent.height,
            "cloud context"
        );

        Ok(Self {
            points,
            width: extent.width,
            height: extent.height,
            palettes: PaletteCollection::default(),
        })
    }

    /// Randomly places `point_count` points, see [`scatter_with_rng`](Self::scatter_with_rng).
    pub fn scatter(point_count: usize, options: ScatterOptions) -> Result<Self> {
        Self::scatter_with_rng(point_count, options, &mut rand::thread_rng())
    }

    /// Randomly places `point_count` points more than a minimum distance apart.
    ///
    /// Candidates are drawn uniformly from the box and kept only when they are
    /// farther than the minimum distance from every accepted point. There is no
    /// retry limit, so the running time is nondeterministic and grows quickly
    /// as the requested distance approaches the feasibility bound.
    ///
    /// # Errors
    ///
    /// [`Error::InfeasibleScatter`] if `2 * d^2 * n > width * height` or the
    /// distance is negative or not finite,
    /// [`Error::EmptyContext`] if `point_count` is zero,
    /// [`Error::InvalidDimensions`] for a degenerate box.
    pub fn scatter_with_rng<R>(point_count: usize, options: ScatterOptions, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        let ScatterOptions { width, height, distance } = options;
        Extent::normalize(width, height)?;
        if point_count == 0 {
            return Err(Error::EmptyContext);
        }

        let area = width * height;
        let d2 = match distance {
            Some(d) => {
                let d2 = d * d;
                // NaN fails every distance test and would never terminate
                if !(d >= 0.0) || !d.is_finite() || 2.0 * d2 * point_count as f32 > area {
                    return Err(Error::InfeasibleScatter {
                        point_count,
                        distance: d,
                        area,
                    });
                }
                d2
            }
            None => area / (2.0 * point_count as f32),
        };

        let mut points: Vec<Point> = Vec::with_capacity(point_count);
        let mut rejected = 0usize;
        while points.len() < point_count {
            let candidate = Point::new(rng.gen_range(0.0..=width), rng.gen_range(0.0..=height));
            if points.iter().all(|p| p.distance_squared(&candidate) > d2) {
                points.push(candidate);
            } else {
                rejected += 1;
            }
        }

        debug!(point_count, rejected, "scattered points");
        Self::with_size(points, width, height)
    }

    /// Replaces the palette collection.
    pub fn with_palettes(mut self, palettes: PaletteCollection) -> Self {
        self.palettes = palettes;
        self
    }

    /// The normalized points.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl Context for Cloud {
    #[inline]
    fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    fn position(&self, index: usize) -> (f32, f32) {
        self.points[index].position()
    }

    #[inline]
    fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    fn palettes(&self) -> &PaletteCollection {
        &self.palettes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_points_are_rescaled() {
        let cloud = Cloud::with_size([(2.0, 1.0), (0.0, 2.0)], 2.0, 4.0).unwrap();
        assert_eq!(cloud.width(), 0.5);
        assert_eq!(cloud.height(), 1.0);
        assert_eq!(cloud.position(0), (0.5, 0.25));
        assert_eq!(cloud.position(1), (0.0, 0.5));
        assert_eq!(cloud.points().len(), 2);
    }

    #[test]
    fn test_empty_cloud_is_rejected() {
        let points: Vec<(f32, f32)> = Vec::new();
        assert_eq!(Cloud::new(points).unwrap_err(), Error::EmptyContext);
    }

    #[test]
    fn test_scatter_respects_distance() {
        let mut rng = StdRng::seed_from_u64(7);
        let distance = 0.15;
        let cloud = Cloud::scatter_with_rng(
            10,
            ScatterOptions {
                distance: Some(distance),
                ..Default::default()
            },
            &mut rng,
        )
        .unwrap();

        assert_eq!(cloud.point_count(), 10);
        let points = cloud.points();
        for (i, a) in points.iter().enumerate() {
            assert!((0.0..=1.0).contains(&a.x()));
            assert!((0.0..=1.0).contains(&a.y()));
            for b in &points[i + 1..] {
                assert!(a.distance_squared(b).sqrt() >= distance);
            }
        }
    }

    #[test]
    fn test_scatter_default_distance() {
        let mut rng = StdRng::seed_from_u64(42);
        let options = ScatterOptions {
            width: 2.0,
            height: 1.0,
            distance: None,
        };
        let cloud = Cloud::scatter_with_rng(8, options, &mut rng).unwrap();
        assert_relative_eq!(cloud.width(), 1.0);
        assert_relative_eq!(cloud.height(), 0.5);

        // d^2 = 2 / 16 in raw units, scaled by 1/2 in each axis
        let d2 = 2.0 / 16.0 * 0.25;
        let points = cloud.points();
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert!(a.distance_squared(b) > d2 * 0.999);
            }
        }
    }

    #[test]
    fn test_scatter_rejects_infeasible_distance() {
        let err = Cloud::scatter(
            10,
            ScatterOptions {
                distance: Some(0.5),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::InfeasibleScatter { point_count: 10, .. }));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_scatter_rejects_invalid_distance() {
        for distance in [f32::NAN, f32::INFINITY, -0.1] {
            let err = Cloud::scatter(
                3,
                ScatterOptions {
                    distance: Some(distance),
                    ..Default::default()
                },
            )
            .unwrap_err();
            assert!(matches!(err, Error::InfeasibleScatter { point_count: 3, .. }));
        }
    }

    #[test]
    fn test_scatter_rejects_zero_points() {
        assert_eq!(
            Cloud::scatter(0, ScatterOptions::default()).unwrap_err(),
            Error::EmptyContext
        );
    }
}
