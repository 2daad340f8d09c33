//! Quantization into a device range.
//!
//! Maps unit channel values onto `steps` evenly spaced levels spread over an
//! output range. The default, 256 levels over `0..256`, turns `[0, 1]` floats
//! into the integral values an 8 bit LED driver expects.
//!
//! # Curves
//!
//! | Range | Curve |
//! |-------|-------|
//! | `0..=steps-1` | `round(v * (steps - 1))` |
//! | `from..=to` | `from + round(v * (steps - 1)) * (to - from) / (steps - 1)` |

use std::sync::Arc;

use lumen_core::{Context, Error, Filter, Result};
use tracing::debug;

/// Steps used by [`Quantizer::new`].
pub const DEFAULT_STEPS: usize = 256;

/// Output range of a [`Quantizer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuantizeRange {
    /// `from..=to`
    Inclusive {
        /// First level
        from: f32,
        /// Last level
        to: f32,
    },
    /// `from..to`. The upper bound must be integral; the last level is `to - 1`.
    Exclusive {
        /// First level
        from: f32,
        /// Bound past the last level
        to: f32,
    },
}

impl QuantizeRange {
    /// The default range for `steps` levels: `0..steps`.
    pub fn for_steps(steps: usize) -> Self {
        Self::Exclusive {
            from: 0.0,
            to: steps as f32,
        }
    }

    /// Inclusive `(from, to)` bounds.
    ///
    /// # Errors
    ///
    /// [`Error::AmbiguousRange`] for an exclusive range whose upper bound is
    /// not an integer.
    pub fn bounds(self) -> Result<(f32, f32)> {
        match self {
            Self::Inclusive { from, to } => Ok((from, to)),
            Self::Exclusive { from, to } if to.fract() == 0.0 => Ok((from, to - 1.0)),
            Self::Exclusive { from, to } => Err(Error::AmbiguousRange { from, to }),
        }
    }
}

/// Precomputed channel curve.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Curve {
    /// `round(v * to)`
    Scale { to: f32 },
    /// `from + round(v * levels) * factor`
    Affine { from: f32, levels: f32, factor: f32 },
}

impl Curve {
    fn new(steps: usize, from: f32, to: f32) -> Self {
        let levels = (steps - 1) as f32;
        if from == 0.0 && to == levels {
            Self::Scale { to }
        } else {
            Self::Affine {
                from,
                levels,
                factor: (to - from) / levels,
            }
        }
    }

    #[inline]
    fn eval(self, v: f32) -> f32 {
        match self {
            Self::Scale { to } => (v * to).round(),
            Self::Affine {
                from,
                levels,
                factor,
            } => from + (v * levels).round() * factor,
        }
    }
}

/// Channel-wise quantization filter.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use lumen_core::{Context, Filter, Grid};
/// use lumen_filter::{QuantizeRange, Quantizer};
///
/// let context: Arc<dyn Context> = Arc::new(Grid::new(2, 2)?);
///
/// let byte = Quantizer::new(context.clone());
/// assert_eq!(byte.transfer(1.0), 255.0);
///
/// let odd = Quantizer::with_range(context, 2, QuantizeRange::Inclusive { from: 1.0, to: 3.0 })?;
/// assert_eq!(odd.transfer(0.2), 1.0);
/// assert_eq!(odd.transfer(0.8), 3.0);
/// # Ok::<(), lumen_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Quantizer {
    context: Arc<dyn Context>,
    steps: usize,
    from: f32,
    to: f32,
    curve: Curve,
}

impl Quantizer {
    /// Creates a 256 level quantizer over `0..256`.
    pub fn new(context: Arc<dyn Context>) -> Self {
        let (steps, from, to) = (DEFAULT_STEPS, 0.0, (DEFAULT_STEPS - 1) as f32);
        Self {
            context,
            steps,
            from,
            to,
            curve: Curve::new(steps, from, to),
        }
    }

    /// Creates a quantizer with `steps` levels over `0..steps`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSteps`] if `steps < 2`.
    pub fn with_steps(context: Arc<dyn Context>, steps: usize) -> Result<Self> {
        Self::with_range(context, steps, QuantizeRange::for_steps(steps))
    }

    /// Creates a quantizer with `steps` levels over `range`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSteps`] if `steps < 2`, [`Error::AmbiguousRange`] for
    /// an exclusive range with a fractional upper bound.
    pub fn with_range(context: Arc<dyn Context>, steps: usize, range: QuantizeRange) -> Result<Self> {
        if steps < 2 {
            return Err(Error::invalid_steps(steps, 2));
        }
        let (from, to) = range.bounds()?;
        debug!(steps, from, to, "quantizer filter");

        Ok(Self {
            context,
            steps,
            from,
            to,
            curve: Curve::new(steps, from, to),
        })
    }

    /// Number of levels.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Inclusive output range.
    #[inline]
    pub fn range(&self) -> (f32, f32) {
        (self.from, self.to)
    }
}

impl Filter for Quantizer {
    fn context(&self) -> &Arc<dyn Context> {
        &self.context
    }

    #[inline]
    fn transfer(&self, value: f32) -> f32 {
        self.curve.eval(value)
    }

    fn name(&self) -> &'static str {
        "quantizer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{Buffer, Grid, Pixel};

    fn context() -> Arc<dyn Context> {
        Arc::new(Grid::new(4, 4).unwrap())
    }

    #[test]
    fn test_default_quantizer() {
        let q = Quantizer::new(context());
        assert_eq!(q.steps(), 256);
        assert_eq!(q.range(), (0.0, 255.0));
        assert_eq!(q.transfer(0.0), 0.0);
        assert_eq!(q.transfer(0.5), 128.0);
        assert_eq!(q.transfer(1.0), 255.0);
    }

    #[test]
    fn test_levels_map_to_integers() {
        let q = Quantizer::new(context());
        for k in 0..=255 {
            let v = k as f32 / 255.0;
            assert_eq!(q.transfer(v), k as f32, "level {k}");
        }
    }

    #[test]
    fn test_idempotent_on_levels() {
        let ctx = context();
        let q = Quantizer::new(ctx.clone());
        let unit = Quantizer::with_range(ctx.clone(), 256, QuantizeRange::Inclusive { from: 0.0, to: 1.0 }).unwrap();

        let mut pixels = Buffer::new(ctx, |i| {
            let v = (i * 17) as f32 / 255.0;
            Pixel::new(v, v, v)
        });
        unit.apply(&mut pixels).unwrap();
        let once: Vec<Pixel> = pixels.iter().copied().collect();
        unit.apply(&mut pixels).unwrap();
        assert_eq!(pixels.elements(), once.as_slice());

        q.apply(&mut pixels).unwrap();
        for (i, p) in pixels.iter().enumerate() {
            assert_eq!(p.r, (i * 17) as f32);
        }
    }

    #[test]
    fn test_custom_range() {
        let q = Quantizer::with_range(context(), 2, QuantizeRange::Inclusive { from: 1.0, to: 3.0 }).unwrap();
        for v in [0.0_f32, 0.2, 0.49, 0.51, 0.9, 1.0] {
            assert_eq!(q.transfer(v), 2.0 * v.round() + 1.0);
        }
    }

    #[test]
    fn test_exclusive_range() {
        let q = Quantizer::with_range(context(), 8, QuantizeRange::Exclusive { from: 0.0, to: 8.0 }).unwrap();
        assert_eq!(q.range(), (0.0, 7.0));
        assert_eq!(q.transfer(1.0), 7.0);
        assert_eq!(q.transfer(0.0), 0.0);
    }

    #[test]
    fn test_with_steps() {
        let q = Quantizer::with_steps(context(), 16).unwrap();
        assert_eq!(q.range(), (0.0, 15.0));
        assert_eq!(q.transfer(1.0), 15.0);
    }

    #[test]
    fn test_rejects_bad_configuration() {
        assert_eq!(
            Quantizer::with_steps(context(), 1).unwrap_err(),
            Error::InvalidSteps { steps: 1, min: 2 }
        );
        let err = Quantizer::with_range(context(), 4, QuantizeRange::Exclusive { from: 0.0, to: 3.5 }).unwrap_err();
        assert_eq!(err, Error::AmbiguousRange { from: 0.0, to: 3.5 });
        assert!(err.is_configuration_error());
    }
}
