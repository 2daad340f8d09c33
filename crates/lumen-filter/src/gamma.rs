//! Gamma correction.
//!
//! Maps each channel through `v^gamma`. LED drivers are roughly linear in
//! duty cycle while perceived brightness is not, so a gamma around 2.2 makes
//! ramps look even.

use std::sync::Arc;

use lumen_core::{Context, Filter};
use tracing::debug;

/// Gamma used by [`Gamma::new`].
pub const DEFAULT_GAMMA: f32 = 2.2;

/// Power-law transfer: `v^gamma`.
///
/// Non-positive inputs map to 0.
#[inline]
pub fn gamma_transfer(v: f32, gamma: f32) -> f32 {
    if v <= 0.0 { 0.0 } else { v.powf(gamma) }
}

/// Channel-wise power-law filter.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use lumen_core::{Context, Filter, Grid};
/// use lumen_filter::Gamma;
///
/// let context: Arc<dyn Context> = Arc::new(Grid::new(2, 2)?);
/// let gamma = Gamma::with_value(context, 2.0);
/// assert_eq!(gamma.transfer(0.5), 0.25);
/// # Ok::<(), lumen_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Gamma {
    context: Arc<dyn Context>,
    value: f32,
    curve: Curve,
}

/// Transfer selected once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Curve {
    Identity,
    Square,
    Power(f32),
}

impl Curve {
    fn new(gamma: f32) -> Self {
        if gamma == 1.0 {
            Self::Identity
        } else if gamma == 2.0 {
            Self::Square
        } else {
            Self::Power(gamma)
        }
    }

    #[inline]
    fn eval(self, v: f32) -> f32 {
        if v <= 0.0 {
            return 0.0;
        }
        match self {
            Self::Identity => v,
            Self::Square => v * v,
            Self::Power(gamma) => v.powf(gamma),
        }
    }
}

impl Gamma {
    /// Creates a gamma 2.2 filter.
    pub fn new(context: Arc<dyn Context>) -> Self {
        Self::with_value(context, DEFAULT_GAMMA)
    }

    /// Creates a filter with an explicit exponent.
    pub fn with_value(context: Arc<dyn Context>, value: f32) -> Self {
        let curve = Curve::new(value);
        debug!(value, ?curve, "gamma filter");
        Self { context, value, curve }
    }

    /// The exponent.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }
}

impl Filter for Gamma {
    fn context(&self) -> &Arc<dyn Context> {
        &self.context
    }

    #[inline]
    fn transfer(&self, value: f32) -> f32 {
        self.curve.eval(value)
    }

    fn name(&self) -> &'static str {
        "gamma"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lumen_core::{Buffer, Cloud, Pixel};

    fn context() -> Arc<dyn Context> {
        Arc::new(Cloud::new([(0.0, 0.0), (0.5, 0.5), (1.0, 1.0)]).unwrap())
    }

    #[test]
    fn test_unit_gamma_is_identity() {
        let ctx = context();
        let mut pixels = Buffer::new(ctx.clone(), |i| {
            let v = i as f32 / 2.0;
            Pixel::new(v, 1.0 - v, 0.3)
        });
        let before: Vec<Pixel> = pixels.iter().copied().collect();

        Gamma::with_value(ctx, 1.0).apply(&mut pixels).unwrap();
        assert_eq!(pixels.elements(), before.as_slice());
    }

    #[test]
    fn test_default_value() {
        let gamma = Gamma::new(context());
        assert_eq!(gamma.value(), DEFAULT_GAMMA);
        assert_relative_eq!(gamma.transfer(0.5), 0.5_f32.powf(2.2));
        assert_eq!(gamma.transfer(0.0), 0.0);
        assert_eq!(gamma.transfer(1.0), 1.0);
    }

    #[test]
    fn test_negative_input_maps_to_zero() {
        assert_eq!(gamma_transfer(-0.5, 2.2), 0.0);
        for value in [1.0, 2.0, 2.2] {
            assert_eq!(Gamma::with_value(context(), value).transfer(-0.5), 0.0);
        }
    }

    #[test]
    fn test_curve_selection() {
        assert_eq!(Gamma::with_value(context(), 1.0).curve, Curve::Identity);
        assert_eq!(Gamma::with_value(context(), 2.0).curve, Curve::Square);
        assert_eq!(Gamma::new(context()).curve, Curve::Power(DEFAULT_GAMMA));

        for value in [1.0, 2.0, 2.2, 0.45] {
            let gamma = Gamma::with_value(context(), value);
            for k in 0..=20 {
                let v = k as f32 / 20.0;
                assert_relative_eq!(gamma.transfer(v), gamma_transfer(v, value), max_relative = 1e-6);
            }
        }
    }
}
