//! Per-layer, per-point render state.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Render state of one point in one layer.
///
/// - `i` - intensity in `[0, 1]`
/// - `p` - palette selector, an index into the context's palette collection
/// - `q` - position within the selected palette, in `[0, 1]`
///
/// Writes to `i` and `q` are clamped into range rather than rejected. NaN is
/// stored as 0.
///
/// # Example
///
/// ```
/// use lumen_core::Vixel;
///
/// let mut v = Vixel::default();
/// v.set_i(1.5).set_q(-0.2);
/// assert_eq!((v.i(), v.q()), (1.0, 0.0));
/// assert_eq!(v.to_string(), "(1.0, 0, 0.0)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawVixel"))]
pub struct Vixel {
    i: f32,
    p: usize,
    q: f32,
}

/// Unclamped wire form, deserialized through [`Vixel::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawVixel {
    i: f32,
    p: usize,
    q: f32,
}

#[cfg(feature = "serde")]
impl From<RawVixel> for Vixel {
    fn from(raw: RawVixel) -> Self {
        Self::new(raw.i, raw.p, raw.q)
    }
}

#[inline]
fn unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

impl Vixel {
    /// Creates a vixel, clamping `i` and `q`.
    #[inline]
    pub fn new(i: f32, p: usize, q: f32) -> Self {
        Self {
            i: unit(i),
            p,
            q: unit(q),
        }
    }

    /// Intensity.
    #[inline]
    pub fn i(&self) -> f32 {
        self.i
    }

    /// Palette selector.
    #[inline]
    pub fn p(&self) -> usize {
        self.p
    }

    /// Palette position.
    #[inline]
    pub fn q(&self) -> f32 {
        self.q
    }

    /// Sets the intensity, clamped to `[0, 1]`.
    #[inline]
    pub fn set_i(&mut self, i: f32) -> &mut Self {
        self.i = unit(i);
        self
    }

    /// Sets the palette selector.
    #[inline]
    pub fn set_p(&mut self, p: usize) -> &mut Self {
        self.p = p;
        self
    }

    /// Sets the palette position, clamped to `[0, 1]`.
    #[inline]
    pub fn set_q(&mut self, q: f32) -> &mut Self {
        self.q = unit(q);
        self
    }

    /// Sets all three fields at once.
    #[inline]
    pub fn set(&mut self, i: f32, p: usize, q: f32) -> &mut Self {
        *self = Self::new(i, p, q);
        self
    }

    /// Returns true if the vixel has no visible contribution.
    #[inline]
    pub fn is_off(&self) -> bool {
        self.i <= 0.0
    }
}

impl fmt::Display for Vixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {}, {:.1})", self.i, self.p, self.q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_off() {
        let v = Vixel::default();
        assert!(v.is_off());
        assert_eq!((v.i(), v.p(), v.q()), (0.0, 0, 0.0));
    }

    #[test]
    fn test_clamps_writes() {
        let mut v = Vixel::new(-1.0, 2, 3.0);
        assert_eq!((v.i(), v.p(), v.q()), (0.0, 2, 1.0));

        v.set_i(0.25).set_q(0.75).set_p(1);
        assert_eq!((v.i(), v.p(), v.q()), (0.25, 1, 0.75));

        v.set_i(f32::NAN);
        assert_eq!(v.i(), 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Vixel::new(0.5, 3, 0.3).to_string(), "(0.5, 3, 0.3)");
    }
}
