//! RGB color values.
//!
//! [`Color`] is the value type produced by palettes and consumed by pixels.
//! Channels are nominally in `[0, 1]` but this is not enforced: filters such as
//! a quantizer may legitimately move them into a device range like `[0, 255]`.
//!
//! # Example
//!
//! ```
//! use lumen_core::Color;
//!
//! let a = Color::new(0.3, 0.6, 0.2);
//! let b = Color::new(0.1, 0.2, 0.5);
//! let mixed = a.mix(b, 0.5);
//! assert!((mixed.r - 0.2).abs() < 1e-6);
//! assert_eq!(Color::from_hex(0xFF8000).to_string(), "#FF8000");
//! ```

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An RGB triple with linear mixing.
///
/// Equality is exact, component by component.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Color {
    /// Black (0, 0, 0).
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// White (1, 1, 1).
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// Pure red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    /// Pure green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    /// Pure blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a color from its channels.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from a packed `0xRRGGBB` integer.
    ///
    /// Bits above the lowest 24 are ignored.
    #[inline]
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Channels as `[r, g, b]`.
    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns the linear mix between `self` and `other`.
    ///
    /// `ratio = 0` yields `self`, `ratio = 1` yields `other`.
    #[inline]
    pub fn mix(self, other: Self, ratio: f32) -> Self {
        let anti = 1.0 - ratio;
        Self::new(
            self.r * anti + other.r * ratio,
            self.g * anti + other.g * ratio,
            self.b * anti + other.b * ratio,
        )
    }

    /// Moves this color toward `other` in place. See [`mix`](Self::mix).
    #[inline]
    pub fn mix_with(&mut self, other: Self, ratio: f32) -> &mut Self {
        *self = self.mix(other, ratio);
        self
    }
}

impl From<[f32; 3]> for Color {
    #[inline]
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<(f32, f32, f32)> for Color {
    #[inline]
    fn from((r, g, b): (f32, f32, f32)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<u32> for Color {
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

impl From<Color> for [f32; 3] {
    #[inline]
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

/// Formats the color in the traditional `#RRGGBB` notation.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let byte = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        write!(f, "#{:02X}{:02X}{:02X}", byte(self.r), byte(self.g), byte(self.b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mix_endpoints() {
        let a = Color::new(0.3, 0.6, 0.2);
        let b = Color::new(0.1, 0.2, 0.5);
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
    }

    #[test]
    fn test_mix_halfway() {
        let a = Color::new(0.3, 0.6, 0.2);
        let b = Color::new(0.1, 0.2, 0.5);
        let m = a.mix(b, 0.5);
        assert_abs_diff_eq!(m.r, 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(m.g, 0.4, epsilon = 1e-6);
        assert_abs_diff_eq!(m.b, 0.35, epsilon = 1e-6);
    }

    #[test]
    fn test_mix_with_in_place() {
        let mut a = Color::BLACK;
        a.mix_with(Color::WHITE, 0.25);
        assert_abs_diff_eq!(a.g, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex(0xFF0080);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert_abs_diff_eq!(c.b, 128.0 / 255.0, epsilon = 1e-6);
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::RED.to_string(), "#FF0000");
        assert_eq!(Color::from_hex(0x04A4BF).to_string(), "#04A4BF");
        // Out of range channels are clipped for display only
        assert_eq!(Color::new(2.0, -1.0, 0.0).to_string(), "#FF0000");
    }
}
