//! Final per-point color state.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Color;

/// Mutable color of one output point.
///
/// Pixels are cleared to black at the start of every frame, composited in
/// place by the layers of a stack and finally transformed by filters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pixel {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Pixel {
    /// Creates a pixel from its channels.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Resets to black.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Overwrites all channels with `color`.
    #[inline]
    pub fn set(&mut self, color: Color) {
        self.r = color.r;
        self.g = color.g;
        self.b = color.b;
    }

    /// Current channels as a [`Color`].
    #[inline]
    pub fn color(&self) -> Color {
        Color::new(self.r, self.g, self.b)
    }

    /// Composites `color` over this pixel: `color * ratio + self * (1 - ratio)`.
    #[inline]
    pub fn mix_with(&mut self, color: Color, ratio: f32) -> &mut Self {
        let anti = 1.0 - ratio;
        self.r = color.r * ratio + self.r * anti;
        self.g = color.g * ratio + self.g * anti;
        self.b = color.b * ratio + self.b * anti;
        self
    }

    /// Applies `f` to each channel.
    #[inline]
    pub fn map(&mut self, f: impl Fn(f32) -> f32) {
        self.r = f(self.r);
        self.g = f(self.g);
        self.b = f(self.b);
    }
}

impl From<Color> for Pixel {
    #[inline]
    fn from(c: Color) -> Self {
        Self::new(c.r, c.g, c.b)
    }
}

impl From<Pixel> for Color {
    #[inline]
    fn from(p: Pixel) -> Self {
        p.color()
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.r, self.g, self.b)
    }
}
