//! Color palettes.
//!
//! A palette maps a position in `[0, 1]` to a [`Color`]. Two flavours exist:
//!
//! - **Continuous**: the position selects one of `n - 1` segments between the
//!   control colors and the two ends are mixed linearly.
//! - **Discrete**: the continuous curve is sampled `steps` times at
//!   construction. Lookup rounds the position *down* to the nearest sample and
//!   returns it untouched.
//!
//! Anything that can map a position to a color implements [`PaletteLike`]; the
//! compositor only ever depends on that trait. A [`PaletteCollection`] is the
//! ordered set of palettes a context exposes to its layers.
//!
//! # Example
//!
//! ```
//! use lumen_core::{Color, Palette, PaletteLike};
//!
//! let palette = Palette::new([0x11998e_u32, 0x38ef7d])?.with_label("Quepal");
//! assert_eq!(palette.color_at(0.0), Color::from_hex(0x11998e));
//! assert_eq!(palette.to_string(), "#11998E -> #38EF7D (Quepal)");
//!
//! let discrete = palette.discretize(5)?;
//! assert_eq!(discrete.color_at(0.30), discrete.color_at(0.45));
//! # Ok::<(), lumen_core::Error>(())
//! ```

use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::{Color, Error, Result};

/// Anything that maps a scalar position to a color.
pub trait PaletteLike: Send + Sync + fmt::Debug {
    /// Returns the color at `pos`. Positions outside `[0, 1]` are clamped.
    fn color_at(&self, pos: f32) -> Color;

    /// Optional human readable label.
    fn label(&self) -> Option<&str> {
        None
    }
}

/// A continuous or discrete color ramp. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
    /// Precomputed lookup table for discrete palettes.
    samples: Option<Vec<Color>>,
    label: Option<String>,
}

impl Palette {
    /// Creates a continuous palette from its control colors.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyPalette`] if no colors are given.
    pub fn new<I, C>(colors: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Color>,
    {
        let colors: Vec<Color> = colors.into_iter().map(Into::into).collect();
        if colors.is_empty() {
            return Err(Error::EmptyPalette);
        }
        Ok(Self {
            colors,
            samples: None,
            label: None,
        })
    }

    /// Creates a discrete palette with `steps` samples.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyPalette`] or [`Error::InvalidSteps`] if `steps < 2`.
    pub fn discrete<I, C>(colors: I, steps: usize) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Color>,
    {
        Self::new(colors)?.discretize(steps)
    }

    /// Infallible constructor for the built-in palettes.
    fn preset(label: &str, hex: &[u32]) -> Self {
        Self {
            colors: hex.iter().map(|&h| Color::from_hex(h)).collect(),
            samples: None,
            label: Some(label.to_owned()),
        }
    }

    /// Attaches a label to the palette.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns a new discrete palette built from the same control colors.
    ///
    /// Discrete palettes are resampled from their continuous curve, not from
    /// their existing samples.
    pub fn discretize(&self, steps: usize) -> Result<Self> {
        if steps < 2 {
            return Err(Error::invalid_steps(steps, 2));
        }
        Ok(Self {
            colors: self.colors.clone(),
            samples: Some(self.sample(steps)),
            label: self.label.clone(),
        })
    }

    /// Samples `n` evenly spaced colors along the continuous curve,
    /// including both ends.
    pub fn sample(&self, n: usize) -> Vec<Color> {
        match n {
            0 => Vec::new(),
            1 => vec![self.colors[0]],
            _ => {
                let last = (n - 1) as f32;
                (0..n).map(|i| self.interpolate(i as f32 / last)).collect()
            }
        }
    }

    /// The control colors.
    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Number of discrete steps, or `None` for continuous palettes.
    #[inline]
    pub fn steps(&self) -> Option<usize> {
        self.samples.as_ref().map(Vec::len)
    }

    /// Returns true if lookups use the precomputed samples.
    #[inline]
    pub fn is_discrete(&self) -> bool {
        self.samples.is_some()
    }

    /// Linear interpolation between the control colors.
    fn interpolate(&self, pos: f32) -> Color {
        let last = self.colors.len() - 1;
        // NaN falls through to the first color as well.
        if !(pos > 0.0) || last == 0 {
            return self.colors[0];
        }
        if pos >= 1.0 {
            return self.colors[last];
        }

        let scaled = pos * last as f32;
        let bin = (scaled.floor() as usize).min(last - 1);
        let ratio = scaled - bin as f32;
        self.colors[bin].mix(self.colors[bin + 1], ratio)
    }
}

impl PaletteLike for Palette {
    fn color_at(&self, pos: f32) -> Color {
        let Some(samples) = &self.samples else {
            return self.interpolate(pos);
        };

        let last = samples.len() - 1;
        let index = if pos >= 1.0 {
            last
        } else if !(pos > 0.0) {
            0
        } else {
            ((pos * last as f32).floor() as usize).min(last)
        };
        samples[index]
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Formats as `#42BEAF -> #020180 (label)`.
impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, color) in self.colors.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{color}")?;
        }
        if let Some(label) = &self.label {
            write!(f, " ({label})")?;
        }
        Ok(())
    }
}

static DEFAULT_PALETTES: LazyLock<PaletteCollection> = LazyLock::new(|| {
    let presets: Vec<Arc<dyn PaletteLike>> = vec![
        Arc::new(Palette::preset("Argon", &[0x03001e, 0x7303c0, 0xec38bc, 0xfdeff9])),
        Arc::new(Palette::preset("Red Sunset", &[0x355c7d, 0x6c5b7b, 0xc06c84])),
        Arc::new(Palette::preset("Quepal", &[0x11998e, 0x38ef7d])),
    ];
    PaletteCollection {
        palettes: presets.into(),
    }
});

/// An ordered, non-empty, shared set of palettes.
///
/// Cloning is cheap: the palettes themselves are reference counted.
#[derive(Debug, Clone)]
pub struct PaletteCollection {
    palettes: Arc<[Arc<dyn PaletteLike>]>,
}

impl PaletteCollection {
    /// Creates a collection from shared palettes.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyPaletteCollection`] if `palettes` is empty.
    pub fn new(palettes: Vec<Arc<dyn PaletteLike>>) -> Result<Self> {
        if palettes.is_empty() {
            return Err(Error::EmptyPaletteCollection);
        }
        Ok(Self {
            palettes: palettes.into(),
        })
    }

    /// Creates a collection from concrete palettes.
    pub fn from_palettes<I, P>(palettes: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: PaletteLike + 'static,
    {
        Self::new(
            palettes
                .into_iter()
                .map(|p| Arc::new(p) as Arc<dyn PaletteLike>)
                .collect(),
        )
    }

    /// The built-in collection: `Argon`, `Red Sunset` and `Quepal`.
    pub fn builtin() -> Self {
        DEFAULT_PALETTES.clone()
    }

    /// Number of palettes.
    #[inline]
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// Palette at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&dyn PaletteLike> {
        self.palettes.get(index).map(|p| &**p)
    }

    /// Palette at `index`, clamped to the last palette of the collection.
    #[inline]
    pub fn clamped(&self, index: usize) -> &dyn PaletteLike {
        &*self.palettes[index.min(self.palettes.len() - 1)]
    }

    /// First palette whose label equals `label`.
    pub fn find(&self, label: &str) -> Option<&dyn PaletteLike> {
        self.iter().find(|p| p.label() == Some(label))
    }

    /// Iterates over the palettes in order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn PaletteLike> + '_ {
        self.palettes.iter().map(|p| &**p)
    }
}

impl Default for PaletteCollection {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb() -> [Color; 3] {
        [Color::RED, Color::GREEN, Color::BLUE]
    }

    #[test]
    fn test_empty_palette() {
        assert_eq!(Palette::new(Vec::<Color>::new()), Err(Error::EmptyPalette));
    }

    #[test]
    fn test_continuous_endpoints() {
        let palette = Palette::new(rgb()).unwrap();
        assert_eq!(palette.color_at(0.0), Color::RED);
        assert_eq!(palette.color_at(0.5), Color::GREEN);
        assert_eq!(palette.color_at(1.0), Color::BLUE);
        assert_eq!(palette.color_at(-3.0), Color::RED);
        assert_eq!(palette.color_at(7.0), Color::BLUE);
    }

    #[test]
    fn test_continuous_mixes() {
        let palette = Palette::new(rgb()).unwrap();
        assert_eq!(palette.color_at(0.25), Color::RED.mix(Color::GREEN, 0.5));
        assert_eq!(palette.color_at(0.75), Color::GREEN.mix(Color::BLUE, 0.5));
    }

    #[test]
    fn test_single_color() {
        let palette = Palette::new([Color::WHITE]).unwrap();
        assert_eq!(palette.color_at(0.3), Color::WHITE);
        let discrete = palette.discretize(4).unwrap();
        assert_eq!(discrete.color_at(0.9), Color::WHITE);
    }

    #[test]
    fn test_discrete_endpoints() {
        let palette = Palette::discrete(rgb(), 5).unwrap();
        assert_eq!(palette.steps(), Some(5));
        assert_eq!(palette.color_at(0.0), Color::RED);
        assert_eq!(palette.color_at(0.5), Color::GREEN);
        assert_eq!(palette.color_at(1.0), Color::BLUE);
    }

    #[test]
    fn test_discrete_rounds_down() {
        let palette = Palette::discrete(rgb(), 5).unwrap();
        let ab = Color::RED.mix(Color::GREEN, 0.5);
        let bc = Color::GREEN.mix(Color::BLUE, 0.5);

        assert_eq!(palette.color_at(0.30), ab);
        assert_eq!(palette.color_at(0.39), ab);
        assert_eq!(palette.color_at(0.70), Color::GREEN);
        assert_eq!(palette.color_at(0.80), bc);
        assert_ne!(palette.color_at(0.49), palette.color_at(0.50));
    }

    #[test]
    fn test_discrete_needs_two_steps() {
        let err = Palette::discrete(rgb(), 1).unwrap_err();
        assert_eq!(err, Error::invalid_steps(1, 2));
    }

    #[test]
    fn test_sample() {
        let palette = Palette::new(rgb()).unwrap();
        let samples = palette.sample(3);
        assert_eq!(samples, vec![Color::RED, Color::GREEN, Color::BLUE]);
        assert_eq!(palette.sample(1), vec![Color::RED]);
        assert!(palette.sample(0).is_empty());
    }

    #[test]
    fn test_display() {
        let palette = Palette::new(rgb()).unwrap();
        assert_eq!(palette.to_string(), "#FF0000 -> #00FF00 -> #0000FF");

        let labeled = Palette::new([Color::RED, Color::GREEN])
            .unwrap()
            .with_label("rainbow");
        assert_eq!(labeled.to_string(), "#FF0000 -> #00FF00 (rainbow)");
        assert_eq!(labeled.label(), Some("rainbow"));
    }

    #[test]
    fn test_collection() {
        let palettes = PaletteCollection::builtin();
        assert_eq!(palettes.len(), 3);
        assert!(palettes.find("Quepal").is_some());
        assert!(palettes.find("Nope").is_none());
        assert_eq!(
            palettes.get(2).map(|p| p.color_at(0.0)),
            Some(Color::from_hex(0x11998e))
        );
        // Out of range selectors clamp to the last palette
        assert_eq!(palettes.clamped(99).label(), Some("Quepal"));
    }

    #[test]
    fn test_empty_collection() {
        let err = PaletteCollection::new(Vec::new()).unwrap_err();
        assert_eq!(err, Error::EmptyPaletteCollection);
    }
}
