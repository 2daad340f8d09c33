//! A single compositing layer.
//!
//! A [`Layer`] owns one [`Vixel`] per point and composites itself over a pixel
//! buffer with the "over" operator:
//!
//! ```text
//! ratio = vixel.i * frame_intensity * layer_intensity
//! pixel = palette[vixel.p][vixel.q] * ratio + pixel * (1 - ratio)
//! ```
//!
//! Points whose vixel intensity is zero are skipped without a palette lookup.

use std::sync::Arc;

use lumen_core::{Buffer, Context, Coords, Pixel, Result, Vixel};

/// Per-point render state plus layer-wide palette and intensity settings.
#[derive(Debug)]
pub struct Layer {
    vixels: Buffer<Vixel>,
    palette: usize,
    intensity: f32,
}

impl Layer {
    /// Creates a layer with every vixel off, palette 0 and intensity 1.
    pub fn new(context: Arc<dyn Context>) -> Self {
        Self {
            vixels: Buffer::with_default(context),
            palette: 0,
            intensity: 1.0,
        }
    }

    /// The context this layer is bound to.
    #[inline]
    pub fn context(&self) -> &Arc<dyn Context> {
        self.vixels.context()
    }

    /// Default palette selector of the layer.
    #[inline]
    pub fn palette(&self) -> usize {
        self.palette
    }

    /// Selects palette `p` for the whole layer.
    ///
    /// Every vixel's selector is overwritten; individual vixels may still pick
    /// another palette afterwards.
    pub fn set_palette(&mut self, p: usize) {
        self.palette = p;
        for vixel in self.vixels.iter_mut() {
            vixel.set_p(p);
        }
    }

    /// Layer-wide intensity multiplier.
    #[inline]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Sets the layer-wide intensity multiplier. Not clamped.
    #[inline]
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
    }

    /// Number of vixels, equal to the context's point count.
    #[inline]
    pub fn vixel_count(&self) -> usize {
        self.vixels.len()
    }

    /// Underlying vixel buffer.
    #[inline]
    pub fn vixels(&self) -> &Buffer<Vixel> {
        &self.vixels
    }

    /// Vixels in point order, mutable. The buffer itself stays bound to the
    /// layer's context.
    #[inline]
    pub fn vixels_mut(&mut self) -> &mut [Vixel] {
        self.vixels.elements_mut()
    }

    /// Vixel at the given domain coordinates.
    #[inline]
    pub fn get(&self, coords: impl Into<Coords>) -> Option<&Vixel> {
        self.vixels.get(coords)
    }

    /// Mutable vixel at the given domain coordinates.
    #[inline]
    pub fn get_mut(&mut self, coords: impl Into<Coords>) -> Option<&mut Vixel> {
        self.vixels.get_mut(coords)
    }

    /// Vixels in point order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Vixel> {
        self.vixels.iter()
    }

    /// Mutable vixels in point order.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Vixel> {
        self.vixels.iter_mut()
    }

    /// Composites this layer over `pixels`.
    ///
    /// # Errors
    ///
    /// [`Error::ContextMismatch`](lumen_core::Error::ContextMismatch) if
    /// `pixels` belongs to another context.
    pub fn render(&self, pixels: &mut Buffer<Pixel>, intensity: f32) -> Result<()> {
        pixels.ensure_context(self.context())?;
        self.composite(pixels.elements_mut(), intensity);
        Ok(())
    }

    /// Composites over a slice already known to match this layer's context.
    pub(crate) fn composite(&self, pixels: &mut [Pixel], intensity: f32) {
        for (index, pixel) in pixels.iter_mut().enumerate() {
            self.blend(pixel, index, intensity);
        }
    }

    /// Composites the vixel at `index` over `pixel`.
    #[inline]
    pub(crate) fn blend(&self, pixel: &mut Pixel, index: usize, intensity: f32) {
        let vixel = &self.vixels[index];
        if vixel.is_off() {
            return;
        }
        let palettes = self.vixels.context().palettes();
        let color = palettes.clamped(vixel.p()).color_at(vixel.q());
        pixel.mix_with(color, vixel.i() * intensity * self.intensity);
    }
}

impl<'a> IntoIterator for &'a Layer {
    type Item = &'a Vixel;
    type IntoIter = std::slice::Iter<'a, Vixel>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut Layer {
    type Item = &'a mut Vixel;
    type IntoIter = std::slice::IterMut<'a, Vixel>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use lumen_core::{Color, Error, Grid, Palette, PaletteCollection};

    fn context() -> Arc<dyn Context> {
        let palettes = PaletteCollection::from_palettes([
            Palette::new([Color::RED, Color::BLUE]).unwrap(),
            Palette::new([Color::GREEN]).unwrap(),
        ])
        .unwrap();
        Arc::new(Grid::new(2, 2).unwrap().with_palettes(palettes))
    }

    #[test]
    fn test_defaults() {
        let layer = Layer::new(context());
        assert_eq!(layer.vixel_count(), 4);
        assert_eq!(layer.palette(), 0);
        assert_eq!(layer.intensity(), 1.0);
        assert!(layer.iter().all(Vixel::is_off));
    }

    #[test]
    fn test_set_palette_updates_vixels() {
        let mut layer = Layer::new(context());
        layer.set_palette(1);
        assert!(layer.iter().all(|v| v.p() == 1));
    }

    #[test]
    fn test_render_skips_dark_vixels() {
        let ctx = context();
        let mut layer = Layer::new(ctx.clone());
        layer.get_mut(0_usize).unwrap().set(1.0, 0, 1.0);

        let mut pixels = Buffer::new(ctx, |_| Pixel::from(Color::WHITE));
        layer.render(&mut pixels, 1.0).unwrap();

        assert_eq!(pixels[0].color(), Color::BLUE);
        assert!(pixels.iter().skip(1).all(|p| p.color() == Color::WHITE));
    }

    #[test]
    fn test_render_ratio() {
        let ctx = context();
        let mut layer = Layer::new(ctx.clone());
        layer.set_intensity(0.5);
        for vixel in &mut layer {
            vixel.set(0.5, 1, 0.0);
        }

        let mut pixels = Buffer::new(ctx, |_| Pixel::from(Color::RED));
        layer.render(&mut pixels, 0.8).unwrap();

        // ratio = 0.5 * 0.8 * 0.5 = 0.2
        for pixel in &pixels {
            assert_abs_diff_eq!(pixel.r, 0.8, epsilon = 1e-6);
            assert_abs_diff_eq!(pixel.g, 0.2, epsilon = 1e-6);
            assert_eq!(pixel.b, 0.0);
        }
    }

    #[test]
    fn test_out_of_range_palette_is_clamped() {
        let ctx = context();
        let mut layer = Layer::new(ctx.clone());
        layer.get_mut(3_usize).unwrap().set(1.0, 9, 0.5);

        let mut pixels = Buffer::with_default(ctx);
        layer.render(&mut pixels, 1.0).unwrap();
        assert_eq!(pixels[3].color(), Color::GREEN);
    }

    #[test]
    fn test_render_checks_context() {
        let layer = Layer::new(context());
        let mut pixels = Buffer::with_default(context());
        assert_eq!(layer.render(&mut pixels, 1.0), Err(Error::ContextMismatch));
    }
}
