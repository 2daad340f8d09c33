//! Ordered layer compositor.

use std::sync::Arc;

use lumen_core::{Context, Coords, Error, PixelBuffer, Result, Vixel, same_context};
use tracing::{debug, trace};

use crate::Layer;

/// An ordered set of layers sharing one context.
///
/// Layer 0 is at the back. Each frame, [`render`](Self::render) clears the
/// target buffer and composites the layers over it in index order.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use lumen_core::{Context, Grid};
/// use lumen_stack::Stack;
///
/// let context: Arc<dyn Context> = Arc::new(Grid::new(4, 4)?);
/// let mut stack = Stack::new(context, 2)?;
/// stack.vixel_mut(1, (0_usize, 0_usize)).unwrap().set(1.0, 0, 0.0);
///
/// let mut pixels = stack.pixel_buffer();
/// stack.render(&mut pixels, 1.0)?;
/// assert!(pixels[0].r > 0.0);
/// assert_eq!(pixels[1].r, 0.0);
/// # Ok::<(), lumen_core::Error>(())
/// ```
#[derive(Debug)]
pub struct Stack {
    context: Arc<dyn Context>,
    layers: Vec<Layer>,
}

impl Stack {
    /// Creates `layer_count` empty layers on `context`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLayerCount`] if `layer_count` is zero.
    pub fn new(context: Arc<dyn Context>, layer_count: usize) -> Result<Self> {
        if layer_count == 0 {
            return Err(Error::InvalidLayerCount(layer_count));
        }
        let layers = (0..layer_count)
            .map(|_| Layer::new(context.clone()))
            .collect();
        debug!(
            layers = layer_count,
            points = context.point_count(),
            "stack"
        );
        Ok(Self { context, layers })
    }

    /// The shared context.
    #[inline]
    pub fn context(&self) -> &Arc<dyn Context> {
        &self.context
    }

    /// Layers, back to front.
    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Mutable layers, back to front. The number of layers cannot change.
    ///
    /// A layer replaced by one on another context makes
    /// [`render`](Self::render) fail.
    #[inline]
    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Number of layers.
    #[inline]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Layer at `index`, if any.
    #[inline]
    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Mutable layer at `index`, if any.
    #[inline]
    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    /// Number of vixels per layer.
    #[inline]
    pub fn vixel_count(&self) -> usize {
        self.context.point_count()
    }

    /// Vixel of `layer` at the given domain coordinates.
    pub fn vixel(&self, layer: usize, coords: impl Into<Coords>) -> Option<&Vixel> {
        self.layers.get(layer)?.get(coords)
    }

    /// Mutable vixel of `layer` at the given domain coordinates.
    pub fn vixel_mut(&mut self, layer: usize, coords: impl Into<Coords>) -> Option<&mut Vixel> {
        self.layers.get_mut(layer)?.get_mut(coords)
    }

    /// Allocates a black pixel buffer without filters on this stack's context.
    pub fn pixel_buffer(&self) -> PixelBuffer {
        PixelBuffer::new(self.context.clone())
    }

    /// Clears `pixels` and composites every layer over it.
    ///
    /// `intensity` scales every layer for this frame. The same buffer is
    /// returned; nothing is allocated.
    ///
    /// # Errors
    ///
    /// [`Error::ContextMismatch`] if `pixels` or any layer belongs to another
    /// context.
    pub fn render<'a>(&self, pixels: &'a mut PixelBuffer, intensity: f32) -> Result<&'a mut PixelBuffer> {
        pixels.pixels().ensure_context(&self.context)?;
        if !self.layers.iter().all(|layer| same_context(layer.context(), &self.context)) {
            return Err(Error::ContextMismatch);
        }
        trace!(layers = self.layers.len(), intensity, "render");

        pixels.clear();
        self.composite(pixels.pixels_mut().elements_mut(), intensity);
        Ok(pixels)
    }

    #[cfg(not(feature = "parallel"))]
    fn composite(&self, pixels: &mut [lumen_core::Pixel], intensity: f32) {
        for layer in &self.layers {
            layer.composite(pixels, intensity);
        }
    }

    // Points are independent, so each worker folds all layers for its points
    // in order.
    #[cfg(feature = "parallel")]
    fn composite(&self, pixels: &mut [lumen_core::Pixel], intensity: f32) {
        use rayon::prelude::*;

        pixels.par_iter_mut().enumerate().for_each(|(index, pixel)| {
            for layer in &self.layers {
                layer.blend(pixel, index, intensity);
            }
        });
    }
}
