//! Pixel buffer with a fixed filter chain.

use std::ops::{Index, IndexMut};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::{Buffer, Context, Coords, Error, Filter, Pixel, Result, same_context};

/// Final color buffer handed to the display sink.
///
/// Owns one [`Pixel`] per point and an ordered filter chain that is fixed at
/// construction. [`finalize`](Self::finalize) runs the chain in registration
/// order.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lumen_core::{Color, Context, Grid, PixelBuffer};
///
/// let context: Arc<dyn Context> = Arc::new(Grid::new(2, 2)?);
/// let mut buffer = PixelBuffer::new(context);
/// buffer.pixels_mut()[0].set(Color::RED);
/// buffer.clear();
/// assert!(buffer.iter().all(|p| p.color() == Color::BLACK));
/// # Ok::<(), lumen_core::Error>(())
/// ```
#[derive(Debug)]
pub struct PixelBuffer {
    pixels: Buffer<Pixel>,
    filters: Vec<Arc<dyn Filter>>,
}

impl PixelBuffer {
    /// Creates a black buffer without filters.
    pub fn new(context: Arc<dyn Context>) -> Self {
        Self {
            pixels: Buffer::with_default(context),
            filters: Vec::new(),
        }
    }

    /// Creates a black buffer with a filter chain.
    ///
    /// # Errors
    ///
    /// [`Error::ContextMismatch`] if any filter is bound to another context.
    pub fn with_filters(context: Arc<dyn Context>, filters: Vec<Arc<dyn Filter>>) -> Result<Self> {
        if filters.iter().any(|f| !same_context(f.context(), &context)) {
            return Err(Error::ContextMismatch);
        }
        debug!(
            points = context.point_count(),
            filters = filters.len(),
            "pixel buffer"
        );
        Ok(Self {
            pixels: Buffer::with_default(context),
            filters,
        })
    }

    /// The context this buffer is bound to.
    #[inline]
    pub fn context(&self) -> &Arc<dyn Context> {
        self.pixels.context()
    }

    /// The filter chain, in application order.
    #[inline]
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// Underlying pixels.
    #[inline]
    pub fn pixels(&self) -> &Buffer<Pixel> {
        &self.pixels
    }

    /// Underlying pixels, mutable.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut Buffer<Pixel> {
        &mut self.pixels
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always false: contexts hold at least one point.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at the given domain coordinates.
    #[inline]
    pub fn get(&self, coords: impl Into<Coords>) -> Option<&Pixel> {
        self.pixels.get(coords)
    }

    /// Pixels in point order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Pixel> {
        self.pixels.iter()
    }

    /// Yields every pixel together with its point's coordinates.
    pub fn each_with_position(&self) -> impl Iterator<Item = (&Pixel, f32, f32)> + '_ {
        self.pixels.each_with_position()
    }

    /// Sets every pixel to black.
    pub fn clear(&mut self) {
        self.pixels.iter_mut().for_each(Pixel::clear);
    }

    /// Copies the colors of `other` into this buffer.
    ///
    /// # Errors
    ///
    /// [`Error::ContextMismatch`] if the buffers hold a different number of
    /// points.
    pub fn copy_from(&mut self, other: &PixelBuffer) -> Result<()> {
        if other.len() != self.len() {
            return Err(Error::ContextMismatch);
        }
        self.pixels
            .elements_mut()
            .copy_from_slice(other.pixels.elements());
        Ok(())
    }

    /// Applies the filter chain in order and returns the buffer.
    pub fn finalize(&mut self) -> Result<&mut Self> {
        trace!(filters = self.filters.len(), "finalize");
        for filter in &self.filters {
            filter.apply(&mut self.pixels)?;
        }
        Ok(self)
    }
}

impl Index<usize> for PixelBuffer {
    type Output = Pixel;

    #[inline]
    fn index(&self, index: usize) -> &Pixel {
        &self.pixels[index]
    }
}

impl IndexMut<usize> for PixelBuffer {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Pixel {
        &mut self.pixels[index]
    }
}
