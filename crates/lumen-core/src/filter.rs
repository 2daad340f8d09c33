//! Post-processing stage interface.
//!
//! A [`Filter`] is bound to one context at construction and transforms every
//! channel of every pixel through a scalar curve computed once up front. It
//! carries no state between frames. Concrete filters live in `lumen-filter`.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::{Buffer, Context, Pixel, Result};

/// Context-bound scalar transform applied channel-wise to a pixel buffer.
pub trait Filter: Send + Sync + fmt::Debug {
    /// Context this filter was built for.
    fn context(&self) -> &Arc<dyn Context>;

    /// The precomputed channel curve.
    fn transfer(&self, value: f32) -> f32;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Maps `r`, `g` and `b` of every pixel through [`transfer`](Self::transfer).
    ///
    /// # Errors
    ///
    /// [`Error::ContextMismatch`](crate::Error::ContextMismatch) if `pixels`
    /// belongs to another context.
    fn apply(&self, pixels: &mut Buffer<Pixel>) -> Result<()> {
        pixels.ensure_context(self.context())?;
        trace!(filter = self.name(), points = pixels.len(), "apply filter");
        for pixel in pixels.iter_mut() {
            pixel.map(|v| self.transfer(v));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Grid};

    #[derive(Debug)]
    struct Double(Arc<dyn Context>);

    impl Filter for Double {
        fn context(&self) -> &Arc<dyn Context> {
            &self.0
        }

        fn transfer(&self, value: f32) -> f32 {
            value * 2.0
        }

        fn name(&self) -> &'static str {
            "double"
        }
    }

    #[test]
    fn test_apply_maps_every_channel() {
        let context: Arc<dyn Context> = Arc::new(Grid::new(1, 2).unwrap());
        let mut pixels = Buffer::new(context.clone(), |_| Pixel::new(0.1, 0.2, 0.3));
        Double(context).apply(&mut pixels).unwrap();
        for pixel in &pixels {
            assert_eq!(*pixel, Pixel::new(0.2, 0.4, 0.6));
        }
    }

    #[test]
    fn test_apply_checks_context() {
        let context: Arc<dyn Context> = Arc::new(Grid::new(1, 2).unwrap());
        let other: Arc<dyn Context> = Arc::new(Grid::new(1, 2).unwrap());
        let mut pixels = Buffer::with_default(other);
        assert_eq!(Double(context).apply(&mut pixels), Err(Error::ContextMismatch));
    }
}
