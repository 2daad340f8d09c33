//! # lumen-filter
//!
//! Post-processing filters applied by [`PixelBuffer::finalize`].
//!
//! Every filter is bound to one [`Context`] and precomputes its channel curve
//! at construction. Applying a filter maps `r`, `g` and `b` of every pixel
//! independently; no state is kept between frames.
//!
//! # Filters
//!
//! | Filter | Curve | Default |
//! |--------|-------|---------|
//! | [`Gamma`] | `v^gamma` | gamma 2.2 |
//! | [`Quantizer`] | `from + round(v * (steps - 1)) * (to - from) / (steps - 1)` | 256 steps over `0..256` |
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use lumen_core::{Color, Context, Grid, PixelBuffer};
//! use lumen_filter::display_chain;
//!
//! let context: Arc<dyn Context> = Arc::new(Grid::new(2, 2)?);
//! let mut buffer = PixelBuffer::with_filters(context.clone(), display_chain(&context))?;
//! buffer[0].set(Color::WHITE);
//!
//! let out = buffer.finalize()?;
//! assert_eq!(out[0].color(), Color::new(255.0, 255.0, 255.0));
//! # Ok::<(), lumen_core::Error>(())
//! ```
//!
//! # Dependencies
//!
//! - [`lumen-core`] - Filter trait, Context, Pixel buffers
//! - [`tracing`] - Construction logging
//!
//! # Used By
//!
//! - `lumen-cli` - Output chain of the `render` command
//!
//! [`PixelBuffer::finalize`]: lumen_core::PixelBuffer::finalize
//! [`Context`]: lumen_core::Context

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod gamma;
pub mod quantizer;

use std::sync::Arc;

use lumen_core::{Context, Filter};

pub use gamma::{DEFAULT_GAMMA, Gamma, gamma_transfer};
pub use quantizer::{DEFAULT_STEPS, QuantizeRange, Quantizer};

/// The usual LED output chain: gamma 2.2 followed by 8 bit quantization.
pub fn display_chain(context: &Arc<dyn Context>) -> Vec<Arc<dyn Filter>> {
    vec![
        Arc::new(Gamma::new(context.clone())) as Arc<dyn Filter>,
        Arc::new(Quantizer::new(context.clone())),
    ]
}
