//! # lumen-core
//!
//! Core types for compositing colors onto spatially addressable light
//! displays such as LED grids, rings and free-form point clouds.
//!
//! This crate provides the building blocks shared by the rest of the
//! workspace:
//!
//! - [`Context`] - Point topology ([`Grid`], [`Circle`], [`Cloud`])
//! - [`Palette`], [`PaletteLike`], [`PaletteCollection`] - Color ramps
//! - [`Buffer`] - One element per point, bound to a context
//! - [`Vixel`] - Per-layer render state (intensity, palette, position)
//! - [`Pixel`], [`PixelBuffer`] - Final colors and the filter chain
//! - [`Filter`] - Context-bound post-processing stage
//!
//! ## Frame Flow
//!
//! ```text
//! animation driver -> Vixel buffers (one per layer)
//!                         |
//!                         v  Stack::render (lumen-stack)
//!                     PixelBuffer
//!                         |
//!                         v  PixelBuffer::finalize (Gamma, Quantizer, ...)
//!                     display sink
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! lumen-core (this crate)
//!    ^
//!    |
//!    +-- lumen-filter (Gamma, Quantizer)
//!    +-- lumen-stack (Layer, Stack)
//!    +-- lumen-cli, lumen-bench, lumen-tests
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use lumen_core::prelude::*;
//!
//! let context: Arc<dyn Context> = Arc::new(Grid::new(8, 8)?);
//! let palette = context.palettes().clamped(0);
//! let mut pixels = PixelBuffer::new(context.clone());
//! pixels[0].set(palette.color_at(0.5));
//! assert_eq!(pixels.len(), 64);
//! # Ok::<(), lumen_core::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Serialization for [`Color`], [`Point`], [`Vixel`] and [`Pixel`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod color;
pub mod context;
pub mod error;
pub mod filter;
pub mod palette;
pub mod pixel;
pub mod pixel_buffer;
pub mod point;
pub mod vixel;

pub use buffer::Buffer;
pub use color::Color;
pub use context::{
    Circle, CircleOptions, Cloud, Context, ContextExt, Coords, Grid, Positions, ScatterOptions,
    same_context,
};
pub use error::{Error, Result};
pub use filter::Filter;
pub use palette::{Palette, PaletteCollection, PaletteLike};
pub use pixel::Pixel;
pub use pixel_buffer::PixelBuffer;
pub use point::Point;
pub use vixel::Vixel;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use lumen_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::Buffer;
    pub use crate::color::Color;
    pub use crate::context::{Circle, CircleOptions, Cloud, Context, ContextExt, Coords, Grid, ScatterOptions};
    pub use crate::error::{Error, Result};
    pub use crate::filter::Filter;
    pub use crate::palette::{Palette, PaletteCollection, PaletteLike};
    pub use crate::pixel::Pixel;
    pub use crate::pixel_buffer::PixelBuffer;
    pub use crate::vixel::Vixel;
}
