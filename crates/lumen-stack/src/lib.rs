//! # lumen-stack
//!
//! Layered compositing of per-point render state into final colors.
//!
//! A [`Stack`] holds an ordered set of [`Layer`]s bound to one context. Each
//! layer stores a [`Vixel`](lumen_core::Vixel) per point: an intensity, a
//! palette selector and a position within that palette. Rendering a frame
//! clears a [`PixelBuffer`](lumen_core::PixelBuffer) and folds the layers over
//! it, back (layer 0) to front.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use lumen_core::{Context, Circle, Color};
//! use lumen_stack::Stack;
//!
//! let context: Arc<dyn Context> = Arc::new(Circle::new(12)?);
//! let mut stack = Stack::new(context, 1)?;
//!
//! // Light the whole ring from the first built-in palette
//! for (i, vixel) in stack.layer_mut(0).unwrap().iter_mut().enumerate() {
//!     vixel.set(1.0, 0, i as f32 / 11.0);
//! }
//!
//! let mut pixels = stack.pixel_buffer();
//! stack.render(&mut pixels, 1.0)?;
//! assert_ne!(pixels[0].color(), Color::BLACK);
//! # Ok::<(), lumen_core::Error>(())
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` - Composite points in parallel with rayon. Layers are still
//!   folded in order at every point.
//!
//! # Dependencies
//!
//! - [`lumen-core`] - Context, buffers, palettes
//! - [`tracing`] - Construction and per-frame logging
//! - [`rayon`] - Optional parallel compositing

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod layer;
pub mod stack;

pub use layer::Layer;
pub use stack::Stack;
