//! Point topologies.
//!
//! A [`Context`] describes where the points of a display are and how they are
//! addressed. Every buffer, layer, stack and filter is bound to exactly one
//! context for its whole lifetime.
//!
//! # Variants
//!
//! - [`Grid`] - rows x columns, column-major indexing
//! - [`Circle`] - points equidistant in angle around the box center
//! - [`Cloud`] - arbitrary coordinates, optionally randomly scattered
//!
//! # Normalization
//!
//! Contexts are normalized so that `max(width, height) == 1`. Point
//! coordinates are scaled by the same factor.
//!
//! # Identity
//!
//! Components are considered to share a context when they hold the same
//! `Arc<dyn Context>` allocation, see [`same_context`].
//!
//! # Example
//!
//! ```
//! use lumen_core::{Context, ContextExt, Grid};
//!
//! let grid = Grid::new(4, 5)?;
//! assert_eq!(grid.point_count(), 20);
//! assert_eq!((grid.width(), grid.height()), (1.0, 0.75));
//!
//! let last = grid.each_position().last();
//! assert_eq!(last, Some((19, 1.0, 0.75)));
//! # Ok::<(), lumen_core::Error>(())
//! ```

mod circle;
mod cloud;
mod grid;

pub use circle::{Circle, CircleOptions};
pub use cloud::{Cloud, ScatterOptions};
pub use grid::Grid;

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use crate::{Error, PaletteCollection, Result};

/// Domain coordinates used to address a point.
///
/// Grids understand both forms. Other contexts address points by index and
/// treat a cell as a single column of `point_count` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coords {
    /// Raw point index.
    Index(usize),
    /// Row and column.
    Cell {
        /// Row
        row: usize,
        /// Column
        column: usize,
    },
}

impl From<usize> for Coords {
    #[inline]
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<(usize, usize)> for Coords {
    #[inline]
    fn from((row, column): (usize, usize)) -> Self {
        Self::Cell { row, column }
    }
}

/// Point topology shared by buffers, layers, stacks and filters.
///
/// Implementors are immutable after construction and can be shared freely
/// across threads.
pub trait Context: Send + Sync + fmt::Debug {
    /// Number of points. Always > 0.
    fn point_count(&self) -> usize;

    /// Coordinates of the point at `index`.
    ///
    /// Only defined for `index < point_count()`; no bounds check is made.
    fn position(&self, index: usize) -> (f32, f32);

    /// Normalized width.
    fn width(&self) -> f32;

    /// Normalized height.
    fn height(&self) -> f32;

    /// Palettes available to layers rendered in this context.
    fn palettes(&self) -> &PaletteCollection;

    /// Converts domain coordinates into a point index. Unchecked.
    #[inline]
    fn index_from(&self, coords: Coords) -> usize {
        match coords {
            Coords::Index(index) => index,
            Coords::Cell { row, column } => column * self.point_count() + row,
        }
    }

    /// Like [`index_from`](Self::index_from), but `None` when the coordinates
    /// fall outside the context.
    #[inline]
    fn checked_index(&self, coords: Coords) -> Option<usize> {
        let count = self.point_count();
        match coords {
            Coords::Index(index) => (index < count).then_some(index),
            Coords::Cell { row, column } => (row < count && column == 0).then_some(row),
        }
    }

    /// Returns true if the context has no extent along one axis.
    #[inline]
    fn one_dimensional(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    /// Fills `target[i]` with the squared distance between point `i` and
    /// `(x, y)`. Entries past `point_count()` are left untouched.
    fn distance_squared(&self, x: f32, y: f32, target: &mut [f32]) {
        for (index, slot) in target.iter_mut().take(self.point_count()).enumerate() {
            let (xi, yi) = self.position(index);
            let dx = xi - x;
            let dy = yi - y;
            *slot = dx * dx + dy * dy;
        }
    }
}

/// Generic helpers available on every [`Context`], including `dyn Context`.
pub trait ContextExt: Context {
    /// Allocates one element per point, calling `factory` with each index.
    fn alloc<T, F>(&self, factory: F) -> Vec<T>
    where
        F: FnMut(usize) -> T,
    {
        (0..self.point_count()).map(factory).collect()
    }

    /// Lazily yields `(index, x, y)` for every point.
    ///
    /// Each call starts a fresh pass over the points.
    fn each_position(&self) -> Positions<'_, Self> {
        Positions {
            context: self,
            range: 0..self.point_count(),
        }
    }
}

impl<C: Context + ?Sized> ContextExt for C {}

/// Iterator returned by [`ContextExt::each_position`].
#[derive(Debug)]
pub struct Positions<'a, C: ?Sized> {
    context: &'a C,
    range: Range<usize>,
}

impl<C: ?Sized> Clone for Positions<'_, C> {
    fn clone(&self) -> Self {
        Self {
            context: self.context,
            range: self.range.clone(),
        }
    }
}

impl<C: Context + ?Sized> Iterator for Positions<'_, C> {
    type Item = (usize, f32, f32);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let index = self.range.next()?;
        let (x, y) = self.context.position(index);
        Some((index, x, y))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<C: Context + ?Sized> ExactSizeIterator for Positions<'_, C> {}

/// Returns true if both handles point to the same context instance.
#[inline]
pub fn same_context(a: &Arc<dyn Context>, b: &Arc<dyn Context>) -> bool {
    Arc::ptr_eq(a, b)
}

/// Normalized box shared by all context variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Extent {
    pub(crate) width: f32,
    pub(crate) height: f32,
    /// Factor applied to raw coordinates to land in the normalized box.
    pub(crate) scale: f32,
}

impl Extent {
    /// Validates and normalizes a box so that `max(width, height) == 1`.
    pub(crate) fn normalize(width: f32, height: f32) -> Result<Self> {
        let valid = width.is_finite()
            && height.is_finite()
            && width >= 0.0
            && height >= 0.0
            && (width > 0.0 || height > 0.0);
        if !valid {
            return Err(Error::invalid_dimensions(width, height));
        }

        let scale = 1.0 / width.max(height);
        Ok(Self {
            width: width * scale,
            height: height * scale,
            scale,
        })
    }
}
