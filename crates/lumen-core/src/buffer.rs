//! Per-point element storage.
//!
//! A [`Buffer`] holds exactly one element per point of its [`Context`]. The
//! size is fixed at construction; only element values change afterwards.
//!
//! # Addressing
//!
//! Elements can be reached three ways:
//! - by raw point index, through `buffer[i]`
//! - by domain coordinates, through [`Buffer::get`] and [`Buffer::get_mut`],
//!   which defer to [`Context::index_from`]
//! - in point order, together with each point's position, through
//!   [`Buffer::each_with_position`]
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use lumen_core::{Buffer, Context, Grid};
//!
//! let grid: Arc<dyn Context> = Arc::new(Grid::new(2, 3)?);
//! let mut buffer = Buffer::new(grid, |index| index * 2);
//!
//! // Row 1, column 2 is point 2 * 2 + 1
//! assert_eq!(buffer.get((1_usize, 2_usize)), Some(&10));
//! buffer[0] = 7;
//! assert_eq!(buffer.iter().next(), Some(&7));
//! # Ok::<(), lumen_core::Error>(())
//! ```

use std::fmt;
use std::ops::{Index, IndexMut};
use std::sync::Arc;

use crate::{Context, ContextExt, Coords, Error, Result, same_context};

/// Fixed-size array of per-point elements bound to a context.
pub struct Buffer<T> {
    context: Arc<dyn Context>,
    elements: Vec<T>,
}

impl<T> Buffer<T> {
    /// Allocates one element per point, calling `factory` with each index.
    pub fn new<F>(context: Arc<dyn Context>, factory: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        let elements = context.alloc(factory);
        Self { context, elements }
    }

    /// Allocates one default element per point.
    pub fn with_default(context: Arc<dyn Context>) -> Self
    where
        T: Default,
    {
        Self::new(context, |_| T::default())
    }

    /// The context this buffer is bound to.
    #[inline]
    pub fn context(&self) -> &Arc<dyn Context> {
        &self.context
    }

    /// Normalized width of the context.
    #[inline]
    pub fn width(&self) -> f32 {
        self.context.width()
    }

    /// Normalized height of the context.
    #[inline]
    pub fn height(&self) -> f32 {
        self.context.height()
    }

    /// Number of elements, equal to the context's point count.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false: contexts hold at least one point.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element at the given domain coordinates, if in range.
    ///
    /// Rows and columns are checked separately, so an out-of-range cell never
    /// aliases another point.
    #[inline]
    pub fn get(&self, coords: impl Into<Coords>) -> Option<&T> {
        let index = self.context.checked_index(coords.into())?;
        self.elements.get(index)
    }

    /// Mutable element at the given domain coordinates, if in range.
    #[inline]
    pub fn get_mut(&mut self, coords: impl Into<Coords>) -> Option<&mut T> {
        let index = self.context.checked_index(coords.into())?;
        self.elements.get_mut(index)
    }

    /// Elements in point order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Mutable elements in point order.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.elements.iter_mut()
    }

    /// All elements as a slice.
    #[inline]
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// All elements as a mutable slice. The length cannot change.
    #[inline]
    pub fn elements_mut(&mut self) -> &mut [T] {
        &mut self.elements
    }

    /// Yields every element together with its point's coordinates.
    pub fn each_with_position(&self) -> impl Iterator<Item = (&T, f32, f32)> + '_ {
        self.context
            .each_position()
            .map(|(index, x, y)| (&self.elements[index], x, y))
    }

    /// Returns true if both buffers are bound to the same context instance.
    #[inline]
    pub fn share_context<U>(&self, other: &Buffer<U>) -> bool {
        same_context(&self.context, &other.context)
    }

    /// Fails with [`Error::ContextMismatch`] unless `context` is this buffer's
    /// context.
    #[inline]
    pub fn ensure_context(&self, context: &Arc<dyn Context>) -> Result<()> {
        if same_context(&self.context, context) {
            Ok(())
        } else {
            Err(Error::ContextMismatch)
        }
    }
}

impl<T> Index<usize> for Buffer<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.elements[index]
    }
}

impl<T> IndexMut<usize> for Buffer<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.elements[index]
    }
}

impl<'a, T> IntoIterator for &'a Buffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Buffer<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: fmt::Debug> fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("context", &self.context)
            .field("elements", &self.elements)
            .finish()
    }
}
