//! Rectangular grid context.

use tracing::debug;

use super::{Context, Coords, Extent};
use crate::{Error, PaletteCollection, Result};

/// Points laid out in rows and columns, indexed column by column.
///
/// Aspect ratio is defined as width / height. When no size is given every
/// cell is square, so the box is `(columns - 1) x (rows - 1)` before
/// normalization. A single-row (or single-column) grid is one dimensional and
/// has zero spacing along the collapsed axis.
///
/// # Example
///
/// ```
/// use lumen_core::{Context, Grid};
///
/// let grid = Grid::new(4, 5)?;
/// let index = grid.cell_index(3, 2);
/// assert_eq!(index, 2 * 4 + 3);
/// assert_eq!(grid.row_column_from(index), (3, 2));
/// assert_eq!(grid.position(index), (0.5, 0.75));
/// # Ok::<(), lumen_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    columns: usize,
    width: f32,
    height: f32,
    x_factor: f32,
    y_factor: f32,
    palettes: PaletteCollection,
}

impl Grid {
    /// Creates a grid with square cells.
    ///
    /// A 1x1 grid has no natural extent and is placed in a unit box.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGrid`] if `rows` or `columns` is zero.
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        let width = columns.saturating_sub(1) as f32;
        let height = rows.saturating_sub(1) as f32;
        if rows == 1 && columns == 1 {
            return Self::with_size(rows, columns, 1.0, 1.0);
        }
        Self::with_size(rows, columns, width, height)
    }

    /// Creates a grid stretched over an explicit box.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGrid`] for zero rows or columns,
    /// [`Error::InvalidDimensions`] for a degenerate box.
    pub fn with_size(rows: usize, columns: usize, width: f32, height: f32) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(Error::InvalidGrid { rows, columns });
        }
        let extent = Extent::normalize(width, height)?;

        let x_factor = if columns == 1 {
            0.0
        } else {
            extent.width / (columns - 1) as f32
        };
        let y_factor = if rows == 1 {
            0.0
        } else {
            extent.height / (rows - 1) as f32
        };

        debug!(rows, columns, width = extent.width, height = extent.height, "grid context");

        Ok(Self {
            rows,
            columns,
            width: extent.width,
            height: extent.height,
            x_factor,
            y_factor,
            palettes: PaletteCollection::default(),
        })
    }

    /// Replaces the palette collection.
    pub fn with_palettes(mut self, palettes: PaletteCollection) -> Self {
        self.palettes = palettes;
        self
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Index of the point at `row`, `column`: `column * rows + row`.
    ///
    /// Not range checked in release builds.
    #[inline]
    pub fn cell_index(&self, row: usize, column: usize) -> usize {
        debug_assert!(row < self.rows, "row {row} out of range ({})", self.rows);
        debug_assert!(
            column < self.columns,
            "column {column} out of range ({})",
            self.columns
        );
        column * self.rows + row
    }

    /// Row and column of the point at `index`. Inverse of [`cell_index`](Self::cell_index).
    #[inline]
    pub fn row_column_from(&self, index: usize) -> (usize, usize) {
        (index % self.rows, index / self.rows)
    }

    /// Yields `(index, row, column)` for every point, in index order.
    pub fn each_row_and_column(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        (0..self.point_count()).map(|index| {
            let (row, column) = self.row_column_from(index);
            (index, row, column)
        })
    }
}

impl Context for Grid {
    #[inline]
    fn point_count(&self) -> usize {
        self.rows * self.columns
    }

    #[inline]
    fn position(&self, index: usize) -> (f32, f32) {
        (
            self.x_factor * (index / self.rows) as f32,
            self.y_factor * (index % self.rows) as f32,
        )
    }

    #[inline]
    fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    fn palettes(&self) -> &PaletteCollection {
        &self.palettes
    }

    #[inline]
    fn index_from(&self, coords: Coords) -> usize {
        match coords {
            Coords::Index(index) => index,
            Coords::Cell { row, column } => self.cell_index(row, column),
        }
    }

    #[inline]
    fn checked_index(&self, coords: Coords) -> Option<usize> {
        match coords {
            Coords::Index(index) => (index < self.point_count()).then_some(index),
            Coords::Cell { row, column } => {
                (row < self.rows && column < self.columns).then(|| self.cell_index(row, column))
            }
        }
    }
}
