//! Structural changes to 2D grids: inserting and removing rows and columns.
//!
//! Rows run along axis 0 (`x`) and columns along axis 1 (`y`). Every
//! operation validates its arguments first and leaves the grid untouched on
//! error, then swaps in the new backing store and dimensions together.

use std::iter;

use crate::element::Element;
use crate::error::Error;
use crate::grid::{self, Grid};

const ROWS: usize = 0;
const COLUMNS: usize = 1;

impl<T: Element> Grid<T, 2> {
    /// Inserts `count` rows filled with `default` before row `before`.
    ///
    /// Rows `[0, before)` keep their index, the new rows occupy
    /// `[before, before + count)`, and the old rows from `before` on shift
    /// down by `count`. `before == size_x` appends.
    ///
    /// ## Errors
    /// - `before > size_x` (`OutOfBounds`)
    /// - The grown grid exceeds the cell limit (`InvalidSize`)
    pub fn add_rows(&mut self, before: usize, count: usize, default: T) -> Result<(), Error> {
        let new_dims = self.grown_dims(ROWS, before, count)?;
        if count == 0 {
            return Ok(());
        }

        let [_, size_y] = self.dims();
        let mut cells = self.take_cells();
        let at = before * size_y;
        cells.splice(at..at, iter::repeat(default).take(count * size_y));

        tracing::debug!(before, count, dims = ?new_dims, "added rows");
        self.replace_parts(new_dims, cells);
        Ok(())
    }

    /// Inserts `count` columns filled with `default` before column `before`,
    /// in every row.
    ///
    /// ## Errors
    /// - `before > size_y` (`OutOfBounds`)
    /// - The grown grid exceeds the cell limit (`InvalidSize`)
    pub fn add_columns(&mut self, before: usize, count: usize, default: T) -> Result<(), Error> {
        let new_dims = self.grown_dims(COLUMNS, before, count)?;
        if count == 0 {
            return Ok(());
        }

        let [size_x, size_y] = self.dims();
        let mut old = self.take_cells().into_iter();
        let mut cells = Vec::with_capacity(new_dims[ROWS] * new_dims[COLUMNS]);

        for _ in 0..size_x {
            cells.extend(old.by_ref().take(before));
            cells.extend(iter::repeat(&default).take(count).cloned());
            cells.extend(old.by_ref().take(size_y - before));
        }

        tracing::debug!(before, count, dims = ?new_dims, "added columns");
        self.replace_parts(new_dims, cells);
        Ok(())
    }

    /// Removes rows `from..=to`, shifting the following rows up.
    ///
    /// ## Errors
    /// - `from > to` (`InvalidRange`)
    /// - `to >= size_x` (`OutOfBounds`)
    /// - Every row would be removed (`EmptyAxis`)
    pub fn remove_rows(&mut self, from: usize, to: usize) -> Result<(), Error> {
        let new_dims = self.shrunk_dims(ROWS, from, to)?;

        let [_, size_y] = self.dims();
        let mut cells = self.take_cells();
        cells.drain(from * size_y..(to + 1) * size_y);

        tracing::debug!(from, to, dims = ?new_dims, "removed rows");
        self.replace_parts(new_dims, cells);
        Ok(())
    }

    /// Removes a single row.
    pub fn remove_row(&mut self, row: usize) -> Result<(), Error> {
        self.remove_rows(row, row)
    }

    /// Removes columns `from..=to` from every row, shifting the following
    /// columns left.
    ///
    /// ## Errors
    /// - `from > to` (`InvalidRange`)
    /// - `to >= size_y` (`OutOfBounds`)
    /// - Every column would be removed (`EmptyAxis`)
    pub fn remove_columns(&mut self, from: usize, to: usize) -> Result<(), Error> {
        let new_dims = self.shrunk_dims(COLUMNS, from, to)?;

        let [size_x, size_y] = self.dims();
        let removed = to - from + 1;
        let mut old = self.take_cells().into_iter();
        let mut cells = Vec::with_capacity(new_dims[ROWS] * new_dims[COLUMNS]);

        for _ in 0..size_x {
            cells.extend(old.by_ref().take(from));
            old.by_ref().take(removed).for_each(drop);
            cells.extend(old.by_ref().take(size_y - to - 1));
        }

        tracing::debug!(from, to, dims = ?new_dims, "removed columns");
        self.replace_parts(new_dims, cells);
        Ok(())
    }

    /// Removes a single column.
    pub fn remove_column(&mut self, column: usize) -> Result<(), Error> {
        self.remove_columns(column, column)
    }

    /// Validates an insertion along `axis` and returns the resulting size.
    fn grown_dims(&self, axis: usize, before: usize, count: usize) -> Result<[usize; 2], Error> {
        let dims = self.dims();
        if before > dims[axis] {
            return Err(Error::OutOfBounds {
                coords: axis_coords(axis, before),
                dims: dims.to_vec(),
            });
        }

        // A saturated size is always rejected by the cell count check.
        let mut new_dims = dims;
        new_dims[axis] = dims[axis].saturating_add(count);
        grid::cell_count(&new_dims)?;

        Ok(new_dims)
    }

    /// Validates a removal along `axis` and returns the resulting size.
    fn shrunk_dims(&self, axis: usize, from: usize, to: usize) -> Result<[usize; 2], Error> {
        let dims = self.dims();
        if from > to {
            return Err(Error::InvalidRange {
                from: axis_coords(axis, from),
                to: axis_coords(axis, to),
            });
        }

        if to >= dims[axis] {
            return Err(Error::OutOfBounds {
                coords: axis_coords(axis, to),
                dims: dims.to_vec(),
            });
        }

        let removed = to - from + 1;
        if removed == dims[axis] {
            return Err(Error::EmptyAxis {
                axis,
                size: dims[axis],
                removed,
            });
        }

        let mut new_dims = dims;
        new_dims[axis] -= removed;
        Ok(new_dims)
    }
}

/// Coordinates pointing at `index` along `axis`, for error reports.
fn axis_coords(axis: usize, index: usize) -> Vec<usize> {
    let mut coords = vec![0; 2];
    coords[axis] = index;
    coords
}
