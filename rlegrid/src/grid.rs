//! Dense, mutable grids of any dimensionality.
//!
//! # Invariants
//!
//! A `Grid` maintains, at all times:
//! - **Never empty**: every dimension is positive
//! - **Consistent**: the backing store length equals the product of the
//!   dimensions; both are replaced together by every structural change
//! - **Scan ordered**: the backing store is laid out first axis outermost,
//!   last axis fastest, which is the order the codec walks
//!
//! Cell access is bounds checked and returns [`Error::OutOfBounds`] rather
//! than clamping. `Index`/`IndexMut` are the panicking fast path.

use std::ops::{Index, IndexMut};

use crate::codec::{RunLengthCodec, Runs};
use crate::element::{Accumulate, Element, Scale};
use crate::error::Error;
use crate::region::{self, Region};
use crate::CELL_COUNT_LIMIT;

/// A dense grid of `D` dimensions holding values of type `T`.
#[derive(Clone)]
pub struct Grid<T, const D: usize> {
    dims: [usize; D],
    cells: Vec<T>,
}

/// A two dimensional grid, indexed `[x, y]` (row, column).
pub type Grid2<T> = Grid<T, 2>;

/// A three dimensional grid, indexed `[x, y, z]`.
pub type Grid3<T> = Grid<T, 3>;

impl<T: Element, const D: usize> Grid<T, D> {
    /// Creates a grid of size `dims` with every cell set to `default`.
    ///
    /// ## Errors
    /// - No dimensions, a zero dimension, or more than
    ///   [`CELL_COUNT_LIMIT`] cells (`InvalidSize`)
    pub fn new(dims: [usize; D], default: T) -> Result<Self, Error> {
        let len = cell_count(&dims)?;
        Ok(Self {
            dims,
            cells: vec![default; len],
        })
    }

    /// Assembles a grid from a scan-ordered backing store.
    ///
    /// Callers guarantee `cells.len()` is the product of `dims`.
    pub(crate) fn from_parts(dims: [usize; D], cells: Vec<T>) -> Self {
        debug_assert_eq!(Ok(cells.len()), cell_count(&dims));
        Self { dims, cells }
    }

    /// Replaces the dimensions and backing store together.
    pub(crate) fn replace_parts(&mut self, dims: [usize; D], cells: Vec<T>) {
        debug_assert_eq!(Ok(cells.len()), cell_count(&dims));
        self.dims = dims;
        self.cells = cells;
    }

    /// Takes the backing store out, leaving the grid to be refilled with
    /// [`Grid::replace_parts`].
    pub(crate) fn take_cells(&mut self) -> Vec<T> {
        std::mem::take(&mut self.cells)
    }

    /// Returns the size of every axis.
    pub fn dims(&self) -> [usize; D] {
        self.dims
    }

    /// Returns the size of a single axis.
    ///
    /// Panics if `axis >= D`.
    pub fn size(&self, axis: usize) -> usize {
        self.dims[axis]
    }

    /// Returns the total number of cells.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns all cells in scan order.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Iterates over all cells in scan order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.cells.iter()
    }

    /// Returns the cell at `coords`.
    pub fn get(&self, coords: [usize; D]) -> Result<&T, Error> {
        let offset = self.offset(&coords)?;
        Ok(&self.cells[offset])
    }

    /// Returns a mutable reference to the cell at `coords`.
    pub fn get_mut(&mut self, coords: [usize; D]) -> Result<&mut T, Error> {
        let offset = self.offset(&coords)?;
        Ok(&mut self.cells[offset])
    }

    /// Overwrites the cell at `coords`.
    pub fn set(&mut self, value: T, coords: [usize; D]) -> Result<(), Error> {
        *self.get_mut(coords)? = value;
        Ok(())
    }

    /// Overwrites every cell in the inclusive box `from..=to`.
    ///
    /// ## Errors
    /// - `from` is after `to` on some axis (`InvalidRange`)
    /// - The box reaches outside the grid (`OutOfBounds`)
    pub fn set_region(&mut self, value: T, from: [usize; D], to: [usize; D]) -> Result<(), Error> {
        let region = Region::new(from, to)?;
        tracing::trace!(?from, ?to, "setting region");
        self.for_each_in(&region, |cell| *cell = value.clone())
    }

    /// Makes this grid an independent copy of `other`, dimensions included.
    pub fn deep_copy_from(&mut self, other: &Self) {
        self.clone_from(other);
    }

    /// Compresses the grid into its run-length form.
    ///
    /// The grid stays dense; the returned runs are an independent value.
    pub fn compress(&self) -> Runs<T> {
        RunLengthCodec::compress(self)
    }

    /// Converts coordinates to an offset into the backing store.
    fn offset(&self, coords: &[usize; D]) -> Result<usize, Error> {
        region::check_bounds(coords, &self.dims)?;
        Ok(region::flat_offset(coords, &region::strides(&self.dims)))
    }

    /// Applies `f` to every cell of `region` in scan order, after checking
    /// that the region fits. Nothing is touched when the check fails.
    fn for_each_in<F>(&mut self, region: &Region<D>, mut f: F) -> Result<(), Error>
    where
        F: FnMut(&mut T),
    {
        region.check_within(&self.dims)?;
        for offset in region.offsets(&self.dims) {
            f(&mut self.cells[offset]);
        }
        Ok(())
    }
}

impl<T: Accumulate, const D: usize> Grid<T, D> {
    /// Accumulates `value` into the cell at `coords`. For text this appends.
    pub fn add(&mut self, value: T, coords: [usize; D]) -> Result<(), Error> {
        self.get_mut(coords)?.accumulate(&value);
        Ok(())
    }

    /// Accumulates `value` into every cell of the inclusive box `from..=to`.
    pub fn add_region(&mut self, value: T, from: [usize; D], to: [usize; D]) -> Result<(), Error> {
        let region = Region::new(from, to)?;
        tracing::trace!(?from, ?to, "accumulating into region");
        self.for_each_in(&region, |cell| cell.accumulate(&value))
    }
}

impl<T: Scale, const D: usize> Grid<T, D> {
    /// Scales the cell at `coords` by `value`.
    pub fn multiply(&mut self, value: T, coords: [usize; D]) -> Result<(), Error> {
        self.get_mut(coords)?.scale(&value);
        Ok(())
    }

    /// Scales every cell of the inclusive box `from..=to` by `value`.
    pub fn multiply_region(
        &mut self,
        value: T,
        from: [usize; D],
        to: [usize; D],
    ) -> Result<(), Error> {
        let region = Region::new(from, to)?;
        tracing::trace!(?from, ?to, "scaling region");
        self.for_each_in(&region, |cell| cell.scale(&value))
    }
}

/// Returns the number of cells of a grid of size `dims`, validating it.
pub(crate) fn cell_count<const D: usize>(dims: &[usize; D]) -> Result<usize, Error> {
    let invalid = || Error::InvalidSize(dims.to_vec());

    if D == 0 || dims.contains(&0) {
        return Err(invalid());
    }

    let len = dims
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .ok_or_else(invalid)?;

    if len as u64 > CELL_COUNT_LIMIT {
        return Err(invalid());
    }

    Ok(len)
}

/// Grids are equal when their dimensions match and every cell is
/// [`Element::run_eq`] to its counterpart, the same equality the codec uses.
impl<T: Element, const D: usize> PartialEq for Grid<T, D> {
    fn eq(&self, other: &Self) -> bool {
        self.dims == other.dims
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.run_eq(b))
    }
}

impl<T: Element, const D: usize> Index<[usize; D]> for Grid<T, D> {
    type Output = T;

    fn index(&self, coords: [usize; D]) -> &Self::Output {
        match self.get(coords) {
            Ok(cell) => cell,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T: Element, const D: usize> IndexMut<[usize; D]> for Grid<T, D> {
    fn index_mut(&mut self, coords: [usize; D]) -> &mut Self::Output {
        match self.get_mut(coords) {
            Ok(cell) => cell,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T: std::fmt::Debug, const D: usize> std::fmt::Debug for Grid<T, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("dims", &self.dims)
            .field("cells", &self.cells)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::grid_from_rows;
    use assert_matches::assert_matches;
    use test_case::test_case;

    #[test_case([0, 3]; "zero rows")]
    #[test_case([3, 0]; "zero columns")]
    #[test_case([0, 0]; "both zero")]
    fn test_invalid_size_2d(dims: [usize; 2]) {
        let result = Grid2::new(dims, 0i32);
        assert_matches!(result, Err(Error::InvalidSize(d)) if d == dims);
    }

    #[test_case([1, 1, 0]; "zero depth")]
    #[test_case([usize::MAX, 2, 2]; "overflowing product")]
    #[test_case([1 << 11, 1 << 10, 1 << 10]; "above cell limit")]
    fn test_invalid_size_3d(dims: [usize; 3]) {
        assert_matches!(Grid3::new(dims, 0.0f32), Err(Error::InvalidSize(_)));
    }

    #[test]
    fn test_zero_dimensional_grid_is_rejected() {
        assert_matches!(Grid::<u8, 0>::new([], 0), Err(Error::InvalidSize(_)));
    }

    #[test]
    fn test_new_fills_default() {
        let grid = Grid3::new([2, 3, 4], 7i32).unwrap();
        assert_eq!(grid.dims(), [2, 3, 4]);
        assert_eq!(grid.len(), 24);
        assert!(grid.iter().all(|&cell| cell == 7));
        assert_eq!(grid.size(2), 4);
    }

    #[test]
    fn test_set_single_cell_leaves_others() -> Result<(), Error> {
        let mut grid = Grid2::new([3, 4], 0u8)?;
        grid.set(9, [1, 2])?;

        assert_eq!(*grid.get([1, 2])?, 9);
        assert_eq!(grid.iter().filter(|&&cell| cell == 9).count(), 1);
        assert_eq!(grid.as_slice()[6], 9);
        Ok(())
    }

    #[test_case([3, 0]; "row out of bounds")]
    #[test_case([0, 4]; "column out of bounds")]
    fn test_point_out_of_bounds(coords: [usize; 2]) {
        let mut grid = Grid2::new([3, 4], 0i64).unwrap();
        let expected = Error::OutOfBounds {
            coords: coords.to_vec(),
            dims: vec![3, 4],
        };

        assert_eq!(grid.get(coords), Err(expected.clone()));
        assert_eq!(grid.set(1, coords), Err(expected.clone()));
        assert_eq!(grid.add(1, coords), Err(expected.clone()));
        assert_eq!(grid.multiply(1, coords), Err(expected));
    }

    #[test]
    fn test_set_region_inclusive() -> Result<(), Error> {
        let mut grid = Grid2::new([4, 5], 0i32)?;
        grid.set_region(1, [1, 1], [2, 3])?;

        let expected = grid_from_rows(&[
            &[0, 0, 0, 0, 0],
            &[0, 1, 1, 1, 0],
            &[0, 1, 1, 1, 0],
            &[0, 0, 0, 0, 0],
        ]);
        assert_eq!(grid, expected);
        Ok(())
    }

    #[test]
    fn test_region_failure_leaves_grid_untouched() {
        let mut grid = Grid2::new([3, 3], 0i32).unwrap();
        assert_matches!(
            grid.set_region(5, [0, 0], [3, 1]),
            Err(Error::OutOfBounds { .. })
        );
        assert_matches!(
            grid.add_region(5, [2, 0], [1, 1]),
            Err(Error::InvalidRange { .. })
        );
        assert!(grid.iter().all(|&cell| cell == 0));
    }

    #[test]
    fn test_add_and_multiply_3d() -> Result<(), Error> {
        let mut grid = Grid3::new([2, 2, 2], 1.5f64)?;
        grid.add_region(0.5, [0, 0, 0], [1, 1, 0])?;
        grid.multiply_region(3.0, [0, 0, 0], [0, 1, 1])?;
        grid.add(1.0, [1, 1, 1])?;
        grid.multiply(2.0, [1, 0, 1])?;

        assert_eq!(grid[[0, 0, 0]], 6.0);
        assert_eq!(grid[[0, 1, 1]], 4.5);
        assert_eq!(grid[[1, 0, 0]], 2.0);
        assert_eq!(grid[[1, 0, 1]], 3.0);
        assert_eq!(grid[[1, 1, 1]], 2.5);
        Ok(())
    }

    #[test]
    fn test_text_add_concatenates() -> Result<(), Error> {
        let mut grid = Grid2::new([2, 2], String::from("a"))?;
        grid.add("b".to_string(), [0, 0])?;
        grid.add_region("c".to_string(), [0, 0], [1, 0])?;

        assert_eq!(grid[[0, 0]], "abc");
        assert_eq!(grid[[1, 0]], "ac");
        assert_eq!(grid[[0, 1]], "a");
        Ok(())
    }

    #[test]
    fn test_deep_copy_is_independent() -> Result<(), Error> {
        let source = grid_from_rows(&[&[1, 2, 3], &[4, 5, 6]]);
        let mut copy = Grid2::new([1, 1], 0)?;

        copy.deep_copy_from(&source);
        assert_eq!(copy, source);
        assert_eq!(copy.dims(), [2, 3]);

        copy.set(42, [0, 0])?;
        assert_eq!(source[[0, 0]], 1);
        Ok(())
    }

    #[test]
    fn test_equality_is_bitwise_for_floats() {
        let a = Grid2::new([2, 2], f32::NAN).unwrap();
        let b = Grid2::new([2, 2], f32::NAN).unwrap();
        assert_eq!(a, b);

        let zero = Grid2::new([1, 1], 0.0f32).unwrap();
        let negative_zero = Grid2::new([1, 1], -0.0f32).unwrap();
        assert_ne!(zero, negative_zero);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_panics_out_of_bounds() {
        let grid = Grid2::new([2, 2], 0u32).unwrap();
        let _ = grid[[2, 0]];
    }
}
