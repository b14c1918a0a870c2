//! Grid builders for tests.
//!
//! These helpers panic on malformed input; they are meant for fixtures, not
//! for production code.

use crate::element::Element;
use crate::grid::{Grid, Grid2};

/// Builds a 2D grid from a list of equally long rows.
pub fn grid_from_rows<T: Element>(rows: &[&[T]]) -> Grid2<T> {
    let size_y = rows.first().map_or(0, |row| row.len());
    assert!(size_y > 0, "a grid needs at least one cell");
    assert!(
        rows.iter().all(|row| row.len() == size_y),
        "all rows must have the same length"
    );

    let cells: Vec<T> = rows.iter().flat_map(|row| row.iter().cloned()).collect();
    Grid::from_parts([rows.len(), size_y], cells)
}

/// Builds a grid of size `dims` where each cell is `f(coords)`.
pub fn grid_from_fn<T, F, const D: usize>(dims: [usize; D], mut f: F) -> Grid<T, D>
where
    T: Element,
    F: FnMut([usize; D]) -> T,
{
    let mut grid = Grid::new(dims, f([0; D])).unwrap();
    let mut coords = [0; D];
    for cell in 0..grid.len() {
        let mut rest = cell;
        for axis in (0..D).rev() {
            coords[axis] = rest % dims[axis];
            rest /= dims[axis];
        }
        grid.set(f(coords), coords).unwrap();
    }
    grid
}

/// Returns the rows of a 2D grid as vectors, for readable assertions.
pub fn rows<T: Element>(grid: &Grid2<T>) -> Vec<Vec<T>> {
    grid.as_slice()
        .chunks(grid.size(1))
        .map(|row| row.to_vec())
        .collect()
}
