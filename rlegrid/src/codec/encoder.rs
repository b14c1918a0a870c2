//! Run-length compression of a dense grid.

use std::num::NonZeroUsize;

use crate::element::Element;
use crate::grid::Grid;

use super::{Run, RunLengthCodec, Runs};

impl RunLengthCodec {
    /// Compresses `grid` into maximal runs in scan order.
    ///
    /// ## Algorithm
    /// 1. Start a run with the first cell
    /// 2. For each following cell, extend the run if the value is
    ///    [`Element::run_eq`] to it, otherwise close the run and start a new
    ///    one with this cell
    /// 3. Close the last run once the scan completes
    ///
    /// A grid always has at least one cell, so the result always has at
    /// least one run.
    #[tracing::instrument(skip_all, fields(dims = ?grid.dims()))]
    pub fn compress<T: Element, const D: usize>(grid: &Grid<T, D>) -> Runs<T> {
        let mut runs = Runs::default();
        let mut cells = grid.iter();

        let Some(first) = cells.next() else {
            return runs;
        };

        let mut value = first;
        let mut length = NonZeroUsize::MIN;

        for cell in cells {
            if cell.run_eq(value) {
                // A run can never cover more cells than the grid holds, and
                // that count fits in a usize.
                length = length.saturating_add(1);
            } else {
                runs.push(Run::new(value.clone(), length));
                value = cell;
                length = NonZeroUsize::MIN;
            }
        }

        // Flush the run that was in flight when the scan ended.
        runs.push(Run::new(value.clone(), length));

        tracing::debug!(cells = grid.len(), runs = runs.len(), "compressed grid");
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{grid_from_fn, grid_from_rows};
    use crate::{Grid2, Grid3};
    use test_case::test_case;

    fn parallel<T: Element>(runs: Runs<T>) -> (Vec<T>, Vec<usize>) {
        runs.into_parallel()
    }

    #[test]
    fn test_single_centre_cell() {
        let mut grid = Grid2::new([3, 3], 0.0f32).unwrap();
        grid.set_region(5.0, [1, 1], [1, 1]).unwrap();

        let (values, lengths) = parallel(grid.compress());
        assert_eq!(values, vec![0.0, 5.0, 0.0]);
        assert_eq!(lengths, vec![4, 1, 4]);
    }

    #[test_case(Grid2::new([1, 1], 3i32).unwrap() => (vec![3], vec![1]); "single cell")]
    #[test_case(Grid2::new([4, 6], 3i32).unwrap() => (vec![3], vec![24]); "uniform")]
    #[test_case(grid_from_rows(&[&[1, 2], &[3, 4]]) => (vec![1, 2, 3, 4], vec![1, 1, 1, 1]); "no repeats")]
    #[test_case(grid_from_rows(&[&[1, 1, 2], &[2, 2, 1]]) => (vec![1, 2, 1], vec![2, 3, 1]); "runs cross rows")]
    fn test_compress_2d(grid: Grid2<i32>) -> (Vec<i32>, Vec<usize>) {
        parallel(grid.compress())
    }

    #[test]
    fn test_scan_order_is_last_axis_fastest() {
        // Constant along z, varying along x and y: one run per (x, y) pair.
        let grid = grid_from_fn([2, 3, 4], |[x, y, _]| (x * 3 + y) as i32);
        let (values, lengths) = parallel(grid.compress());

        assert_eq!(values, (0..6).collect::<Vec<_>>());
        assert_eq!(lengths, vec![4; 6]);

        // Constant along x instead: every cell starts a new run.
        let grid: Grid3<i32> = grid_from_fn([2, 3, 4], |[_, y, z]| (y * 4 + z) as i32);
        assert_eq!(grid.compress().len(), 24);
    }

    #[test]
    fn test_float_runs_use_bit_equality() {
        let grid = grid_from_rows(&[&[f32::NAN, f32::NAN, 0.0, -0.0, 1.0, 1.0 + f32::EPSILON]]);
        let runs = grid.compress();

        let lengths: Vec<usize> = runs.iter().map(Run::length).collect();
        assert_eq!(lengths, vec![2, 1, 1, 1, 1]);
        assert!(runs[0].value().is_nan());
        assert!(runs.is_maximal());
    }

    #[test]
    fn test_text_runs() {
        let grid = grid_from_rows(&[
            &["a".to_string(), "a".to_string()],
            &["a".to_string(), "ab".to_string()],
        ]);
        let (values, lengths) = parallel(grid.compress());
        assert_eq!(values, vec!["a", "ab"]);
        assert_eq!(lengths, vec![3, 1]);
    }
}
