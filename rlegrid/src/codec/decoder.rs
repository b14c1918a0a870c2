//! Expansion of a compressed form back into a dense grid.
//!
//! The decoder consumes runs in order, writing each value to successive
//! scan-order cells until the run's count is used up. It fails rather than
//! under-filling: the whole grid must be covered. Runs left over once the grid
//! is full are ignored.

use std::iter;

use crate::element::Element;
use crate::error::Error;
use crate::grid::{self, Grid};

use super::{DecodeError, RunLengthCodec, Runs};

impl RunLengthCodec {
    /// Expands `runs` into a grid of size `dims`.
    ///
    /// ## Errors
    /// * `InvalidSize` - If `dims` is not a valid grid size
    /// * `MalformedCompressedForm(NoRuns)` - If there are no runs at all
    /// * `MalformedCompressedForm(TooFewCells)` - If the runs cover fewer
    ///   cells than the grid holds
    #[tracing::instrument(skip_all, fields(dims = ?dims, runs = runs.len()))]
    pub fn expand<T: Element, const D: usize>(
        runs: &Runs<T>,
        dims: [usize; D],
    ) -> Result<Grid<T, D>, Error> {
        let expected = grid::cell_count(&dims)?;

        if runs.is_empty() {
            return Err(DecodeError::NoRuns { expected }.into());
        }

        // Refuse short run lists before allocating the grid. A sum that
        // overflows covers any grid.
        if let Some(available) = runs.total_length().filter(|&total| total < expected) {
            return Err(DecodeError::TooFewCells { expected, available }.into());
        }

        let mut cells = Vec::with_capacity(expected);
        let mut remaining = runs.iter();

        while cells.len() < expected {
            let Some(run) = remaining.next() else {
                return Err(DecodeError::TooFewCells {
                    expected,
                    available: cells.len(),
                }
                .into());
            };

            // The last run used may be longer than what is left to fill.
            let count = run.length().min(expected - cells.len());
            cells.extend(iter::repeat(run.value()).take(count).cloned());
        }

        let unused = remaining.len();
        if unused > 0 {
            tracing::debug!(unused, "ignoring runs beyond the end of the grid");
        }

        tracing::debug!(cells = cells.len(), "expanded grid");
        Ok(Grid::from_parts(dims, cells))
    }
}
