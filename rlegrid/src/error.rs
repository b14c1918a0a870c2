//! Top-level error type for the rlegrid library
//!

use crate::codec::DecodeError;

/// Errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A grid was requested with a zero dimension, with no dimensions at
    /// all, or with more cells than [`CELL_COUNT_LIMIT`](crate::CELL_COUNT_LIMIT).
    #[error("invalid grid size {0:?}: every dimension must be positive and the cell count bounded")]
    InvalidSize(Vec<usize>),

    /// The coordinates (or structural index) fall outside the grid.
    #[error("coordinates {coords:?} are out of bounds for a grid of size {dims:?}")]
    OutOfBounds {
        /// The offending coordinates
        coords: Vec<usize>,
        /// The dimensions of the grid at the time of the call
        dims: Vec<usize>,
    },

    /// An inclusive range was given with its start after its end.
    #[error("invalid inclusive range: from {from:?} is after to {to:?}")]
    InvalidRange {
        /// The start of the range
        from: Vec<usize>,
        /// The end of the range
        to: Vec<usize>,
    },

    /// A removal would leave an axis with no cells.
    #[error("removing {removed} of {size} entries along axis {axis} would empty the grid")]
    EmptyAxis {
        /// The axis being shrunk (0 for rows, 1 for columns)
        axis: usize,
        /// The current size of that axis
        size: usize,
        /// The number of entries the call asked to remove
        removed: usize,
    },

    /// The compressed form could not be expanded into a grid.
    #[error("malformed compressed form: {0}")]
    MalformedCompressedForm(#[from] DecodeError),
}
