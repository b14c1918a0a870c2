#![deny(missing_docs)]

//! # rlegrid: dense grids with a run-length persisted form
//!
//! Grids are always fully materialized in memory. The run-length form only
//! exists when a grid is being persisted or restored, and it is produced as an
//! independent value rather than kept next to the live grid.
//!
//! ## Usage Example
//!
//! ```
//! use rlegrid::{Grid2, RunLengthCodec};
//!
//! let mut grid = Grid2::new([3, 3], 0.0f32).unwrap();
//! grid.set(5.0, [1, 1]).unwrap();
//!
//! let runs = RunLengthCodec::compress(&grid);
//! assert_eq!(runs.len(), 3);
//!
//! let restored = RunLengthCodec::expand(&runs, grid.dims()).unwrap();
//! assert_eq!(restored, grid);
//! ```
//!
//! ## Architecture
//!
//! * **Grid**: the dense, mutable backing store with point and region writes
//! * **Codec**: run-length compression and expansion in scan order
//! * **Resize**: row and column insertion and removal for 2D grids
//! * **Packed**: the persisted layout handed to a serde transport

pub mod codec;
pub mod element;
pub mod error;
pub mod grid;
pub mod packed;
pub mod region;
mod resize;

#[cfg(any(test, feature = "testing"))]
pub mod testing;


pub use codec::DecodeError;
pub use codec::Run;
pub use codec::RunLengthCodec;
pub use codec::Runs;

pub use element::Accumulate;
pub use element::Element;
pub use element::Scale;

pub use error::Error;

pub use grid::Grid;
pub use grid::Grid2;
pub use grid::Grid3;

pub use packed::PackedGrid;

pub use region::Region;

/// Maximum number of cells a single grid may hold. Construction, resizing and
/// expansion of persisted data all refuse to allocate beyond this, which keeps
/// a corrupt or hostile size header from exhausting memory.
pub const CELL_COUNT_LIMIT: u64 = 1 << 30;
