/// Grid lifecycle through the persisted layout.
pub mod persistence;
/// Structural edits on 2D grids.
pub mod structure;
