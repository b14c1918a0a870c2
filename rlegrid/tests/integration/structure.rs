//! Test row and column edits together with compression.

use rlegrid::{Error, Grid2, RunLengthCodec};

/// Insert a row of 1s into a 5x5 grid of 0s and take it out again.
#[test]
fn insert_then_remove_row() -> Result<(), Error> {
    let original = Grid2::new([5, 5], 0)?;
    let mut grid = original.clone();

    grid.add_rows(2, 1, 1)?;
    assert_eq!(grid.dims(), [6, 5]);
    for y in 0..5 {
        assert_eq!(grid[[2, y]], 1);
        assert_eq!(grid[[3, y]], 0);
    }

    grid.remove_rows(2, 2)?;
    assert_eq!(grid, original);
    Ok(())
}

/// Column edits change the run structure the codec sees.
#[test]
fn column_edits_and_runs() -> Result<(), Error> {
    let mut grid = Grid2::new([5, 5], 0u16)?;
    grid.add_columns(3, 2, 1)?;
    assert_eq!(grid.dims(), [5, 7]);

    // Each row is 0 0 0 1 1 0 0, so rows join up: 3, then (2, 5) per row, ...
    let lengths: Vec<usize> = grid.compress().iter().map(|run| run.length()).collect();
    assert_eq!(lengths, vec![3, 2, 5, 2, 5, 2, 5, 2, 5, 2, 2]);

    grid.remove_columns(1, 2)?;
    assert_eq!(grid.dims(), [5, 5]);
    let restored = RunLengthCodec::expand(&grid.compress(), grid.dims())?;
    assert_eq!(restored, grid);
    assert_eq!(restored[[0, 1]], 1);
    Ok(())
}

#[test]
fn shrinking_to_nothing_is_refused() -> Result<(), Error> {
    let mut grid = Grid2::new([2, 2], 'x')?;
    grid.remove_row(0)?;
    assert!(matches!(grid.remove_row(0), Err(Error::EmptyAxis { .. })));
    assert_eq!(grid.dims(), [1, 2]);
    Ok(())
}
