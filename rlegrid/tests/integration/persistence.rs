//! Test the dense -> packed -> dense lifecycle through a serde transport.

use rlegrid::{DecodeError, Error, Grid2, Grid3, PackedGrid, RunLengthCodec};
use test_case::test_case;

/// A 3x3 grid with a single non-default centre cell compresses to three runs
/// and comes back unchanged.
#[test]
fn centre_cell_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let mut grid = Grid2::new([3, 3], 0.0f32)?;
    grid.set_region(5.0, [1, 1], [1, 1])?;

    let runs = RunLengthCodec::compress(&grid);
    let pairs: Vec<(f32, usize)> = runs.iter().map(|run| (*run.value(), run.length())).collect();
    assert_eq!(pairs, vec![(0.0, 4), (5.0, 1), (0.0, 4)]);

    let restored = RunLengthCodec::expand(&runs, [3, 3])?;
    assert_eq!(restored, grid);
    Ok(())
}

/// A persisted grid survives being written as JSON and read back, and the
/// dense grid is consumed on the way out.
#[test_log::test]
fn save_and_load_through_json() -> Result<(), Box<dyn std::error::Error>> {
    let mut grid = Grid3::new([4, 3, 5], 1i32)?;
    grid.add_region(2, [1, 0, 0], [2, 2, 4])?;
    grid.multiply_region(-1, [3, 1, 1], [3, 1, 3])?;
    let expected = grid.clone();

    let saved = serde_json::to_vec(&grid.into_packed())?;
    let loaded: PackedGrid<i32, 3> = serde_json::from_slice(&saved)?;
    assert_eq!(loaded.sizes(), [4, 3, 5]);

    let restored = Grid3::try_from(loaded)?;
    assert_eq!(restored, expected);
    assert_eq!(restored[[3, 1, 2]], -1);
    assert_eq!(restored[[2, 2, 4]], 3);
    Ok(())
}

#[test_case("[3, 3, [0.0], [8]]" => matches Err(Error::MalformedCompressedForm(DecodeError::TooFewCells { expected: 9, available: 8 })); "eight of nine cells")]
#[test_case("[3, 3, [], []]" => matches Err(Error::MalformedCompressedForm(DecodeError::NoRuns { expected: 9 })); "no runs")]
#[test_case("[3, 0, [0.0], [1]]" => matches Err(Error::InvalidSize(_)); "zero size")]
fn loading_malformed_data(json: &str) -> Result<Grid2<f64>, Error> {
    let packed: PackedGrid<f64, 2> = serde_json::from_str(json).expect("valid json");
    packed.into_grid()
}

/// Repeated save/load cycles with edits in between keep the grid intact.
#[test]
fn repeated_cycles() -> Result<(), Error> {
    let mut grid = Grid2::new([6, 4], String::from("-"))?;
    for step in 0..5 {
        grid.add(step.to_string(), [step, step % 4])?;
        let packed = PackedGrid::from(&grid);
        let reloaded = packed.into_grid()?;
        assert_eq!(reloaded, grid);
        grid = reloaded;
    }

    assert_eq!(grid[[4, 0]], "-4");
    Ok(())
}
