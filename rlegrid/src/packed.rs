//! The persisted layout of a grid.
//!
//! A [`PackedGrid`] is what a grid turns into right before it is written out
//! and what it is rebuilt from right after it is read back. It holds, in this
//! order:
//!
//! 1. the size of every axis (`D` integers)
//! 2. the run values, in scan order
//! 3. the run lengths, parallel to the values
//!
//! The number of runs is not stored separately; it is the length of the two
//! sequences. Serde serializes the packed grid as a tuple of `D + 2` elements
//! in exactly that order, and the caller's serde format decides the bytes.
//!
//! Converting a grid into a `PackedGrid` produces an independent value, and
//! [`Grid::into_packed`] consumes the grid outright, so a dense grid and its
//! compressed form are never both live and able to drift apart.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{DecodeError, RunLengthCodec, Runs};
use crate::element::Element;
use crate::error::Error;
use crate::grid::{self, Grid};

/// A grid in its persisted, run-length encoded layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedGrid<T, const D: usize> {
    sizes: [u64; D],
    values: Vec<T>,
    lengths: Vec<u64>,
}

impl<T, const D: usize> PackedGrid<T, D> {
    /// Assembles a packed grid from its raw fields. Nothing is validated
    /// until it is converted back into a [`Grid`].
    pub fn new(sizes: [u64; D], values: Vec<T>, lengths: Vec<u64>) -> Self {
        Self {
            sizes,
            values,
            lengths,
        }
    }

    /// The size of every axis.
    pub fn sizes(&self) -> [u64; D] {
        self.sizes
    }

    /// The run values, in scan order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The run lengths, parallel to [`PackedGrid::values`].
    pub fn lengths(&self) -> &[u64] {
        &self.lengths
    }

    /// The number of runs.
    pub fn run_count(&self) -> usize {
        self.values.len()
    }
}

impl<T: Element, const D: usize> PackedGrid<T, D> {
    /// Expands the packed grid back into a dense grid.
    ///
    /// ## Errors
    /// * `InvalidSize` - If the sizes describe an empty or oversized grid
    /// * `MalformedCompressedForm` - If the runs are inconsistent or do not
    ///   cover the grid
    pub fn into_grid(self) -> Result<Grid<T, D>, Error> {
        // Validate the sizes before touching the runs so that a hostile
        // header is rejected without any allocation.
        let mut dims = [0usize; D];
        for (dim, &size) in dims.iter_mut().zip(&self.sizes) {
            *dim = usize::try_from(size).map_err(|_| DecodeError::IntegerOverflow)?;
        }
        grid::cell_count(&dims)?;

        let lengths = self
            .lengths
            .into_iter()
            .map(|length| usize::try_from(length).map_err(|_| DecodeError::IntegerOverflow))
            .collect::<Result<Vec<_>, _>>()?;

        let runs = Runs::try_from_parallel(self.values, lengths)?;
        RunLengthCodec::expand(&runs, dims)
    }
}

impl<T: Element, const D: usize> From<&Grid<T, D>> for PackedGrid<T, D> {
    fn from(grid: &Grid<T, D>) -> Self {
        let (values, lengths) = grid.compress().into_parallel();
        Self {
            sizes: grid.dims().map(|dim| dim as u64),
            values,
            lengths: lengths.into_iter().map(|length| length as u64).collect(),
        }
    }
}

impl<T: Element, const D: usize> From<Grid<T, D>> for PackedGrid<T, D> {
    fn from(grid: Grid<T, D>) -> Self {
        Self::from(&grid)
    }
}

impl<T: Element, const D: usize> TryFrom<PackedGrid<T, D>> for Grid<T, D> {
    type Error = Error;

    fn try_from(packed: PackedGrid<T, D>) -> Result<Self, Self::Error> {
        packed.into_grid()
    }
}

impl<T: Element, const D: usize> Grid<T, D> {
    /// Consumes the dense grid and returns its persisted layout.
    pub fn into_packed(self) -> PackedGrid<T, D> {
        PackedGrid::from(self)
    }
}

impl<T: Serialize, const D: usize> Serialize for PackedGrid<T, D> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(D + 2)?;
        for size in &self.sizes {
            tuple.serialize_element(size)?;
        }
        tuple.serialize_element(&self.values)?;
        tuple.serialize_element(&self.lengths)?;
        tuple.end()
    }
}

impl<'de, T: Deserialize<'de>, const D: usize> Deserialize<'de> for PackedGrid<T, D> {
    fn deserialize<De>(deserializer: De) -> Result<Self, De::Error>
    where
        De: Deserializer<'de>,
    {
        deserializer.deserialize_tuple(D + 2, PackedGridVisitor(PhantomData))
    }
}

/// Reads the `D + 2` tuple written by the `Serialize` implementation.
struct PackedGridVisitor<T, const D: usize>(PhantomData<T>);

impl<'de, T: Deserialize<'de>, const D: usize> Visitor<'de> for PackedGridVisitor<T, D> {
    type Value = PackedGrid<T, D>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a tuple of {D} sizes, run values and run lengths")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut sizes = [0u64; D];
        for (index, size) in sizes.iter_mut().enumerate() {
            *size = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(index, &self))?;
        }

        let values = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(D, &self))?;
        let lengths = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(D + 1, &self))?;

        Ok(PackedGrid {
            sizes,
            values,
            lengths,
        })
    }
}
