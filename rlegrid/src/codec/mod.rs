//! # Run-length codec
//!
//! Converts between a dense [`Grid`](crate::Grid) and its compressed form, an
//! ordered list of [`Run`]s. Both directions walk the grid in scan order
//! (first axis outermost, last axis fastest), so grids whose equal values
//! cluster along the last axis compress best.
//!
//! ## Format
//!
//! A compressed form is a sequence of `(value, length)` pairs such that:
//! 1. every length is positive
//! 2. the lengths sum to the number of cells of the grid
//! 3. repeating each value `length` times, in order, gives the cells in scan
//!    order
//!
//! The encoder additionally never emits two adjacent runs with equal values,
//! though the decoder accepts such input.

use std::num::NonZeroUsize;
use std::ops::Index;

use crate::element::Element;

mod decoder;
mod encoder;

/// The stateless run-length codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLengthCodec;

/// A value repeated `length` consecutive times in scan order.
#[derive(Debug, Clone)]
pub struct Run<T> {
    value: T,
    length: NonZeroUsize,
}

impl<T> Run<T> {
    /// Creates a run of `length` copies of `value`.
    pub fn new(value: T, length: NonZeroUsize) -> Self {
        Self { value, length }
    }

    /// The repeated value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The number of repetitions, always at least one.
    pub fn length(&self) -> usize {
        self.length.get()
    }

    /// Splits the run into its value and length.
    pub fn into_parts(self) -> (T, NonZeroUsize) {
        (self.value, self.length)
    }
}

impl<T: Element> PartialEq for Run<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.value.run_eq(&other.value)
    }
}

/// The compressed form of a grid: runs in scan order.
#[derive(Debug, Clone)]
pub struct Runs<T>(Vec<Run<T>>);

impl<T> Default for Runs<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> IntoIterator for Runs<T> {
    type Item = Run<T>;
    type IntoIter = std::vec::IntoIter<Run<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Runs<T> {
    type Item = &'a Run<T>;
    type IntoIter = std::slice::Iter<'a, Run<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T> Index<usize> for Runs<T> {
    type Output = Run<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<T: Element> PartialEq for Runs<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Runs<T> {
    /// Creates a compressed form from an iterator of runs.
    pub fn new_from<I>(runs: I) -> Self
    where
        I: IntoIterator<Item = Run<T>>,
    {
        Self(runs.into_iter().collect())
    }

    /// Appends a run. Adjacent runs are not merged.
    pub fn push(&mut self, run: Run<T>) {
        self.0.push(run);
    }

    /// Returns the number of runs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no runs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the runs.
    pub fn iter(&self) -> std::slice::Iter<'_, Run<T>> {
        self.0.iter()
    }

    /// Returns the number of cells the runs cover, or `None` on overflow.
    pub fn total_length(&self) -> Option<usize> {
        self.0
            .iter()
            .try_fold(0usize, |total, run| total.checked_add(run.length()))
    }

    /// Splits the runs into the parallel value and length sequences of the
    /// persisted layout.
    pub fn into_parallel(self) -> (Vec<T>, Vec<usize>) {
        self.0
            .into_iter()
            .map(|run| {
                let (value, length) = run.into_parts();
                (value, length.get())
            })
            .unzip()
    }

    /// Rebuilds runs from parallel value and length sequences.
    ///
    /// ## Errors
    /// - The sequences differ in length (`MismatchedLengths`)
    /// - A length is zero (`ZeroLengthRun`)
    pub fn try_from_parallel(values: Vec<T>, lengths: Vec<usize>) -> Result<Self, DecodeError> {
        if values.len() != lengths.len() {
            return Err(DecodeError::MismatchedLengths {
                values: values.len(),
                lengths: lengths.len(),
            });
        }

        values
            .into_iter()
            .zip(lengths)
            .enumerate()
            .map(|(index, (value, length))| {
                NonZeroUsize::new(length)
                    .map(|length| Run::new(value, length))
                    .ok_or(DecodeError::ZeroLengthRun(index))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl<T: Element> Runs<T> {
    /// Returns `true` if no two adjacent runs carry equal values.
    pub fn is_maximal(&self) -> bool {
        self.0
            .windows(2)
            .all(|pair| !pair[0].value.run_eq(&pair[1].value))
    }
}

/// Errors raised while expanding a compressed form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// There are no runs, but the target grid has cells.
    #[error("no runs to expand into {expected} cells")]
    NoRuns {
        /// Number of cells in the target grid
        expected: usize,
    },

    /// The runs ran out before the target grid was filled.
    #[error("run sequence exhausted after {available} of {expected} cells")]
    TooFewCells {
        /// Number of cells in the target grid
        expected: usize,
        /// Number of cells the runs covered
        available: usize,
    },

    /// A run declared a length of zero.
    #[error("run {0} has zero length")]
    ZeroLengthRun(usize),

    /// The value and length sequences are not parallel.
    #[error("mismatched run sequences: {values} values, {lengths} lengths")]
    MismatchedLengths {
        /// Number of values
        values: usize,
        /// Number of lengths
        lengths: usize,
    },

    /// A persisted size or length does not fit in memory on this platform.
    #[error("integer overflow")]
    IntegerOverflow,
}
