//! Inclusive, axis-aligned boxes of grid coordinates.
//!
//! # Invariants
//!
//! A `Region` always satisfies `from[axis] <= to[axis]` on every axis, so it
//! is never empty. Sweeping a region visits its cells in scan order (first
//! axis outermost, last axis fastest), which is also the order of the grid's
//! backing store.

use crate::error::Error;

/// An inclusive box `[from, to]` of coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region<const D: usize> {
    from: [usize; D],
    to: [usize; D],
}

impl<const D: usize> Region<D> {
    /// Creates a region spanning `from` to `to`, both ends inclusive.
    ///
    /// ## Errors
    /// - `from` is after `to` on some axis (`InvalidRange`)
    pub fn new(from: [usize; D], to: [usize; D]) -> Result<Self, Error> {
        if from.iter().zip(&to).any(|(lo, hi)| lo > hi) {
            return Err(Error::InvalidRange {
                from: from.to_vec(),
                to: to.to_vec(),
            });
        }

        Ok(Self { from, to })
    }

    /// The first corner of the region (inclusive).
    pub fn start(&self) -> [usize; D] {
        self.from
    }

    /// The last corner of the region (inclusive).
    pub fn end(&self) -> [usize; D] {
        self.to
    }

    /// Returns the number of cells in the region, or `None` if it does not
    /// fit in a `usize`.
    pub fn volume(&self) -> Option<usize> {
        self.from
            .iter()
            .zip(&self.to)
            .try_fold(1usize, |volume, (lo, hi)| {
                (hi - lo).checked_add(1)?.checked_mul(volume)
            })
    }

    /// Returns whether `coords` lies inside the region.
    pub fn contains(&self, coords: &[usize; D]) -> bool {
        coords
            .iter()
            .zip(self.from.iter().zip(&self.to))
            .all(|(c, (lo, hi))| lo <= c && c <= hi)
    }

    /// Checks that the whole region fits inside a grid of size `dims`.
    ///
    /// Since `from <= to`, checking the far corner is enough.
    pub fn check_within(&self, dims: &[usize; D]) -> Result<(), Error> {
        check_bounds(&self.to, dims)
    }

    /// Sweeps the region in scan order, yielding flat offsets into the
    /// backing store of a grid of size `dims`. The region must already have
    /// been checked with [`Region::check_within`].
    pub(crate) fn offsets(&self, dims: &[usize; D]) -> Offsets<D> {
        Offsets {
            from: self.from,
            to: self.to,
            strides: strides(dims),
            next: Some(self.from),
        }
    }
}

/// Iterator over the flat offsets of a region, see [`Region::offsets`].
pub(crate) struct Offsets<const D: usize> {
    from: [usize; D],
    to: [usize; D],
    strides: [usize; D],
    next: Option<[usize; D]>,
}

impl<const D: usize> Iterator for Offsets<D> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let offset = flat_offset(&current, &self.strides);

        // Advance like an odometer: bump the fastest axis that still has
        // room and rewind every faster axis back to the start of the box.
        self.next = None;
        for axis in (0..D).rev() {
            if current[axis] < self.to[axis] {
                let mut next = current;
                next[axis] += 1;
                next[axis + 1..].copy_from_slice(&self.from[axis + 1..]);
                self.next = Some(next);
                break;
            }
        }

        Some(offset)
    }
}

/// Returns the row-major strides for a grid of size `dims`.
pub(crate) fn strides<const D: usize>(dims: &[usize; D]) -> [usize; D] {
    let mut strides = [1; D];
    for axis in (0..D.saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1] * dims[axis + 1];
    }
    strides
}

/// Converts coordinates to an offset using precomputed strides.
pub(crate) fn flat_offset<const D: usize>(coords: &[usize; D], strides: &[usize; D]) -> usize {
    coords.iter().zip(strides).map(|(c, s)| c * s).sum()
}

/// Fails with `OutOfBounds` unless every coordinate is below its dimension.
pub(crate) fn check_bounds<const D: usize>(
    coords: &[usize; D],
    dims: &[usize; D],
) -> Result<(), Error> {
    if coords.iter().zip(dims).any(|(c, d)| c >= d) {
        return Err(Error::OutOfBounds {
            coords: coords.to_vec(),
            dims: dims.to_vec(),
        });
    }
    Ok(())
}
