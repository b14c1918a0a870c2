//! Capabilities of the values a grid can hold.
//!
//! Every cell type is an [`Element`], which fixes the equality used to detect
//! runs. Arithmetic is opt-in: [`Accumulate`] backs `add` and [`Scale`] backs
//! `multiply`. Text implements `Accumulate` as concatenation and does not
//! implement `Scale` at all.

use std::fmt::Debug;

/// A value that can be stored in a grid and run-length encoded.
pub trait Element: Clone + Debug {
    /// Returns whether two values belong to the same run.
    ///
    /// This must be exact: for floating point values it compares bit
    /// patterns, so `NaN` merges with an identical `NaN` while `0.0` and
    /// `-0.0` stay distinct. Anything looser would make the round trip lossy.
    fn run_eq(&self, other: &Self) -> bool;
}

/// Elements supporting in-place accumulation.
pub trait Accumulate: Element {
    /// Accumulates `rhs` into `self`.
    fn accumulate(&mut self, rhs: &Self);
}

/// Elements supporting in-place scaling.
pub trait Scale: Element {
    /// Scales `self` by `rhs`.
    fn scale(&mut self, rhs: &Self);
}

macro_rules! impl_float_element {
    ($($ty:ty),*) => {$(
        impl Element for $ty {
            fn run_eq(&self, other: &Self) -> bool {
                self.to_bits() == other.to_bits()
            }
        }

        impl Accumulate for $ty {
            fn accumulate(&mut self, rhs: &Self) {
                *self += *rhs;
            }
        }

        impl Scale for $ty {
            fn scale(&mut self, rhs: &Self) {
                *self *= *rhs;
            }
        }
    )*};
}

// Integer arithmetic wraps: a grid cell is fixed width storage and an
// accumulate must never abort halfway through a region sweep.
macro_rules! impl_int_element {
    ($($ty:ty),*) => {$(
        impl Element for $ty {
            fn run_eq(&self, other: &Self) -> bool {
                self == other
            }
        }

        impl Accumulate for $ty {
            fn accumulate(&mut self, rhs: &Self) {
                *self = self.wrapping_add(*rhs);
            }
        }

        impl Scale for $ty {
            fn scale(&mut self, rhs: &Self) {
                *self = self.wrapping_mul(*rhs);
            }
        }
    )*};
}

impl_float_element!(f32, f64);
impl_int_element!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Element for bool {
    fn run_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl Element for char {
    fn run_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl Element for String {
    fn run_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl Accumulate for String {
    fn accumulate(&mut self, rhs: &Self) {
        self.push_str(rhs);
    }
}
