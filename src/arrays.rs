//! Field storage for the staggered solver grids.
//!
//! Every field component is stored as a dense row-major 2D array indexed by
//! `(i, k)`, where `i` runs along the radial axis and `k` along the axial
//! axis. One-dimensional volumes use `nr == 1`.

use num_complex::Complex64;
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Extents of a 2D index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of points along r
    pub nr: usize,
    /// Number of points along z
    pub nz: usize,
}

impl Dimensions {
    /// Create new dimensions.
    pub fn new(nr: usize, nz: usize) -> Self {
        Self { nr, nz }
    }

    /// Total number of points.
    #[inline]
    pub fn total(&self) -> usize {
        self.nr * self.nz
    }

    /// Convert an `(i, k)` pair to a linear index.
    #[inline]
    pub fn to_linear(&self, i: usize, k: usize) -> usize {
        debug_assert!(i < self.nr && k < self.nz);
        i * self.nz + k
    }
}

/// Scalar type stored in a field array.
///
/// Implemented for `f64` (real-valued fields) and `Complex64`
/// (complex-valued fields). The update equations only need addition,
/// scaling by real coefficients and the Bloch phase factor.
pub trait FieldValue:
    Copy
    + Default
    + Debug
    + Send
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + Mul<f64, Output = Self>
{
    /// Whether this scalar stores an imaginary part.
    const IS_COMPLEX: bool;

    /// Convert a complex value, discarding the imaginary part for real storage.
    fn from_complex(value: Complex64) -> Self;

    /// Multiply by a unit-modulus phase factor.
    fn rotate(self, phase: Complex64) -> Self;

    /// `Re(self * conj(other))`.
    fn dot_conj(self, other: Self) -> f64;

    /// Squared magnitude.
    fn norm_sqr(self) -> f64;

    /// Whether both parts are finite.
    fn is_finite(self) -> bool;
}

impl FieldValue for f64 {
    const IS_COMPLEX: bool = false;

    #[inline]
    fn from_complex(value: Complex64) -> Self {
        value.re
    }

    #[inline]
    fn rotate(self, phase: Complex64) -> Self {
        self * phase.re
    }

    #[inline]
    fn dot_conj(self, other: Self) -> f64 {
        self * other
    }

    #[inline]
    fn norm_sqr(self) -> f64 {
        self * self
    }

    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

impl FieldValue for Complex64 {
    const IS_COMPLEX: bool = true;

    #[inline]
    fn from_complex(value: Complex64) -> Self {
        value
    }

    #[inline]
    fn rotate(self, phase: Complex64) -> Self {
        self * phase
    }

    #[inline]
    fn dot_conj(self, other: Self) -> f64 {
        (self * other.conj()).re
    }

    #[inline]
    fn norm_sqr(self) -> f64 {
        Complex64::norm_sqr(&self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        Complex64::is_finite(self)
    }
}

/// Dense 2D array of one field component.
#[derive(Debug, Clone)]
pub struct Field2D<T> {
    data: Vec<T>,
    dims: Dimensions,
}

impl<T: FieldValue> Field2D<T> {
    /// Create a zero-filled field.
    pub fn new(dims: Dimensions) -> Self {
        Self {
            data: vec![T::default(); dims.total()],
            dims,
        }
    }

    /// Field dimensions.
    #[inline]
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    #[inline]
    pub fn get(&self, i: usize, k: usize) -> T {
        self.data[self.dims.to_linear(i, k)]
    }

    #[inline]
    pub fn set(&mut self, i: usize, k: usize, value: T) {
        let idx = self.dims.to_linear(i, k);
        self.data[idx] = value;
    }

    #[inline]
    pub fn add(&mut self, i: usize, k: usize, value: T) {
        let idx = self.dims.to_linear(i, k);
        self.data[idx] += value;
    }

    /// Reset all values to zero.
    pub fn clear(&mut self) {
        self.data.fill(T::default());
    }

    /// Sum of squared magnitudes.
    pub fn energy(&self) -> f64 {
        self.data.iter().map(|v| v.norm_sqr()).sum()
    }

    /// Whether every value is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Convert to another scalar type, element by element.
    pub fn map<U: FieldValue>(&self, f: impl Fn(T) -> U) -> Field2D<U> {
        Field2D {
            data: self.data.iter().map(|&v| f(v)).collect(),
            dims: self.dims,
        }
    }
}
