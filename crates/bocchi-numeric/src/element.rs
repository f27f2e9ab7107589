//! Element types accepted by the array kernels.
//!
//! An [`Element`] is a numeric scalar with field-style arithmetic plus a
//! description of its hardware vector support. Types without a vector
//! form use a one-lane [`Single`] register, which makes the kernels skip
//! their vectorized phase entirely.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

use num_complex::Complex;

use crate::simd::{F32x8, F64x4, Lanes, Single};

/// A numeric scalar the array kernels can operate on.
pub trait Element:
    Copy
    + Default
    + PartialEq
    + Debug
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Register shape used for the chunk-aligned prefix.
    type Register: Lanes<Self>;

    /// Multiplicative identity.
    const ONE: Self;

    /// Whether `ONE / x` is a faithful reciprocal of `x`.
    ///
    /// When false, division by a scalar is always performed per element.
    const RECIPROCAL: bool;

    /// Number of elements one hardware register holds for this type.
    #[inline]
    fn lane_width() -> usize {
        <Self::Register as Lanes<Self>>::WIDTH
    }

    /// Whether the value is neither infinite nor NaN.
    fn is_finite(self) -> bool;
}

impl Element for f32 {
    type Register = F32x8;
    const ONE: Self = 1.0;
    const RECIPROCAL: bool = true;

    #[inline]
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
}

impl Element for f64 {
    type Register = F64x4;
    const ONE: Self = 1.0;
    const RECIPROCAL: bool = true;

    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

impl Element for Complex<f32> {
    type Register = Single<Self>;
    const ONE: Self = Complex::new(1.0, 0.0);
    const RECIPROCAL: bool = true;

    #[inline]
    fn is_finite(self) -> bool {
        Complex::is_finite(self)
    }
}

impl Element for Complex<f64> {
    type Register = Single<Self>;
    const ONE: Self = Complex::new(1.0, 0.0);
    const RECIPROCAL: bool = true;

    #[inline]
    fn is_finite(self) -> bool {
        Complex::is_finite(self)
    }
}

/// Plain Rust integer arithmetic: overflow panics in debug builds and wraps
/// in release builds, and division by zero always panics. The kernels do
/// not check either case.
///
/// `1 / x` truncates to zero for `|x| > 1`, so scalar division always divides.
impl Element for i32 {
    type Register = Single<Self>;
    const ONE: Self = 1;
    const RECIPROCAL: bool = false;

    #[inline]
    fn is_finite(self) -> bool {
        true
    }
}

/// Same integer semantics as the `i32` impl: overflow panics in debug
/// builds, division by zero always panics.
impl Element for i64 {
    type Register = Single<Self>;
    const ONE: Self = 1;
    const RECIPROCAL: bool = false;

    #[inline]
    fn is_finite(self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_widths() {
        assert_eq!(f32::lane_width(), 8);
        assert_eq!(f64::lane_width(), 4);
        assert_eq!(Complex::<f32>::lane_width(), 1);
        assert_eq!(Complex::<f64>::lane_width(), 1);
        assert_eq!(i32::lane_width(), 1);
        assert_eq!(i64::lane_width(), 1);
    }

    #[test]
    fn test_identities() {
        assert_eq!(f64::ONE * 3.5, 3.5);
        let z = Complex::new(2.0, -3.0);
        assert_eq!(Complex::<f64>::ONE * z, z);
        assert_eq!(Complex::<f64>::default(), Complex::new(0.0, 0.0));
    }

    #[test]
    fn test_is_finite() {
        assert!(Element::is_finite(2.5f32));
        assert!(!Element::is_finite(f32::INFINITY));
        assert!(!Element::is_finite(f64::NAN));
        assert!(!Element::is_finite(Complex::new(1.0f64, f64::INFINITY)));
        assert!(Element::is_finite(i64::MAX));
    }

    #[test]
    fn test_integer_reciprocal_disabled() {
        assert!(!i32::RECIPROCAL);
        assert!(!i64::RECIPROCAL);
        assert_eq!(i32::ONE / 3, 0);
    }
}
