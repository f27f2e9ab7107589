//! 1-D numeric vectors
//!
//! Fixed-length numeric vectors whose arithmetic runs on the SIMD array
//! kernels in [`crate::kernel`].
//!
//! # Overview
//!
//! `Vector<T>` owns a contiguous buffer whose length is fixed at
//! construction. Arithmetic comes in three shapes:
//!
//! - fallible vector ⊗ vector methods (`try_add`, `try_sub`, ...) that
//!   return [`ArithError::LengthMismatch`] for unequal lengths
//! - `std::ops` operators for vector ⊗ vector, vector ⊗ scalar and
//!   scalar ⊗ vector, plus the compound-assignment forms
//! - in-place methods (`add_inplace`, `sub_scalar_inplace`, ...) that write
//!   into the receiver's own buffer without reallocating
//!
//! The vector ⊗ vector operators panic on a length mismatch, the same
//! way slice indexing panics out of bounds. Use the `try_*` and
//! `*_inplace` methods to handle the error instead.

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};

use num_complex::Complex;
use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::{ArithError, ArithResult};
use crate::kernel;

// ============================================================
// Core Vector Type
// ============================================================

/// A contiguous, fixed-length 1-D numeric vector
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T> Vector<T> {
    /// Create a new vector that takes ownership of `data`
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Wrap a buffer that may be absent.
    ///
    /// Fails with [`ArithError::NullBuffer`] when `buffer` is `None`.
    pub fn try_from_buffer(buffer: Option<Vec<T>>) -> ArithResult<Self> {
        buffer.map(Self::from_vec).ok_or(ArithError::NullBuffer)
    }

    /// Get the length of the vector
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the vector is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a raw pointer to the data
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Get a slice view of the data
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get a mutable slice view of the data.
    ///
    /// Elements can be rewritten but the length cannot change.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Convert into the underlying Vec
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get an iterator over the elements
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T: Clone> Vector<T> {
    /// Create a vector of zeros (requires Default)
    pub fn zeros(len: usize) -> Self
    where
        T: Default,
    {
        Self {
            data: vec![T::default(); len],
        }
    }

    /// Create a vector filled with a single value
    pub fn fill(len: usize, value: T) -> Self {
        Self {
            data: vec![value; len],
        }
    }

    /// Create from a slice
    pub fn from_slice(slice: &[T]) -> Self {
        Self {
            data: slice.to_vec(),
        }
    }
}

// ============================================================
// Arithmetic
// ============================================================

impl<T: Element> Vector<T> {
    /// Create a vector of multiplicative identities
    pub fn ones(len: usize) -> Self {
        Self::fill(len, T::ONE)
    }

    /// Element-wise addition into a new vector
    pub fn try_add(&self, other: &Self) -> ArithResult<Self> {
        self.zip(other, kernel::add)
    }

    /// Element-wise subtraction into a new vector
    pub fn try_sub(&self, other: &Self) -> ArithResult<Self> {
        self.zip(other, kernel::sub)
    }

    /// Element-wise multiplication into a new vector
    pub fn try_mul(&self, other: &Self) -> ArithResult<Self> {
        self.zip(other, kernel::mul)
    }

    /// Element-wise division into a new vector
    pub fn try_div(&self, other: &Self) -> ArithResult<Self> {
        self.zip(other, kernel::div)
    }

    /// `self[i] + scalar`
    pub fn add_scalar(&self, scalar: T) -> Self {
        self.broadcast(scalar, kernel::add_scalar_assign)
    }

    /// `self[i] - scalar`
    pub fn sub_scalar(&self, scalar: T) -> Self {
        self.broadcast(scalar, kernel::sub_scalar_assign)
    }

    /// `self[i] * scalar`
    pub fn mul_scalar(&self, scalar: T) -> Self {
        self.broadcast(scalar, kernel::mul_scalar_assign)
    }

    /// `self[i] / scalar`, computed as a multiplication by `ONE / scalar`
    /// for floating-point and complex elements.
    pub fn div_scalar(&self, scalar: T) -> Self {
        self.broadcast(scalar, kernel::div_scalar_assign)
    }

    /// `scalar - self[i]`
    pub fn rsub_scalar(&self, scalar: T) -> Self {
        let mut result = self.clone();
        kernel::scalar_sub_assign(scalar, &mut result.data);
        result
    }

    /// `scalar / self[i]`
    pub fn rdiv_scalar(&self, scalar: T) -> Self {
        let mut result = self.clone();
        kernel::scalar_div_assign(scalar, &mut result.data);
        result
    }

    /// Add `other` into this vector's buffer
    pub fn add_inplace(&mut self, other: &Self) -> ArithResult<()> {
        kernel::add_assign(&mut self.data, &other.data)
    }

    /// Subtract `other` from this vector's buffer
    pub fn sub_inplace(&mut self, other: &Self) -> ArithResult<()> {
        kernel::sub_assign(&mut self.data, &other.data)
    }

    /// Multiply this vector's buffer by `other` element-wise
    pub fn mul_inplace(&mut self, other: &Self) -> ArithResult<()> {
        kernel::mul_assign(&mut self.data, &other.data)
    }

    /// Divide this vector's buffer by `other` element-wise
    pub fn div_inplace(&mut self, other: &Self) -> ArithResult<()> {
        kernel::div_assign(&mut self.data, &other.data)
    }

    /// Add `scalar` to every element in place
    pub fn add_scalar_inplace(&mut self, scalar: T) {
        kernel::add_scalar_assign(&mut self.data, scalar);
    }

    /// Subtract `scalar` from every element in place
    pub fn sub_scalar_inplace(&mut self, scalar: T) {
        kernel::sub_scalar_assign(&mut self.data, scalar);
    }

    /// Multiply every element by `scalar` in place
    pub fn mul_scalar_inplace(&mut self, scalar: T) {
        kernel::mul_scalar_assign(&mut self.data, scalar);
    }

    /// Divide every element by `scalar` in place
    pub fn div_scalar_inplace(&mut self, scalar: T) {
        kernel::div_scalar_assign(&mut self.data, scalar);
    }

    fn zip(
        &self,
        other: &Self,
        op: fn(&[T], &[T], &mut [T]) -> ArithResult<()>,
    ) -> ArithResult<Self> {
        let mut result = vec![T::default(); self.len()];
        op(&self.data, &other.data, &mut result)?;
        Ok(Self::from_vec(result))
    }

    fn broadcast(&self, scalar: T, op: fn(&mut [T], T)) -> Self {
        let mut result = self.clone();
        op(&mut result.data, scalar);
        result
    }
}

// ============================================================
// Operators
// ============================================================

macro_rules! impl_vector_ops {
    (
        $Op:ident, $op:ident, $try_op:ident, $scalar_op:ident,
        $OpAssign:ident, $op_assign:ident, $inplace:ident, $scalar_inplace:ident
    ) => {
        impl<T: Element> $Op<&Vector<T>> for &Vector<T> {
            type Output = Vector<T>;

            fn $op(self, rhs: &Vector<T>) -> Vector<T> {
                self.$try_op(rhs).unwrap_or_else(|err| panic!("{err}"))
            }
        }

        impl<T: Element> $Op<Vector<T>> for Vector<T> {
            type Output = Vector<T>;

            fn $op(self, rhs: Vector<T>) -> Vector<T> {
                $Op::$op(&self, &rhs)
            }
        }

        impl<T: Element> $Op<T> for &Vector<T> {
            type Output = Vector<T>;

            fn $op(self, rhs: T) -> Vector<T> {
                self.$scalar_op(rhs)
            }
        }

        impl<T: Element> $Op<T> for Vector<T> {
            type Output = Vector<T>;

            fn $op(mut self, rhs: T) -> Vector<T> {
                self.$scalar_inplace(rhs);
                self
            }
        }

        impl<T: Element> $OpAssign<&Vector<T>> for Vector<T> {
            fn $op_assign(&mut self, rhs: &Vector<T>) {
                if let Err(err) = self.$inplace(rhs) {
                    panic!("{err}");
                }
            }
        }

        impl<T: Element> $OpAssign<T> for Vector<T> {
            fn $op_assign(&mut self, rhs: T) {
                self.$scalar_inplace(rhs);
            }
        }
    };
}

impl_vector_ops!(Add, add, try_add, add_scalar, AddAssign, add_assign, add_inplace, add_scalar_inplace);
impl_vector_ops!(Sub, sub, try_sub, sub_scalar, SubAssign, sub_assign, sub_inplace, sub_scalar_inplace);
impl_vector_ops!(Mul, mul, try_mul, mul_scalar, MulAssign, mul_assign, mul_inplace, mul_scalar_inplace);
impl_vector_ops!(Div, div, try_div, div_scalar, DivAssign, div_assign, div_inplace, div_scalar_inplace);

// scalar ⊗ vector needs one impl per concrete element type.
macro_rules! impl_scalar_lhs_ops {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Add<&Vector<$ty>> for $ty {
                type Output = Vector<$ty>;

                fn add(self, rhs: &Vector<$ty>) -> Vector<$ty> {
                    rhs.add_scalar(self)
                }
            }

            impl Sub<&Vector<$ty>> for $ty {
                type Output = Vector<$ty>;

                fn sub(self, rhs: &Vector<$ty>) -> Vector<$ty> {
                    rhs.rsub_scalar(self)
                }
            }

            impl Mul<&Vector<$ty>> for $ty {
                type Output = Vector<$ty>;

                fn mul(self, rhs: &Vector<$ty>) -> Vector<$ty> {
                    rhs.mul_scalar(self)
                }
            }

            impl Div<&Vector<$ty>> for $ty {
                type Output = Vector<$ty>;

                fn div(self, rhs: &Vector<$ty>) -> Vector<$ty> {
                    rhs.rdiv_scalar(self)
                }
            }

            impl Add<Vector<$ty>> for $ty {
                type Output = Vector<$ty>;

                fn add(self, rhs: Vector<$ty>) -> Vector<$ty> {
                    self + &rhs
                }
            }

            impl Sub<Vector<$ty>> for $ty {
                type Output = Vector<$ty>;

                fn sub(self, rhs: Vector<$ty>) -> Vector<$ty> {
                    self - &rhs
                }
            }

            impl Mul<Vector<$ty>> for $ty {
                type Output = Vector<$ty>;

                fn mul(self, rhs: Vector<$ty>) -> Vector<$ty> {
                    self * &rhs
                }
            }

            impl Div<Vector<$ty>> for $ty {
                type Output = Vector<$ty>;

                fn div(self, rhs: Vector<$ty>) -> Vector<$ty> {
                    self / &rhs
                }
            }
        )*
    };
}

impl_scalar_lhs_ops!(f32, f64, i32, i64, Complex<f32>, Complex<f64>);

// ============================================================
// Trait Implementations
// ============================================================

impl<T> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T: Clone> From<&[T]> for Vector<T> {
    fn from(slice: &[T]) -> Self {
        Self::from_slice(slice)
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

/// Conversion of an owned buffer into a [`Vector`].
pub trait IntoVector<T> {
    /// Wrap `self` as a vector without copying.
    fn into_vector(self) -> Vector<T>;
}

impl<T> IntoVector<T> for Vec<T> {
    fn into_vector(self) -> Vector<T> {
        Vector::from_vec(self)
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector({:?})", self.data)
    }
}

impl<T: fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "]")
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T: Eq> Eq for Vector<T> {}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_creation() {
        let v: Vector<f64> = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        assert_eq!(v.len(), 3);
        assert!(!v.is_empty());
    }

    #[test]
    fn test_null_buffer() {
        let v: ArithResult<Vector<f64>> = Vector::try_from_buffer(None);
        assert_eq!(v.unwrap_err(), ArithError::NullBuffer);

        let v = Vector::try_from_buffer(Some(vec![1.0f32, 2.0])).unwrap();
        assert_eq!(v.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_vector_zeros_ones() {
        let z: Vector<f64> = Vector::zeros(5);
        assert_eq!(z.as_slice(), &[0.0; 5]);

        let o: Vector<Complex<f64>> = Vector::ones(5);
        assert_eq!(o.len(), 5);
        assert!(o.iter().all(|x| *x == Complex::new(1.0, 0.0)));
    }

    #[test]
    fn test_try_add_mismatch() {
        let a: Vector<f64> = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        let b: Vector<f64> = Vector::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(
            a.try_add(&b),
            Err(ArithError::LengthMismatch {
                expected: 3,
                actual: 4
            })
        );
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_operator_mismatch_panics() {
        let a: Vector<f64> = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        let b: Vector<f64> = Vector::from_vec(vec![1.0]);
        let _ = &a - &b;
    }

    #[test]
    fn test_inplace_keeps_buffer() {
        let mut a: Vector<f64> = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        let b: Vector<f64> = Vector::from_vec(vec![4.0, 5.0, 6.0]);
        let ptr = a.as_ptr();

        a.add_inplace(&b).unwrap();
        a.mul_scalar_inplace(2.0);

        assert_eq!(a.as_slice(), &[10.0, 14.0, 18.0]);
        assert_eq!(a.as_ptr(), ptr);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_compound_assignment() {
        let mut a: Vector<i64> = Vector::from_vec(vec![10, 20, 30]);
        a -= &Vector::from_vec(vec![1, 2, 3]);
        a /= 3;
        assert_eq!(a.as_slice(), &[3, 6, 9]);
    }

    #[test]
    fn test_into_vector() {
        let v = vec![1i32, 2, 3].into_vector();
        assert_eq!(v, Vector::from_slice(&[1, 2, 3]));

        let w: Vector<i32> = (1..=3).collect();
        assert_eq!(v, w);
    }

    #[test]
    fn test_vector_display() {
        let v: Vector<f64> = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        assert_eq!(format!("{}", v), "[1, 2, 3]");
        assert_eq!(format!("{:?}", v), "Vector([1.0, 2.0, 3.0])");
    }

    #[test]
    fn test_vector_serde_is_a_plain_sequence() {
        let v: Vector<f64> = Vector::from_vec(vec![1.5, -2.0]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[1.5,-2.0]");
        let back: Vector<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
