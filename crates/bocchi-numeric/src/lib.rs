//! Bocchi Numeric - SIMD array arithmetic
//!
//! Element-wise addition, subtraction, multiplication and division over
//! fixed-length numeric sequences, with a SIMD fast path and a scalar
//! fallback, plus a [`Vector`] value type built on top.
//!
//! # Architecture
//!
//! | Layer | Module | Role |
//! |-------|--------|------|
//! | Registers | [`simd`] | 256-bit register types with AVX / SSE2 / NEON backends |
//! | Elements | [`element`] | Per-type lane width and multiplicative identity |
//! | Kernel | [`kernel`] | Two-phase loop: SIMD prefix, scalar remainder |
//! | Wrapper | [`vector`] | Owned fixed-length vector with operators |
//!
//! # Example
//!
//! ```
//! use bocchi_numeric::{kernel, Vector};
//!
//! let a = [1.0f64, 2.0, 3.0];
//! let b = [4.0f64, 5.0, 6.0];
//! let mut out = [0.0; 3];
//! kernel::add(&a, &b, &mut out)?;
//! assert_eq!(out, [5.0, 7.0, 9.0]);
//!
//! let v = Vector::from_vec(vec![4.0f64, 5.0, 6.0]);
//! assert_eq!((3.0f64 - &v).as_slice(), &[-1.0, -2.0, -3.0]);
//! # Ok::<(), bocchi_numeric::ArithError>(())
//! ```
//!
//! # Supported Elements
//!
//! - `f32` (8 lanes), `f64` (4 lanes)
//! - `Complex<f32>`, `Complex<f64>` (scalar only)
//! - `i32`, `i64` (scalar only, exact division)
//!
//! # Cargo Features
//!
//! - `simd` (default): use platform intrinsics; without it the register
//!   types fall back to portable array loops

#![warn(missing_docs)]
#![allow(unsafe_code)] // SIMD intrinsics require unsafe

pub mod config;
pub mod element;
pub mod error;
pub mod kernel;
pub mod simd;
pub mod vector;

pub use config::{DivisionStrategy, KernelConfig};
pub use element::Element;
pub use error::{ArithError, ArithResult};
pub use kernel::{add, add_scalar, div, div_scalar, mul, mul_scalar, sub, sub_scalar, Kernel};
pub use num_complex::Complex;
pub use vector::{IntoVector, Vector};
