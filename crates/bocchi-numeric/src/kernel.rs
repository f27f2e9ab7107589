//! Element-wise array arithmetic
//!
//! Computes `result[i] = a[i] OP b[i]` (or `a[i] OP scalar`) for
//! `OP ∈ {+, -, *, /}` over contiguous slices.
//!
//! # Vectorization Strategy
//!
//! Every entry point runs the same two-phase loop:
//!
//! 1. **Chunk-aligned prefix**: the first `floor(n / W) * W` elements are
//!    processed `W` at a time on the element type's SIMD register, where
//!    `W` is [`Element::lane_width`]. Types with `W == 1` (complex numbers,
//!    integers) skip this phase.
//! 2. **Remainder**: the trailing `n mod W` elements go through the scalar
//!    operator.
//!
//! Callers never need to pad or align lengths.
//!
//! # Aliasing
//!
//! The `*_assign` entry points write into their left operand. Each output
//! slot is written exactly once, after the inputs for that slot have been
//! read, so in-place aggregation gives the same result as writing to a
//! fresh buffer.
//!
//! # Errors
//!
//! Operand lengths are checked before anything is written. On
//! [`ArithError::LengthMismatch`](crate::ArithError::LengthMismatch) the
//! output is left exactly as it was.

use crate::config::{DivisionStrategy, KernelConfig};
use crate::element::Element;
use crate::error::{ensure_same_length, ArithResult};
use crate::simd::Lanes;

// ============================================================
// Operators
// ============================================================

/// A binary operator with a scalar and a register form.
trait BinaryOp {
    const NAME: &'static str;

    fn scalar<T: Element>(a: T, b: T) -> T;

    fn lanes<T: Element>(a: T::Register, b: T::Register) -> T::Register;
}

struct AddOp;
struct SubOp;
struct MulOp;
struct DivOp;

impl BinaryOp for AddOp {
    const NAME: &'static str = "add";

    #[inline]
    fn scalar<T: Element>(a: T, b: T) -> T {
        a + b
    }

    #[inline]
    fn lanes<T: Element>(a: T::Register, b: T::Register) -> T::Register {
        a.add(b)
    }
}

impl BinaryOp for SubOp {
    const NAME: &'static str = "sub";

    #[inline]
    fn scalar<T: Element>(a: T, b: T) -> T {
        a - b
    }

    #[inline]
    fn lanes<T: Element>(a: T::Register, b: T::Register) -> T::Register {
        a.sub(b)
    }
}

impl BinaryOp for MulOp {
    const NAME: &'static str = "mul";

    #[inline]
    fn scalar<T: Element>(a: T, b: T) -> T {
        a * b
    }

    #[inline]
    fn lanes<T: Element>(a: T::Register, b: T::Register) -> T::Register {
        a.mul(b)
    }
}

impl BinaryOp for DivOp {
    const NAME: &'static str = "div";

    #[inline]
    fn scalar<T: Element>(a: T, b: T) -> T {
        a / b
    }

    #[inline]
    fn lanes<T: Element>(a: T::Register, b: T::Register) -> T::Register {
        a.div(b)
    }
}

// ============================================================
// Operands
// ============================================================

/// Where one side of an operation reads its values from.
#[derive(Clone, Copy)]
enum Operand<'a, T> {
    /// A slice with the same length as the output.
    Slice(&'a [T]),
    /// One value broadcast to every position.
    Splat(T),
    /// The output buffer itself (in-place aggregation).
    Output,
}

impl<T: Element> Operand<'_, T> {
    #[inline]
    fn register(self, out: &[T], offset: usize) -> T::Register {
        match self {
            Operand::Slice(values) => <T::Register as Lanes<T>>::load(&values[offset..]),
            Operand::Splat(value) => <T::Register as Lanes<T>>::splat(value),
            Operand::Output => <T::Register as Lanes<T>>::load(&out[offset..]),
        }
    }

    #[inline]
    fn element(self, out: &[T], index: usize) -> T {
        match self {
            Operand::Slice(values) => values[index],
            Operand::Splat(value) => value,
            Operand::Output => out[index],
        }
    }
}

// ============================================================
// Kernel
// ============================================================

/// Element-wise arithmetic over slices, driven by a [`KernelConfig`].
///
/// The module-level functions ([`add`], [`div_scalar`], ...) use
/// `Kernel::default()`. Build a kernel explicitly to change the division
/// strategy or to disable the SIMD prefix:
///
/// ```
/// use bocchi_numeric::{DivisionStrategy, Kernel, KernelConfig};
///
/// let kernel = Kernel::new(KernelConfig::default().with_division(DivisionStrategy::Exact));
/// let a = [1.0f64, 2.0, 3.0];
/// let mut out = [0.0; 3];
/// kernel.div_scalar(&a, 3.0, &mut out)?;
/// assert_eq!(out, [1.0 / 3.0, 2.0 / 3.0, 1.0]);
/// # Ok::<(), bocchi_numeric::ArithError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Kernel {
    config: KernelConfig,
}

impl Kernel {
    /// Create a kernel with the given configuration.
    #[must_use]
    pub const fn new(config: KernelConfig) -> Self {
        Self { config }
    }

    /// The configuration this kernel runs with.
    #[must_use]
    pub const fn config(&self) -> KernelConfig {
        self.config
    }

    /// Lane width this kernel uses for `T`: the register width, or 1 when
    /// vectorization is disabled.
    #[must_use]
    pub fn lane_width<T: Element>(&self) -> usize {
        if self.config.vectorize {
            T::lane_width()
        } else {
            1
        }
    }

    // --------------------------------------------------------
    // slice ⊗ slice
    // --------------------------------------------------------

    /// `result[i] = a[i] + b[i]`
    pub fn add<T: Element>(&self, a: &[T], b: &[T], result: &mut [T]) -> ArithResult<()> {
        self.binary::<T, AddOp>(a, b, result)
    }

    /// `result[i] = a[i] - b[i]`
    pub fn sub<T: Element>(&self, a: &[T], b: &[T], result: &mut [T]) -> ArithResult<()> {
        self.binary::<T, SubOp>(a, b, result)
    }

    /// `result[i] = a[i] * b[i]`
    pub fn mul<T: Element>(&self, a: &[T], b: &[T], result: &mut [T]) -> ArithResult<()> {
        self.binary::<T, MulOp>(a, b, result)
    }

    /// `result[i] = a[i] / b[i]`
    pub fn div<T: Element>(&self, a: &[T], b: &[T], result: &mut [T]) -> ArithResult<()> {
        self.binary::<T, DivOp>(a, b, result)
    }

    // --------------------------------------------------------
    // slice ⊗ scalar
    // --------------------------------------------------------

    /// `result[i] = a[i] + scalar`
    pub fn add_scalar<T: Element>(&self, a: &[T], scalar: T, result: &mut [T]) -> ArithResult<()> {
        self.broadcast::<T, AddOp>(a, scalar, result)
    }

    /// `result[i] = a[i] - scalar`
    pub fn sub_scalar<T: Element>(&self, a: &[T], scalar: T, result: &mut [T]) -> ArithResult<()> {
        self.broadcast::<T, SubOp>(a, scalar, result)
    }

    /// `result[i] = a[i] * scalar`
    pub fn mul_scalar<T: Element>(&self, a: &[T], scalar: T, result: &mut [T]) -> ArithResult<()> {
        self.broadcast::<T, MulOp>(a, scalar, result)
    }

    /// `result[i] = a[i] / scalar`
    ///
    /// With [`DivisionStrategy::Reciprocal`] this multiplies by a
    /// precomputed `ONE / scalar` instead of dividing each element. When
    /// that inverse is not finite (a zero or subnormal `scalar`) every
    /// element is divided instead.
    pub fn div_scalar<T: Element>(&self, a: &[T], scalar: T, result: &mut [T]) -> ArithResult<()> {
        match self.reciprocal(scalar) {
            Some(inverse) => self.broadcast::<T, MulOp>(a, inverse, result),
            None => self.broadcast::<T, DivOp>(a, scalar, result),
        }
    }

    // --------------------------------------------------------
    // scalar ⊗ slice
    // --------------------------------------------------------

    /// `result[i] = scalar - a[i]`
    pub fn scalar_sub<T: Element>(&self, scalar: T, a: &[T], result: &mut [T]) -> ArithResult<()> {
        ensure_same_length(a.len(), result.len())?;
        self.run::<T, SubOp>(Operand::Splat(scalar), Operand::Slice(a), result);
        Ok(())
    }

    /// `result[i] = scalar / a[i]`
    pub fn scalar_div<T: Element>(&self, scalar: T, a: &[T], result: &mut [T]) -> ArithResult<()> {
        ensure_same_length(a.len(), result.len())?;
        self.run::<T, DivOp>(Operand::Splat(scalar), Operand::Slice(a), result);
        Ok(())
    }

    // --------------------------------------------------------
    // in place
    // --------------------------------------------------------

    /// `acc[i] = acc[i] + b[i]`
    pub fn add_assign<T: Element>(&self, acc: &mut [T], b: &[T]) -> ArithResult<()> {
        self.binary_assign::<T, AddOp>(acc, b)
    }

    /// `acc[i] = acc[i] - b[i]`
    pub fn sub_assign<T: Element>(&self, acc: &mut [T], b: &[T]) -> ArithResult<()> {
        self.binary_assign::<T, SubOp>(acc, b)
    }

    /// `acc[i] = acc[i] * b[i]`
    pub fn mul_assign<T: Element>(&self, acc: &mut [T], b: &[T]) -> ArithResult<()> {
        self.binary_assign::<T, MulOp>(acc, b)
    }

    /// `acc[i] = acc[i] / b[i]`
    pub fn div_assign<T: Element>(&self, acc: &mut [T], b: &[T]) -> ArithResult<()> {
        self.binary_assign::<T, DivOp>(acc, b)
    }

    /// `acc[i] = acc[i] + scalar`
    pub fn add_scalar_assign<T: Element>(&self, acc: &mut [T], scalar: T) {
        self.run::<T, AddOp>(Operand::Output, Operand::Splat(scalar), acc);
    }

    /// `acc[i] = acc[i] - scalar`
    pub fn sub_scalar_assign<T: Element>(&self, acc: &mut [T], scalar: T) {
        self.run::<T, SubOp>(Operand::Output, Operand::Splat(scalar), acc);
    }

    /// `acc[i] = acc[i] * scalar`
    pub fn mul_scalar_assign<T: Element>(&self, acc: &mut [T], scalar: T) {
        self.run::<T, MulOp>(Operand::Output, Operand::Splat(scalar), acc);
    }

    /// `acc[i] = acc[i] / scalar`, following the configured division strategy.
    pub fn div_scalar_assign<T: Element>(&self, acc: &mut [T], scalar: T) {
        match self.reciprocal(scalar) {
            Some(inverse) => self.run::<T, MulOp>(Operand::Output, Operand::Splat(inverse), acc),
            None => self.run::<T, DivOp>(Operand::Output, Operand::Splat(scalar), acc),
        }
    }

    /// `acc[i] = scalar - acc[i]`
    pub fn scalar_sub_assign<T: Element>(&self, scalar: T, acc: &mut [T]) {
        self.run::<T, SubOp>(Operand::Splat(scalar), Operand::Output, acc);
    }

    /// `acc[i] = scalar / acc[i]`
    pub fn scalar_div_assign<T: Element>(&self, scalar: T, acc: &mut [T]) {
        self.run::<T, DivOp>(Operand::Splat(scalar), Operand::Output, acc);
    }

    // --------------------------------------------------------
    // internals
    // --------------------------------------------------------

    fn reciprocal<T: Element>(&self, scalar: T) -> Option<T> {
        let enabled = T::RECIPROCAL && self.config.division == DivisionStrategy::Reciprocal;
        enabled
            .then(|| T::ONE / scalar)
            .filter(|inverse| inverse.is_finite())
    }

    fn binary<T: Element, Op: BinaryOp>(&self, a: &[T], b: &[T], result: &mut [T]) -> ArithResult<()> {
        ensure_same_length(a.len(), b.len())?;
        ensure_same_length(a.len(), result.len())?;
        self.run::<T, Op>(Operand::Slice(a), Operand::Slice(b), result);
        Ok(())
    }

    fn broadcast<T: Element, Op: BinaryOp>(&self, a: &[T], scalar: T, result: &mut [T]) -> ArithResult<()> {
        ensure_same_length(a.len(), result.len())?;
        self.run::<T, Op>(Operand::Slice(a), Operand::Splat(scalar), result);
        Ok(())
    }

    fn binary_assign<T: Element, Op: BinaryOp>(&self, acc: &mut [T], b: &[T]) -> ArithResult<()> {
        ensure_same_length(acc.len(), b.len())?;
        self.run::<T, Op>(Operand::Output, Operand::Slice(b), acc);
        Ok(())
    }

    /// The two-phase loop. Operand lengths must already match `out`.
    fn run<T: Element, Op: BinaryOp>(&self, lhs: Operand<'_, T>, rhs: Operand<'_, T>, out: &mut [T]) {
        let len = out.len();
        let width = self.lane_width::<T>();
        let mut processed = 0;

        if width > 1 {
            let chunks = len / width;
            for chunk in 0..chunks {
                let offset = chunk * width;
                let x = lhs.register(out, offset);
                let y = rhs.register(out, offset);
                Op::lanes::<T>(x, y).store(&mut out[offset..offset + width]);
            }
            processed = chunks * width;
        }

        for i in processed..len {
            let x = lhs.element(out, i);
            let y = rhs.element(out, i);
            out[i] = Op::scalar(x, y);
        }

        tracing::trace!(op = Op::NAME, len, width, vectorized = processed, "array kernel");
    }
}

// ============================================================
// Default-kernel entry points
// ============================================================

/// `result[i] = a[i] + b[i]`
pub fn add<T: Element>(a: &[T], b: &[T], result: &mut [T]) -> ArithResult<()> {
    Kernel::default().add(a, b, result)
}

/// `result[i] = a[i] - b[i]`
pub fn sub<T: Element>(a: &[T], b: &[T], result: &mut [T]) -> ArithResult<()> {
    Kernel::default().sub(a, b, result)
}

/// `result[i] = a[i] * b[i]`
pub fn mul<T: Element>(a: &[T], b: &[T], result: &mut [T]) -> ArithResult<()> {
    Kernel::default().mul(a, b, result)
}

/// `result[i] = a[i] / b[i]`
pub fn div<T: Element>(a: &[T], b: &[T], result: &mut [T]) -> ArithResult<()> {
    Kernel::default().div(a, b, result)
}

/// `result[i] = a[i] + scalar`
pub fn add_scalar<T: Element>(a: &[T], scalar: T, result: &mut [T]) -> ArithResult<()> {
    Kernel::default().add_scalar(a, scalar, result)
}

/// `result[i] = a[i] - scalar`
pub fn sub_scalar<T: Element>(a: &[T], scalar: T, result: &mut [T]) -> ArithResult<()> {
    Kernel::default().sub_scalar(a, scalar, result)
}

/// `result[i] = a[i] * scalar`
pub fn mul_scalar<T: Element>(a: &[T], scalar: T, result: &mut [T]) -> ArithResult<()> {
    Kernel::default().mul_scalar(a, scalar, result)
}

/// `result[i] = a[i] / scalar`, via reciprocal multiplication where the
/// element type allows it.
pub fn div_scalar<T: Element>(a: &[T], scalar: T, result: &mut [T]) -> ArithResult<()> {
    Kernel::default().div_scalar(a, scalar, result)
}

/// `result[i] = scalar - a[i]`
pub fn scalar_sub<T: Element>(scalar: T, a: &[T], result: &mut [T]) -> ArithResult<()> {
    Kernel::default().scalar_sub(scalar, a, result)
}

/// `result[i] = scalar / a[i]`
pub fn scalar_div<T: Element>(scalar: T, a: &[T], result: &mut [T]) -> ArithResult<()> {
    Kernel::default().scalar_div(scalar, a, result)
}

/// `acc[i] += b[i]`
pub fn add_assign<T: Element>(acc: &mut [T], b: &[T]) -> ArithResult<()> {
    Kernel::default().add_assign(acc, b)
}

/// `acc[i] -= b[i]`
pub fn sub_assign<T: Element>(acc: &mut [T], b: &[T]) -> ArithResult<()> {
    Kernel::default().sub_assign(acc, b)
}

/// `acc[i] *= b[i]`
pub fn mul_assign<T: Element>(acc: &mut [T], b: &[T]) -> ArithResult<()> {
    Kernel::default().mul_assign(acc, b)
}

/// `acc[i] /= b[i]`
pub fn div_assign<T: Element>(acc: &mut [T], b: &[T]) -> ArithResult<()> {
    Kernel::default().div_assign(acc, b)
}

/// `acc[i] += scalar`
pub fn add_scalar_assign<T: Element>(acc: &mut [T], scalar: T) {
    Kernel::default().add_scalar_assign(acc, scalar);
}

/// `acc[i] -= scalar`
pub fn sub_scalar_assign<T: Element>(acc: &mut [T], scalar: T) {
    Kernel::default().sub_scalar_assign(acc, scalar);
}

/// `acc[i] *= scalar`
pub fn mul_scalar_assign<T: Element>(acc: &mut [T], scalar: T) {
    Kernel::default().mul_scalar_assign(acc, scalar);
}

/// `acc[i] /= scalar`
pub fn div_scalar_assign<T: Element>(acc: &mut [T], scalar: T) {
    Kernel::default().div_scalar_assign(acc, scalar);
}

/// `acc[i] = scalar - acc[i]`
pub fn scalar_sub_assign<T: Element>(scalar: T, acc: &mut [T]) {
    Kernel::default().scalar_sub_assign(scalar, acc);
}

/// `acc[i] = scalar / acc[i]`
pub fn scalar_div_assign<T: Element>(scalar: T, acc: &mut [T]) {
    Kernel::default().scalar_div_assign(scalar, acc);
}
