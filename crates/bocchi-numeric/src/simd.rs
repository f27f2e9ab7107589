//! SIMD register types and operations
//!
//! Provides fixed-width register types with platform-specific implementations.
//! The array kernels are written once against the [`Lanes`] trait and
//! instantiated per element type.
//!
//! # Register Types
//!
//! - `F32x8` - 8 x f32 (256-bit: AVX, 2 x SSE, or 2 x NEON)
//! - `F64x4` - 4 x f64 (256-bit: AVX, 2 x SSE2, or 2 x NEON)
//! - `Single<T>` - 1 x T, for types without hardware vector support
//!
//! # Dispatch
//!
//! On x86_64 the widest available instruction set is detected once per
//! process and reused for every operation. NEON is part of the aarch64
//! baseline and needs no detection. Other targets, and builds without the
//! `simd` feature, use a portable array implementation with identical
//! results.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use std::sync::OnceLock;

// ============================================================
// Capability detection
// ============================================================

/// Instruction-set tier used for the 256-bit register types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SimdTier {
    /// 256-bit AVX (x86_64).
    Avx,
    /// Pairs of 128-bit SSE/SSE2 operations (x86_64 baseline).
    Sse2,
    /// Pairs of 128-bit NEON operations (aarch64 baseline).
    Neon,
    /// Plain array loops.
    Portable,
}

impl SimdTier {
    /// Short lowercase name of the tier.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Avx => "avx",
            Self::Sse2 => "sse2",
            Self::Neon => "neon",
            Self::Portable => "portable",
        }
    }
}

impl fmt::Display for SimdTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static DETECTED_TIER: OnceLock<SimdTier> = OnceLock::new();

/// The SIMD tier the register types dispatch to on this machine.
///
/// Detection runs once; later calls return the cached answer.
pub fn detected_tier() -> SimdTier {
    *DETECTED_TIER.get_or_init(|| {
        let tier = detect_tier();
        tracing::debug!(tier = %tier, "detected SIMD support");
        tier
    })
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
fn detect_tier() -> SimdTier {
    if is_x86_feature_detected!("avx") {
        SimdTier::Avx
    } else {
        SimdTier::Sse2
    }
}

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
fn detect_tier() -> SimdTier {
    SimdTier::Neon
}

#[cfg(not(all(feature = "simd", any(target_arch = "x86_64", target_arch = "aarch64"))))]
fn detect_tier() -> SimdTier {
    SimdTier::Portable
}

// ============================================================
// Register abstraction
// ============================================================

/// A hardware vector register holding `WIDTH` elements of `T`.
pub trait Lanes<T: Copy>: Copy {
    /// Number of elements in one register.
    const WIDTH: usize;

    /// Load `WIDTH` elements from the front of `src`.
    ///
    /// Panics if `src` holds fewer than `WIDTH` elements.
    fn load(src: &[T]) -> Self;

    /// Broadcast a single value into every lane.
    fn splat(value: T) -> Self;

    /// Store all lanes into the front of `dst`.
    ///
    /// Panics if `dst` holds fewer than `WIDTH` elements.
    fn store(self, dst: &mut [T]);

    /// Lane-wise addition.
    fn add(self, other: Self) -> Self;

    /// Lane-wise subtraction.
    fn sub(self, other: Self) -> Self;

    /// Lane-wise multiplication.
    fn mul(self, other: Self) -> Self;

    /// Lane-wise division.
    fn div(self, other: Self) -> Self;
}

// ============================================================
// Backends
// ============================================================

/// Plain array loops; the reference every other backend must match.
mod portable {
    macro_rules! portable_binary {
        ($name:ident, $ty:ty, $n:literal, $op:tt) => {
            #[inline]
            #[allow(dead_code)]
            pub(super) fn $name(a: [$ty; $n], b: [$ty; $n]) -> [$ty; $n] {
                std::array::from_fn(|i| a[i] $op b[i])
            }
        };
    }

    portable_binary!(add_f32x8, f32, 8, +);
    portable_binary!(sub_f32x8, f32, 8, -);
    portable_binary!(mul_f32x8, f32, 8, *);
    portable_binary!(div_f32x8, f32, 8, /);

    portable_binary!(add_f64x4, f64, 4, +);
    portable_binary!(sub_f64x4, f64, 4, -);
    portable_binary!(mul_f64x4, f64, 4, *);
    portable_binary!(div_f64x4, f64, 4, /);
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
mod x86 {
    use super::{detected_tier, SimdTier};
    use std::arch::x86_64::*;

    macro_rules! x86_binary {
        (
            $name:ident, $halves:ident, $ty:ty, $n:literal, $half:literal,
            avx($load256:ident, $store256:ident, $op256:ident),
            sse($load128:ident, $store128:ident, $op128:ident)
        ) => {
            /// Two 128-bit operations, one per half of the register.
            #[inline]
            pub(super) fn $halves(a: [$ty; $n], b: [$ty; $n]) -> [$ty; $n] {
                let mut out = [0.0; $n];
                // SAFETY: SSE and SSE2 are part of the x86_64 baseline.
                // Both halves stay within the arrays.
                unsafe {
                    for off in [0, $half] {
                        let r = $op128(
                            $load128(a.as_ptr().add(off)),
                            $load128(b.as_ptr().add(off)),
                        );
                        $store128(out.as_mut_ptr().add(off), r);
                    }
                }
                out
            }

            #[inline]
            pub(super) fn $name(a: [$ty; $n], b: [$ty; $n]) -> [$ty; $n] {
                if detected_tier() != SimdTier::Avx {
                    return $halves(a, b);
                }
                let mut out = [0.0; $n];
                // SAFETY: AVX support was verified at run time. The
                // unaligned load/store touch exactly one register width
                // of each array.
                unsafe {
                    let r = $op256($load256(a.as_ptr()), $load256(b.as_ptr()));
                    $store256(out.as_mut_ptr(), r);
                }
                out
            }
        };
    }

    x86_binary!(add_f32x8, add_f32x8_halves, f32, 8, 4,
        avx(_mm256_loadu_ps, _mm256_storeu_ps, _mm256_add_ps),
        sse(_mm_loadu_ps, _mm_storeu_ps, _mm_add_ps));
    x86_binary!(sub_f32x8, sub_f32x8_halves, f32, 8, 4,
        avx(_mm256_loadu_ps, _mm256_storeu_ps, _mm256_sub_ps),
        sse(_mm_loadu_ps, _mm_storeu_ps, _mm_sub_ps));
    x86_binary!(mul_f32x8, mul_f32x8_halves, f32, 8, 4,
        avx(_mm256_loadu_ps, _mm256_storeu_ps, _mm256_mul_ps),
        sse(_mm_loadu_ps, _mm_storeu_ps, _mm_mul_ps));
    x86_binary!(div_f32x8, div_f32x8_halves, f32, 8, 4,
        avx(_mm256_loadu_ps, _mm256_storeu_ps, _mm256_div_ps),
        sse(_mm_loadu_ps, _mm_storeu_ps, _mm_div_ps));

    x86_binary!(add_f64x4, add_f64x4_halves, f64, 4, 2,
        avx(_mm256_loadu_pd, _mm256_storeu_pd, _mm256_add_pd),
        sse(_mm_loadu_pd, _mm_storeu_pd, _mm_add_pd));
    x86_binary!(sub_f64x4, sub_f64x4_halves, f64, 4, 2,
        avx(_mm256_loadu_pd, _mm256_storeu_pd, _mm256_sub_pd),
        sse(_mm_loadu_pd, _mm_storeu_pd, _mm_sub_pd));
    x86_binary!(mul_f64x4, mul_f64x4_halves, f64, 4, 2,
        avx(_mm256_loadu_pd, _mm256_storeu_pd, _mm256_mul_pd),
        sse(_mm_loadu_pd, _mm_storeu_pd, _mm_mul_pd));
    x86_binary!(div_f64x4, div_f64x4_halves, f64, 4, 2,
        avx(_mm256_loadu_pd, _mm256_storeu_pd, _mm256_div_pd),
        sse(_mm_loadu_pd, _mm_storeu_pd, _mm_div_pd));
}

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
mod neon {
    use std::arch::aarch64::*;

    macro_rules! neon_binary {
        ($name:ident, $ty:ty, $n:literal, $half:literal, $load:ident, $store:ident, $op:ident) => {
            #[inline]
            pub(super) fn $name(a: [$ty; $n], b: [$ty; $n]) -> [$ty; $n] {
                let mut out = [0.0; $n];
                // SAFETY: NEON is part of the aarch64 baseline. Both
                // 128-bit halves stay within the arrays.
                unsafe {
                    for off in [0, $half] {
                        let r = $op($load(a.as_ptr().add(off)), $load(b.as_ptr().add(off)));
                        $store(out.as_mut_ptr().add(off), r);
                    }
                }
                out
            }
        };
    }

    neon_binary!(add_f32x8, f32, 8, 4, vld1q_f32, vst1q_f32, vaddq_f32);
    neon_binary!(sub_f32x8, f32, 8, 4, vld1q_f32, vst1q_f32, vsubq_f32);
    neon_binary!(mul_f32x8, f32, 8, 4, vld1q_f32, vst1q_f32, vmulq_f32);
    neon_binary!(div_f32x8, f32, 8, 4, vld1q_f32, vst1q_f32, vdivq_f32);

    neon_binary!(add_f64x4, f64, 4, 2, vld1q_f64, vst1q_f64, vaddq_f64);
    neon_binary!(sub_f64x4, f64, 4, 2, vld1q_f64, vst1q_f64, vsubq_f64);
    neon_binary!(mul_f64x4, f64, 4, 2, vld1q_f64, vst1q_f64, vmulq_f64);
    neon_binary!(div_f64x4, f64, 4, 2, vld1q_f64, vst1q_f64, vdivq_f64);
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
use x86 as backend;

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
use neon as backend;

#[cfg(not(all(feature = "simd", any(target_arch = "x86_64", target_arch = "aarch64"))))]
use portable as backend;

// ============================================================
// Register types
// ============================================================

macro_rules! float_register {
    (
        $(#[$meta:meta])*
        $name:ident, $ty:ty, $n:literal, $align:literal,
        $add:ident, $sub:ident, $mul:ident, $div:ident
    ) => {
        $(#[$meta])*
        #[repr(C, align($align))]
        #[derive(Clone, Copy, Debug, PartialEq)]
        pub struct $name {
            data: [$ty; $n],
        }

        impl $name {
            /// Create a register from its lanes.
            #[inline]
            pub const fn from_array(data: [$ty; $n]) -> Self {
                Self { data }
            }

            /// Get element at index
            #[inline]
            pub fn get(&self, idx: usize) -> $ty {
                self.data[idx]
            }

            /// Copy the lanes out as an array.
            #[inline]
            pub const fn to_array(self) -> [$ty; $n] {
                self.data
            }
        }

        impl Lanes<$ty> for $name {
            const WIDTH: usize = $n;

            #[inline]
            fn load(src: &[$ty]) -> Self {
                let mut data = [0.0; $n];
                data.copy_from_slice(&src[..$n]);
                Self { data }
            }

            #[inline]
            fn splat(value: $ty) -> Self {
                Self { data: [value; $n] }
            }

            #[inline]
            fn store(self, dst: &mut [$ty]) {
                dst[..$n].copy_from_slice(&self.data);
            }

            #[inline]
            fn add(self, other: Self) -> Self {
                Self { data: backend::$add(self.data, other.data) }
            }

            #[inline]
            fn sub(self, other: Self) -> Self {
                Self { data: backend::$sub(self.data, other.data) }
            }

            #[inline]
            fn mul(self, other: Self) -> Self {
                Self { data: backend::$mul(self.data, other.data) }
            }

            #[inline]
            fn div(self, other: Self) -> Self {
                Self { data: backend::$div(self.data, other.data) }
            }
        }
    };
}

float_register!(
    /// 8 x f32 SIMD register (256-bit)
    F32x8, f32, 8, 32,
    add_f32x8, sub_f32x8, mul_f32x8, div_f32x8
);

float_register!(
    /// 4 x f64 SIMD register (256-bit)
    F64x4, f64, 4, 32,
    add_f64x4, sub_f64x4, mul_f64x4, div_f64x4
);

/// A one-lane "register" for element types with no hardware vector form.
///
/// The kernels never enter their vectorized phase for width-1 registers;
/// the type exists so every element type has a register shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Single<T>(pub T);

impl<T> Lanes<T> for Single<T>
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<Output = T> + Div<Output = T>,
{
    const WIDTH: usize = 1;

    #[inline]
    fn load(src: &[T]) -> Self {
        Single(src[0])
    }

    #[inline]
    fn splat(value: T) -> Self {
        Single(value)
    }

    #[inline]
    fn store(self, dst: &mut [T]) {
        dst[0] = self.0;
    }

    #[inline]
    fn add(self, other: Self) -> Self {
        Single(self.0 + other.0)
    }

    #[inline]
    fn sub(self, other: Self) -> Self {
        Single(self.0 - other.0)
    }

    #[inline]
    fn mul(self, other: Self) -> Self {
        Single(self.0 * other.0)
    }

    #[inline]
    fn div(self, other: Self) -> Self {
        Single(self.0 / other.0)
    }
}
