//! Kernel configuration.

use serde::{Deserialize, Serialize};

/// How division by a broadcast scalar is carried out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivisionStrategy {
    /// Compute `inv = ONE / scalar` once and multiply every element by it.
    ///
    /// Floating-point results may differ from direct division in the last
    /// few ULPs. When `ONE / scalar` overflows to infinity or is NaN the
    /// kernel divides directly for that call. Element types whose
    /// reciprocal is not faithful (integers) ignore this setting and divide.
    #[default]
    Reciprocal,
    /// Divide every element by the scalar.
    Exact,
}

/// Configuration for the array kernels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Process the chunk-aligned prefix with SIMD registers.
    ///
    /// When false every element goes through the scalar loop.
    pub vectorize: bool,
    /// Strategy for `x / scalar`.
    pub division: DivisionStrategy,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            vectorize: true,
            division: DivisionStrategy::Reciprocal,
        }
    }
}

impl KernelConfig {
    /// Configuration that never enters the vectorized phase.
    #[must_use]
    pub fn scalar() -> Self {
        Self {
            vectorize: false,
            ..Self::default()
        }
    }

    /// Set whether the SIMD prefix is used.
    #[must_use]
    pub fn with_vectorize(mut self, vectorize: bool) -> Self {
        self.vectorize = vectorize;
        self
    }

    /// Set the scalar division strategy.
    #[must_use]
    pub fn with_division(mut self, division: DivisionStrategy) -> Self {
        self.division = division;
        self
    }
}
