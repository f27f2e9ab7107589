//! Error types for array arithmetic.

use thiserror::Error;

/// Errors raised by the array kernels and the vector wrapper.
///
/// Every error is reported before any element of an output buffer is
/// written, so a failed call leaves its destination untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ArithError {
    /// Two operands that must have identical length do not.
    #[error("all arguments must have the same length: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Length of the left operand.
        expected: usize,
        /// Length of the offending operand.
        actual: usize,
    },

    /// A vector was constructed from an absent buffer.
    #[error("vector buffer must not be absent")]
    NullBuffer,
}

/// Result type for array arithmetic.
pub type ArithResult<T> = Result<T, ArithError>;

/// Check that `actual` matches `expected`, logging the rejection.
#[inline]
pub(crate) fn ensure_same_length(expected: usize, actual: usize) -> ArithResult<()> {
    if expected == actual {
        return Ok(());
    }
    tracing::debug!(expected, actual, "rejecting operands with mismatched lengths");
    Err(ArithError::LengthMismatch { expected, actual })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_length_ok() {
        assert_eq!(ensure_same_length(4, 4), Ok(()));
        assert_eq!(ensure_same_length(0, 0), Ok(()));
    }

    #[test]
    fn test_mismatch_reports_both_lengths() {
        let err = ensure_same_length(3, 4).unwrap_err();
        assert_eq!(
            err,
            ArithError::LengthMismatch {
                expected: 3,
                actual: 4
            }
        );
        assert_eq!(
            err.to_string(),
            "all arguments must have the same length: expected 3, got 4"
        );
    }
}
