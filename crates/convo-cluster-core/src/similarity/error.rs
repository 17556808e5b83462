//! Errors from checked vector and matrix helpers.

use thiserror::Error;

/// Failure of a checked similarity helper.
///
/// The batch pipeline never returns these: it validates records up front and
/// uses the unchecked paths. They surface only through the public helpers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimilarityError {
    /// Two vectors of different length.
    #[error("Vector length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first vector
        left: usize,
        /// Length of the second vector
        right: usize,
    },

    /// A zero-length vector.
    #[error("Cannot compare an empty vector")]
    EmptyVector,

    /// A vector whose norm is zero, for which cosine is undefined.
    #[error("Cosine undefined for a zero-magnitude vector")]
    ZeroMagnitude,

    /// Row `row` of a square matrix has the wrong length.
    #[error("Matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        /// Offending row index
        row: usize,
        /// Its length
        len: usize,
        /// Number of rows
        expected: usize,
    },
}
