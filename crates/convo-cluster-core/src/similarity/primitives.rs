//! Core dense vector primitives.

use super::error::SimilarityError;

/// Calculate the L2 norm (Euclidean length) of a vector.
///
/// # Example
/// ```
/// use convo_cluster_core::similarity::l2_norm;
///
/// assert!((l2_norm(&[3.0, 4.0]) - 5.0).abs() < 1e-12);
/// ```
#[inline]
pub fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Dot product without validation.
/// Caller must ensure vectors have equal length.
#[inline]
pub(crate) fn dot_product_unchecked(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn check_pair(a: &[f64], b: &[f64]) -> Result<(), SimilarityError> {
    if a.is_empty() || b.is_empty() {
        return Err(SimilarityError::EmptyVector);
    }
    if a.len() != b.len() {
        return Err(SimilarityError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}

/// Calculate the dot product between two dense vectors.
///
/// # Errors
/// - `SimilarityError::EmptyVector` if either vector is empty
/// - `SimilarityError::LengthMismatch` if vectors have different lengths
#[inline]
pub fn dot_product(a: &[f64], b: &[f64]) -> Result<f64, SimilarityError> {
    check_pair(a, b)?;
    Ok(dot_product_unchecked(a, b))
}

/// Calculate cosine similarity between two dense vectors.
///
/// Returns a value clamped to [-1.0, 1.0].
///
/// # Errors
/// - `SimilarityError::EmptyVector` if either vector is empty
/// - `SimilarityError::LengthMismatch` if vectors have different lengths
/// - `SimilarityError::ZeroMagnitude` if either vector has zero norm
///
/// # Example
/// ```
/// use convo_cluster_core::similarity::cosine_similarity;
///
/// let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
/// assert_eq!(sim, 0.0);
/// ```
#[inline]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64, SimilarityError> {
    check_pair(a, b)?;

    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(SimilarityError::ZeroMagnitude);
    }

    let result = dot_product_unchecked(a, b) / (norm_a * norm_b);
    // Clamp to valid range to handle floating point errors
    Ok(result.clamp(-1.0, 1.0))
}
