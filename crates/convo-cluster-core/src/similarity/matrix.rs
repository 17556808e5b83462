//! Square similarity and distance matrices.

use super::error::SimilarityError;
use super::primitives::{dot_product_unchecked, l2_norm};

/// Dense row-major N x N matrix of `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    n: usize,
    values: Vec<f64>,
}

impl SquareMatrix {
    /// Build an `n x n` matrix from a generator.
    pub fn from_fn<F>(n: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut values = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                values.push(f(i, j));
            }
        }
        Self { n, values }
    }

    /// Build from nested rows.
    ///
    /// # Errors
    /// - `SimilarityError::NotSquare` if any row length differs from the
    ///   number of rows
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, SimilarityError> {
        let n = rows.len();
        let mut values = Vec::with_capacity(n * n);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(SimilarityError::NotSquare {
                    row: index,
                    len: row.len(),
                    expected: n,
                });
            }
            values.extend(row);
        }
        Ok(Self { n, values })
    }

    /// Side length N.
    #[inline]
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Entry at row `i`, column `j`.
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    /// Copy into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.n).map(|i| self.row(i).to_vec()).collect()
    }

    /// Submatrix over `indices`, in the given order.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self::from_fn(indices.len(), |a, b| self.get(indices[a], indices[b]))
    }

    /// True if `|m[i][j] - m[j][i]| <= tolerance` everywhere.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tolerance))
    }
}

/// Pairwise cosine similarity, values in [-1, 1], diagonal 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix(SquareMatrix);

impl SimilarityMatrix {
    /// Side length N.
    #[inline]
    pub fn dim(&self) -> usize {
        self.0.dim()
    }

    /// Similarity between records `i` and `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.0.get(i, j)
    }

    /// Underlying storage.
    pub fn as_square(&self) -> &SquareMatrix {
        &self.0
    }

    /// Nested rows in input order.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.0.to_rows()
    }

    /// `d(i, j) = 1 - sim(i, j)`, in [0, 2].
    pub fn to_distance(&self) -> DistanceMatrix {
        DistanceMatrix(SquareMatrix::from_fn(self.dim(), |i, j| 1.0 - self.get(i, j)))
    }
}

/// Pairwise dissimilarity consumed by the hierarchical clusterer.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix(SquareMatrix);

impl DistanceMatrix {
    /// Build from nested rows.
    ///
    /// # Errors
    /// - `SimilarityError::NotSquare` if the rows are not square
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, SimilarityError> {
        SquareMatrix::from_rows(rows).map(Self)
    }

    /// Side length M.
    #[inline]
    pub fn dim(&self) -> usize {
        self.0.dim()
    }

    /// Distance between items `i` and `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.0.get(i, j)
    }

    /// Distance submatrix restricted to `indices`.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self(self.0.select(indices))
    }

    /// Underlying storage.
    pub fn as_square(&self) -> &SquareMatrix {
        &self.0
    }
}

/// Full pairwise cosine similarity of `vectors`.
///
/// `sim(i, j) = dot(v_i, v_j) / (|v_i| |v_j|)`, clamped to [-1, 1]. A
/// zero-magnitude vector has similarity 0.0 to every other vector and 1.0
/// to itself. All vectors are expected to share one width.
pub fn cosine_similarity_matrix(vectors: &[Vec<f64>]) -> SimilarityMatrix {
    let n = vectors.len();
    let norms: Vec<f64> = vectors.iter().map(|v| l2_norm(v)).collect();

    let mut values = vec![0.0; n * n];
    for i in 0..n {
        values[i * n + i] = 1.0;
        for j in (i + 1)..n {
            let denom = norms[i] * norms[j];
            let sim = if denom > 0.0 {
                (dot_product_unchecked(&vectors[i], &vectors[j]) / denom).clamp(-1.0, 1.0)
            } else {
                0.0
            };
            values[i * n + j] = sim;
            values[j * n + i] = sim;
        }
    }

    SimilarityMatrix(SquareMatrix { n, values })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_matrix_symmetric_unit_diagonal() {
        let vectors = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.5, 0.5, 0.0],
            vec![-1.0, 0.2, 0.3],
            vec![0.0, 0.0, 2.0],
        ];

        let sim = cosine_similarity_matrix(&vectors);
        assert_eq!(sim.dim(), 4);
        assert!(sim.as_square().is_symmetric(0.0));
        for i in 0..4 {
            assert!((sim.get(i, i) - 1.0).abs() < 1e-6);
            for j in 0..4 {
                assert!((-1.0..=1.0).contains(&sim.get(i, j)));
            }
        }
        assert!((sim.get(0, 1) - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        assert_eq!(sim.get(0, 3), 0.0);

        println!("[PASS] Similarity matrix symmetric with unit diagonal");
    }

    #[test]
    fn test_zero_vector_similarity() {
        let vectors = vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![0.0, 0.0]];
        let sim = cosine_similarity_matrix(&vectors);

        assert_eq!(sim.get(0, 0), 1.0);
        assert_eq!(sim.get(0, 1), 0.0);
        assert_eq!(sim.get(0, 2), 0.0);

        println!("[PASS] Zero vectors: 0.0 off-diagonal, 1.0 on diagonal");
    }

    #[test]
    fn test_distance_and_select() {
        let vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![-1.0, 0.0]];
        let dist = cosine_similarity_matrix(&vectors).to_distance();

        assert!(dist.get(0, 0).abs() < 1e-12);
        assert!((dist.get(0, 1) - 1.0).abs() < 1e-12);
        assert!((dist.get(0, 2) - 2.0).abs() < 1e-12);

        let sub = dist.select(&[2, 0]);
        assert_eq!(sub.dim(), 2);
        assert_eq!(sub.get(0, 1), dist.get(2, 0));
        assert_eq!(sub.get(1, 0), dist.get(0, 2));

        println!("[PASS] Distance transform and submatrix selection");
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).expect_err("ragged");
        assert_eq!(
            err,
            SimilarityError::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            }
        );
        println!("[PASS] from_rows rejects non-square input");
    }
}
