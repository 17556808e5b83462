//! Cosine similarity over composite vectors.
//!
//! - [`primitives`]: checked dense-vector helpers (`l2_norm`, `dot_product`,
//!   `cosine_similarity`)
//! - [`SquareMatrix`], [`SimilarityMatrix`], [`DistanceMatrix`]: N x N storage
//! - [`cosine_similarity_matrix`]: full pairwise cosine similarity

mod error;
mod matrix;
pub mod primitives;

pub use error::SimilarityError;
pub use matrix::{cosine_similarity_matrix, DistanceMatrix, SimilarityMatrix, SquareMatrix};
pub use primitives::{cosine_similarity, dot_product, l2_norm};
