//! Top-level unified error type for convo-cluster-core.

use thiserror::Error;

use super::sub_errors::{ConfigError, InputError};

/// Top-level error for the clustering pipeline.
///
/// Callers that front the pipeline with a transport map
/// [`is_input_rejection`](Self::is_input_rejection) to a "bad request" style
/// response and everything else to an internal failure.
#[derive(Debug, Error)]
pub enum ClusteringError {
    /// The request was rejected before any computation.
    #[error("Input rejected: {0}")]
    Input(#[from] InputError),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ClusteringError {
    /// True when the caller sent a request the pipeline refuses to process.
    #[inline]
    pub fn is_input_rejection(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClusteringError>;
