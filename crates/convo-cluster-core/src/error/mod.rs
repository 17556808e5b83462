//! Error types for convo-cluster-core.
//!
//! - [`ClusteringError`]: Top-level unified error returned by the `cluster` entry point
//! - Sub-error types: [`InputError`], [`ConfigError`]
//!
//! Only input rejections and configuration failures are errors. Everything the
//! pipeline can degrade through (unknown outcome labels, zero-variance columns,
//! all-zero vectors) is handled in place and never surfaces here.
//!
//! # Examples
//!
//! ```rust
//! use convo_cluster_core::error::{ClusteringError, InputError};
//!
//! let err = ClusteringError::from(InputError::TooFewRecords { count: 1 });
//! assert!(err.is_input_rejection());
//! assert_eq!(
//!     err.to_string(),
//!     "Input rejected: Need at least 2 conversations to cluster, got 1"
//! );
//! ```

mod sub_errors;
mod unified;


pub use sub_errors::{ConfigError, InputError, Modality};
pub use unified::{ClusteringError, Result};
