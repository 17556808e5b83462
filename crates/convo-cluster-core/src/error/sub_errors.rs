//! Sub-error types for convo-cluster-core.

use std::fmt;

use thiserror::Error;

/// One of the three signals blended into a composite vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    /// Dense semantic embedding.
    Semantic,
    /// Encoded structured attributes.
    Attributes,
    /// Encoded outcome label.
    Outcome,
}

impl Modality {
    /// Lower-case name as used in request payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Semantic => "semantic",
            Modality::Attributes => "attributes",
            Modality::Outcome => "outcome",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// INPUT ERROR
// ============================================================================

/// Rejections raised before any computation starts.
///
/// No partial result is produced once one of these is returned.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    /// Fewer than two records in the batch.
    #[error("Need at least 2 conversations to cluster, got {count}")]
    TooFewRecords {
        /// Number of records received
        count: usize,
    },

    /// A record carries a zero-length embedding.
    #[error("Conversation '{id}' has an empty semantic embedding")]
    EmptyEmbedding {
        /// Offending record id
        id: String,
    },

    /// Embedding width differs from the first record in the batch.
    #[error("Conversation '{id}' embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Offending record id
        id: String,
        /// Width of the first record's embedding
        expected: usize,
        /// Width of this record's embedding
        actual: usize,
    },

    /// Embedding component is NaN or infinite.
    #[error("Conversation '{id}' embedding has a non-finite value at index {index}")]
    NonFiniteEmbedding {
        /// Offending record id
        id: String,
        /// Position of the first non-finite component
        index: usize,
    },

    /// Record id appears more than once in the batch.
    #[error("Duplicate conversation id '{id}'")]
    DuplicateId {
        /// The repeated id
        id: String,
    },

    /// Weight is NaN or infinite.
    #[error("Weight for {modality} must be finite, got {value}")]
    NonFiniteWeight {
        /// Modality the weight applies to
        modality: Modality,
        /// Rejected value
        value: f64,
    },

    /// Modality blocks disagree on the number of records.
    #[error("{modality} block has {actual} rows, expected {expected}")]
    RowCountMismatch {
        /// Modality whose block is short or long
        modality: Modality,
        /// Number of records in the batch
        expected: usize,
        /// Rows found in the block
        actual: usize,
    },
}

// ============================================================================
// CONFIG ERROR
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        /// Path that was read
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// TOML could not be parsed into the config structure.
    #[error("Failed to parse TOML{location}: {message}")]
    Parse {
        /// `" in '<path>'"` when parsing a file, empty for in-memory strings
        location: String,
        /// Parser message
        message: String,
    },

    /// Config could not be serialized back to TOML.
    #[error("Failed to serialize config to TOML: {0}")]
    Serialize(String),

    /// A value is outside its allowed range.
    #[error("Invalid config value [{section}] {field}: {reason}")]
    Invalid {
        /// TOML section name
        section: &'static str,
        /// Field name within the section
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}
