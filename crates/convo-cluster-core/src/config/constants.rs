//! Centralized numeric constants for the clustering pipeline.
//!
//! Defaults here back both [`ClusteringConfig::default`](super::ClusteringConfig)
//! and the serde defaults of the request types, so a request that omits a
//! field and a config file that omits it resolve to the same value.

/// Default modality weights.
///
/// ```toml
/// [weights]
/// semantic = 0.65
/// attributes = 0.25
/// outcome = 0.10
/// ```
pub mod weights {
    /// Semantic embedding block weight.
    pub const SEMANTIC: f64 = 0.65;

    /// Encoded attribute block weight.
    pub const ATTRIBUTES: f64 = 0.25;

    /// Outcome block weight.
    pub const OUTCOME: f64 = 0.10;
}

/// Default group counts and batch bounds.
pub mod defaults {
    /// Requested number of top-level clusters.
    pub const NUM_HIGH_LEVEL_CLUSTERS: usize = 5;

    /// Requested number of subclusters per top-level cluster.
    pub const NUM_SUBCLUSTERS_PER_CLUSTER: usize = 3;

    /// Smallest batch the `cluster` operation accepts.
    pub const MIN_RECORDS: usize = 2;

    /// Groups smaller than this are reported as a single subcluster.
    pub const MIN_SUBCLUSTER_GROUP: usize = 2;

    /// Subcluster label for groups that are not subdivided.
    pub const UNSPLIT_SUBCLUSTER_LABEL: u32 = 0;
}

/// Numeric tolerances.
pub mod numeric {
    /// Added to block norms before dividing, so all-zero rows stay zero.
    pub const NORM_EPSILON: f64 = 1e-8;

    /// Standard deviations at or below this, measured after dividing the
    /// column by its largest magnitude, are treated as zero variance.
    pub const ZERO_VARIANCE_EPSILON: f64 = 1e-12;
}

/// Outcome label scores.
pub mod outcome {
    /// `satisfied`
    pub const SATISFIED: f64 = 1.0;

    /// `unsatisfied`
    pub const UNSATISFIED: f64 = 0.0;

    /// `unclear`, and any label not recognized.
    pub const UNCLEAR: f64 = 0.5;
}
