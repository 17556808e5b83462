//! Conversation Clustering Core Library
//!
//! Groups conversations into a two-level taxonomy (top-level clusters, each
//! split into subclusters) from a weighted blend of three signals per record:
//! a dense semantic embedding, structured attributes and an outcome label.
//!
//! # Architecture
//!
//! ```text
//! attributes ──► AttributeEncoder ─┐
//! outcome    ──► encode_outcome ───┼─► VectorComposer ─► cosine_similarity_matrix
//! embedding  ──────────────────────┘                            │
//!                                                               ▼
//!                        TaxonomyBuilder ◄── HierarchicalClusterer (Ward + maxclust)
//! ```
//!
//! - [`encoding`]: attribute and outcome encoders
//! - [`composition`]: per-block normalization and weighting
//! - [`similarity`]: pairwise cosine similarity and distance matrices
//! - [`clustering`]: Ward linkage and flat cuts, reusable on any subset
//! - [`taxonomy`]: top-level pass plus one subclustering pass per group
//! - [`service`]: the `cluster` entry point
//!
//! The crate holds no global state and installs no tracing subscriber.
//!
//! # Example
//!
//! ```
//! use convo_cluster_core::{cluster, ClusterRequest, ClusteringConfig, ClusteringParams, ConversationRecord};
//!
//! let request = ClusterRequest::new(vec![
//!     ConversationRecord::new("c1", vec![1.0, 0.0, 0.0], "satisfied").with_attribute("tier", "gold"),
//!     ConversationRecord::new("c2", vec![0.9, 0.1, 0.0], "satisfied").with_attribute("tier", "gold"),
//!     ConversationRecord::new("c3", vec![0.0, 0.0, 1.0], "unsatisfied").with_attribute("tier", "free"),
//! ])
//! .with_params(ClusteringParams::new(2, 2));
//!
//! let response = cluster(&request, &ClusteringConfig::default()).unwrap();
//! assert_eq!(response.cluster_stats.total_clusters, 2);
//! ```

pub mod clustering;
pub mod composition;
pub mod config;
pub mod encoding;
pub mod error;
pub mod service;
pub mod similarity;
pub mod taxonomy;
pub mod types;

// Re-exports for convenience
pub use config::ClusteringConfig;
pub use error::{ClusteringError, ConfigError, InputError, Result};
pub use service::{cluster, cluster_records, describe_features, ClusteringService, FeatureReport};
pub use types::{
    AttributeValue, Attributes, ClusterLabel, ClusterRequest, ClusterResponse, ClusterStats,
    ClusteringParams, ConversationRecord, FeatureWeights,
};
