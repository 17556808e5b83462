//! Response payload for the `cluster` operation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Integer label of a cluster or subcluster.
///
/// Labels are 1-based; subcluster `0` marks a top-level cluster that was too
/// small to subdivide. Serialized as JSON object keys they become strings
/// (`"1"`, `"2"`, ...), ordered numerically.
pub type ClusterLabel = u32;

/// Summary numbers reported alongside the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterStats {
    /// Number of input records.
    pub total_conversations: usize,
    /// Number of top-level clusters.
    pub total_clusters: usize,
    /// `total_conversations / total_clusters`, rounded to 2 decimals.
    pub avg_cluster_size: f64,
}

impl ClusterStats {
    /// Compute stats for a taxonomy with `total_clusters` top-level groups.
    pub fn new(total_conversations: usize, total_clusters: usize) -> Self {
        let avg = if total_clusters > 0 {
            total_conversations as f64 / total_clusters as f64
        } else {
            0.0
        };
        Self {
            total_conversations,
            total_clusters,
            avg_cluster_size: (avg * 100.0).round() / 100.0,
        }
    }
}

/// Result of the `cluster` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterResponse {
    /// Top-level cluster label -> member ids in input order.
    pub high_level_clusters: BTreeMap<ClusterLabel, Vec<String>>,

    /// Top-level label -> subcluster label -> member ids in input order.
    pub subclusters: BTreeMap<ClusterLabel, BTreeMap<ClusterLabel, Vec<String>>>,

    /// Full N x N composite cosine similarity, rows and columns in input order.
    pub similarity_matrix: Vec<Vec<f64>>,

    /// Summary numbers.
    pub cluster_stats: ClusterStats,
}
