//! Request payload for the `cluster` operation.

use serde::{Deserialize, Serialize};

use crate::config::constants::{defaults, weights};
use crate::config::ClusteringConfig;
use crate::error::{InputError, Modality};

use super::record::ConversationRecord;

/// Per-modality weights applied after each block is unit-normalized.
///
/// Weights are arbitrary reals; they are not required to sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureWeights {
    /// Weight of the semantic embedding block.
    pub semantic: f64,
    /// Weight of the encoded attribute block.
    pub attributes: f64,
    /// Weight of the outcome block.
    pub outcome: f64,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            semantic: weights::SEMANTIC,
            attributes: weights::ATTRIBUTES,
            outcome: weights::OUTCOME,
        }
    }
}

impl FeatureWeights {
    /// Create a weight triple.
    pub fn new(semantic: f64, attributes: f64, outcome: f64) -> Self {
        Self {
            semantic,
            attributes,
            outcome,
        }
    }

    /// Weight for one modality.
    pub fn get(&self, modality: Modality) -> f64 {
        match modality {
            Modality::Semantic => self.semantic,
            Modality::Attributes => self.attributes,
            Modality::Outcome => self.outcome,
        }
    }

    /// Reject NaN and infinite weights.
    ///
    /// # Errors
    ///
    /// `InputError::NonFiniteWeight` naming the first offending modality.
    pub fn validate(&self) -> Result<(), InputError> {
        for modality in [Modality::Semantic, Modality::Attributes, Modality::Outcome] {
            let value = self.get(modality);
            if !value.is_finite() {
                return Err(InputError::NonFiniteWeight { modality, value });
            }
        }
        Ok(())
    }
}

/// Requested group counts for the two taxonomy levels.
///
/// Both values are upper bounds; they are clipped to `group_size - 1` at each
/// level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringParams {
    /// Requested number of top-level clusters.
    pub num_high_level_clusters: usize,
    /// Requested number of subclusters inside each top-level cluster.
    pub num_subclusters_per_cluster: usize,
}

impl Default for ClusteringParams {
    fn default() -> Self {
        Self {
            num_high_level_clusters: defaults::NUM_HIGH_LEVEL_CLUSTERS,
            num_subclusters_per_cluster: defaults::NUM_SUBCLUSTERS_PER_CLUSTER,
        }
    }
}

impl ClusteringParams {
    /// Create a parameter pair.
    pub fn new(num_high_level_clusters: usize, num_subclusters_per_cluster: usize) -> Self {
        Self {
            num_high_level_clusters,
            num_subclusters_per_cluster,
        }
    }
}

/// Payload of the `cluster` operation.
///
/// `weights` and `clustering_params` are optional on the wire; missing values
/// are filled from a [`ClusteringConfig`] by [`resolve`](Self::resolve).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterRequest {
    /// Records to cluster, in caller order.
    pub conversations: Vec<ConversationRecord>,

    /// Per-modality weights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<FeatureWeights>,

    /// Requested group counts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clustering_params: Option<ClusteringParams>,
}

impl ClusterRequest {
    /// Create a request that uses configured defaults for weights and params.
    pub fn new(conversations: Vec<ConversationRecord>) -> Self {
        Self {
            conversations,
            weights: None,
            clustering_params: None,
        }
    }

    /// Set explicit weights.
    #[must_use]
    pub fn with_weights(mut self, weights: FeatureWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Set explicit group counts.
    #[must_use]
    pub fn with_params(mut self, params: ClusteringParams) -> Self {
        self.clustering_params = Some(params);
        self
    }

    /// Concrete weights and params, request values taking precedence.
    pub fn resolve(&self, config: &ClusteringConfig) -> (FeatureWeights, ClusteringParams) {
        (
            self.weights.unwrap_or(config.weights),
            self.clustering_params.unwrap_or(config.clustering),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let w = FeatureWeights::default();
        assert_eq!((w.semantic, w.attributes, w.outcome), (0.65, 0.25, 0.10));

        let p = ClusteringParams::default();
        assert_eq!(p.num_high_level_clusters, 5);
        assert_eq!(p.num_subclusters_per_cluster, 3);

        println!("[PASS] Default weights 0.65/0.25/0.10 and params 5/3");
    }

    #[test]
    fn test_partial_weights_fill_from_defaults() {
        let w: FeatureWeights = serde_json::from_str(r#"{"semantic": 1.0}"#).expect("valid");
        assert_eq!(w.semantic, 1.0);
        assert_eq!(w.attributes, 0.25);
        assert_eq!(w.outcome, 0.10);

        println!("[PASS] Missing weight fields take defaults");
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let w = FeatureWeights::new(0.5, f64::INFINITY, 0.1);
        match w.validate() {
            Err(InputError::NonFiniteWeight { modality, .. }) => {
                assert_eq!(modality, Modality::Attributes)
            }
            other => panic!("expected NonFiniteWeight, got {other:?}"),
        }

        assert!(FeatureWeights::new(-3.0, 0.0, 10.0).validate().is_ok());

        println!("[PASS] Only non-finite weights are rejected");
    }

    #[test]
    fn test_resolve_prefers_request_values() {
        let mut config = ClusteringConfig::default();
        config.weights = FeatureWeights::new(0.2, 0.3, 0.5);
        config.clustering = ClusteringParams::new(7, 2);

        let bare = ClusterRequest::new(Vec::new());
        assert_eq!(bare.resolve(&config), (config.weights, config.clustering));

        let explicit = ClusterRequest::new(Vec::new())
            .with_weights(FeatureWeights::new(1.0, 0.0, 0.0))
            .with_params(ClusteringParams::new(2, 1));
        let (w, p) = explicit.resolve(&config);
        assert_eq!(w, FeatureWeights::new(1.0, 0.0, 0.0));
        assert_eq!(p, ClusteringParams::new(2, 1));

        println!("[PASS] Request values override config defaults");
    }
}
