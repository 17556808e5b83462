//! Root configuration for the clustering pipeline.
//!
//! `ClusteringConfig` supplies the weights and group counts used when a
//! request leaves them out. It is loaded once by the caller and passed in;
//! the core holds no global configuration.
//!
//! # TOML Structure
//!
//! ```toml
//! [weights]
//! semantic = 0.65
//! attributes = 0.25
//! outcome = 0.10
//!
//! [clustering]
//! num_high_level_clusters = 5
//! num_subclusters_per_cluster = 3
//! ```
//!
//! # Environment Overrides
//!
//! | Variable | Config Path | Type |
//! |----------|-------------|------|
//! | `CONVO_CLUSTER_WEIGHT_SEMANTIC` | `weights.semantic` | f64 |
//! | `CONVO_CLUSTER_WEIGHT_ATTRIBUTES` | `weights.attributes` | f64 |
//! | `CONVO_CLUSTER_WEIGHT_OUTCOME` | `weights.outcome` | f64 |
//! | `CONVO_CLUSTER_NUM_HIGH_LEVEL_CLUSTERS` | `clustering.num_high_level_clusters` | usize |
//! | `CONVO_CLUSTER_NUM_SUBCLUSTERS_PER_CLUSTER` | `clustering.num_subclusters_per_cluster` | usize |

pub mod constants;

#[cfg(test)]
mod tests;

use std::env;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, InputError};
use crate::types::{ClusteringParams, FeatureWeights};

/// Prefix shared by all environment overrides.
pub const ENV_PREFIX: &str = "CONVO_CLUSTER_";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Default modality weights.
    #[serde(default)]
    pub weights: FeatureWeights,

    /// Default group counts.
    #[serde(default)]
    pub clustering: ClusteringParams,
}

impl ClusteringConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// - `ConfigError::FileRead` if the file cannot be read
    /// - `ConfigError::Parse` if TOML parsing fails
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            location: format!(" in '{}'", path.display()),
            message: e.to_string(),
        })
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// - `ConfigError::Parse` if TOML parsing fails
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse {
            location: String::new(),
            message: e.to_string(),
        })
    }

    /// Serialize configuration to a TOML string.
    ///
    /// # Errors
    /// - `ConfigError::Serialize` if serialization fails
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Validate all values.
    ///
    /// Weights may be any finite real. Group counts below one are accepted
    /// and treated as one at clustering time.
    ///
    /// # Errors
    /// - `ConfigError::Invalid` naming the first non-finite weight
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate().map_err(|e| match e {
            InputError::NonFiniteWeight { modality, .. } => ConfigError::Invalid {
                section: "weights",
                field: modality.as_str(),
                reason: "must be a finite number".to_string(),
            },
            other => ConfigError::Invalid {
                section: "weights",
                field: "weights",
                reason: other.to_string(),
            },
        })
    }

    /// Apply `CONVO_CLUSTER_*` environment overrides.
    ///
    /// Unparseable values are ignored and the existing value is kept.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// `lookup` receives the full variable name, prefix included.
    #[must_use]
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |suffix: &str| lookup(&format!("{ENV_PREFIX}{suffix}"));

        override_parsed(&mut self.weights.semantic, read("WEIGHT_SEMANTIC"));
        override_parsed(&mut self.weights.attributes, read("WEIGHT_ATTRIBUTES"));
        override_parsed(&mut self.weights.outcome, read("WEIGHT_OUTCOME"));
        override_parsed(
            &mut self.clustering.num_high_level_clusters,
            read("NUM_HIGH_LEVEL_CLUSTERS"),
        );
        override_parsed(
            &mut self.clustering.num_subclusters_per_cluster,
            read("NUM_SUBCLUSTERS_PER_CLUSTER"),
        );

        self
    }
}

fn override_parsed<T: FromStr>(slot: &mut T, raw: Option<String>) {
    if let Some(value) = raw.and_then(|v| v.trim().parse::<T>().ok()) {
        *slot = value;
    }
}
