//! The `cluster` operation.
//!
//! Validates a batch, then runs encoding → composition → similarity →
//! taxonomy and assembles the response. Every matrix is allocated inside
//! the call and dropped when it returns, so independent requests can run on
//! separate threads without coordination.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::clustering::HierarchicalClusterer;
use crate::composition::VectorComposer;
use crate::config::constants::defaults::MIN_RECORDS;
use crate::config::ClusteringConfig;
use crate::encoding::{AttributeEncoder, AttributeSchema, KeySchema, Outcome};
use crate::error::{InputError, Result};
use crate::similarity::cosine_similarity_matrix;
use crate::taxonomy::TaxonomyBuilder;
use crate::types::{
    Attributes, ClusterRequest, ClusterResponse, ClusterStats, ClusteringParams,
    ConversationRecord, FeatureWeights,
};

/// Runs `cluster` requests against a fixed default configuration.
#[derive(Debug, Clone, Default)]
pub struct ClusteringService {
    config: ClusteringConfig,
}

impl ClusteringService {
    pub fn new(config: ClusteringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Cluster one request. Request weights and params override the config.
    pub fn cluster(&self, request: &ClusterRequest) -> Result<ClusterResponse> {
        cluster(request, &self.config)
    }
}

/// Cluster a request, filling omitted weights and params from `config`.
///
/// # Errors
/// - `ClusteringError::Input` if the batch has fewer than 2 records, an
///   empty/mismatched/non-finite embedding, a duplicate id, or a non-finite
///   weight. No partial result is produced.
///
/// # Example
///
/// ```
/// use convo_cluster_core::{cluster, ClusterRequest, ClusteringConfig, ConversationRecord};
///
/// let request = ClusterRequest::new(vec![
///     ConversationRecord::new("a", vec![1.0, 0.0], "satisfied"),
///     ConversationRecord::new("b", vec![0.9, 0.1], "satisfied"),
///     ConversationRecord::new("c", vec![0.0, 1.0], "unsatisfied"),
/// ]);
///
/// let response = cluster(&request, &ClusteringConfig::default()).unwrap();
/// assert_eq!(response.cluster_stats.total_conversations, 3);
/// assert_eq!(response.similarity_matrix.len(), 3);
/// ```
#[instrument(skip_all, fields(records = request.conversations.len()))]
pub fn cluster(request: &ClusterRequest, config: &ClusteringConfig) -> Result<ClusterResponse> {
    let (weights, params) = request.resolve(config);
    cluster_records(&request.conversations, weights, params)
}

/// Cluster `records` with explicit weights and params.
///
/// # Errors
/// Same as [`cluster`].
pub fn cluster_records(
    records: &[ConversationRecord],
    weights: FeatureWeights,
    params: ClusteringParams,
) -> Result<ClusterResponse> {
    validate_records(records)?;
    weights.validate()?;

    let n = records.len();
    let attributes: Vec<&Attributes> = records.iter().map(|r| &r.attributes).collect();
    let features = AttributeEncoder::new().encode(&attributes);

    let outcomes = encode_outcomes(records);
    let semantic: Vec<Vec<f64>> = records.iter().map(|r| r.semantic_embedding.clone()).collect();

    let composite = VectorComposer::new(weights).compose(&semantic, &features, &outcomes)?;
    let similarity = cosine_similarity_matrix(composite.rows());
    debug!(dim = similarity.dim(), "similarity matrix computed");

    let ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
    let taxonomy = TaxonomyBuilder::new(params).build(&ids, &similarity)?;

    let cluster_stats = ClusterStats::new(n, taxonomy.num_clusters());
    info!(
        records = n,
        requested_clusters = params.num_high_level_clusters,
        effective_k = HierarchicalClusterer::effective_k(n, params.num_high_level_clusters),
        clusters = taxonomy.num_clusters(),
        "clustering complete"
    );

    let (high_level_clusters, subclusters) = taxonomy.into_parts();
    Ok(ClusterResponse {
        high_level_clusters,
        subclusters,
        similarity_matrix: similarity.to_rows(),
        cluster_stats,
    })
}

/// Check the batch-level preconditions of `cluster`.
///
/// Checks run in order: batch size, then per record (in input order) empty
/// embedding, width against the first record, non-finite components, and
/// finally id uniqueness. Returns the shared embedding width.
///
/// # Errors
/// The first violated precondition as an [`InputError`].
pub fn validate_records(records: &[ConversationRecord]) -> std::result::Result<usize, InputError> {
    if records.len() < MIN_RECORDS {
        return Err(InputError::TooFewRecords {
            count: records.len(),
        });
    }

    let expected = records[0].semantic_embedding.len();
    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
    for record in records {
        let width = record.semantic_embedding.len();
        if width == 0 {
            return Err(InputError::EmptyEmbedding {
                id: record.id.clone(),
            });
        }
        if width != expected {
            return Err(InputError::DimensionMismatch {
                id: record.id.clone(),
                expected,
                actual: width,
            });
        }
        if let Some(index) = record.semantic_embedding.iter().position(|x| !x.is_finite()) {
            return Err(InputError::NonFiniteEmbedding {
                id: record.id.clone(),
                index,
            });
        }
        if !seen.insert(record.id.as_str()) {
            return Err(InputError::DuplicateId {
                id: record.id.clone(),
            });
        }
    }

    Ok(expected)
}

fn encode_outcomes(records: &[ConversationRecord]) -> Vec<f64> {
    let mut unknown = 0usize;
    let scores = records
        .iter()
        .map(|r| {
            Outcome::parse(&r.outcome)
                .unwrap_or_else(|| {
                    unknown += 1;
                    Outcome::Unclear
                })
                .score()
        })
        .collect();
    if unknown > 0 {
        warn!(unknown, "unrecognized outcome labels encoded as unclear");
    }
    scores
}

/// Attribute column layout derived for a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureReport {
    /// Number of records inspected.
    pub records: usize,
    /// Column names in encoding order; empty when the filler column is used.
    pub columns: Vec<String>,
    /// True when no attribute column exists and one zero column stands in.
    pub filler: bool,
    /// Per-key schema, sorted by key.
    pub keys: Vec<KeySchema>,
}

/// Describe the attribute columns `cluster` would derive for `records`.
///
/// Does not validate embeddings.
pub fn describe_features(records: &[ConversationRecord]) -> FeatureReport {
    let attributes: Vec<&Attributes> = records.iter().map(|r| &r.attributes).collect();
    let schema = AttributeSchema::infer(&attributes);
    FeatureReport {
        records: records.len(),
        columns: schema.column_names(),
        filler: schema.width() == 0,
        keys: schema.keys().to_vec(),
    }
}
