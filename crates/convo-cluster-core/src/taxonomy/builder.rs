use std::collections::BTreeMap;

use tracing::debug;

use crate::clustering::HierarchicalClusterer;
use crate::config::constants::defaults::{MIN_SUBCLUSTER_GROUP, UNSPLIT_SUBCLUSTER_LABEL};
use crate::error::{InputError, Modality};
use crate::similarity::SimilarityMatrix;
use crate::types::{ClusterLabel, ClusteringParams};

/// Assembled two-level grouping of record ids.
///
/// Member lists keep input order. Every id appears in exactly one top-level
/// cluster and exactly one subcluster of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Taxonomy {
    high_level: BTreeMap<ClusterLabel, Vec<String>>,
    subclusters: BTreeMap<ClusterLabel, BTreeMap<ClusterLabel, Vec<String>>>,
}

impl Taxonomy {
    pub fn high_level(&self) -> &BTreeMap<ClusterLabel, Vec<String>> {
        &self.high_level
    }

    pub fn subclusters(&self) -> &BTreeMap<ClusterLabel, BTreeMap<ClusterLabel, Vec<String>>> {
        &self.subclusters
    }

    /// Number of top-level clusters.
    pub fn num_clusters(&self) -> usize {
        self.high_level.len()
    }

    /// `(top, sub)` labels of `id`, if present.
    pub fn locate(&self, id: &str) -> Option<(ClusterLabel, ClusterLabel)> {
        self.subclusters.iter().find_map(|(&top, subs)| {
            subs.iter()
                .find(|(_, members)| members.iter().any(|m| m == id))
                .map(|(&sub, _)| (top, sub))
        })
    }

    pub fn into_parts(
        self,
    ) -> (
        BTreeMap<ClusterLabel, Vec<String>>,
        BTreeMap<ClusterLabel, BTreeMap<ClusterLabel, Vec<String>>>,
    ) {
        (self.high_level, self.subclusters)
    }
}

/// Runs the top-level pass and one subclustering pass per top-level group.
#[derive(Debug, Clone, Copy)]
pub struct TaxonomyBuilder {
    params: ClusteringParams,
    clusterer: HierarchicalClusterer,
}

impl TaxonomyBuilder {
    pub fn new(params: ClusteringParams) -> Self {
        Self {
            params,
            clusterer: HierarchicalClusterer::new(),
        }
    }

    pub fn params(&self) -> ClusteringParams {
        self.params
    }

    /// Group `ids` using the pairwise `similarity` of their records.
    ///
    /// Both passes cluster on `1 - similarity`. Each subclustering pass sees
    /// only the distances among that group's members. Groups with fewer than
    /// two members are not split and land under subcluster `0`.
    ///
    /// # Errors
    /// - `InputError::RowCountMismatch` if `ids` and `similarity` disagree in size
    pub fn build(&self, ids: &[String], similarity: &SimilarityMatrix) -> Result<Taxonomy, InputError> {
        let n = ids.len();
        if similarity.dim() != n {
            return Err(InputError::RowCountMismatch {
                modality: Modality::Semantic,
                expected: n,
                actual: similarity.dim(),
            });
        }

        let distances = similarity.to_distance();
        let top = self.clusterer.fit(
            &distances,
            self.params.num_high_level_clusters.min(n.saturating_sub(1)),
        );
        debug!(
            records = n,
            requested = self.params.num_high_level_clusters,
            clusters = top.num_clusters(),
            "top-level clustering complete"
        );

        let member_ids = |indices: &[usize]| -> Vec<String> {
            indices.iter().map(|&i| ids[i].clone()).collect()
        };

        let mut taxonomy = Taxonomy::default();
        for (label, members) in top.groups() {
            let subs = if members.len() < MIN_SUBCLUSTER_GROUP {
                BTreeMap::from([(UNSPLIT_SUBCLUSTER_LABEL, member_ids(&members))])
            } else {
                let requested = self
                    .params
                    .num_subclusters_per_cluster
                    .min(members.len() - 1);
                let flat = self.clusterer.fit_subset(&distances, &members, requested);
                flat.groups()
                    .into_iter()
                    .map(|(sub, local)| {
                        let global: Vec<usize> = local.iter().map(|&j| members[j]).collect();
                        (sub, member_ids(&global))
                    })
                    .collect()
            };
            debug!(cluster = label, members = members.len(), subclusters = subs.len(), "subclustered");

            taxonomy.high_level.insert(label, member_ids(&members));
            taxonomy.subclusters.insert(label, subs);
        }

        Ok(taxonomy)
    }
}
