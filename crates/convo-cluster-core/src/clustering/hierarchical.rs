//! Stateless Ward + maxclust clusterer.

use tracing::debug;

use super::cut::FlatClustering;
use super::linkage::{ward_linkage, Dendrogram};
use crate::similarity::DistanceMatrix;

/// Ward-linkage agglomerative clusterer cut to a requested cluster count.
///
/// Holds no state, so the same instance serves both the top-level pass and
/// every per-group subclustering pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchicalClusterer;

impl HierarchicalClusterer {
    pub fn new() -> Self {
        Self
    }

    /// Cluster count actually requested from the cut for `m` items.
    ///
    /// Clipped to `m - 1` (a request for `m` or more would only yield
    /// singletons) and raised to at least 1.
    pub fn effective_k(m: usize, requested: usize) -> usize {
        if m <= 1 {
            m
        } else {
            requested.clamp(1, m - 1)
        }
    }

    /// Build the merge hierarchy only.
    pub fn linkage(&self, distances: &DistanceMatrix) -> Dendrogram {
        ward_linkage(distances)
    }

    /// Cluster all items of `distances` into at most `requested` groups.
    ///
    /// A single item gets label 1 without building a hierarchy; an empty
    /// matrix yields an empty clustering.
    pub fn fit(&self, distances: &DistanceMatrix, requested: usize) -> FlatClustering {
        let m = distances.dim();
        if m <= 1 {
            return FlatClustering::from_labels(vec![1; m]);
        }

        let k = Self::effective_k(m, requested);
        let flat = self.linkage(distances).cut_max_clusters(k);
        debug!(
            items = m,
            requested,
            effective_k = k,
            clusters = flat.num_clusters(),
            "hierarchical fit complete"
        );
        flat
    }

    /// Cluster the items at `indices` using their pairwise distances only.
    ///
    /// Labels are positional with respect to `indices`.
    pub fn fit_subset(
        &self,
        distances: &DistanceMatrix,
        indices: &[usize],
        requested: usize,
    ) -> FlatClustering {
        self.fit(&distances.select(indices), requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[f64]) -> DistanceMatrix {
        let rows = points
            .iter()
            .map(|a| points.iter().map(|b| (a - b).abs()).collect())
            .collect();
        DistanceMatrix::from_rows(rows).expect("square")
    }

    #[test]
    fn test_effective_k() {
        assert_eq!(HierarchicalClusterer::effective_k(0, 5), 0);
        assert_eq!(HierarchicalClusterer::effective_k(1, 5), 1);
        assert_eq!(HierarchicalClusterer::effective_k(2, 5), 1);
        assert_eq!(HierarchicalClusterer::effective_k(10, 5), 5);
        assert_eq!(HierarchicalClusterer::effective_k(10, 0), 1);
        assert_eq!(HierarchicalClusterer::effective_k(3, 3), 2);
        println!("[PASS] effective_k clips to [1, m-1]");
    }

    #[test]
    fn test_fit_small_inputs() {
        let clusterer = HierarchicalClusterer::new();

        let empty = clusterer.fit(&line(&[]), 3);
        assert!(empty.labels().is_empty());
        assert_eq!(empty.num_clusters(), 0);

        assert_eq!(clusterer.fit(&line(&[2.0]), 3).labels(), &[1]);
        assert_eq!(clusterer.fit(&line(&[2.0, 9.0]), 3).labels(), &[1, 1]);
        println!("[PASS] M=0, M=1, M=2 handled");
    }

    #[test]
    fn test_fit_clips_request() {
        let clusterer = HierarchicalClusterer::new();
        let flat = clusterer.fit(&line(&[0.0, 4.0, 10.0, 30.0]), 10);

        assert_eq!(flat.num_clusters(), 3);
        println!("[PASS] request of 10 on 4 items yields 3 clusters");
    }

    #[test]
    fn test_fit_subset_uses_local_positions() {
        let clusterer = HierarchicalClusterer::new();
        let distances = line(&[0.0, 100.0, 0.5, 200.0, 50.0]);

        // Items 0, 2 and 4: 0.0 and 0.5 group together, 50.0 stands apart.
        let flat = clusterer.fit_subset(&distances, &[0, 2, 4], 2);
        let groups = flat.groups();

        assert_eq!(groups.len(), 2);
        assert!(groups.values().any(|g| g == &vec![0, 1]));
        assert!(groups.values().any(|g| g == &vec![2]));
        println!("[PASS] subset clustering: {groups:?}");
    }
}
