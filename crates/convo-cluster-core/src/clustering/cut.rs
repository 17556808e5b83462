//! Flat cuts of a [`Dendrogram`].

use std::collections::BTreeMap;

use super::linkage::Dendrogram;
use crate::types::ClusterLabel;

/// Flat assignment of items to 1-based cluster labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatClustering {
    labels: Vec<ClusterLabel>,
    num_clusters: usize,
}

impl FlatClustering {
    pub(crate) fn from_labels(labels: Vec<ClusterLabel>) -> Self {
        let num_clusters = labels.iter().copied().max().unwrap_or(0) as usize;
        Self {
            labels,
            num_clusters,
        }
    }

    /// Label per item, in input order.
    pub fn labels(&self) -> &[ClusterLabel] {
        &self.labels
    }

    /// Number of distinct labels (labels are exactly `1..=num_clusters`).
    pub fn num_clusters(&self) -> usize {
        self.num_clusters
    }

    /// Item indices per label, ascending within each group.
    pub fn groups(&self) -> BTreeMap<ClusterLabel, Vec<usize>> {
        let mut groups: BTreeMap<ClusterLabel, Vec<usize>> = BTreeMap::new();
        for (index, &label) in self.labels.iter().enumerate() {
            groups.entry(label).or_default().push(index);
        }
        groups
    }
}

impl Dendrogram {
    /// Cut into at most `k` flat clusters (maxclust criterion).
    ///
    /// Every node is scored by the largest merge height in its subtree. The
    /// threshold is the smallest such score that leaves no more than `k`
    /// clusters; each maximal subtree whose score is within the threshold
    /// becomes one cluster. Tied heights can therefore yield fewer than `k`
    /// clusters. `k >= n_leaves` makes every leaf a singleton, `k = 0` is
    /// treated as 1.
    ///
    /// Labels are numbered from 1 in left-first depth-first order from the
    /// root, so the result depends only on the hierarchy.
    pub fn cut_max_clusters(&self, k: usize) -> FlatClustering {
        let n = self.n_leaves();
        let Some(root) = self.root() else {
            return FlatClustering::from_labels(vec![1; n]);
        };
        let k = k.max(1);

        let max_dist = self.subtree_max_heights();
        let threshold = if k >= n {
            f64::NEG_INFINITY
        } else {
            let mut sorted = max_dist.clone();
            sorted.sort_by(f64::total_cmp);
            // n - (#nodes with score <= t) clusters remain; need n - k merged nodes.
            sorted[n - k - 1]
        };

        let mut labels: Vec<ClusterLabel> = vec![0; n];
        let mut next: ClusterLabel = 1;
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            match self.children(node) {
                Some((left, right)) if max_dist[node - n] > threshold => {
                    stack.push(right);
                    stack.push(left);
                }
                _ => {
                    self.for_each_leaf(node, |leaf| labels[leaf] = next);
                    next += 1;
                }
            }
        }

        FlatClustering::from_labels(labels)
    }

    /// Largest merge height within each internal node's subtree.
    fn subtree_max_heights(&self) -> Vec<f64> {
        let n = self.n_leaves();
        let mut max_dist: Vec<f64> = Vec::with_capacity(self.merges().len());
        for merge in self.merges() {
            let child_max = |id: usize| {
                id.checked_sub(n)
                    .map_or(f64::NEG_INFINITY, |i| max_dist[i])
            };
            let score = merge
                .height
                .max(child_max(merge.left))
                .max(child_max(merge.right));
            max_dist.push(score);
        }
        max_dist
    }

    fn for_each_leaf(&self, node: usize, mut visit: impl FnMut(usize)) {
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            match self.children(current) {
                Some((left, right)) => {
                    stack.push(right);
                    stack.push(left);
                }
                None => visit(current),
            }
        }
    }
}
