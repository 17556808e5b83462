//! Ward-linkage merge hierarchy.

use crate::similarity::DistanceMatrix;

/// One agglomeration step.
///
/// Node ids follow the usual linkage-matrix convention: leaves are
/// `0..n_leaves`, and the i-th merge creates node `n_leaves + i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    /// Smaller node id of the merged pair.
    pub left: usize,
    /// Larger node id of the merged pair.
    pub right: usize,
    /// Ward distance between the two groups at merge time.
    pub height: f64,
    /// Number of leaves under the new node.
    pub size: usize,
}

/// Complete merge hierarchy over `n_leaves` items (`n_leaves - 1` merges).
#[derive(Debug, Clone, PartialEq)]
pub struct Dendrogram {
    n_leaves: usize,
    merges: Vec<Merge>,
}

impl Dendrogram {
    /// Number of original items.
    pub fn n_leaves(&self) -> usize {
        self.n_leaves
    }

    /// Merges in the order they were performed.
    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    /// Id of the root node, if any merge happened.
    pub fn root(&self) -> Option<usize> {
        if self.merges.is_empty() {
            None
        } else {
            Some(self.n_leaves + self.merges.len() - 1)
        }
    }

    /// Children of an internal node, `None` for leaves and unknown ids.
    pub fn children(&self, node: usize) -> Option<(usize, usize)> {
        node.checked_sub(self.n_leaves)
            .and_then(|i| self.merges.get(i))
            .map(|m| (m.left, m.right))
    }
}

/// Build the Ward hierarchy for `distances`.
///
/// Distances are used as given (no squaring or embedding into Euclidean
/// space). After merging groups `i` and `j`, the distance to every other
/// group `k` becomes
///
/// ```text
/// d(k, i∪j) = sqrt(((n_i+n_k)·d(i,k)² + (n_j+n_k)·d(j,k)² − n_k·d(i,j)²) / (n_i+n_j+n_k))
/// ```
///
/// with the radicand clamped at 0. Among equally close pairs, the one with
/// the lowest working slot indices merges first. O(M³) time, O(M²) space.
pub fn ward_linkage(distances: &DistanceMatrix) -> Dendrogram {
    let m = distances.dim();
    let mut merges = Vec::with_capacity(m.saturating_sub(1));
    if m < 2 {
        return Dendrogram { n_leaves: m, merges };
    }

    let mut d: Vec<f64> = distances.as_square().to_rows().concat();
    let mut active = vec![true; m];
    let mut node_id: Vec<usize> = (0..m).collect();
    let mut size = vec![1usize; m];

    for step in 0..(m - 1) {
        let mut best: Option<(usize, usize, f64)> = None;
        for a in (0..m).filter(|&a| active[a]) {
            for b in ((a + 1)..m).filter(|&b| active[b]) {
                let dist = d[a * m + b];
                if best.map_or(true, |(_, _, current)| dist < current) {
                    best = Some((a, b, dist));
                }
            }
        }
        let Some((a, b, height)) = best else {
            break;
        };

        let (n_a, n_b) = (size[a] as f64, size[b] as f64);
        for k in (0..m).filter(|&k| active[k] && k != a && k != b) {
            let n_k = size[k] as f64;
            let d_ak = d[a * m + k];
            let d_bk = d[b * m + k];
            let radicand = ((n_a + n_k) * d_ak * d_ak + (n_b + n_k) * d_bk * d_bk
                - n_k * height * height)
                / (n_a + n_b + n_k);
            let updated = radicand.max(0.0).sqrt();
            d[a * m + k] = updated;
            d[k * m + a] = updated;
        }

        let (left, right) = if node_id[a] < node_id[b] {
            (node_id[a], node_id[b])
        } else {
            (node_id[b], node_id[a])
        };
        merges.push(Merge {
            left,
            right,
            height,
            size: size[a] + size[b],
        });

        active[b] = false;
        node_id[a] = m + step;
        size[a] += size[b];
    }

    Dendrogram { n_leaves: m, merges }
}
