//! Hierarchical agglomerative clustering over a precomputed distance matrix.
//!
//! # Algorithm
//!
//! 1. Start with every item as its own group.
//! 2. Repeatedly merge the two groups whose union increases total
//!    within-group variance the least (Ward linkage), until one group remains.
//!    Inter-group distances are maintained with the Lance-Williams update.
//! 3. Cut the resulting dendrogram at the smallest merge height that leaves at
//!    most `k` groups (maxclust).
//!
//! # Key Types
//!
//! - [`Dendrogram`] / [`Merge`]: the merge hierarchy
//! - [`FlatClustering`]: 1-based flat labels for each item
//! - [`HierarchicalClusterer`]: stateless primitive combining both steps,
//!   reusable on any index subset

mod cut;
mod hierarchical;
mod linkage;

pub use cut::FlatClustering;
pub use hierarchical::HierarchicalClusterer;
pub use linkage::{ward_linkage, Dendrogram, Merge};
