//! Two-level taxonomy: top-level clusters, each split into subclusters.

mod builder;

pub use builder::{Taxonomy, TaxonomyBuilder};
