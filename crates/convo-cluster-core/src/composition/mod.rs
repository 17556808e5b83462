//! Weighted composition of the three modalities into one vector per record.

mod composer;

pub use composer::{CompositeLayout, CompositeMatrix, VectorComposer};
