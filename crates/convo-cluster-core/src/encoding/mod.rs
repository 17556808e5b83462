//! Encoders turning structured signals into numbers.
//!
//! - [`AttributeEncoder`]: attribute maps → [`FeatureMatrix`]
//! - [`encode_outcome`]: outcome label → scalar

mod attributes;
mod outcome;

pub use attributes::{AttributeEncoder, AttributeKind, AttributeSchema, FeatureMatrix, KeySchema};
pub use outcome::{encode_outcome, Outcome};
