//! Request, record and response types for the `cluster` operation.
//!
//! - [`ConversationRecord`]: one conversation with its three signals
//! - [`AttributeValue`]: tagged attribute value (`Bool | Number | Text`)
//! - [`ClusterRequest`] / [`ClusterResponse`]: the operation's wire shapes

mod record;
mod request;
mod response;

pub use record::{AttributeValue, Attributes, ConversationRecord};
pub use request::{ClusterRequest, ClusteringParams, FeatureWeights};
pub use response::{ClusterLabel, ClusterResponse, ClusterStats};
