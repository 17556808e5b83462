//! Outcome label encoding.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::constants::outcome;

/// Recognized conversation outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The user got what they came for.
    Satisfied,
    /// The user left without a resolution.
    Unsatisfied,
    /// No clear signal either way.
    #[default]
    Unclear,
}

impl Outcome {
    /// Parse a label case-insensitively.
    ///
    /// Returns `None` for labels outside the three known outcomes.
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "satisfied" => Some(Outcome::Satisfied),
            "unsatisfied" => Some(Outcome::Unsatisfied),
            "unclear" => Some(Outcome::Unclear),
            _ => None,
        }
    }

    /// Parse a label, mapping anything unrecognized to [`Outcome::Unclear`].
    pub fn parse_lenient(label: &str) -> Self {
        Self::parse(label).unwrap_or_default()
    }

    /// Scalar score fed into the outcome block.
    pub fn score(self) -> f64 {
        match self {
            Outcome::Satisfied => outcome::SATISFIED,
            Outcome::Unsatisfied => outcome::UNSATISFIED,
            Outcome::Unclear => outcome::UNCLEAR,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Satisfied => write!(f, "satisfied"),
            Outcome::Unsatisfied => write!(f, "unsatisfied"),
            Outcome::Unclear => write!(f, "unclear"),
        }
    }
}

/// Encode an outcome label as a scalar.
///
/// `satisfied` → 1.0, `unsatisfied` → 0.0, `unclear` → 0.5, matched
/// case-insensitively. Unrecognized labels fail open to 0.5.
///
/// # Example
///
/// ```
/// use convo_cluster_core::encoding::encode_outcome;
///
/// assert_eq!(encode_outcome("Satisfied"), 1.0);
/// assert_eq!(encode_outcome("escalated"), 0.5);
/// ```
#[inline]
pub fn encode_outcome(label: &str) -> f64 {
    Outcome::parse_lenient(label).score()
}
