//! Composite vector construction.
//!
//! Each record's semantic, attribute and outcome blocks are L2-normalized
//! independently (`v / (|v| + 1e-8)`), scaled by their weight and concatenated
//! in the fixed order semantic → attributes → outcome.
//!
//! Composite vectors exist only to feed the similarity computation.

use tracing::debug;

use crate::config::constants::numeric::NORM_EPSILON;
use crate::encoding::FeatureMatrix;
use crate::error::{InputError, Modality};
use crate::similarity::l2_norm;
use crate::types::FeatureWeights;

/// Block widths of a composite vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeLayout {
    /// Semantic block width D.
    pub semantic: usize,
    /// Attribute block width A.
    pub attributes: usize,
    /// Outcome block width, always 1.
    pub outcome: usize,
}

impl CompositeLayout {
    /// Total width D + A + 1.
    pub fn width(&self) -> usize {
        self.semantic + self.attributes + self.outcome
    }
}

/// Composite vectors for one batch, one row per record in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeMatrix {
    layout: CompositeLayout,
    rows: Vec<Vec<f64>>,
}

impl CompositeMatrix {
    /// Block widths shared by every row.
    pub fn layout(&self) -> CompositeLayout {
        self.layout
    }

    /// Composite vectors.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds composite vectors under a fixed weight triple.
#[derive(Debug, Clone, Copy)]
pub struct VectorComposer {
    weights: FeatureWeights,
}

impl VectorComposer {
    /// Create a composer for `weights`.
    pub fn new(weights: FeatureWeights) -> Self {
        Self { weights }
    }

    /// Weights in use.
    pub fn weights(&self) -> FeatureWeights {
        self.weights
    }

    /// Compose one vector per record.
    ///
    /// `semantic` rows must share one width. An attribute matrix of width 0
    /// is replaced by a single zero column so the layout stays well defined.
    ///
    /// # Errors
    /// - `InputError::RowCountMismatch` if the attribute matrix or outcome
    ///   scores do not have one row per semantic row
    /// - `InputError::DimensionMismatch` if semantic rows differ in width
    pub fn compose(
        &self,
        semantic: &[Vec<f64>],
        attributes: &FeatureMatrix,
        outcomes: &[f64],
    ) -> Result<CompositeMatrix, InputError> {
        let n = semantic.len();
        if attributes.len() != n {
            return Err(InputError::RowCountMismatch {
                modality: Modality::Attributes,
                expected: n,
                actual: attributes.len(),
            });
        }
        if outcomes.len() != n {
            return Err(InputError::RowCountMismatch {
                modality: Modality::Outcome,
                expected: n,
                actual: outcomes.len(),
            });
        }

        let semantic_width = semantic.first().map_or(0, Vec::len);
        if let Some((i, row)) = semantic
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != semantic_width)
        {
            return Err(InputError::DimensionMismatch {
                id: format!("#{i}"),
                expected: semantic_width,
                actual: row.len(),
            });
        }

        let layout = CompositeLayout {
            semantic: semantic_width,
            attributes: attributes.width().max(1),
            outcome: 1,
        };

        let rows = (0..n)
            .map(|i| {
                let mut row = Vec::with_capacity(layout.width());
                push_weighted(&mut row, &semantic[i], self.weights.semantic);
                let attr_row = &attributes.rows()[i];
                if attr_row.is_empty() {
                    row.push(0.0);
                } else {
                    push_weighted(&mut row, attr_row, self.weights.attributes);
                }
                push_weighted(&mut row, &[outcomes[i]], self.weights.outcome);
                row
            })
            .collect();

        debug!(
            records = n,
            semantic_width = layout.semantic,
            attribute_width = layout.attributes,
            width = layout.width(),
            "Composed weighted vectors"
        );

        Ok(CompositeMatrix { layout, rows })
    }
}

/// Append `weight * block / (|block| + eps)` to `out`.
fn push_weighted(out: &mut Vec<f64>, block: &[f64], weight: f64) {
    let scale = weight / (l2_norm(block) + NORM_EPSILON);
    out.extend(block.iter().map(|x| x * scale));
}
