//! Attribute encoding into a dense feature matrix.
//!
//! The column schema is derived from the batch itself and recomputed on every
//! call:
//!
//! 1. Collect the union of attribute keys and sort them lexicographically.
//! 2. Classify each key by the first non-null value found in input order.
//! 3. Encode each key into one or more columns:
//!    - Boolean → one column, 1.0/0.0 (missing → 0.0)
//!    - Numerical → one column, standardized to zero mean and unit variance
//!      (missing → 0.0 before standardization)
//!    - Categorical → one-hot over the sorted distinct text values, columns
//!      named `key=value` (missing → all zeros)
//! 4. If no columns result, emit a single unnamed all-zero filler column.
//!
//! Values whose type differs from the key's first-seen kind are coerced into
//! that kind rather than rejected. See [`AttributeKind`] for the rules.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::constants::numeric::ZERO_VARIANCE_EPSILON;
use crate::types::{AttributeValue, Attributes};

// =============================================================================
// Schema
// =============================================================================

/// Encoding chosen for an attribute key.
///
/// Coercion of values that do not match the key's kind:
///
/// | Kind | `Bool(b)` | `Number(x)` | `Text(s)` | null / missing |
/// |------|-----------|-------------|-----------|----------------|
/// | Boolean | `b` | `x != 0` | `s` non-empty | 0.0 |
/// | Numerical | 1.0 / 0.0 | `x` | parsed finite number, else 0.0 | 0.0 |
/// | Categorical | all zero | all zero | one-hot | all zero |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// Encoded as 1.0 / 0.0.
    Boolean,
    /// Encoded raw, then standardized column-wise.
    Numerical,
    /// One-hot encoded over observed text values.
    Categorical,
}

impl AttributeKind {
    /// Kind implied by a single value.
    pub fn of(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::Bool(_) => AttributeKind::Boolean,
            AttributeValue::Number(_) => AttributeKind::Numerical,
            AttributeValue::Text(_) => AttributeKind::Categorical,
        }
    }
}

/// Schema of a single attribute key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeySchema {
    /// Attribute key.
    pub key: String,
    /// Kind decided by the first non-null value.
    pub kind: AttributeKind,
    /// Sorted distinct text values; empty unless categorical.
    pub categories: Vec<String>,
    /// False when the key never carried a non-null value.
    pub observed: bool,
}

impl KeySchema {
    /// Number of feature columns this key produces.
    pub fn width(&self) -> usize {
        match self.kind {
            AttributeKind::Boolean | AttributeKind::Numerical => 1,
            AttributeKind::Categorical => self.categories.len(),
        }
    }

    /// Column names in output order.
    pub fn column_names(&self) -> Vec<String> {
        match self.kind {
            AttributeKind::Boolean | AttributeKind::Numerical => vec![self.key.clone()],
            AttributeKind::Categorical => self
                .categories
                .iter()
                .map(|value| format!("{}={}", self.key, value))
                .collect(),
        }
    }
}

/// Column schema derived from one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeSchema {
    keys: Vec<KeySchema>,
}

impl AttributeSchema {
    /// Derive the schema from attribute maps in input order.
    pub fn infer(rows: &[&Attributes]) -> Self {
        let all_keys: BTreeSet<&str> = rows
            .iter()
            .flat_map(|attrs| attrs.keys().map(String::as_str))
            .collect();

        let keys = all_keys
            .into_iter()
            .map(|key| {
                let first = rows
                    .iter()
                    .find_map(|attrs| attrs.get(key).and_then(Option::as_ref));

                let Some(first) = first else {
                    warn!(key, "Attribute key has no non-null value; encoding as empty categorical");
                    return KeySchema {
                        key: key.to_owned(),
                        kind: AttributeKind::Categorical,
                        categories: Vec::new(),
                        observed: false,
                    };
                };

                let kind = AttributeKind::of(first);
                let categories = match kind {
                    AttributeKind::Categorical => rows
                        .iter()
                        .filter_map(|attrs| match attrs.get(key) {
                            Some(Some(AttributeValue::Text(s))) => Some(s.clone()),
                            _ => None,
                        })
                        .collect::<BTreeSet<_>>()
                        .into_iter()
                        .collect(),
                    _ => Vec::new(),
                };

                KeySchema {
                    key: key.to_owned(),
                    kind,
                    categories,
                    observed: true,
                }
            })
            .collect();

        Self { keys }
    }

    /// Per-key schemas in column order.
    pub fn keys(&self) -> &[KeySchema] {
        &self.keys
    }

    /// Total number of feature columns, excluding any filler column.
    pub fn width(&self) -> usize {
        self.keys.iter().map(KeySchema::width).sum()
    }

    /// All column names in order.
    pub fn column_names(&self) -> Vec<String> {
        self.keys.iter().flat_map(KeySchema::column_names).collect()
    }
}

// =============================================================================
// Feature matrix
// =============================================================================

/// Dense N x A attribute features, one row per record in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
    filler: bool,
}

impl FeatureMatrix {
    /// Column names. Empty when the matrix holds only the filler column.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row-major values.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns, counting the filler column.
    pub fn width(&self) -> usize {
        if self.filler {
            1
        } else {
            self.columns.len()
        }
    }

    /// True when no attribute produced a column and a zero column stands in.
    pub fn is_filler(&self) -> bool {
        self.filler
    }

    /// Values of the named column, if present.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let j = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| row[j]).collect())
    }
}

// =============================================================================
// Encoder
// =============================================================================

/// Turns per-record attribute maps into a [`FeatureMatrix`].
///
/// Stateless: the schema and the numeric scaling are derived from the batch
/// passed to [`encode`](Self::encode) and discarded afterwards.
///
/// # Example
///
/// ```
/// use convo_cluster_core::encoding::AttributeEncoder;
/// use convo_cluster_core::types::{AttributeValue, Attributes};
///
/// let mut a = Attributes::new();
/// a.insert("tier".into(), Some(AttributeValue::from("gold")));
/// let mut b = Attributes::new();
/// b.insert("tier".into(), Some(AttributeValue::from("free")));
///
/// let matrix = AttributeEncoder::new().encode(&[&a, &b]);
/// assert_eq!(matrix.columns(), ["tier=free", "tier=gold"]);
/// assert_eq!(matrix.rows()[0], vec![0.0, 1.0]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeEncoder;

impl AttributeEncoder {
    /// Create an encoder.
    pub fn new() -> Self {
        Self
    }

    /// Infer the schema from `rows` and encode them.
    pub fn encode(&self, rows: &[&Attributes]) -> FeatureMatrix {
        let schema = AttributeSchema::infer(rows);
        self.encode_with_schema(&schema, rows)
    }

    /// Encode `rows` against an already inferred schema.
    pub fn encode_with_schema(&self, schema: &AttributeSchema, rows: &[&Attributes]) -> FeatureMatrix {
        let n = rows.len();

        if schema.width() == 0 {
            debug!(
                records = n,
                keys = schema.keys().len(),
                "No attribute columns; using zero filler column"
            );
            return FeatureMatrix {
                columns: Vec::new(),
                rows: vec![vec![0.0]; n],
                filler: true,
            };
        }

        let mut columns: Vec<Vec<f64>> = Vec::with_capacity(schema.width());
        let mut coerced: BTreeMap<&str, usize> = BTreeMap::new();

        for key_schema in schema.keys() {
            let key = key_schema.key.as_str();
            let values = rows.iter().map(|attrs| attrs.get(key).and_then(Option::as_ref));

            match key_schema.kind {
                AttributeKind::Boolean => {
                    let column = values
                        .map(|value| match value {
                            None => 0.0,
                            Some(v) => {
                                if AttributeKind::of(v) != AttributeKind::Boolean {
                                    *coerced.entry(key).or_default() += 1;
                                }
                                if truthy(v) {
                                    1.0
                                } else {
                                    0.0
                                }
                            }
                        })
                        .collect();
                    columns.push(column);
                }
                AttributeKind::Numerical => {
                    let mut column: Vec<f64> = values
                        .map(|value| match value {
                            None => 0.0,
                            Some(v) => {
                                if AttributeKind::of(v) != AttributeKind::Numerical {
                                    *coerced.entry(key).or_default() += 1;
                                }
                                as_number(v)
                            }
                        })
                        .collect();
                    standardize(&mut column);
                    columns.push(column);
                }
                AttributeKind::Categorical => {
                    let values: Vec<Option<&AttributeValue>> = values.collect();
                    for value in values.iter().flatten() {
                        if AttributeKind::of(value) != AttributeKind::Categorical {
                            *coerced.entry(key).or_default() += 1;
                        }
                    }
                    for category in &key_schema.categories {
                        let column = values
                            .iter()
                            .map(|value| match value {
                                Some(AttributeValue::Text(s)) if s == category => 1.0,
                                _ => 0.0,
                            })
                            .collect();
                        columns.push(column);
                    }
                }
            }
        }

        for (key, count) in &coerced {
            warn!(
                key,
                count,
                "Attribute values coerced into the key's first-seen kind"
            );
        }

        let width = columns.len();
        let matrix_rows = (0..n)
            .map(|i| columns.iter().map(|column| column[i]).collect())
            .collect();

        debug!(
            records = n,
            keys = schema.keys().len(),
            columns = width,
            "Encoded attribute feature matrix"
        );

        FeatureMatrix {
            columns: schema.column_names(),
            rows: matrix_rows,
            filler: false,
        }
    }
}

fn truthy(value: &AttributeValue) -> bool {
    match value {
        AttributeValue::Bool(b) => *b,
        AttributeValue::Number(x) => *x != 0.0,
        AttributeValue::Text(s) => !s.is_empty(),
    }
}

fn as_number(value: &AttributeValue) -> f64 {
    let raw = match value {
        AttributeValue::Bool(b) => f64::from(u8::from(*b)),
        AttributeValue::Number(x) => *x,
        AttributeValue::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
    };
    // "inf", "NaN" and "1e400" all parse.
    if raw.is_finite() {
        raw
    } else {
        0.0
    }
}

/// Standardize in place with the population standard deviation.
///
/// The column is first divided by its largest magnitude so that sums cannot
/// overflow; standardization is scale-invariant, so the result is unchanged.
/// Columns whose scaled standard deviation is at most
/// [`ZERO_VARIANCE_EPSILON`] are set to 0.0, as is any column that still
/// produces a non-finite value.
fn standardize(column: &mut [f64]) {
    let scale = column
        .iter()
        .filter(|x| x.is_finite())
        .fold(0.0_f64, |acc, x| acc.max(x.abs()));
    if column.is_empty() || scale == 0.0 || column.iter().any(|x| !x.is_finite()) {
        column.iter_mut().for_each(|x| *x = 0.0);
        return;
    }

    let n = column.len() as f64;
    column.iter_mut().for_each(|x| *x /= scale);
    let mean = column.iter().sum::<f64>() / n;
    let variance = column.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    if !std.is_finite() || std <= ZERO_VARIANCE_EPSILON {
        column.iter_mut().for_each(|x| *x = 0.0);
        return;
    }
    for x in column.iter_mut() {
        *x = (*x - mean) / std;
    }
}
