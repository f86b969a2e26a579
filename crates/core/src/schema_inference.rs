//! Column schema inference over uploaded-file samples (PRD-14).
//!
//! When the upload collaborator accepts a source file it hands this module
//! a small handful of already-parsed sample records. [`infer_schema`]
//! proposes a semantic type per column, plus a format hint for datetimes,
//! and the operator can then correct any proposal through
//! [`apply_type_override`] before the schema is attached to the draft.
//!
//! Inference is pure and total: it never re-reads the file and never fails.
//! A column that fits nothing stays [`ColumnType::String`].

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum raw sample values retained per column for operator review.
/// Inference only ever sees these retained values.
pub const MAX_SAMPLE_VALUES: usize = 3;

/// Candidate types tried most-specific-first. A column is assigned the
/// first candidate every non-null sample parses as; [`ColumnType::String`]
/// is the implicit tail that always matches.
pub const TYPE_PRIORITY: &[ColumnType] = &[
    ColumnType::Boolean,
    ColumnType::Integer,
    ColumnType::Float,
    ColumnType::Datetime,
];

/// How a datetime pattern is parsed when probed against a sample.
#[derive(Clone, Copy)]
enum DateKind {
    /// Calendar date, no time component.
    Date,
    /// Date and time, no timezone offset.
    DateTime,
    /// Full RFC 3339 timestamp with offset.
    Rfc3339,
}

/// Datetime patterns recognized during inference, tried in order. The first
/// pattern the column's leading non-null sample matches becomes the
/// column's `format` hint.
const DATETIME_FORMATS: &[(&str, DateKind)] = &[
    ("%Y-%m-%d", DateKind::Date),
    ("%Y-%m-%dT%H:%M:%S", DateKind::DateTime),
    ("%Y-%m-%d %H:%M:%S", DateKind::DateTime),
    ("%+", DateKind::Rfc3339),
    ("%m/%d/%Y", DateKind::Date),
];

// ---------------------------------------------------------------------------
// Column types
// ---------------------------------------------------------------------------

/// Semantic type of a sampled column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    String,
    Integer,
    Float,
    Datetime,
    Boolean,
}

impl ColumnType {
    /// Parse an operator-supplied type token from the schema editor.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "string" => Ok(Self::String),
            "integer" => Ok(Self::Integer),
            "float" => Ok(Self::Float),
            "datetime" => Ok(Self::Datetime),
            "boolean" => Ok(Self::Boolean),
            _ => Err(CoreError::Validation(format!(
                "Invalid column type '{raw}'. Must be one of: string, integer, float, datetime, boolean"
            ))),
        }
    }

    /// Lowercase token used in JSON payloads and the schema editor.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Datetime => "datetime",
            Self::Boolean => "boolean",
        }
    }
}

// ---------------------------------------------------------------------------
// Column schema
// ---------------------------------------------------------------------------

/// Inferred structure of one sampled column, shown to the operator for
/// review and override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name as it appears in the source records.
    pub column: String,
    /// Proposed, or operator-overridden, semantic type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Representation hint: the chrono pattern matched for datetime
    /// columns, empty otherwise. Informational only.
    #[serde(default)]
    pub format: String,
    /// Up to [`MAX_SAMPLE_VALUES`] raw values kept for operator review.
    /// Overrides are never re-checked against these.
    #[serde(default)]
    pub samples: Vec<Value>,
}

// ---------------------------------------------------------------------------
// Inference
// ---------------------------------------------------------------------------

/// Infer one [`ColumnSchema`] per distinct column across `records`,
/// preserving first-seen column order.
///
/// Each column is inferred independently from its own retained samples;
/// records missing a column simply contribute nothing to it. No records
/// means no columns, not an error.
pub fn infer_schema(records: &[serde_json::Map<String, Value>]) -> Vec<ColumnSchema> {
    let mut order: Vec<String> = Vec::new();
    let mut samples_by_column: HashMap<String, Vec<Value>> = HashMap::new();

    for record in records {
        for (column, value) in record {
            let samples = samples_by_column.entry(column.clone()).or_insert_with(|| {
                order.push(column.clone());
                Vec::new()
            });
            if samples.len() < MAX_SAMPLE_VALUES {
                samples.push(value.clone());
            }
        }
    }

    order
        .into_iter()
        .map(|column| {
            let samples = samples_by_column.remove(&column).unwrap_or_default();
            let (column_type, format) = infer_column_type(&samples);
            ColumnSchema {
                column,
                column_type,
                format,
                samples,
            }
        })
        .collect()
}

/// Walk [`TYPE_PRIORITY`] and return the first type every non-null sample
/// parses as, plus the format hint for datetime columns.
fn infer_column_type(samples: &[Value]) -> (ColumnType, String) {
    let non_null: Vec<&Value> = samples.iter().filter(|v| !is_null_value(v)).collect();
    if non_null.is_empty() {
        return (ColumnType::String, String::new());
    }

    for candidate in TYPE_PRIORITY {
        if non_null.iter().all(|v| parses_as(v, *candidate)) {
            let format = match candidate {
                ColumnType::Datetime => leading_datetime_format(&non_null),
                _ => String::new(),
            };
            return (*candidate, format);
        }
    }
    (ColumnType::String, String::new())
}

/// JSON `null` and empty or whitespace-only strings carry no type signal
/// and are skipped by every candidate parser.
fn is_null_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Whether one raw value parses at the given specificity level.
fn parses_as(value: &Value, candidate: ColumnType) -> bool {
    match candidate {
        ColumnType::String => true,
        ColumnType::Boolean => match value {
            Value::Bool(_) => true,
            Value::String(s) => {
                let token = s.trim();
                token.eq_ignore_ascii_case("true") || token.eq_ignore_ascii_case("false")
            }
            _ => false,
        },
        ColumnType::Integer => match value {
            Value::Number(n) => n.is_i64() || n.is_u64(),
            Value::String(s) => s.trim().parse::<i64>().is_ok(),
            _ => false,
        },
        ColumnType::Float => match value {
            Value::Number(_) => true,
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map(|f| f.is_finite())
                .unwrap_or(false),
            _ => false,
        },
        // Numbers are never datetimes; epoch seconds are indistinguishable
        // from plain integers in open-data files.
        ColumnType::Datetime => match value {
            Value::String(s) => detect_datetime_format(s.trim()).is_some(),
            _ => false,
        },
    }
}

/// The pattern matched by the first non-null sample, used as the column's
/// format hint.
fn leading_datetime_format(non_null: &[&Value]) -> String {
    non_null
        .first()
        .and_then(|v| v.as_str())
        .and_then(|s| detect_datetime_format(s.trim()))
        .map(str::to_string)
        .unwrap_or_default()
}

/// Probe `raw` against [`DATETIME_FORMATS`] and return the first matching
/// pattern. chrono requires the whole input to match, so a trailing
/// timezone or stray suffix falls through to the next pattern.
fn detect_datetime_format(raw: &str) -> Option<&'static str> {
    for &(pattern, kind) in DATETIME_FORMATS {
        let matched = match kind {
            DateKind::Date => NaiveDate::parse_from_str(raw, pattern).is_ok(),
            DateKind::DateTime => NaiveDateTime::parse_from_str(raw, pattern).is_ok(),
            DateKind::Rfc3339 => DateTime::parse_from_rfc3339(raw).is_ok(),
        };
        if matched {
            return Some(pattern);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Operator overrides
// ---------------------------------------------------------------------------

/// Apply an operator type override to the named column.
///
/// The raw token must name one of the five recognized types. The samples
/// are deliberately not re-checked: once the proposal has been displayed,
/// the operator's domain knowledge wins. The format hint and samples stay
/// as proposed.
pub fn apply_type_override(
    schema: &mut [ColumnSchema],
    column: &str,
    raw_type: &str,
) -> Result<(), CoreError> {
    let column_type = ColumnType::parse(raw_type)?;
    let entry = schema
        .iter_mut()
        .find(|c| c.column == column)
        .ok_or_else(|| CoreError::NotFound {
            entity: "Column",
            name: column.to_string(),
        })?;
    entry.column_type = column_type;
    Ok(())
}
