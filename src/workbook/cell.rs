//! Cell values and their declared type tags.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::Display;

/// Semantic kind of a cell's value, driving export rendering rules.
///
/// A `Formula` cell keeps this tag while its [`CellValue`] holds the
/// already-evaluated scalar result.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CellType {
    #[default]
    Empty,
    String,
    Float,
    Percentage,
    Boolean,
    Date,
    DateTime,
    Time,
    Formula,
    Link,
}

impl CellType {
    /// Lowercase tag name used by the exporters.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::String => "string",
            Self::Float => "float",
            Self::Percentage => "percentage",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Time => "time",
            Self::Formula => "formula",
            Self::Link => "link",
        }
    }
}

/// A cell's runtime value.
///
/// Sparsity is the storage model: a coordinate nobody wrote reads back as
/// `Empty` rather than failing.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Empty,
    String(String),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// Elapsed seconds
    Time(i64),
    Link { url: String, text: String },
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Type tag a plain write of this value should carry.
    pub(crate) fn infer_type(&self) -> CellType {
        match self {
            Self::Empty => CellType::Empty,
            Self::String(_) => CellType::String,
            Self::Float(_) => CellType::Float,
            Self::Bool(_) => CellType::Boolean,
            Self::Date(_) => CellType::Date,
            Self::DateTime(_) => CellType::DateTime,
            Self::Time(_) => CellType::Time,
            Self::Link { .. } => CellType::Link,
        }
    }
}

/// Renders a float as integer text when it is mathematically integral.
pub(crate) fn format_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

impl Display for CellValue {
    /// Raw textual form: what XML content, YAML values, `info` and header
    /// matching see. Time values stay a bare seconds count here; only the
    /// exporters apply the HH:MM:SS conversion.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::String(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{}", format_float(*value)),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Date(value) => write!(f, "{value}"),
            Self::DateTime(value) => write!(f, "{value}"),
            Self::Time(value) => write!(f, "{value}"),
            Self::Link { text, .. } => write!(f, "{text}"),
        }
    }
}
