use serde::Serialize;
use serde_json::{Number, Value};
use std::fmt;

/// A single spreadsheet cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Free text.
    Text(String),
    /// A JSON number, kept as received so integers stay integers.
    Number(Number),
    /// A boolean.
    Bool(bool),
}

impl CellValue {
    /// Builds a text cell.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Converts a present JSON value into a cell.
    ///
    /// Returns `None` for `null`; the caller decides what a missing value becomes.
    /// Arrays and objects are rendered as compact JSON text.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(Self::Number(n.clone())),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => Some(Self::Text(value.to_string())),
        }
    }

    /// Returns the text content if this is a text cell.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as `f64` if this is a numeric cell.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// A row-major block of cells, as spilled into a sheet.
pub type Grid = Vec<Vec<CellValue>>;

/// What a spreadsheet function hands back to the host: one value or a grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellResult {
    /// A single value placed in the calling cell.
    Scalar(CellValue),
    /// A grid that spills from the calling cell.
    Grid(Grid),
}

impl CellResult {
    /// A one-row, one-column grid holding `msg`.
    pub fn diagnostic(msg: impl Into<String>) -> Self {
        Self::Grid(vec![vec![CellValue::Text(msg.into())]])
    }

    /// A single-row grid.
    #[must_use]
    pub fn row(row: Vec<CellValue>) -> Self {
        Self::Grid(vec![row])
    }

    /// The value shown in the calling cell (the top-left cell for a grid).
    #[must_use]
    pub fn first(&self) -> Option<&CellValue> {
        match self {
            Self::Scalar(v) => Some(v),
            Self::Grid(g) => g.first().and_then(|r| r.first()),
        }
    }

    /// Normalizes either shape into a grid.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        match self {
            Self::Scalar(v) => vec![vec![v]],
            Self::Grid(g) => g,
        }
    }
}
