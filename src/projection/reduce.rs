use super::FieldRequest;
use crate::core::{CellValue, MxError};
use serde_json::{Map, Value};

/// Placeholder for a field the service did not return.
pub const UNKNOWN: &str = "Unknown";

/// One entity's field-to-value mapping as returned by the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteRecord(Map<String, Value>);

impl RemoteRecord {
    /// Parses a response body.
    ///
    /// A top-level `null` is rejected. Any other non-object top level yields a record in
    /// which every field is absent.
    ///
    /// # Errors
    ///
    /// Returns [`MxError::Json`] for a malformed body and [`MxError::Data`] for `null`.
    pub fn from_body(body: &str) -> Result<Self, MxError> {
        match serde_json::from_str::<Value>(body)? {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Err(MxError::Data("response body is null".into())),
            _ => Ok(Self::default()),
        }
    }

    /// The raw value for `field`, if the key exists.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Number of keys in the record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for RemoteRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Projects `record` onto `fields`, in order.
///
/// Missing or `null` values become [`UNKNOWN`]; empty strings, `0` and `false` are kept.
/// The last field alone is dropped instead when it is missing, `null` or `""`, so the row
/// has `fields.len()` or `fields.len() - 1` cells.
#[must_use]
pub fn reduce(record: &RemoteRecord, fields: &FieldRequest) -> Vec<CellValue> {
    let names = fields.names();
    let mut row = Vec::with_capacity(names.len());

    for (i, field) in names.iter().enumerate() {
        let value = record.get(field);
        let is_last = i + 1 == names.len();

        if !is_last || has_content(value) {
            row.push(value.and_then(CellValue::from_json).unwrap_or_else(|| UNKNOWN.into()));
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(field = %field, "omitting empty trailing field");
        }
    }

    row
}

fn has_content(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}
