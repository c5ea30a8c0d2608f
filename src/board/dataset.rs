use std::collections::BTreeMap;

use crate::foundation::error::{BulletinError, BulletinResult};

/// One dataset row: a mapping from column name to scalar cell value.
pub type Row = BTreeMap<String, serde_json::Value>;

/// An ordered sequence of rows, indexed positionally (0-based).
///
/// Ingestion (spreadsheets, sheets APIs) is an external collaborator; this
/// crate only consumes rows that are already in memory. The serde shape is a
/// plain JSON array of objects.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset from rows, preserving order.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Positional row access with a defined out-of-range error.
    pub fn row(&self, index: usize) -> BulletinResult<&Row> {
        self.rows.get(index).ok_or_else(|| {
            BulletinError::render(format!(
                "row index {index} out of range (dataset has {} rows)",
                self.rows.len()
            ))
        })
    }
}

/// Render a cell value as pin content.
///
/// Returns `Ok(None)` when the cell should fall through to the pin default
/// (null, or a string that is empty after trimming). Numbers and bools are
/// stringified; arrays and objects are rejected.
pub fn cell_text(value: &serde_json::Value) -> BulletinResult<Option<String>> {
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => {
            if s.trim().is_empty() {
                Ok(None)
            } else {
                Ok(Some(s.clone()))
            }
        }
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        serde_json::Value::Bool(b) => Ok(Some(b.to_string())),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => Err(BulletinError::render(
            "cell values must be scalars (string, number, bool, or null)",
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/board/dataset.rs"]
mod tests;
