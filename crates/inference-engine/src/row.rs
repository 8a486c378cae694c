//! One-Row Input Table

use crate::InferenceError;

/// A single cell in the input row
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
}

/// A one-row table keyed by training-time column names
///
/// Column names must match the artifact schema exactly, punctuation and
/// spacing included ("Engine Size", not "Engine_Size"). The pipeline
/// verifies this before touching any value.
#[derive(Debug, Clone, Default)]
pub struct PipelineRow {
    columns: Vec<(String, CellValue)>,
}

impl PipelineRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, preserving insertion order
    pub fn push(mut self, name: impl Into<String>, value: CellValue) -> Self {
        self.columns.push((name.into(), value));
        self
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|(n, _)| n.clone()).collect()
    }

    fn get(&self, name: &str) -> Option<&CellValue> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Fetch a text column
    pub fn text(&self, name: &str) -> Result<&str, InferenceError> {
        match self.get(name) {
            Some(CellValue::Text(s)) => Ok(s),
            _ => Err(InferenceError::TypeMismatch {
                column: name.to_string(),
                expected: "text",
            }),
        }
    }

    /// Fetch an integer column
    pub fn int(&self, name: &str) -> Result<i64, InferenceError> {
        match self.get(name) {
            Some(CellValue::Int(i)) => Ok(*i),
            _ => Err(InferenceError::TypeMismatch {
                column: name.to_string(),
                expected: "integer",
            }),
        }
    }

    /// Fetch a numeric column, widening integers to float
    pub fn number(&self, name: &str) -> Result<f64, InferenceError> {
        match self.get(name) {
            Some(CellValue::Float(f)) => Ok(*f),
            Some(CellValue::Int(i)) => Ok(*i as f64),
            _ => Err(InferenceError::TypeMismatch {
                column: name.to_string(),
                expected: "number",
            }),
        }
    }
}
