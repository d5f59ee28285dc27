use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One value stored under a field name of a data record.
///
/// `Array` holds bounded values (for example band renderers) that require
/// array-aware range scanning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Number(f64),
    Array(Vec<f64>),
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Vec<f64>> for FieldValue {
    fn from(values: Vec<f64>) -> Self {
        Self::Array(values)
    }
}

/// One tick of the visible data window.
///
/// Nested series values are addressed with dotted names such as
/// `"IBM.Close"`, mirroring the field names produced by field collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataRecord {
    values: IndexMap<String, FieldValue>,
}

impl DataRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an OHLC record with the conventional field names.
    #[must_use]
    pub fn ohlc(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self::new()
            .with("Open", open)
            .with("High", high)
            .with("Low", low)
            .with("Close", close)
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(field.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Joins a parent field with each child name, e.g. `("IBM", ["Close"])` ->
/// `["IBM.Close"]`.
#[must_use]
pub fn chained_field_names(parent: &str, children: &[&str]) -> Vec<String> {
    children
        .iter()
        .map(|child| format!("{parent}.{child}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{DataRecord, FieldValue, chained_field_names};

    #[test]
    fn ohlc_record_exposes_conventional_fields() {
        let record = DataRecord::ohlc(1.0, 3.0, 0.5, 2.0);
        assert_eq!(record.len(), 4);
        assert_eq!(record.get("High"), Some(&FieldValue::Number(3.0)));
        assert_eq!(record.get("Volume"), None);
    }

    #[test]
    fn chained_names_use_dot_separator() {
        assert_eq!(
            chained_field_names("IBM", &["Close", "High"]),
            vec!["IBM.Close".to_owned(), "IBM.High".to_owned()]
        );
    }
}
