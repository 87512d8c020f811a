//! Typed cell values, records and datasets.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// A single parsed cell: either a finite number or the trimmed text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Trim a raw field and coerce it to a number when the whole text is a
    /// finite float. No locale handling, no thousands separators.
    pub fn from_field(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(trimmed.to_string()),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Number(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// One row keyed by header name, in header order.
pub type Record = IndexMap<String, CellValue>;

/// Ordered records produced by a single parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Column names in header order, taken from the first record.
    pub fn keys(&self) -> Vec<String> {
        self.records
            .first()
            .map(|record| record.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Values stored under `name`, skipping records that lack the key.
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a CellValue> + 'a {
        self.records.iter().filter_map(move |record| record.get(name))
    }

    /// Numeric values stored under `name`; text cells are skipped.
    pub fn numeric_values(&self, name: &str) -> Vec<f64> {
        self.column(name).filter_map(CellValue::as_f64).collect()
    }

    /// The first `rows` records.
    pub fn preview(&self, rows: usize) -> &[Record] {
        &self.records[..rows.min(self.records.len())]
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_coercion() {
        assert_eq!(CellValue::from_field(" 42 "), CellValue::Number(42.0));
        assert_eq!(CellValue::from_field("-1.5e3"), CellValue::Number(-1500.0));
        assert_eq!(CellValue::from_field(".5"), CellValue::Number(0.5));
        assert_eq!(CellValue::from_field(" Alice "), CellValue::Text("Alice".into()));
        assert_eq!(CellValue::from_field(""), CellValue::Text(String::new()));
    }

    #[test]
    fn test_non_finite_and_locale_text_stay_text() {
        for raw in ["inf", "-Infinity", "NaN", "1.000,5", "$12", "12abc", "1 000"] {
            assert!(
                !CellValue::from_field(raw).is_number(),
                "{raw:?} should not be numeric"
            );
        }
    }

    #[test]
    fn test_display_drops_trailing_zero_fraction() {
        assert_eq!(CellValue::Number(12000.0).to_string(), "12000");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Text("Ocak".into()).to_string(), "Ocak");
    }

    #[test]
    fn test_preview_is_bounded() {
        let record: Record = [("A".to_string(), CellValue::Number(1.0))]
            .into_iter()
            .collect();
        let dataset = Dataset::new(vec![record.clone(), record]);
        assert_eq!(dataset.preview(5).len(), 2);
        assert_eq!(dataset.preview(1).len(), 1);
        assert_eq!(dataset.keys(), vec!["A".to_string()]);
        assert_eq!(dataset.numeric_values("A"), vec![1.0, 1.0]);
    }
}
