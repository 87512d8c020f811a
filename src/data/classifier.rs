//! Column Classifier Module
//! Partitions column names into numeric and categorical sets.

use crate::data::Dataset;
use serde::Serialize;
use tracing::debug;

/// Number of leading records inspected per column.
///
/// A column that is numeric in these rows but textual further down is still
/// classified numeric. Charts degrade gracefully on the stray text cells.
pub const SAMPLE_ROWS: usize = 5;

/// Column names split by inferred type, each list in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnClassification {
    pub keys: Vec<String>,
    pub numerics: Vec<String>,
    pub categoricals: Vec<String>,
}

impl ColumnClassification {
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.keys.iter().any(|k| k == name)
    }

    pub fn is_numeric(&self, name: &str) -> bool {
        self.numerics.iter().any(|k| k == name)
    }

    pub fn is_categorical(&self, name: &str) -> bool {
        self.categoricals.iter().any(|k| k == name)
    }
}

/// Classify every column of `dataset`.
pub fn classify(dataset: &Dataset) -> ColumnClassification {
    let keys = dataset.keys();
    if keys.is_empty() {
        return ColumnClassification::default();
    }

    let sample = dataset.preview(SAMPLE_ROWS);
    let (numerics, categoricals): (Vec<String>, Vec<String>) =
        keys.iter().cloned().partition(|key| {
            sample
                .iter()
                .all(|record| record.get(key).is_some_and(|value| value.is_number()))
        });

    debug!(?numerics, ?categoricals, "classified columns");

    ColumnClassification {
        keys,
        numerics,
        categoricals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{parse, Delimiter};

    #[test]
    fn test_numeric_and_categorical() {
        let dataset = parse("Name,Score,Age\nAlice,90,30\nBob,85,n/a", Delimiter::Comma);
        let columns = classify(&dataset);
        assert_eq!(columns.keys, vec!["Name", "Score", "Age"]);
        assert_eq!(columns.numerics, vec!["Score"]);
        assert_eq!(columns.categoricals, vec!["Name", "Age"]);
        assert!(columns.is_numeric("Score"));
        assert!(columns.is_categorical("Age"));
        assert!(!columns.contains("Missing"));
    }

    #[test]
    fn test_only_first_rows_are_sampled() {
        let text = "v\n1\n2\n3\n4\n5\noops";
        let dataset = parse(text, Delimiter::Comma);
        assert_eq!(dataset.len(), 6);
        assert_eq!(classify(&dataset).numerics, vec!["v"]);

        let text = "v\n1\n2\n3\n4\noops\n6";
        assert_eq!(classify(&parse(text, Delimiter::Comma)).categoricals, vec!["v"]);
    }

    #[test]
    fn test_empty_dataset() {
        let columns = classify(&Dataset::default());
        assert!(columns.is_empty());
        assert!(columns.numerics.is_empty());
        assert!(columns.categoricals.is_empty());
    }

    #[test]
    fn test_partition_preserves_order() {
        let dataset = parse("a,b,c,d,e\nx,1,y,2,3", Delimiter::Comma);
        let columns = classify(&dataset);
        assert_eq!(columns.numerics, vec!["b", "d", "e"]);
        assert_eq!(columns.categoricals, vec!["a", "c"]);
        for key in &columns.keys {
            assert!(columns.is_numeric(key) ^ columns.is_categorical(key));
        }
    }
}
