//! Plot series extraction: one labelled value per record.

use crate::charts::ChartConfig;
use crate::data::Dataset;

/// A category label with its numeric value.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// Pair the x-axis label of every record with its numeric y value.
///
/// Records whose y cell is missing or textual are skipped, so a column that
/// was misclassified from its first rows still plots what it can.
pub fn extract_series(dataset: &Dataset, config: &ChartConfig) -> Vec<SeriesPoint> {
    if !config.has_axes() {
        return Vec::new();
    }

    dataset
        .iter()
        .filter_map(|record| {
            let value = record.get(&config.y_axis)?.as_f64()?;
            let label = record
                .get(&config.x_axis)
                .map(|cell| cell.to_string())
                .unwrap_or_default();
            Some(SeriesPoint { label, value })
        })
        .collect()
}
