//! Statistics Calculator Module
//! Descriptive statistics for the numeric columns of a dataset.

use crate::data::{ColumnClassification, Dataset};
use serde::Serialize;
use statrs::statistics::Statistics;

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl ColumnSummary {
    /// One-line rendering used in previews and analysis payloads.
    pub fn describe(&self) -> String {
        format!(
            "{}: count={} min={} max={} mean={:.2} median={} std={:.2}",
            self.column, self.count, self.min, self.max, self.mean, self.median, self.std_dev
        )
    }
}

/// Handles statistical calculations over parsed datasets.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for a column's values.
    /// Returns `None` when there are no values.
    pub fn compute_descriptive_stats(column: &str, values: &[f64]) -> Option<ColumnSummary> {
        let n = values.len();
        if n == 0 {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };
        let std_dev = if n > 1 {
            Statistics::std_dev(values.iter())
        } else {
            0.0
        };

        Some(ColumnSummary {
            column: column.to_string(),
            count: n,
            min: Statistics::min(values.iter()),
            max: Statistics::max(values.iter()),
            mean: Statistics::mean(values.iter()),
            median,
            std_dev,
        })
    }

    /// Summaries for every numeric column, in header order. Text cells that
    /// slipped past the sampled classification are ignored.
    pub fn summarize(dataset: &Dataset, columns: &ColumnClassification) -> Vec<ColumnSummary> {
        columns
            .numerics
            .iter()
            .filter_map(|name| {
                Self::compute_descriptive_stats(name, &dataset.numeric_values(name))
            })
            .collect()
    }
}
