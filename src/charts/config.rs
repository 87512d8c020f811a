//! Default Configuration Selector
//! Picks axes and a suggested chart kind from the shape of the data, keeping
//! any user choice that is still valid.

use crate::data::{ColumnClassification, Dataset, Delimiter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Substrings of a column name that mark it as a time axis.
pub const TEMPORAL_KEYWORDS: [&str; 4] = ["date", "tarih", "yıl", "ay"];

/// Datasets larger than this with a temporal column suggest a line chart.
const LINE_MIN_RECORDS: usize = 15;
/// Datasets smaller than this suggest a pie chart.
const PIE_MAX_RECORDS: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown chart kind: {0:?}")]
pub struct UnknownChartKind(pub String);

/// Supported rendering styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Area,
    Scatter,
    Pie,
    Radar,
    RadialBar,
    Composed,
    Funnel,
    Doughnut,
}

impl ChartKind {
    /// All kinds in menu order.
    pub const ALL: [ChartKind; 10] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Area,
        ChartKind::Scatter,
        ChartKind::Pie,
        ChartKind::Radar,
        ChartKind::RadialBar,
        ChartKind::Composed,
        ChartKind::Funnel,
        ChartKind::Doughnut,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Area => "area",
            ChartKind::Scatter => "scatter",
            ChartKind::Pie => "pie",
            ChartKind::Radar => "radar",
            ChartKind::RadialBar => "radial-bar",
            ChartKind::Composed => "composed",
            ChartKind::Funnel => "funnel",
            ChartKind::Doughnut => "doughnut",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Area => "Area Chart",
            ChartKind::Scatter => "Scatter Chart",
            ChartKind::Pie => "Pie Chart",
            ChartKind::Radar => "Radar Chart",
            ChartKind::RadialBar => "Radial Bar Chart",
            ChartKind::Composed => "Composed Chart",
            ChartKind::Funnel => "Funnel Chart",
            ChartKind::Doughnut => "Doughnut Chart",
        }
    }

    /// Kinds drawn on a category x axis with a numeric y axis.
    pub fn is_cartesian(self) -> bool {
        matches!(
            self,
            ChartKind::Bar
                | ChartKind::Line
                | ChartKind::Area
                | ChartKind::Scatter
                | ChartKind::Composed
        )
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ChartKind {
    type Err = UnknownChartKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.id() == wanted || kind.id().replace('-', "") == wanted)
            .ok_or_else(|| UnknownChartKind(s.to_string()))
    }
}

/// Axis and chart-kind selection driving the renderer.
///
/// `x_axis` and `y_axis` are either empty or members of the current column
/// set; [`select`] restores that after every data change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub delimiter: Delimiter,
    pub x_axis: String,
    pub y_axis: String,
    pub chart_kind: ChartKind,
}

impl ChartConfig {
    pub fn new(delimiter: Delimiter) -> Self {
        Self {
            delimiter,
            ..Self::default()
        }
    }

    /// Both axes are chosen.
    pub fn has_axes(&self) -> bool {
        !self.x_axis.is_empty() && !self.y_axis.is_empty()
    }
}

/// Produce a valid configuration for new data, starting from `previous`.
///
/// Still-valid axis choices survive; invalid or empty ones are replaced by
/// defaults. The chart kind is only re-suggested while it is the factory
/// default.
pub fn select(
    previous: &ChartConfig,
    dataset: &Dataset,
    columns: &ColumnClassification,
) -> ChartConfig {
    let mut next = previous.clone();

    if dataset.is_empty() || columns.is_empty() {
        next.x_axis.clear();
        next.y_axis.clear();
        return next;
    }

    let default_x = columns
        .categoricals
        .first()
        .or_else(|| columns.keys.first())
        .cloned()
        .unwrap_or_default();
    let default_y = columns
        .numerics
        .iter()
        .find(|name| **name != default_x)
        .or_else(|| columns.numerics.first())
        .cloned()
        .unwrap_or_default();

    if previous.x_axis.is_empty() || !columns.contains(&previous.x_axis) {
        next.x_axis = default_x;
    }
    if previous.y_axis.is_empty() || !columns.contains(&previous.y_axis) {
        next.y_axis = default_y;
    }
    if previous.chart_kind == ChartKind::default() {
        next.chart_kind = suggest_kind(dataset, columns);
    }

    debug!(
        x_axis = %next.x_axis,
        y_axis = %next.y_axis,
        chart_kind = %next.chart_kind,
        "selected chart configuration"
    );
    next
}

/// Suggest a chart kind from record count and column naming.
pub fn suggest_kind(dataset: &Dataset, columns: &ColumnClassification) -> ChartKind {
    if dataset.len() > LINE_MIN_RECORDS && columns.categoricals.iter().any(|c| is_temporal(c)) {
        ChartKind::Line
    } else if dataset.len() < PIE_MAX_RECORDS {
        ChartKind::Pie
    } else {
        ChartKind::Bar
    }
}

fn is_temporal(column: &str) -> bool {
    let lowered = column.to_lowercase();
    TEMPORAL_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}
