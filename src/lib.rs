//! chartsense - CSV Chart Configuration & AI Chart Interpretation
//!
//! Parses delimiter-separated text into typed records, classifies columns as
//! numeric or categorical, derives a default chart configuration, renders it,
//! and talks to an AI service that interprets chart images and data snippets.

pub mod analysis;
pub mod charts;
pub mod config;
pub mod data;
pub mod stats;
pub mod view;

pub use charts::{ChartConfig, ChartKind, ChartRenderer, SvgChartRenderer};
pub use data::{classify, parse, CellValue, ColumnClassification, Dataset, Delimiter, Record};
pub use view::{derive_view, ChartWorkspace, DerivedView};
