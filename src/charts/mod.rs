//! Charts module - Chart configuration and rendering

mod config;
mod polar;
mod renderer;
mod series;

pub use config::{select, suggest_kind, ChartConfig, ChartKind, UnknownChartKind, TEMPORAL_KEYWORDS};
pub use renderer::{ChartRenderer, RenderError, SvgChartRenderer, PALETTE};
pub use series::{extract_series, SeriesPoint};
