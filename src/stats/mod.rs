//! Stats module - Column statistics

mod calculator;

pub use calculator::{ColumnSummary, StatsCalculator};
