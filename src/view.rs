//! View Module
//! Ties parsing, classification and configuration selection together.

use crate::charts::{select, ChartConfig, ChartKind};
use crate::data::{
    classify, parse, ColumnClassification, DataError, DataLoader, Dataset, Delimiter, SAMPLE_CSV,
    SAMPLE_NAME,
};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Unknown column: {0:?}")]
    UnknownColumn(String),
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Everything a chart needs, derived from one `(text, delimiter)` input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedView {
    pub dataset: Dataset,
    pub classification: ColumnClassification,
    pub config: ChartConfig,
}

/// Parse, classify and select in one step.
///
/// The returned configuration keeps the choices of `previous` that are still
/// valid and carries `delimiter`.
pub fn derive_view(raw_text: &str, delimiter: Delimiter, previous: &ChartConfig) -> DerivedView {
    let dataset = parse(raw_text, delimiter);
    let classification = classify(&dataset);
    let previous = ChartConfig {
        delimiter,
        ..previous.clone()
    };
    let config = select(&previous, &dataset, &classification);

    DerivedView {
        dataset,
        classification,
        config,
    }
}

/// Current input and the view derived from it.
#[derive(Debug, Clone)]
pub struct ChartWorkspace {
    raw_text: String,
    source_name: String,
    view: DerivedView,
}

impl Default for ChartWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartWorkspace {
    /// Workspace showing the built-in sample data.
    pub fn new() -> Self {
        let config = ChartConfig::new(Delimiter::Comma);
        Self {
            raw_text: SAMPLE_CSV.to_string(),
            source_name: SAMPLE_NAME.to_string(),
            view: derive_view(SAMPLE_CSV, Delimiter::Comma, &config),
        }
    }

    pub fn load_text(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.raw_text = text.into();
        self.source_name = name.into();
        self.recompute();
        info!(
            source = %self.source_name,
            rows = self.view.dataset.len(),
            columns = self.view.classification.keys.len(),
            "workspace reloaded"
        );
    }

    pub fn load_file(&mut self, path: &Path) -> Result<(), ViewError> {
        let text = DataLoader::read_text(path)?;
        self.load_text(DataLoader::source_name(path), text);
        Ok(())
    }

    pub fn set_delimiter(&mut self, delimiter: Delimiter) {
        self.view.config.delimiter = delimiter;
        self.recompute();
    }

    /// Back to the sample data with a comma delimiter.
    pub fn reset_to_sample(&mut self) {
        self.view.config.delimiter = Delimiter::Comma;
        self.load_text(SAMPLE_NAME, SAMPLE_CSV);
    }

    pub fn set_x_axis(&mut self, name: &str) -> Result<(), ViewError> {
        self.ensure_column(name)?;
        self.view.config.x_axis = name.to_string();
        Ok(())
    }

    pub fn set_y_axis(&mut self, name: &str) -> Result<(), ViewError> {
        self.ensure_column(name)?;
        self.view.config.y_axis = name.to_string();
        Ok(())
    }

    pub fn set_chart_kind(&mut self, kind: ChartKind) {
        self.view.config.chart_kind = kind;
    }

    pub fn view(&self) -> &DerivedView {
        &self.view
    }

    pub fn dataset(&self) -> &Dataset {
        &self.view.dataset
    }

    pub fn classification(&self) -> &ColumnClassification {
        &self.view.classification
    }

    pub fn config(&self) -> &ChartConfig {
        &self.view.config
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn is_sample(&self) -> bool {
        self.raw_text == SAMPLE_CSV
    }

    /// First `max_lines` lines of the raw text.
    pub fn snippet(&self, max_lines: usize) -> String {
        self.raw_text
            .lines()
            .take(max_lines)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn ensure_column(&self, name: &str) -> Result<(), ViewError> {
        if self.view.classification.contains(name) {
            Ok(())
        } else {
            warn!(column = name, "rejected axis selection");
            Err(ViewError::UnknownColumn(name.to_string()))
        }
    }

    fn recompute(&mut self) {
        let delimiter = self.view.config.delimiter;
        self.view = derive_view(&self.raw_text, delimiter, &self.view.config);
    }
}
