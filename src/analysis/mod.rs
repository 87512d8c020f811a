//! Analysis module - AI interpretation of chart images and data snippets

mod gemini;
mod image_input;
mod prompt;
mod request;

pub use gemini::{parse_chart_analysis, GeminiAnalysisService};
pub use image_input::{detect_image_mime, load_image};
pub use prompt::{chart_image_prompt, data_snippet_prompt};
pub use request::{AnalysisRequest, RequestState, RequestTicket};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Shown when a chart image could not be analyzed.
pub const IMAGE_FAILURE_MESSAGE: &str =
    "The image could not be analyzed. Please try again.";
/// Shown when a data snippet could not be analyzed.
pub const TEXT_FAILURE_MESSAGE: &str = "An error occurred while analyzing the data.";

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Missing API key for the analysis service")]
    MissingApiKey,
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("Service returned no content")]
    EmptyResponse,
    #[error("Malformed analysis response: {0}")]
    MalformedResponse(String),
    #[error("Unsupported image format")]
    UnsupportedImage,
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Message shown to the user for a failed analysis.
///
/// Problems the user can fix get a specific hint; anything else from the
/// service collapses to `fallback`.
pub fn user_message(error: &AnalysisError, fallback: &str) -> String {
    match error {
        AnalysisError::MissingApiKey => {
            "No API key configured. Set CHARTSENSE_ANALYSIS__API_KEY.".to_string()
        }
        AnalysisError::UnsupportedImage => {
            "Unsupported image format. Use PNG, JPEG, GIF, WebP or BMP.".to_string()
        }
        _ => fallback.to_string(),
    }
}

/// Structured interpretation of a chart image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartAnalysis {
    pub chart_type: String,
    pub title: String,
    pub summary: String,
    pub insights: Vec<String>,
}

/// AI service that interprets charts and tabular data.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Identify the chart in an image and summarize what it shows.
    async fn analyze_image(
        &self,
        image: &[u8],
        mime_type: &str,
    ) -> Result<ChartAnalysis, AnalysisError>;

    /// Free-form narrative about a snippet of delimited data.
    async fn analyze_text(&self, snippet: &str) -> Result<String, AnalysisError>;
}
