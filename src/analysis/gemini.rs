//! Gemini client for chart and data analysis.

use super::prompt::{chart_image_prompt, data_snippet_prompt};
use super::{AnalysisError, AnalysisService, ChartAnalysis};
use crate::config::AnalysisConfig;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if it has any.
    fn into_text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        let text: String = candidate
            .content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

fn image_request(image: &[u8], mime_type: &str, language: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.to_string(),
                        data: STANDARD.encode(image),
                    },
                },
                Part::Text {
                    text: chart_image_prompt(language),
                },
            ],
        }],
        generation_config: Some(GenerationConfig {
            response_mime_type: "application/json",
        }),
    }
}

fn text_request(snippet: &str, language: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![Part::Text {
                text: data_snippet_prompt(language, snippet),
            }],
        }],
        generation_config: None,
    }
}

/// Remove a surrounding Markdown code fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (```json) up to the first newline.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Extract a [`ChartAnalysis`] from the service's JSON answer.
pub fn parse_chart_analysis(text: &str) -> Result<ChartAnalysis, AnalysisError> {
    let value: Value = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

    if !value.is_object() {
        return Err(AnalysisError::MalformedResponse(
            "expected a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| AnalysisError::MalformedResponse(e.to_string()))
}

/// [`AnalysisService`] backed by the Gemini `generateContent` endpoint.
pub struct GeminiAnalysisService {
    client: reqwest::Client,
    config: AnalysisConfig,
}

impl GeminiAnalysisService {
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model.trim()
        )
    }

    fn api_key(&self) -> Result<&str, AnalysisError> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(AnalysisError::MissingApiKey)
    }

    async fn generate(&self, body: &GenerateRequest) -> Result<String, AnalysisError> {
        let api_key = self.api_key()?;
        info!(model = %self.config.model, "Sending analysis request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed.into_text().ok_or(AnalysisError::EmptyResponse)?;
        debug!(chars = text.len(), "Received analysis response");
        Ok(text)
    }
}

#[async_trait]
impl AnalysisService for GeminiAnalysisService {
    async fn analyze_image(
        &self,
        image: &[u8],
        mime_type: &str,
    ) -> Result<ChartAnalysis, AnalysisError> {
        let body = image_request(image, mime_type, &self.config.language);
        let text = self.generate(&body).await?;
        parse_chart_analysis(&text)
    }

    async fn analyze_text(&self, snippet: &str) -> Result<String, AnalysisError> {
        let body = text_request(snippet, &self.config.language);
        self.generate(&body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_image_request_shape() {
        let body = serde_json::to_value(image_request(b"abc", "image/png", "English")).unwrap();
        let parts = &body["contents"][0]["parts"];

        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "YWJj");
        assert!(parts[1]["text"].as_str().unwrap().contains("English"));
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_text_request_has_no_generation_config() {
        let body = serde_json::to_value(text_request("A,B\n1,2", "English")).unwrap();
        assert!(body.get("generationConfig").is_none());
        assert!(body["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("A,B\n1,2"));
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "first " }, { "text": "second" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(response.into_text().as_deref(), Some("first second"));
    }

    #[test]
    fn test_response_without_text_is_empty() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [] } }]
        }))
        .unwrap();
        assert!(response.into_text().is_none());

        let response: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.into_text().is_none());
    }

    #[test]
    fn test_parse_chart_analysis() {
        let text = r#"{"chartType":"bar","title":"Sales","summary":"Up.","insights":["a","b"]}"#;
        let analysis = parse_chart_analysis(text).unwrap();
        assert_eq!(analysis.chart_type, "bar");
        assert_eq!(analysis.title, "Sales");
        assert_eq!(analysis.insights, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_chart_analysis_tolerates_code_fence() {
        let text = "```json\n{\"chartType\":\"pie\",\"title\":\"Share\"}\n```";
        let analysis = parse_chart_analysis(text).unwrap();
        assert_eq!(analysis.chart_type, "pie");
        assert!(analysis.summary.is_empty());
        assert!(analysis.insights.is_empty());
    }

    #[test]
    fn test_parse_chart_analysis_rejects_invalid_json() {
        assert!(matches!(
            parse_chart_analysis("not json"),
            Err(AnalysisError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_chart_analysis("[1, 2]"),
            Err(AnalysisError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_chart_analysis(""),
            Err(AnalysisError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_chart_analysis(r#"{"insights":"one"}"#),
            Err(AnalysisError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_endpoint_trims_slashes() {
        let service = GeminiAnalysisService::new(AnalysisConfig {
            base_url: "http://localhost:9/models/".to_string(),
            ..AnalysisConfig::default()
        })
        .unwrap();
        assert_eq!(
            service.endpoint(),
            "http://localhost:9/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_request() {
        let service = GeminiAnalysisService::new(AnalysisConfig {
            api_key: Some("  ".to_string()),
            ..AnalysisConfig::default()
        })
        .unwrap();

        let result = service.analyze_text("A,B\n1,2").await;
        assert!(matches!(result, Err(AnalysisError::MissingApiKey)));

        let result = service.analyze_image(b"bytes", "image/png").await;
        assert!(matches!(result, Err(AnalysisError::MissingApiKey)));
    }
}
