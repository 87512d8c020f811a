//! Prompt text sent to the analysis service.

/// Prompt asking for a JSON description of a chart image.
pub fn chart_image_prompt(language: &str) -> String {
    format!(
        r#"Analyze the data chart in this image. Answer in {language}.
Return only a JSON object, without a Markdown code block, in this shape:

{{
  "chartType": "What kind of chart is this? (e.g. bar, line, pie)",
  "title": "The chart's title or subject",
  "summary": "A short summary of what the chart shows (at most 2 sentences)",
  "insights": ["Insight 1", "Insight 2", "Insight 3"]
}}"#
    )
}

/// Prompt asking for a short narrative about a data snippet.
pub fn data_snippet_prompt(language: &str, snippet: &str) -> String {
    format!(
        r#"Write a short analysis in {language} of the following delimited data.

Data:
{snippet}

Please cover:
1. The overall trend of the data.
2. The most notable highest and lowest values.
3. A simple forecast for the next period, if this is a time series.

Answer as plain text with bullet points only."#
    )
}
