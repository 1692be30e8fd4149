//! Gemini `generateContent` client used to analyze build logs.
//!
//! One request per [`LogAnalysisClient::analyze`] call; no retries.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{AnalyzerConfig, GEMINI_API_KEY_VAR};
use crate::domain::{AnalysisError, AnalysisResult, LogContent, Result};
use crate::obs;
use crate::prompt::AnalysisPrompt;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the AI text-generation endpoint.
pub struct LogAnalysisClient {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
    max_log_chars: Option<usize>,
}

impl LogAnalysisClient {
    /// Build a client from the run configuration.
    pub fn new(config: &AnalyzerConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(AnalysisError::Transport)?;

        Ok(LogAnalysisClient {
            http,
            api_key: config.gemini_api_key.clone(),
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                config.gemini_api_base, config.model
            ),
            model: config.model.clone(),
            max_log_chars: config.max_log_chars,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Analyze a build log and return the generated explanation.
    ///
    /// Fails with `InvalidInput` on an empty log and `MissingCredential`
    /// without an API key; neither case touches the network.
    pub async fn analyze(&self, log: &LogContent) -> Result<AnalysisResult> {
        if log.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "log content is empty".to_string(),
            ));
        }
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(AnalysisError::MissingCredential {
                var: GEMINI_API_KEY_VAR,
            })?;

        let prompt = AnalysisPrompt::build(log, self.max_log_chars);
        obs::emit_analysis_started(&self.model, log.char_count(), prompt.truncated());

        let start = Instant::now();
        let request = GenerateContentRequest::from_prompt(prompt.as_str());
        let response = self
            .http
            .post(&self.endpoint)
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await
            .map_err(AnalysisError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(AnalysisError::Transport)?;
        if !status.is_success() {
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let text = extract_text(&body)?;
        let duration_ms = start.elapsed().as_millis() as u64;
        let result_chars = text.chars().count();
        debug!(chars = result_chars, "extracted analysis text");
        obs::emit_analysis_finished(&self.model, duration_ms, result_chars);

        Ok(AnalysisResult::new(text, self.model.clone(), duration_ms))
    }

    /// Analyze raw text without a backing file.
    pub async fn analyze_text(&self, log: &str) -> Result<AnalysisResult> {
        self.analyze(&LogContent::new(log)).await
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_prompt(prompt: &'a str) -> Self {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig { temperature: 0.0 },
        }
    }
}

/// Response body of `generateContent`.
///
/// A flat `{"text": ...}` body is accepted as well, as returned by some
/// proxies in front of the API.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Pull the analysis text out of a response body.
///
/// Only the first candidate is used; its text parts are concatenated. A
/// blocked prompt or a candidate without text is a malformed response.
fn extract_text(body: &str) -> Result<String> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| AnalysisError::MalformedResponse(format!("invalid JSON body: {e}")))?;

    if let Some(text) = response.text.filter(|t| !t.is_empty()) {
        return Ok(text);
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!("prompt blocked: {r}"))
            .unwrap_or_else(|| "response has no candidates".to_string());
        return Err(AnalysisError::MalformedResponse(reason));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "UNKNOWN".to_string());
        return Err(AnalysisError::MalformedResponse(format!(
            "first candidate has no text (finish reason: {reason})"
        )));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_first_candidate_text() {
        let body = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Root cause: "}, {"text": "OOM"}]}, "finishReason": "STOP"},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        assert_eq!(extract_text(body).unwrap(), "Root cause: OOM");
    }

    #[test]
    fn test_extract_flat_text_field() {
        assert_eq!(
            extract_text(r#"{"text": "root cause: X"}"#).unwrap(),
            "root cause: X"
        );
    }

    #[test]
    fn test_blocked_prompt_is_malformed() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let err = extract_text(body).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(ref m) if m.contains("SAFETY")));
    }

    #[test]
    fn test_safety_filtered_candidate_is_malformed() {
        let body = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let err = extract_text(body).unwrap_err();
        assert!(err.to_string().contains("finish reason: SAFETY"));
    }

    #[test]
    fn test_non_json_body_is_malformed() {
        let err = extract_text("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn test_request_body_shape() {
        let request = GenerateContentRequest::from_prompt("hello");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["generationConfig"]["temperature"], 0.0);
    }

    #[test]
    fn test_endpoint_uses_model_and_base() {
        let config = AnalyzerConfig::default()
            .with_gemini_api_base("http://localhost:1234/")
            .with_model("gemini-1.5-flash");
        let client = LogAnalysisClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint,
            "http://localhost:1234/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert_eq!(client.model(), "gemini-1.5-flash");
    }
}
