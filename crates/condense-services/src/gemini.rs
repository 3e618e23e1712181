//! Gemini summarization provider.
//!
//! Uses the generateContent API: the combined prompt goes in, the model's
//! free-text output comes back verbatim. A single failed attempt is terminal
//! for the request; no retry.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::prompt::build_prompt;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Error)]
#[error("{0}")]
pub struct SummarizeError(pub String);

/// Generative-model collaborator contract: prompt in, text out.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError>;
}

#[derive(Clone)]
pub struct GeminiService {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

// generateContent request/response
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

impl GeminiService {
    pub fn new(api_key: String, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            api_key,
            model,
            client,
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            GEMINI_API_BASE, self.model
        )
    }

    async fn call_generate(&self, prompt: String) -> Result<String, SummarizeError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.generate_url())
            .query(&[("key", self.api_key.as_str())])
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| SummarizeError(format!("Failed to send generateContent request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SummarizeError(format!(
                "Gemini generateContent failed with status {}: {}",
                status, error_text
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| SummarizeError(format!("Failed to parse generateContent response: {}", e)))?;

        response_text(parsed)
            .ok_or_else(|| SummarizeError("Gemini returned no candidates".to_string()))
    }
}

/// Pull the text out of the first candidate; multiple parts are concatenated.
fn response_text(response: GenerateContentResponse) -> Option<String> {
    let candidate = response.candidates.into_iter().next()?;
    let text: String = candidate
        .content
        .parts
        .into_iter()
        .map(|p| p.text)
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[async_trait]
impl SummaryProvider for GeminiService {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let prompt = build_prompt(text);
        tracing::debug!(prompt_len = prompt.len(), model = %self.model, "Requesting summary");
        let summary = self.call_generate(prompt).await?;
        tracing::debug!(summary_len = summary.len(), "Summary generated");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "📝 **Main Topics**\n" },
                        { "text": "* Topic A" }
                    ],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        }))
        .expect("deserialize");

        assert_eq!(
            response_text(response).unwrap(),
            "📝 **Main Topics**\n* Topic A"
        );
    }

    #[test]
    fn test_response_text_empty_candidates_is_none() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).expect("deserialize");
        assert!(response_text(response).is_none());
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "prompt".to_string(),
                }],
            }],
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "prompt");
    }

    #[test]
    fn test_generate_url_includes_model() {
        let service = GeminiService::new("k".to_string(), "gemini-2.0-flash".to_string());
        assert_eq!(
            service.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }
}
