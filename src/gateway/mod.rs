//! Gateway to the external generative-text service.
//!
//! The rest of the app treats the model as an opaque prompt-in/text-out
//! function behind the [`TextCompletion`] trait. The Gemini implementation
//! makes a single blocking request per call: no retries, no streaming.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::GeminiConfig;
use crate::error::AppError;

#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Sends `prompt` and returns the raw text of the first candidate.
    async fn complete(&self, prompt: &str) -> Result<String, AppError>;
}

// --- Gemini wire types ---

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            http: Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
        }
    }

    fn build_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

#[async_trait]
impl TextCompletion for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(self.build_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::GatewayUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::GatewayUnavailable(format!(
                "unexpected status {status}"
            )));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AppError::GatewayMalformedResponse(e.to_string()))?;

        let text = payload
            .candidates
            .and_then(|mut c| if c.is_empty() { None } else { Some(c.remove(0)) })
            .and_then(|c| c.content)
            .and_then(|mut c| if c.parts.is_empty() { None } else { Some(c.parts.remove(0)) })
            .map(|p| p.text)
            .ok_or_else(|| {
                AppError::GatewayMalformedResponse("response has no candidate text".into())
            })?;

        debug!(chars = text.len(), "completion received");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_wire_contract() {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hello".into(),
                }],
            }],
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn response_envelope_parses_candidate_text() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"plan text"}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).expect("parse");
        let text = parsed.candidates.unwrap().remove(0).content.unwrap().parts[0]
            .text
            .clone();
        assert_eq!(text, "plan text");
    }

    #[test]
    fn empty_envelope_is_tolerated_by_serde() {
        let parsed: GenerateResponse = serde_json::from_str("{}").expect("parse");
        assert!(parsed.candidates.is_none());
    }

    #[test]
    fn url_embeds_model_and_key() {
        let client = GeminiClient::new(&GeminiConfig {
            api_key: "k".into(),
            model: "gemini-1.5-flash".into(),
            base_url: "https://example.test/v1beta".into(),
        });
        assert_eq!(
            client.build_url(),
            "https://example.test/v1beta/models/gemini-1.5-flash:generateContent?key=k"
        );
    }
}
