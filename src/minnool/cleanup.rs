//! Optional remote clean-up of extracted text.
//!
//! A generative model is asked to strip page furniture and mend broken
//! lines. The service is best-effort: whatever goes wrong, the caller gets
//! the raw text back unchanged and a warning is logged.

use crate::config::MinnoolConfig;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Only this many leading characters are sent to the model.
pub const MAX_CLEANUP_CHARS: usize = 10_000;

const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

const PROMPT: &str = "The following is raw text extracted from a Tamil PDF. Please clean it up by:
1. Removing page numbers, headers, and footers.
2. Fixing broken words or sentences caused by line breaks.
3. Preserving the Tamil language and structure.
4. Returning only the cleaned text.

Raw Text:
";

#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("no API key (set GEMINI_API_KEY or API_KEY)")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("model returned no text")]
    Empty,
}

pub trait TextCleaner {
    fn clean(&self, raw: &str) -> Result<String, CleanupError>;
}

/// Result of [`clean_or_raw`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cleaned {
    pub text: String,
    /// False when the raw text was returned because clean-up failed.
    pub cleaned: bool,
}

/// Runs `cleaner`, falling back to `raw` on any failure.
pub fn clean_or_raw<C: TextCleaner + ?Sized>(cleaner: &C, raw: &str) -> Cleaned {
    match cleaner.clean(raw) {
        Ok(text) => Cleaned {
            text,
            cleaned: true,
        },
        Err(e) => {
            warn!(error = %e, "text clean-up failed, keeping raw text");
            Cleaned {
                text: raw.to_string(),
                cleaned: false,
            }
        }
    }
}

/// The leading part of `raw` that is sent for clean-up.
pub fn cleanup_input(raw: &str) -> &str {
    match raw.char_indices().nth(MAX_CLEANUP_CHARS) {
        Some((cut, _)) => &raw[..cut],
        None => raw,
    }
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiCleaner {
    endpoint: String,
    model: String,
    timeout: Duration,
    api_key: Option<String>,
}

impl GeminiCleaner {
    pub fn new(endpoint: &str, model: &str, timeout: Duration, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout,
            api_key,
        }
    }

    /// Builds a client from the configuration and the API key found in the
    /// environment.
    pub fn from_config(config: &MinnoolConfig) -> Self {
        Self::new(
            &config.cleanup_endpoint,
            &config.cleanup_model,
            Duration::from_secs(config.cleanup_timeout),
            api_key_from_env(),
        )
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    fn request_body(raw: &str) -> Value {
        json!({
            "contents": [{
                "parts": [{ "text": format!("{}{}", PROMPT, cleanup_input(raw)) }]
            }],
            "generationConfig": {
                "temperature": 0.1,
                "topP": 0.95
            }
        })
    }
}

fn api_key_from_env() -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|key| !key.trim().is_empty())
}

/// Concatenates the text parts of the first candidate.
fn response_text(body: &Value) -> Result<String, CleanupError> {
    let parts = body["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| CleanupError::Malformed("no candidate parts".to_string()))?;

    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    if text.trim().is_empty() {
        return Err(CleanupError::Empty);
    }
    Ok(text)
}

impl TextCleaner for GeminiCleaner {
    fn clean(&self, raw: &str) -> Result<String, CleanupError> {
        let api_key = self.api_key.as_deref().ok_or(CleanupError::MissingApiKey)?;

        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        let body = serde_json::to_string(&Self::request_body(raw))
            .map_err(|e| CleanupError::Request(e.to_string()))?;

        debug!(model = %self.model, chars = cleanup_input(raw).chars().count(), "requesting clean-up");
        let resp = agent
            .post(&self.url())
            .set("Content-Type", "application/json")
            .set("x-goog-api-key", api_key)
            .send_string(&body)
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => CleanupError::Status(code),
                other => CleanupError::Request(other.to_string()),
            })?;

        if resp.status() != 200 {
            return Err(CleanupError::Status(resp.status()));
        }

        let text = resp
            .into_string()
            .map_err(|e| CleanupError::Request(e.to_string()))?;
        let json: Value =
            serde_json::from_str(&text).map_err(|e| CleanupError::Malformed(e.to_string()))?;
        response_text(&json)
    }
}
