//! Hugging Face inference API client
//!
//! Remote sentiment provider. Sends text to a binary-sentiment
//! classification endpoint and maps the best-scoring candidate onto the
//! canonical result shape. Every failure mode — missing credential,
//! transport error, timeout, non-success status, malformed or empty body —
//! yields `None`, signalling the resolver to fall back. One attempt per
//! call, no retries: failures are expected and cheap to route around.

use async_trait::async_trait;
use pulse_common::types::{AnalysisMethod, SentimentLabel, SentimentResult};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::services::resolver::SentimentProvider;

const HF_INFERENCE_URL: &str =
    "https://api-inference.huggingface.co/models/distilbert-base-uncased-finetuned-sst-2-english";
const USER_AGENT: &str = concat!("pulse-sa/", env!("CARGO_PKG_VERSION"));

/// One ranked candidate from the inference endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct HfCandidate {
    pub label: String,
    pub score: f64,
}

/// Hugging Face API client
pub struct HuggingFaceClient {
    http_client: reqwest::Client,
    api_key: String,
}

impl HuggingFaceClient {
    /// Create a client with a bounded request timeout
    pub fn new(api_key: String, timeout: Duration) -> pulse_common::Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| pulse_common::Error::Internal(format!("HTTP client build failed: {}", e)))?;

        Ok(Self { http_client, api_key })
    }

    /// Classify text via the remote endpoint, or decline
    pub async fn classify_remote(&self, text: &str) -> Option<SentimentResult> {
        if self.api_key.trim().is_empty() {
            debug!("No Hugging Face credential configured, declining");
            return None;
        }

        let response = match self
            .http_client
            .post(HF_INFERENCE_URL)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "inputs": text }))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Hugging Face request failed: {}", e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Hugging Face returned status {}", status);
            return None;
        }

        let body: serde_json::Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Hugging Face response was not JSON: {}", e);
                return None;
            }
        };

        let result = parse_response(&body);
        if result.is_none() {
            warn!("Hugging Face response had no usable candidates");
        }
        result
    }
}

/// Extract the best-scoring candidate from a response body
///
/// The endpoint wraps candidates in a nested list (`[[{label, score}, …]]`);
/// a flat list is tolerated as well. Empty or unrecognizable bodies yield
/// `None`.
pub fn parse_response(body: &serde_json::Value) -> Option<SentimentResult> {
    let candidates: Vec<HfCandidate> =
        if let Ok(nested) = serde_json::from_value::<Vec<Vec<HfCandidate>>>(body.clone()) {
            nested.into_iter().next()?
        } else if let Ok(flat) = serde_json::from_value::<Vec<HfCandidate>>(body.clone()) {
            flat
        } else {
            return None;
        };

    let best = candidates
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))?;

    Some(SentimentResult {
        label: map_label(&best.label),
        score: best.score.clamp(0.0, 1.0),
        method: AnalysisMethod::HuggingFace,
    })
}

/// Map an upstream label onto the canonical set
///
/// The model emits only POSITIVE and NEGATIVE; any other label is folded
/// into NEGATIVE.
fn map_label(label: &str) -> SentimentLabel {
    if label == "POSITIVE" {
        SentimentLabel::Positive
    } else {
        SentimentLabel::Negative
    }
}

#[async_trait]
impl SentimentProvider for HuggingFaceClient {
    fn method(&self) -> AnalysisMethod {
        AnalysisMethod::HuggingFace
    }

    async fn classify(&self, text: &str) -> Option<SentimentResult> {
        self.classify_remote(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let client = HuggingFaceClient::new("test_key".to_string(), Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_parse_nested_response_picks_max_score() {
        let body = json!([[
            { "label": "NEGATIVE", "score": 0.0021 },
            { "label": "POSITIVE", "score": 0.9979 }
        ]]);

        let result = parse_response(&body).expect("Should parse");
        assert_eq!(result.label, SentimentLabel::Positive);
        assert!((result.score - 0.9979).abs() < 1e-9);
        assert_eq!(result.method, AnalysisMethod::HuggingFace);
    }

    #[test]
    fn test_parse_flat_response() {
        let body = json!([
            { "label": "NEGATIVE", "score": 0.87 },
            { "label": "POSITIVE", "score": 0.13 }
        ]);

        let result = parse_response(&body).expect("Should parse");
        assert_eq!(result.label, SentimentLabel::Negative);
        assert!((result.score - 0.87).abs() < 1e-9);
    }

    #[test]
    fn test_parse_empty_and_malformed_bodies() {
        assert!(parse_response(&json!([])).is_none());
        assert!(parse_response(&json!([[]])).is_none());
        assert!(parse_response(&json!({"error": "model loading"})).is_none());
        assert!(parse_response(&json!("nope")).is_none());
    }

    #[test]
    fn test_unknown_label_folds_to_negative() {
        let body = json!([[ { "label": "MIXED", "score": 0.6 } ]]);
        let result = parse_response(&body).unwrap();
        assert_eq!(result.label, SentimentLabel::Negative);
    }

    #[test]
    fn test_out_of_range_score_clamped() {
        let body = json!([[ { "label": "POSITIVE", "score": 1.2 } ]]);
        let result = parse_response(&body).unwrap();
        assert!((result.score - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_missing_credential_declines_without_network() {
        let client =
            HuggingFaceClient::new(String::new(), Duration::from_millis(10)).unwrap();
        assert!(client.classify_remote("some text").await.is_none());
    }
}
