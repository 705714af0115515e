//! Sentiment resolution with provider fallback
//!
//! Providers are tried in order until one yields a result. The remote
//! Hugging Face provider is authoritative when available; the lexicon
//! scorer is the guaranteed-available fallback. The resolver itself never
//! fails to produce a result.

use async_trait::async_trait;
use pulse_common::types::{AnalysisMethod, SentimentResult};
use tracing::debug;

use crate::services::huggingface::HuggingFaceClient;
use crate::services::lexicon::LexiconScorer;

/// A sentiment classification capability
///
/// `classify` returns `None` when the provider cannot produce a result
/// (unavailable, timed out, malformed response). Absence is a signal to
/// fall back, never an error.
#[async_trait]
pub trait SentimentProvider: Send + Sync {
    /// Provenance tag attached to this provider's results
    fn method(&self) -> AnalysisMethod;

    /// Classify text, or decline
    async fn classify(&self, text: &str) -> Option<SentimentResult>;
}

/// Ordered provider chain
///
/// Adding a provider means pushing another boxed entry; call sites do not
/// change.
pub struct SentimentResolver {
    providers: Vec<Box<dyn SentimentProvider>>,
}

impl SentimentResolver {
    /// Build a resolver from an explicit provider chain
    pub fn new(providers: Vec<Box<dyn SentimentProvider>>) -> Self {
        Self { providers }
    }

    /// Default chain: remote Hugging Face (when configured), then lexicon
    pub fn with_default_chain(remote: Option<HuggingFaceClient>) -> Self {
        let mut providers: Vec<Box<dyn SentimentProvider>> = Vec::new();
        if let Some(client) = remote {
            providers.push(Box::new(client));
        }
        providers.push(Box::new(LexiconScorer::new()));
        Self::new(providers)
    }

    /// Resolve a sentiment for the text
    ///
    /// Tries each provider in order and returns the first result. Always
    /// produces a value: if every provider declines (only possible with a
    /// custom chain), returns the fixed neutral result.
    pub async fn resolve(&self, text: &str) -> SentimentResult {
        for provider in &self.providers {
            if let Some(result) = provider.classify(text).await {
                debug!(method = ?result.method, label = ?result.label, "Sentiment resolved");
                return result;
            }
            debug!(method = ?provider.method(), "Provider declined, falling back");
        }
        SentimentResult::neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_common::types::SentimentLabel;

    /// Provider that always declines, standing in for an unreachable
    /// remote service
    struct NeverProvider;

    #[async_trait]
    impl SentimentProvider for NeverProvider {
        fn method(&self) -> AnalysisMethod {
            AnalysisMethod::HuggingFace
        }

        async fn classify(&self, _text: &str) -> Option<SentimentResult> {
            None
        }
    }

    /// Provider with a canned answer
    struct FixedProvider(SentimentResult);

    #[async_trait]
    impl SentimentProvider for FixedProvider {
        fn method(&self) -> AnalysisMethod {
            self.0.method
        }

        async fn classify(&self, _text: &str) -> Option<SentimentResult> {
            Some(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_falls_back_to_lexicon_when_remote_declines() {
        let resolver = SentimentResolver::new(vec![
            Box::new(NeverProvider),
            Box::new(LexiconScorer::new()),
        ]);

        let text = "I love this amazing product";
        let resolved = resolver.resolve(text).await;
        let direct = LexiconScorer::new().classify(text);

        // With the remote declining, resolver output equals the scorer's
        assert_eq!(resolved, direct);
        assert_eq!(resolved.method, AnalysisMethod::Lexicon);
    }

    #[tokio::test]
    async fn test_first_provider_wins() {
        let canned = SentimentResult {
            label: SentimentLabel::Negative,
            score: 0.99,
            method: AnalysisMethod::HuggingFace,
        };
        let resolver = SentimentResolver::new(vec![
            Box::new(FixedProvider(canned.clone())),
            Box::new(LexiconScorer::new()),
        ]);

        let resolved = resolver.resolve("I love this").await;
        assert_eq!(resolved, canned);
    }

    #[tokio::test]
    async fn test_exhausted_chain_yields_neutral() {
        let resolver = SentimentResolver::new(vec![Box::new(NeverProvider)]);
        let resolved = resolver.resolve("anything").await;
        assert_eq!(resolved, SentimentResult::neutral());
    }

    #[tokio::test]
    async fn test_resolver_is_total_over_inputs() {
        let resolver = SentimentResolver::with_default_chain(None);
        for text in ["", "great", "terrible", "1234 !!!! \u{1F600}", "neutral words here"] {
            let result = resolver.resolve(text).await;
            assert!(
                matches!(
                    result.label,
                    SentimentLabel::Positive | SentimentLabel::Negative | SentimentLabel::Neutral
                ),
                "label for {:?}",
                text
            );
            assert!((0.0..=1.0).contains(&result.score), "score for {:?}", text);
        }
    }
}
