//! Canonical sentiment types shared across services
//!
//! These are the wire and storage representations of a classification:
//! label, confidence score, and which provider produced it.

use serde::{Deserialize, Serialize};

/// Sentiment classification label
///
/// Stored in the `sentiment_label` column and emitted on the wire in
/// upper-case form (`POSITIVE` / `NEGATIVE` / `NEUTRAL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Storage/wire form of the label
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
        }
    }

    /// Parse the storage form back into a label
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "POSITIVE" => Some(SentimentLabel::Positive),
            "NEGATIVE" => Some(SentimentLabel::Negative),
            "NEUTRAL" => Some(SentimentLabel::Neutral),
            _ => None,
        }
    }
}

/// Which provider produced a classification
///
/// `HuggingFace` is the remote inference service; `Lexicon` is the local
/// word-lexicon scorer used as the guaranteed-available fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisMethod {
    HuggingFace,
    Lexicon,
}

impl AnalysisMethod {
    /// Storage/wire form of the provenance tag
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMethod::HuggingFace => "HuggingFace",
            AnalysisMethod::Lexicon => "Lexicon",
        }
    }

    /// Parse the storage form back into a method tag
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "HuggingFace" => Some(AnalysisMethod::HuggingFace),
            "Lexicon" => Some(AnalysisMethod::Lexicon),
            _ => None,
        }
    }
}

/// Resolver output before storage attaches text/brand/timestamp
///
/// Invariant: `score` is in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub score: f64,
    pub method: AnalysisMethod,
}

impl SentimentResult {
    /// Fixed neutral result used when every scoring path degrades
    pub fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            score: 0.5,
            method: AnalysisMethod::Lexicon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_roundtrip() {
        for label in [
            SentimentLabel::Positive,
            SentimentLabel::Negative,
            SentimentLabel::Neutral,
        ] {
            assert_eq!(SentimentLabel::parse(label.as_str()), Some(label));
        }
        assert_eq!(SentimentLabel::parse("positive"), None);
    }

    #[test]
    fn test_label_wire_casing() {
        let json = serde_json::to_string(&SentimentLabel::Positive).unwrap();
        assert_eq!(json, "\"POSITIVE\"");
        let back: SentimentLabel = serde_json::from_str("\"NEGATIVE\"").unwrap();
        assert_eq!(back, SentimentLabel::Negative);
    }

    #[test]
    fn test_method_roundtrip() {
        for method in [AnalysisMethod::HuggingFace, AnalysisMethod::Lexicon] {
            assert_eq!(AnalysisMethod::parse(method.as_str()), Some(method));
        }
    }

    #[test]
    fn test_neutral_result() {
        let result = SentimentResult::neutral();
        assert_eq!(result.label, SentimentLabel::Neutral);
        assert_eq!(result.score, 0.5);
        assert_eq!(result.method, AnalysisMethod::Lexicon);
    }
}
