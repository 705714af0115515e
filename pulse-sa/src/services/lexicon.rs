//! Lexicon-based sentiment scorer
//!
//! The guaranteed-available fallback classifier. Scores text with a static
//! word lexicon: each entry carries a polarity weight in [-1, 1] and a
//! subjectivity weight in [0, 1]. Polarity is the mean weight of matched
//! words (negators flip, intensifiers scale); subjectivity is the fraction
//! of tokens that are subjective lexicon hits.
//!
//! This module never fails: empty, unmatchable, or pathological input
//! degrades to a neutral result instead of raising.

use async_trait::async_trait;
use pulse_common::types::{AnalysisMethod, SentimentLabel, SentimentResult};

use crate::services::resolver::SentimentProvider;

/// Polarity band above which text is labeled POSITIVE
const POSITIVE_THRESHOLD: f64 = 0.1;

/// Polarity band below which text is labeled NEGATIVE
const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Fixed score reported for NEUTRAL classifications
const NEUTRAL_SCORE: f64 = 0.5;

/// Negation flips and dampens the following sentiment word
const NEGATION_FACTOR: f64 = -0.5;

/// How many tokens a negator affects
const NEGATION_WINDOW: usize = 3;

/// Word lexicon: (word, polarity, subjectivity)
#[rustfmt::skip]
static LEXICON: &[(&str, f64, f64)] = &[
    // Positive
    ("amazing", 0.7, 0.9), ("awesome", 0.8, 0.9), ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3), ("better", 0.5, 0.5), ("brilliant", 0.9, 0.9),
    ("delicious", 0.8, 1.0), ("delighted", 0.8, 0.9), ("enjoy", 0.4, 0.5),
    ("excellent", 1.0, 1.0), ("exciting", 0.45, 0.8), ("fantastic", 0.9, 0.9),
    ("fast", 0.2, 0.5), ("flawless", 0.9, 0.9), ("fun", 0.3, 0.4),
    ("glad", 0.5, 1.0), ("good", 0.7, 0.6), ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0), ("helpful", 0.5, 0.3), ("impressive", 0.8, 0.9),
    ("incredible", 0.9, 0.9), ("love", 0.5, 0.6), ("loved", 0.7, 0.8),
    ("nice", 0.6, 1.0), ("outstanding", 0.9, 0.9), ("perfect", 1.0, 1.0),
    ("pleasant", 0.6, 0.8), ("pleased", 0.6, 0.8), ("recommend", 0.4, 0.3),
    ("reliable", 0.5, 0.4), ("satisfied", 0.5, 0.6), ("smooth", 0.4, 0.6),
    ("solid", 0.4, 0.4), ("stunning", 0.85, 1.0), ("superb", 0.9, 0.9),
    ("thanks", 0.3, 0.3), ("wonderful", 1.0, 1.0), ("works", 0.2, 0.2),
    ("worth", 0.3, 0.3),
    // Negative
    ("angry", -0.7, 0.9), ("annoying", -0.6, 0.8), ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.65), ("broken", -0.4, 0.4), ("buggy", -0.6, 0.7),
    ("crash", -0.5, 0.4), ("crashes", -0.5, 0.4), ("defective", -0.6, 0.5),
    ("disappointed", -0.6, 0.75), ("disappointing", -0.6, 0.7),
    ("disgusting", -0.9, 1.0), ("dreadful", -0.9, 1.0), ("fail", -0.6, 0.5),
    ("failed", -0.6, 0.5), ("failure", -0.6, 0.5), ("frustrated", -0.6, 0.8),
    ("frustrating", -0.6, 0.8), ("garbage", -0.8, 0.9), ("hate", -0.8, 0.9),
    ("hated", -0.9, 0.9), ("horrible", -1.0, 1.0), ("issue", -0.3, 0.3),
    ("lousy", -0.7, 0.8), ("mediocre", -0.3, 0.6), ("mess", -0.5, 0.6),
    ("nasty", -0.8, 0.9), ("pathetic", -0.8, 0.9), ("poor", -0.6, 0.6),
    ("problem", -0.3, 0.3), ("refund", -0.3, 0.2), ("sad", -0.5, 1.0),
    ("scam", -0.9, 0.8), ("slow", -0.3, 0.4), ("terrible", -1.0, 1.0),
    ("trash", -0.7, 0.8), ("ugly", -0.7, 0.9), ("unreliable", -0.5, 0.5),
    ("unusable", -0.7, 0.6), ("useless", -0.7, 0.7), ("waste", -0.6, 0.6),
    ("worse", -0.6, 0.6), ("worst", -1.0, 0.9), ("wrong", -0.5, 0.5),
];

/// Intensifiers scale the next sentiment word: (word, factor)
#[rustfmt::skip]
static INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.5), ("completely", 1.4), ("extremely", 1.5),
    ("highly", 1.3), ("incredibly", 1.5), ("quite", 1.1),
    ("really", 1.2), ("so", 1.2), ("totally", 1.4), ("truly", 1.3),
    ("utterly", 1.5), ("very", 1.3),
];

static NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "nobody", "none", "neither", "nor",
    "cannot", "cant", "dont", "doesnt", "didnt", "wont", "isnt", "wasnt",
];

/// Lexicon scorer provider
///
/// Stateless; cheap to construct and clone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }

    /// Compute (polarity, subjectivity) for a text
    ///
    /// Polarity is in [-1, 1], subjectivity in [0, 1]. Empty or
    /// unmatchable text yields (0.0, 0.0); this never fails.
    pub fn score_text(&self, text: &str) -> (f64, f64) {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return (0.0, 0.0);
        }

        let mut polarity_sum = 0.0;
        let mut matched = 0usize;
        let mut subjective_hits = 0usize;
        let mut intensifier = 1.0;
        let mut negation_window = 0usize;

        for token in &tokens {
            let word = token.as_str();

            if NEGATORS.contains(&word) {
                negation_window = NEGATION_WINDOW;
                continue;
            }

            if let Some((_, factor)) = INTENSIFIERS.iter().find(|(w, _)| *w == word) {
                intensifier *= factor;
                continue;
            }

            if let Some((_, polarity, subjectivity)) =
                LEXICON.iter().find(|(w, _, _)| *w == word)
            {
                let mut weight = polarity * intensifier;
                if negation_window > 0 {
                    weight *= NEGATION_FACTOR;
                }
                polarity_sum += weight;
                matched += 1;
                if *subjectivity >= 0.5 {
                    subjective_hits += 1;
                }
            }

            intensifier = 1.0;
            negation_window = negation_window.saturating_sub(1);
        }

        if matched == 0 {
            return (0.0, 0.0);
        }

        let polarity = (polarity_sum / matched as f64).clamp(-1.0, 1.0);
        let subjectivity = (subjective_hits as f64 / tokens.len() as f64).clamp(0.0, 1.0);

        if !polarity.is_finite() || !subjectivity.is_finite() {
            tracing::warn!("Lexicon scoring produced non-finite values, degrading to neutral");
            return (0.0, 0.0);
        }

        (polarity, subjectivity)
    }

    /// Classify a text into a sentiment result via threshold bands
    pub fn classify(&self, text: &str) -> SentimentResult {
        let (polarity, _subjectivity) = self.score_text(text);
        label_from_polarity(polarity)
    }
}

/// Map a polarity value onto the canonical label bands
///
/// polarity > 0.1 is POSITIVE with score |polarity|; polarity < -0.1 is
/// NEGATIVE with score |polarity|; anything between is NEUTRAL with the
/// fixed score 0.5 (not derived from polarity).
pub fn label_from_polarity(polarity: f64) -> SentimentResult {
    if !polarity.is_finite() {
        return SentimentResult::neutral();
    }

    let (label, score) = if polarity > POSITIVE_THRESHOLD {
        (SentimentLabel::Positive, polarity.abs())
    } else if polarity < NEGATIVE_THRESHOLD {
        (SentimentLabel::Negative, polarity.abs())
    } else {
        (SentimentLabel::Neutral, NEUTRAL_SCORE)
    };

    SentimentResult {
        label,
        score: score.clamp(0.0, 1.0),
        method: AnalysisMethod::Lexicon,
    }
}

/// Lowercase word tokens: maximal runs of alphanumeric/underscore chars
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[async_trait]
impl SentimentProvider for LexiconScorer {
    fn method(&self) -> AnalysisMethod {
        AnalysisMethod::Lexicon
    }

    async fn classify(&self, text: &str) -> Option<SentimentResult> {
        Some(LexiconScorer::classify(self, text))
    }
}
