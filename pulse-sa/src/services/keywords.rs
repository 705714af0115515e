//! Keyword frequency extraction
//!
//! Tokenizes the full stored corpus by sentiment class and produces
//! frequency-ranked keyword lists for the positive and negative classes.
//! NEUTRAL records contribute to neither. This is a full-corpus scan:
//! cost is O(total stored text length).

use anyhow::Result;
use pulse_common::types::SentimentLabel;
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashMap;

use crate::db;

/// How many keywords each list carries
const TOP_N: usize = 10;

/// Tokens shorter than this are discarded
const MIN_TOKEN_LEN: usize = 4;

/// Keyword lists for both sentiment classes
#[derive(Debug, Clone, Serialize)]
pub struct KeywordAnalysis {
    /// (token, count) pairs, most frequent first
    pub positive_keywords: Vec<(String, usize)>,
    pub negative_keywords: Vec<(String, usize)>,
}

/// Extract top keywords over the full corpus
pub async fn analyze_keywords(pool: &SqlitePool) -> Result<KeywordAnalysis> {
    let rows = db::tweets::fetch_labeled_texts(pool).await?;

    let mut positive = FrequencyTable::new();
    let mut negative = FrequencyTable::new();

    for (text, label) in &rows {
        let table = match label {
            SentimentLabel::Positive => &mut positive,
            SentimentLabel::Negative => &mut negative,
            SentimentLabel::Neutral => continue,
        };
        for token in tokenize(text) {
            table.add(token);
        }
    }

    Ok(KeywordAnalysis {
        positive_keywords: positive.top(TOP_N),
        negative_keywords: negative.top(TOP_N),
    })
}

/// Frequency table with stable, first-encountered tie ordering
struct FrequencyTable {
    // token -> (count, first-seen index)
    counts: HashMap<String, (usize, usize)>,
    next_index: usize,
}

impl FrequencyTable {
    fn new() -> Self {
        Self {
            counts: HashMap::new(),
            next_index: 0,
        }
    }

    fn add(&mut self, token: String) {
        let next_index = &mut self.next_index;
        let entry = self.counts.entry(token).or_insert_with(|| {
            let index = *next_index;
            *next_index += 1;
            (0, index)
        });
        entry.0 += 1;
    }

    /// Top `n` tokens by count, ties broken by first-encountered order
    fn top(&self, n: usize) -> Vec<(String, usize)> {
        let mut entries: Vec<(&String, &(usize, usize))> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
        entries
            .into_iter()
            .take(n)
            .map(|(token, (count, _))| (token.clone(), *count))
            .collect()
    }
}

/// Lowercase word tokens of useful length
///
/// Tokens are maximal runs of alphanumeric/underscore characters; anything
/// of length <= 3 is discarded.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|s| s.chars().count() >= MIN_TOKEN_LEN)
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_short_tokens() {
        // "bad" is length 3 and must be excluded
        let tokens = tokenize("bad bad item");
        assert_eq!(tokens, vec!["item"]);
    }

    #[test]
    fn test_tokenize_lowercases_and_splits_on_punctuation() {
        let tokens = tokenize("Great, GREAT product!");
        assert_eq!(tokens, vec!["great", "great", "product"]);
    }

    #[test]
    fn test_frequency_ranking() {
        let mut table = FrequencyTable::new();
        for token in ["great", "great", "product"] {
            table.add(token.to_string());
        }

        let top = table.top(10);
        assert_eq!(top[0], ("great".to_string(), 2));
        assert_eq!(top[1], ("product".to_string(), 1));
    }

    #[test]
    fn test_ties_broken_by_first_seen() {
        let mut table = FrequencyTable::new();
        for token in ["zebra", "apple", "zebra", "apple", "mango"] {
            table.add(token.to_string());
        }

        let top = table.top(10);
        // zebra and apple tie at 2; zebra was seen first
        assert_eq!(top[0].0, "zebra");
        assert_eq!(top[1].0, "apple");
        assert_eq!(top[2].0, "mango");
    }

    #[test]
    fn test_top_n_bounds_output() {
        let mut table = FrequencyTable::new();
        for i in 0..25 {
            table.add(format!("token{:02}", i));
        }
        assert_eq!(table.top(10).len(), 10);
    }
}
