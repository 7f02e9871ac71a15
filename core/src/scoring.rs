//! Heuristic relevance: TF-IDF plus fixed additive boosts.
//!
//! The boost values and topical keyword list are empirical, not derived, so they
//! live in [`ScoringConfig`] rather than in the scoring code.

use crate::index::{DocId, InvertedIndex};
use crate::synonyms::ExpandedQuery;

#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Ids above this are crawled posts rather than static seed documents.
    pub static_seed_count: DocId,
    pub recency_boost: f64,
    pub quality_boost: f64,
    /// The quality boost applies to documents with strictly more tokens than this.
    pub quality_min_tokens: usize,
    pub topical_boost: f64,
    pub topical_keywords: Vec<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            static_seed_count: crate::seed::SEED_DOCUMENT_COUNT,
            recency_boost: 0.3,
            quality_boost: 0.2,
            quality_min_tokens: 5,
            topical_boost: 0.5,
            topical_keywords: ["ai", "search", "news", "breaking"].iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Per-component contributions to a document's score.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub lexical: f64,
    pub recency: f64,
    pub quality: f64,
    pub topical: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 { self.lexical + self.recency + self.quality + self.topical }

    /// Names of the boosts that fired, e.g. `"recency + quality"`.
    pub fn boosts(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.recency > 0.0 { out.push("recency"); }
        if self.quality > 0.0 { out.push("quality"); }
        if self.topical > 0.0 { out.push("topical"); }
        out
    }
}

/// Inverse document frequency, `ln(n / df)`. Zero when the term is unknown.
pub fn idf(num_docs: usize, doc_freq: usize) -> f64 {
    if doc_freq == 0 || num_docs == 0 {
        return 0.0;
    }
    (num_docs as f64 / doc_freq as f64).ln()
}

pub struct Scorer<'a> {
    index: &'a InvertedIndex,
    config: &'a ScoringConfig,
}

impl<'a> Scorer<'a> {
    pub fn new(index: &'a InvertedIndex, config: &'a ScoringConfig) -> Self { Self { index, config } }

    pub fn score(&self, query: &ExpandedQuery, doc_id: DocId) -> f64 {
        self.breakdown(query, doc_id).total()
    }

    pub fn breakdown(&self, query: &ExpandedQuery, doc_id: DocId) -> ScoreBreakdown {
        let Some(doc_len) = self.index.doc_length(doc_id) else {
            return ScoreBreakdown::default();
        };
        let mut out = ScoreBreakdown::default();

        // zero-token documents have no postings and contribute no lexical score
        if doc_len > 0 {
            let n = self.index.num_docs();
            for term in query.iter() {
                let Some(postings) = self.index.postings(term) else { continue };
                if let Some(p) = postings.iter().find(|p| p.doc_id == doc_id) {
                    let tf = p.term_frequency as f64 / doc_len as f64;
                    out.lexical += tf * idf(n, postings.len());
                }
            }
        }

        if doc_id > self.config.static_seed_count {
            out.recency = self.config.recency_boost;
        }
        if doc_len > self.config.quality_min_tokens {
            out.quality = self.config.quality_boost;
        }
        let topical = self
            .config
            .topical_keywords
            .iter()
            .any(|kw| self.index.term_frequency(kw, doc_id).is_some());
        if topical {
            out.topical = self.config.topical_boost;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Document;
    use crate::synonyms::SynonymTable;

    fn index(contents: &[&str]) -> InvertedIndex {
        let docs: Vec<Document> = contents
            .iter()
            .enumerate()
            .map(|(i, c)| Document { id: i as DocId + 1, url: String::new(), content: c.to_string(), timestamp: None })
            .collect();
        InvertedIndex::build(&docs)
    }

    fn query(words: &[&str]) -> ExpandedQuery {
        let toks: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        SynonymTable::empty().expand(&toks)
    }

    #[test]
    fn idf_is_non_negative() {
        assert_eq!(idf(10, 10), 0.0);
        assert!(idf(10, 3) > 0.0);
        assert_eq!(idf(10, 0), 0.0);
    }

    #[test]
    fn tf_idf_component() {
        let idx = index(&["rust rust python", "python", "java"]);
        let config = ScoringConfig::default();
        let b = Scorer::new(&idx, &config).breakdown(&query(&["rust"]), 1);
        let expected = (2.0 / 3.0) * (3.0f64 / 1.0).ln();
        assert!((b.lexical - expected).abs() < 1e-12);
        assert_eq!(b.quality, 0.0);
        assert_eq!(b.topical, 0.0);
        assert_eq!(b.recency, 0.0);
    }

    #[test]
    fn single_token_ai_document() {
        let idx = index(&["ai"]);
        let config = ScoringConfig::default();
        let b = Scorer::new(&idx, &config).breakdown(&query(&["ai"]), 1);
        assert_eq!(b.quality, 0.0);
        assert_eq!(b.topical, 0.5);
        // one document containing the term: ln(1/1) = 0
        assert_eq!(b.lexical, 0.0);
    }

    #[test]
    fn quality_boost_needs_more_than_five_tokens() {
        let idx = index(&["one two three four five", "one two three four five six"]);
        let config = ScoringConfig::default();
        let scorer = Scorer::new(&idx, &config);
        assert_eq!(scorer.breakdown(&query(&["one"]), 1).quality, 0.0);
        assert_eq!(scorer.breakdown(&query(&["one"]), 2).quality, 0.2);
    }

    #[test]
    fn recency_boost_above_seed_range() {
        let idx = index(&["x", "y", "z"]);
        let config = ScoringConfig { static_seed_count: 2, ..ScoringConfig::default() };
        let scorer = Scorer::new(&idx, &config);
        assert_eq!(scorer.breakdown(&query(&["x"]), 2).recency, 0.0);
        assert_eq!(scorer.breakdown(&query(&["z"]), 3).recency, 0.3);
        assert_eq!(scorer.breakdown(&query(&["z"]), 3).boosts(), vec!["recency"]);
    }

    #[test]
    fn empty_document_scores_without_dividing() {
        let idx = index(&["", "ai"]);
        let config = ScoringConfig::default();
        let s = Scorer::new(&idx, &config).score(&query(&["ai"]), 1);
        assert_eq!(s, 0.0);
    }

    #[test]
    fn unknown_document_scores_zero() {
        let idx = index(&["ai"]);
        let config = ScoringConfig { static_seed_count: 0, ..ScoringConfig::default() };
        assert_eq!(Scorer::new(&idx, &config).score(&query(&["ai"]), 42), 0.0);
    }
}
