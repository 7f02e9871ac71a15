use crate::cache::ExpansionCache;
use crate::index::{DocId, InvertedIndex};
use crate::scoring::{Scorer, ScoringConfig};
use crate::snapshot::IndexSnapshot;
use crate::synonyms::{ExpandedQuery, SynonymTable};
use crate::tokenizer::tokenize;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;

pub const DEFAULT_TOP_K: usize = 3;
pub const NO_RESULTS_MESSAGE: &str = "No results found!";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredResult {
    pub score: f64,
    pub doc_id: DocId,
}

/// One ranked hit, or the "no results" sentinel when `doc_id` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub content: String,
    pub explanation: Option<String>,
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<DocId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl SearchResult {
    pub fn no_results() -> Self {
        Self { content: NO_RESULTS_MESSAGE.to_string(), explanation: None, url: None, doc_id: None, score: None }
    }

    pub fn is_no_results(&self) -> bool { self.doc_id.is_none() }
}

/// Descending score, then ascending document id.
pub fn rank_order(a: &ScoredResult, b: &ScoredResult) -> Ordering {
    b.score.total_cmp(&a.score).then_with(|| a.doc_id.cmp(&b.doc_id))
}

/// tokenize → expand → collect candidates → score → sort → top-k.
pub struct QueryEngine {
    synonyms: SynonymTable,
    scoring: ScoringConfig,
    cache: Option<ExpansionCache>,
    top_k: usize,
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self { synonyms: SynonymTable::default(), scoring: ScoringConfig::default(), cache: Some(ExpansionCache::default()), top_k: DEFAULT_TOP_K }
    }
}

impl QueryEngine {
    pub fn new(synonyms: SynonymTable, scoring: ScoringConfig) -> Self {
        Self { synonyms, scoring, cache: None, top_k: DEFAULT_TOP_K }
    }

    pub fn with_cache(mut self, cache: ExpansionCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k.max(1);
        self
    }

    pub fn scoring(&self) -> &ScoringConfig { &self.scoring }

    pub fn cache(&self) -> Option<&ExpansionCache> { self.cache.as_ref() }

    pub fn expand(&self, raw_query: &str) -> ExpandedQuery {
        let tokens = tokenize(raw_query);
        match &self.cache {
            Some(cache) => cache.get_or_expand(&self.synonyms, &tokens),
            None => self.synonyms.expand(&tokens),
        }
    }

    /// Every document sharing at least one expanded token, ascending by id.
    pub fn candidates(&self, index: &InvertedIndex, query: &ExpandedQuery) -> BTreeSet<DocId> {
        query
            .iter()
            .filter_map(|term| index.postings(term))
            .flatten()
            .map(|p| p.doc_id)
            .collect()
    }

    /// All candidates, scored and sorted by [`rank_order`].
    pub fn rank(&self, index: &InvertedIndex, query: &ExpandedQuery) -> Vec<ScoredResult> {
        let scorer = Scorer::new(index, &self.scoring);
        let mut scored: Vec<ScoredResult> = self
            .candidates(index, query)
            .into_iter()
            .map(|doc_id| ScoredResult { score: scorer.score(query, doc_id), doc_id })
            .collect();
        scored.sort_by(rank_order);
        scored
    }

    pub fn search(&self, snapshot: &IndexSnapshot, raw_query: &str) -> Vec<SearchResult> {
        tracing::debug!(query = raw_query, "searching");
        let expanded = self.expand(raw_query);
        let ranked = self.rank(&snapshot.index, &expanded);
        if ranked.is_empty() {
            return vec![SearchResult::no_results()];
        }

        let scorer = Scorer::new(&snapshot.index, &self.scoring);
        ranked
            .into_iter()
            .take(self.top_k)
            .filter_map(|hit| {
                let doc = snapshot.store.get(hit.doc_id)?;
                let boosts = scorer.breakdown(&expanded, hit.doc_id).boosts();
                let boosted = if boosts.is_empty() { "no boosts".to_string() } else { format!("{} boosted", boosts.join(" + ")) };
                Some(SearchResult {
                    content: doc.content.clone(),
                    explanation: Some(format!("Matches {expanded}, scored {:.2} ({boosted})", hit.score)),
                    url: Some(doc.url.clone()),
                    doc_id: Some(hit.doc_id),
                    score: Some(hit.score),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::RawDocument;
    use crate::store::DocumentStore;

    fn snapshot(contents: &[&str]) -> IndexSnapshot {
        let store: DocumentStore = contents
            .iter()
            .map(|c| RawDocument { url: format!("u/{c}"), content: c.to_string(), timestamp: None })
            .collect();
        IndexSnapshot::new(store)
    }

    #[test]
    fn tie_break_by_ascending_id() {
        let mut v = vec![
            ScoredResult { score: 1.0, doc_id: 7 },
            ScoredResult { score: 2.0, doc_id: 9 },
            ScoredResult { score: 1.0, doc_id: 3 },
        ];
        v.sort_by(rank_order);
        let ids: Vec<DocId> = v.iter().map(|r| r.doc_id).collect();
        assert_eq!(ids, vec![9, 3, 7]);
    }

    #[test]
    fn sentinel_on_no_match() {
        let snap = snapshot(&["rust is fast", "python is easy"]);
        let out = QueryEngine::default().search(&snap, "haskell");
        assert_eq!(out, vec![SearchResult::no_results()]);
        assert!(out[0].is_no_results());
    }

    #[test]
    fn explanation_mentions_expansion_and_score() {
        let snap = snapshot(&["lookup tables", "nothing here"]);
        let out = QueryEngine::default().search(&snap, "search");
        assert_eq!(out.len(), 1);
        let why = out[0].explanation.as_deref().unwrap_or_default();
        assert!(why.starts_with("Matches [search, find, lookup, seek], scored "), "{why}");
        assert_eq!(out[0].url.as_deref(), Some("u/lookup tables"));
    }

    #[test]
    fn top_k_is_configurable() {
        let snap = snapshot(&["rust a", "rust b", "rust c", "rust d"]);
        let engine = QueryEngine::default().with_top_k(2);
        assert_eq!(engine.search(&snap, "rust").len(), 2);
        assert_eq!(QueryEngine::default().search(&snap, "rust").len(), 3);
    }
}
