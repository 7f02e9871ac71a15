use aiseek_core::scoring::idf;
use aiseek_core::tokenizer::tokenize;
use aiseek_core::{DocumentStore, InvertedIndex, QueryEngine, RawDocument, SearchResult};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

fn corpus() -> impl Strategy<Value = Vec<String>> {
    let word = prop::sample::select(vec!["ai", "search", "news", "python", "rust", "java", "Fresh", "LOOKUP", "x1", "_"]);
    let doc = prop::collection::vec(word, 0..12).prop_map(|ws| ws.join(" "));
    prop::collection::vec(doc, 0..8)
}

fn store(contents: &[String]) -> DocumentStore {
    contents
        .iter()
        .map(|c| RawDocument { url: String::new(), content: c.clone(), timestamp: None })
        .collect()
}

fn normalized(index: &InvertedIndex) -> HashMap<String, BTreeSet<(u32, u32)>> {
    index
        .terms()
        .map(|t| {
            let postings = index.postings(t).unwrap_or_default();
            (t.to_string(), postings.iter().map(|p| (p.doc_id, p.term_frequency)).collect())
        })
        .collect()
}

proptest! {
    #[test]
    fn rebuild_is_idempotent(contents in corpus()) {
        let s = store(&contents);
        let a = InvertedIndex::build(s.iter());
        let b = InvertedIndex::build(s.iter());
        prop_assert_eq!(normalized(&a), normalized(&b));
    }

    #[test]
    fn postings_match_token_counts(contents in corpus()) {
        let s = store(&contents);
        let index = InvertedIndex::build(s.iter());
        for doc in s.iter() {
            let tokens = tokenize(&doc.content);
            prop_assert_eq!(index.doc_length(doc.id), Some(tokens.len()));
            for t in &tokens {
                let expected = tokens.iter().filter(|x| *x == t).count() as u32;
                prop_assert_eq!(index.term_frequency(t, doc.id), Some(expected));
            }
        }
        for term in index.terms() {
            let postings = index.postings(term).unwrap_or_default();
            prop_assert!(!postings.is_empty());
            let ids: BTreeSet<u32> = postings.iter().map(|p| p.doc_id).collect();
            prop_assert_eq!(ids.len(), postings.len());
            prop_assert!(idf(index.num_docs(), postings.len()) >= 0.0);
        }
    }

    #[test]
    fn adding_a_document_never_shrinks_postings(contents in corpus(), extra in "[a-z ]{0,30}") {
        let mut s = store(&contents);
        let before = InvertedIndex::build(s.iter());
        s.push(RawDocument { url: String::new(), content: extra, timestamp: None });
        let after = InvertedIndex::build(s.iter());
        for term in before.terms() {
            prop_assert!(after.document_frequency(term) >= before.document_frequency(term));
        }
    }

    #[test]
    fn search_respects_top_k_bound(contents in corpus(), query in "[a-z ]{0,20}") {
        let snap = aiseek_core::IndexSnapshot::new(store(&contents));
        let engine = QueryEngine::default();
        let candidates = engine.candidates(&snap.index, &engine.expand(&query)).len();
        let results = engine.search(&snap, &query);
        if candidates == 0 {
            prop_assert_eq!(results, vec![SearchResult::no_results()]);
        } else {
            prop_assert_eq!(results.len(), candidates.min(3));
            let scores: Vec<f64> = results.iter().filter_map(|r| r.score).collect();
            prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]));
            prop_assert!(scores.iter().all(|s| *s >= 0.0));
        }
    }
}
