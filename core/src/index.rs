use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type DocId = u32;

/// An indexed unit of text. Immutable once the store has assigned its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub url: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// A document as supplied by a loader or crawler, before it has an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    pub url: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub term_frequency: u32,
}

/// Token → postings mapping, plus the per-document token counts scoring needs.
///
/// Built wholesale from a set of documents; there are no incremental updates.
/// Posting lists are in ingestion order, callers must not rely on it.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<Posting>>,
    doc_lengths: HashMap<DocId, usize>,
    num_docs: usize,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Build a fresh index over `documents`.
    pub fn build<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut index = Self::new();
        for doc in documents {
            index.add_document(doc);
        }
        tracing::debug!(num_docs = index.num_docs, num_terms = index.postings.len(), "built inverted index");
        index
    }

    fn add_document(&mut self, doc: &Document) {
        let tokens = tokenize(&doc.content);
        self.doc_lengths.insert(doc.id, tokens.len());
        self.num_docs += 1;

        let mut tf_counts: HashMap<String, u32> = HashMap::new();
        for token in tokens {
            *tf_counts.entry(token).or_insert(0) += 1;
        }
        for (term, term_frequency) in tf_counts {
            self.postings.entry(term).or_default().push(Posting { doc_id: doc.id, term_frequency });
        }
    }

    pub fn postings(&self, term: &str) -> Option<&[Posting]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    pub fn contains_term(&self, term: &str) -> bool { self.postings.contains_key(term) }

    /// Number of distinct documents posting under `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, Vec::len)
    }

    pub fn term_frequency(&self, term: &str, doc_id: DocId) -> Option<u32> {
        self.postings(term)?
            .iter()
            .find(|p| p.doc_id == doc_id)
            .map(|p| p.term_frequency)
    }

    /// Token count of the document's content, `None` if the document was not indexed.
    pub fn doc_length(&self, doc_id: DocId) -> Option<usize> {
        self.doc_lengths.get(&doc_id).copied()
    }

    /// Total documents indexed, including ones whose content has no tokens.
    pub fn num_docs(&self) -> usize { self.num_docs }

    pub fn vocabulary_size(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.num_docs == 0 }

    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.postings.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: DocId, content: &str) -> Document {
        Document { id, url: format!("test/{id}"), content: content.to_string(), timestamp: None }
    }

    #[test]
    fn counts_term_frequency_per_document() {
        let docs = vec![doc(1, "hello hello hello world"), doc(2, "hello rust")];
        let idx = InvertedIndex::build(&docs);
        assert_eq!(idx.term_frequency("hello", 1), Some(3));
        assert_eq!(idx.term_frequency("hello", 2), Some(1));
        assert_eq!(idx.term_frequency("world", 2), None);
        assert_eq!(idx.document_frequency("hello"), 2);
        assert_eq!(idx.doc_length(1), Some(4));
    }

    #[test]
    fn empty_document_set() {
        let idx = InvertedIndex::build(&Vec::<Document>::new());
        assert!(idx.is_empty());
        assert_eq!(idx.vocabulary_size(), 0);
        assert!(idx.postings("ai").is_none());
    }

    #[test]
    fn empty_content_counts_as_document() {
        let docs = vec![doc(1, ""), doc(2, "ai")];
        let idx = InvertedIndex::build(&docs);
        assert_eq!(idx.num_docs(), 2);
        assert_eq!(idx.doc_length(1), Some(0));
        assert_eq!(idx.vocabulary_size(), 1);
    }
}
