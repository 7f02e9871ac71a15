use crate::index::{DocId, Document, RawDocument};
use std::collections::BTreeMap;

/// The corpus: id → document. Ids are assigned sequentially on insertion, starting at 1.
#[derive(Debug, Default, Clone)]
pub struct DocumentStore {
    docs: BTreeMap<DocId, Document>,
}

impl DocumentStore {
    pub fn new() -> Self { Self::default() }

    /// Id the next pushed document will receive.
    pub fn next_id(&self) -> DocId {
        self.docs.keys().next_back().map_or(1, |last| last + 1)
    }

    pub fn push(&mut self, raw: RawDocument) -> DocId {
        let id = self.next_id();
        self.docs.insert(id, Document { id, url: raw.url, content: raw.content, timestamp: raw.timestamp });
        id
    }

    pub fn extend<I: IntoIterator<Item = RawDocument>>(&mut self, batch: I) -> usize {
        batch.into_iter().map(|raw| self.push(raw)).count()
    }

    pub fn get(&self, id: DocId) -> Option<&Document> { self.docs.get(&id) }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    /// Documents in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> + '_ { self.docs.values() }
}

impl FromIterator<RawDocument> for DocumentStore {
    fn from_iter<I: IntoIterator<Item = RawDocument>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(content: &str) -> RawDocument {
        RawDocument { url: String::new(), content: content.to_string(), timestamp: None }
    }

    #[test]
    fn assigns_sequential_ids() {
        let mut store = DocumentStore::new();
        assert_eq!(store.next_id(), 1);
        assert_eq!(store.push(raw("a")), 1);
        assert_eq!(store.extend(vec![raw("b"), raw("c")]), 2);
        assert_eq!(store.next_id(), 4);
        assert_eq!(store.get(3).map(|d| d.content.as_str()), Some("c"));
    }
}
