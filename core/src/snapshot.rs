use crate::engine::{QueryEngine, SearchResult};
use crate::index::{InvertedIndex, RawDocument};
use crate::store::DocumentStore;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::sync::Arc;

/// An immutable (store, index) pair. Readers hold one for the duration of a query.
#[derive(Debug, Default)]
pub struct IndexSnapshot {
    pub store: DocumentStore,
    pub index: InvertedIndex,
}

impl IndexSnapshot {
    pub fn new(store: DocumentStore) -> Self {
        let index = InvertedIndex::build(store.iter());
        Self { store, index }
    }
}

/// The live snapshot, replaced wholesale on rebuild.
///
/// New snapshots are built outside the lock and swapped in under one write, so a
/// reader sees either the old complete index or the new one.
#[derive(Default)]
pub struct SharedIndex {
    current: RwLock<Arc<IndexSnapshot>>,
    // serializes read-modify-write ingests
    writer: Mutex<()>,
}

impl SharedIndex {
    pub fn new(store: DocumentStore) -> Self {
        Self { current: RwLock::new(Arc::new(IndexSnapshot::new(store))), writer: Mutex::new(()) }
    }

    pub fn load(&self) -> Arc<IndexSnapshot> { self.current.read().clone() }

    pub fn rebuild(&self, store: DocumentStore) -> Arc<IndexSnapshot> {
        let _w = self.writer.lock();
        self.swap(store)
    }

    /// Append `batch` to the current store and publish the rebuilt snapshot.
    pub fn ingest(&self, batch: Vec<RawDocument>) -> IngestReport {
        let _w = self.writer.lock();
        let mut store = self.load().store.clone();
        let added = store.extend(batch);
        let snap = self.swap(store);
        IngestReport { added, total_documents: snap.store.len(), vocabulary: snap.index.vocabulary_size() }
    }

    fn swap(&self, store: DocumentStore) -> Arc<IndexSnapshot> {
        let snap = Arc::new(IndexSnapshot::new(store));
        *self.current.write() = snap.clone();
        snap
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub added: usize,
    pub total_documents: usize,
    pub vocabulary: usize,
}

/// Query engine bound to a shared, swappable index.
pub struct SearchService {
    engine: QueryEngine,
    index: SharedIndex,
}

impl SearchService {
    pub fn new(engine: QueryEngine, store: DocumentStore) -> Self {
        let index = SharedIndex::new(store);
        let snap = index.load();
        tracing::info!(num_docs = snap.store.len(), num_terms = snap.index.vocabulary_size(), "search index ready");
        Self { engine, index }
    }

    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let snap = self.index.load();
        self.engine.search(&snap, query)
    }

    pub fn rebuild(&self, store: DocumentStore) -> IngestReport {
        let snap = self.index.rebuild(store);
        let report = IngestReport { added: 0, total_documents: snap.store.len(), vocabulary: snap.index.vocabulary_size() };
        tracing::info!(num_docs = report.total_documents, num_terms = report.vocabulary, "index rebuilt");
        report
    }

    pub fn ingest(&self, batch: Vec<RawDocument>) -> IngestReport {
        let report = self.index.ingest(batch);
        tracing::info!(added = report.added, num_docs = report.total_documents, num_terms = report.vocabulary, "ingested batch");
        report
    }

    pub fn snapshot(&self) -> Arc<IndexSnapshot> { self.index.load() }

    pub fn engine(&self) -> &QueryEngine { &self.engine }
}
