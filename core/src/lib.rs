//! AISeek search core: tokenizer, inverted index, synonym expansion, heuristic
//! TF-IDF scoring and top-k ranking over an in-memory document set.

pub mod cache;
pub mod engine;
pub mod index;
pub mod loader;
pub mod scoring;
pub mod seed;
pub mod snapshot;
pub mod store;
pub mod synonyms;
pub mod tokenizer;

pub use engine::{QueryEngine, ScoredResult, SearchResult};
pub use index::{DocId, Document, InvertedIndex, Posting, RawDocument};
pub use scoring::{ScoreBreakdown, Scorer, ScoringConfig};
pub use snapshot::{IndexSnapshot, IngestReport, SearchService, SharedIndex};
pub use store::DocumentStore;
pub use synonyms::{ExpandedQuery, SynonymTable};
