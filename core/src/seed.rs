use crate::index::{DocId, RawDocument};
use crate::store::DocumentStore;

/// Number of static seed documents; they occupy ids `1..=SEED_DOCUMENT_COUNT`.
pub const SEED_DOCUMENT_COUNT: DocId = 10;

const SEED: [(&str, &str); SEED_DOCUMENT_COUNT as usize] = [
    ("sci.org/1", "AI transforms science with reasoning models"),
    ("dev.net/2", "Python beats Java for quick coding projects"),
    ("edu.org/3", "Learn AI with Python in 10 steps"),
    ("tech.io/4", "Google\u{2019}s search is ad-heavy and slow"),
    ("sci.org/5", "Reasoning AI outsmarts keyword search"),
    ("dev.net/6", "Code smarter with AI tools"),
    ("edu.org/7", "Python and AI are the future of learning"),
    ("tech.io/8", "Ditch ads, embrace clean search"),
    ("x.com/9", "AISeek hype is real\u{2014}new search king?"),
    ("x.com/10", "Latest AI breakthroughs trending in breaking news"),
];

pub fn seed_documents() -> Vec<RawDocument> {
    SEED.iter()
        .map(|(url, content)| RawDocument { url: url.to_string(), content: content.to_string(), timestamp: None })
        .collect()
}

/// A store holding only the seed corpus.
pub fn seed_store() -> DocumentStore {
    seed_documents().into_iter().collect()
}
