use crate::synonyms::{ExpandedQuery, SynonymTable};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};

pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Bounded memo of token tuple → expansion, least-recently-used eviction.
///
/// Purely a performance aid: expansions are a pure function of the tokens and the
/// table, so a hit returns exactly what `SynonymTable::expand` would.
pub struct ExpansionCache {
    capacity: usize,
    inner: Mutex<LruState>,
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Default)]
struct LruState {
    entries: HashMap<Vec<String>, ExpandedQuery>,
    // front = least recently used
    order: VecDeque<Vec<String>>,
}

impl LruState {
    fn touch(&mut self, key: &[String]) {
        if let Some(pos) = self.order.iter().position(|k| k.as_slice() == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }
}

impl ExpansionCache {
    pub fn new(capacity: usize) -> Self {
        Self { capacity: capacity.max(1), inner: Mutex::new(LruState::default()), hits: AtomicU64::new(0), misses: AtomicU64::new(0) }
    }

    pub fn get_or_expand(&self, table: &SynonymTable, tokens: &[String]) -> ExpandedQuery {
        {
            let mut state = self.inner.lock();
            if let Some(found) = state.entries.get(tokens).cloned() {
                state.touch(tokens);
                self.hits.fetch_add(1, Ordering::Relaxed);
                return found;
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let expanded = table.expand(tokens);

        let mut state = self.inner.lock();
        if !state.entries.contains_key(tokens) {
            while state.entries.len() >= self.capacity {
                match state.order.pop_front() {
                    Some(evicted) => { state.entries.remove(&evicted); }
                    None => break,
                }
            }
            state.entries.insert(tokens.to_vec(), expanded.clone());
            state.order.push_back(tokens.to_vec());
        }
        expanded
    }

    pub fn len(&self) -> usize { self.inner.lock().entries.len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn hits(&self) -> u64 { self.hits.load(Ordering::Relaxed) }

    pub fn misses(&self) -> u64 { self.misses.load(Ordering::Relaxed) }
}

impl Default for ExpansionCache {
    fn default() -> Self { Self::new(DEFAULT_CACHE_CAPACITY) }
}
