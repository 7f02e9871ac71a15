use std::collections::HashSet;
use std::fmt;

/// Static canonical-term → synonyms table, read-only after startup.
#[derive(Debug, Clone)]
pub struct SynonymTable {
    entries: Vec<(String, Vec<String>)>,
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::from_entries([
            ("news", &["info", "updates", "trending", "latest", "breaking"][..]),
            ("ai", &["artificial", "intelligence"][..]),
            ("search", &["find", "lookup", "seek"][..]),
            ("breaking", &["urgent", "hot", "fresh"][..]),
        ])
    }
}

impl SynonymTable {
    pub fn empty() -> Self { Self { entries: Vec::new() } }

    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        let entries = entries
            .into_iter()
            .map(|(canonical, synonyms)| {
                (canonical.to_string(), synonyms.iter().map(|s| s.to_string()).collect())
            })
            .collect();
        Self { entries }
    }

    /// Expand query tokens in a single pass over the table.
    ///
    /// An entry fires when its canonical term or any of its synonyms is among the
    /// *input* tokens; terms added by one entry never trigger another.
    pub fn expand(&self, tokens: &[String]) -> ExpandedQuery {
        let input: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        let mut expanded = ExpandedQuery::default();
        for token in tokens {
            expanded.insert(token);
        }
        for (canonical, synonyms) in &self.entries {
            let fires = input.contains(canonical.as_str())
                || synonyms.iter().any(|s| input.contains(s.as_str()));
            if fires {
                expanded.insert(canonical);
                for s in synonyms {
                    expanded.insert(s);
                }
            }
        }
        expanded
    }
}

/// A set of query tokens that remembers insertion order for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedQuery {
    terms: Vec<String>,
    seen: HashSet<String>,
}

impl ExpandedQuery {
    fn insert(&mut self, term: &str) {
        if self.seen.insert(term.to_string()) {
            self.terms.push(term.to_string());
        }
    }

    pub fn contains(&self, term: &str) -> bool { self.seen.contains(term) }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ { self.terms.iter().map(String::as_str) }
}

impl fmt::Display for ExpandedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.terms.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> { words.iter().map(|w| w.to_string()).collect() }

    #[test]
    fn expands_canonical_terms() {
        let q = SynonymTable::default().expand(&toks(&["ai", "search"]));
        for t in ["ai", "search", "artificial", "intelligence", "find", "lookup", "seek"] {
            assert!(q.contains(t), "missing {t}");
        }
        assert_eq!(q.len(), 7);
        assert_eq!(q.to_string(), "[ai, search, artificial, intelligence, find, lookup, seek]");
    }

    #[test]
    fn synonym_pulls_in_canonical() {
        let q = SynonymTable::default().expand(&toks(&["lookup"]));
        assert!(q.contains("search"));
        assert!(q.contains("seek"));
    }

    #[test]
    fn no_transitive_chaining() {
        // "news" adds "breaking", but "breaking"'s own synonyms stay out.
        let q = SynonymTable::default().expand(&toks(&["news"]));
        assert!(q.contains("breaking"));
        assert!(!q.contains("urgent"));
    }

    #[test]
    fn breaking_fires_both_entries() {
        let q = SynonymTable::default().expand(&toks(&["breaking"]));
        assert!(q.contains("news"));
        assert!(q.contains("latest"));
        assert!(q.contains("urgent"));
    }

    #[test]
    fn duplicates_collapse() {
        let q = SynonymTable::default().expand(&toks(&["ai", "ai", "artificial"]));
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn empty_query_expands_to_nothing() {
        assert!(SynonymTable::default().expand(&[]).is_empty());
        assert!(SynonymTable::empty().expand(&toks(&["ai"])).contains("ai"));
    }
}
