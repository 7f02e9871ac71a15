use crate::{PostSource, TIMESTAMP_FORMAT};
use aiseek_core::seed::SEED_DOCUMENT_COUNT;
use aiseek_core::{DocId, RawDocument};
use anyhow::Result;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

/// Generates plausible social posts locally. Used when no X API token is
/// configured and as the fallback when the API call fails.
pub struct MockSource {
    rng: Mutex<StdRng>,
    next_post: AtomicU64,
}

impl Default for MockSource {
    fn default() -> Self { Self::from_rng(StdRng::from_entropy()) }
}

impl MockSource {
    /// Deterministic generator, for tests and reproducible dumps.
    pub fn with_seed(seed: u64) -> Self { Self::from_rng(StdRng::seed_from_u64(seed)) }

    fn from_rng(rng: StdRng) -> Self {
        // without a store to ask, assume the batch lands right after the seed corpus
        Self { rng: Mutex::new(rng), next_post: AtomicU64::new(SEED_DOCUMENT_COUNT as u64 + 1) }
    }

    /// `limit` posts whose `x.com/p{n}` urls name the ids the store will assign,
    /// starting at `first_id`.
    pub fn generate(&self, limit: usize, first_id: DocId) -> Vec<RawDocument> {
        let first = u64::from(first_id);
        self.next_post.store(first + limit as u64, Ordering::Relaxed);
        let now = OffsetDateTime::now_utc();
        let stamp = now.format(TIMESTAMP_FORMAT).unwrap_or_default();
        let unix = now.unix_timestamp_nanos() as f64 / 1e9;
        let mut rng = self.rng.lock();
        (first..first + limit as u64)
            .map(|n| RawDocument {
                url: format!("x.com/p{n}"),
                content: compose(&mut *rng, unix),
                timestamp: Some(stamp.clone()),
            })
            .collect()
    }
}

fn pick<'a, R: Rng>(rng: &mut R, options: &[&'a str]) -> &'a str {
    options.choose(rng).copied().unwrap_or_default()
}

fn compose<R: Rng>(rng: &mut R, unix: f64) -> String {
    match rng.gen_range(0..4) {
        0 => format!(
            "AISeek\u{2019}s crushing it\u{2014}Google\u{2019}s {} in latest breaking news {unix:.6}",
            pick(rng, &["done", "toast", "shaking"])
        ),
        1 => format!(
            "Python + AI = {}\u{2014}news buzzing with breaking updates {unix:.6}",
            pick(rng, &["future", "win", "gold"])
        ),
        2 => format!(
            "Search without {}\u{2014}AISeek delivers fresh breaking news {unix:.6}",
            pick(rng, &["ads", "SEO", "crap"])
        ),
        _ => format!(
            "AI breakthroughs: {} in today\u{2019}s breaking news {unix:.6}",
            pick(rng, &["real-time", "mind-blowing", "next-level"])
        ),
    }
}

impl PostSource for MockSource {
    fn name(&self) -> &'static str { "mock" }

    async fn fetch(&self, limit: usize) -> Result<Vec<RawDocument>> {
        let next = self.next_post.load(Ordering::Relaxed);
        Ok(self.generate(limit, DocId::try_from(next)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_count_with_sequential_urls() {
        let source = MockSource::with_seed(7);
        let posts = source.generate(3, 11);
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].url, "x.com/p11");
        assert_eq!(posts[2].url, "x.com/p13");
        assert_eq!(source.generate(1, 14)[0].url, "x.com/p14");
        for p in &posts {
            assert!(p.content.contains("breaking"), "{}", p.content);
            assert_eq!(p.timestamp.as_deref().map(str::len), Some(19));
        }
    }

    #[test]
    fn seeded_sources_agree_on_templates() {
        let strip = |docs: Vec<RawDocument>| -> Vec<String> {
            docs.into_iter()
                .map(|d| d.content.rsplit_once(' ').map(|(head, _)| head.to_string()).unwrap_or_default())
                .collect()
        };
        let a = strip(MockSource::with_seed(42).generate(10, 11));
        let b = strip(MockSource::with_seed(42).generate(10, 11));
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn fetch_continues_after_last_generated_id() {
        let source = MockSource::with_seed(5);
        assert_eq!(source.fetch(1).await.expect("mock fetch")[0].url, "x.com/p11");
        source.generate(2, 40);
        let next = source.fetch(2).await.expect("mock fetch");
        assert_eq!(next[0].url, "x.com/p42");
        assert_eq!(next[1].url, "x.com/p43");
    }
}
