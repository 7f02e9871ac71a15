//! Social post sources feeding the search index.
//!
//! The crawler never fails towards its caller: when the X API is not configured
//! or errors out, posts come from [`MockSource`] instead.

use aiseek_core::{DocId, RawDocument};
use anyhow::Result;
use std::future::Future;
use std::time::Duration;
use time::format_description::FormatItem;
use time::macros::format_description;

pub mod mock;
pub mod x_api;

pub use mock::MockSource;
pub use x_api::XApiSource;

pub const DEFAULT_BATCH: usize = 50;

/// `YYYY-MM-DD HH:MM:SS`, UTC.
pub const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

pub trait PostSource {
    fn name(&self) -> &'static str;

    /// Up to `limit` recent posts.
    fn fetch(&self, limit: usize) -> impl Future<Output = Result<Vec<RawDocument>>> + Send;
}

pub struct CrawlerConfig {
    pub x_bearer_token: Option<String>,
    pub timeout: Duration,
    pub mock_seed: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self { Self { x_bearer_token: None, timeout: Duration::from_secs(12), mock_seed: None } }
}

pub struct SocialCrawler {
    x: Option<XApiSource>,
    mock: MockSource,
}

impl SocialCrawler {
    pub fn new(config: CrawlerConfig) -> Result<Self> {
        let x = match config.x_bearer_token.filter(|t| !t.trim().is_empty()) {
            Some(token) => Some(XApiSource::new(token, config.timeout)?),
            None => {
                tracing::warn!("no X bearer token configured, using mock crawler only");
                None
            }
        };
        let mock = match config.mock_seed {
            Some(seed) => MockSource::with_seed(seed),
            None => MockSource::default(),
        };
        Ok(Self { x, mock })
    }

    pub fn mock_only(mock: MockSource) -> Self { Self { x: None, mock } }

    pub fn with_x_source(mut self, source: XApiSource) -> Self {
        self.x = Some(source);
        self
    }

    /// Fetch a batch, falling back to generated posts on any API failure.
    /// `next_id` is the id the store will give the first post of the batch.
    pub async fn crawl(&self, limit: usize, next_id: DocId) -> Vec<RawDocument> {
        if let Some(x) = &self.x {
            match x.fetch(limit).await {
                Ok(docs) => {
                    tracing::info!(source = x.name(), count = docs.len(), "fetched posts");
                    return docs;
                }
                Err(err) => tracing::warn!(source = x.name(), error = %format!("{err:#}"), "crawl failed, falling back to mock"),
            }
        }
        let docs = self.mock.generate(limit, next_id);
        tracing::info!(source = self.mock.name(), count = docs.len(), "generated posts");
        docs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_only_crawl() {
        let crawler = SocialCrawler::mock_only(MockSource::with_seed(1));
        let docs = crawler.crawl(5, 23).await;
        assert_eq!(docs.len(), 5);
        assert_eq!(docs[0].url, "x.com/p23");
        assert_eq!(docs[4].url, "x.com/p27");
    }

    #[tokio::test]
    async fn unreachable_api_falls_back_to_mock() {
        let x = XApiSource::new("test-token", Duration::from_millis(200))
            .expect("client")
            .with_endpoint("http://127.0.0.1:9/2/tweets/search/recent");
        let crawler = SocialCrawler::mock_only(MockSource::with_seed(1)).with_x_source(x);
        let docs = crawler.crawl(4, 11).await;
        assert_eq!(docs.len(), 4);
        assert!(docs.iter().all(|d| d.url.starts_with("x.com/p")));
    }

    #[test]
    fn blank_token_means_mock_only() {
        let crawler = SocialCrawler::new(CrawlerConfig { x_bearer_token: Some("  ".into()), ..CrawlerConfig::default() })
            .expect("crawler");
        assert!(crawler.x.is_none());
    }
}
