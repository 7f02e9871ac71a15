use crate::{PostSource, TIMESTAMP_FORMAT};
use aiseek_core::RawDocument;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub const RECENT_SEARCH_URL: &str = "https://api.twitter.com/2/tweets/search/recent";
pub const DEFAULT_QUERY: &str = "#AI OR #news OR #breaking OR #search -is:retweet";

/// Client for the X v2 recent-search endpoint, authenticated with an app bearer token.
///
/// The token is supplied at runtime (CLI flag or `X_BEARER_TOKEN`) and never stored here.
pub struct XApiSource {
    client: Client,
    bearer_token: String,
    endpoint: String,
    query: String,
}

#[derive(Debug, Deserialize)]
struct RecentSearchResponse {
    #[serde(default)]
    data: Vec<Tweet>,
}

#[derive(Debug, Deserialize)]
struct Tweet {
    id: String,
    text: String,
    created_at: Option<String>,
}

impl XApiSource {
    pub fn new(bearer_token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent("aiseek-crawler/0.1")
            .timeout(timeout)
            .build()?;
        Ok(Self { client, bearer_token: bearer_token.into(), endpoint: RECENT_SEARCH_URL.to_string(), query: DEFAULT_QUERY.to_string() })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }
}

impl PostSource for XApiSource {
    fn name(&self) -> &'static str { "x-api" }

    async fn fetch(&self, limit: usize) -> Result<Vec<RawDocument>> {
        // the endpoint rejects max_results outside 10..=100
        let max_results = limit.clamp(10, 100).to_string();
        let resp = self
            .client
            .get(&self.endpoint)
            .bearer_auth(&self.bearer_token)
            .query(&[("query", self.query.as_str()), ("max_results", max_results.as_str()), ("tweet.fields", "created_at")])
            .send()
            .await
            .context("x api request failed")?
            .error_for_status()
            .context("x api returned an error status")?;
        let body: RecentSearchResponse = resp.json().await.context("decoding x api response")?;
        let mut docs = tweets_to_documents(body);
        docs.truncate(limit);
        Ok(docs)
    }
}

fn tweets_to_documents(body: RecentSearchResponse) -> Vec<RawDocument> {
    body.data
        .into_iter()
        .map(|t| RawDocument {
            url: format!("x.com/{}", t.id),
            content: t.text,
            timestamp: t.created_at.as_deref().and_then(reformat_timestamp),
        })
        .collect()
}

fn reformat_timestamp(rfc3339: &str) -> Option<String> {
    let parsed = OffsetDateTime::parse(rfc3339, &Rfc3339).ok()?;
    parsed.format(TIMESTAMP_FORMAT).ok()
}
