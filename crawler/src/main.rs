use aiseek_core::seed::SEED_DOCUMENT_COUNT;
use aiseek_core::DocId;
use aiseek_crawler::{CrawlerConfig, SocialCrawler, DEFAULT_BATCH};
use anyhow::Result;
use clap::Parser;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "aiseek-crawler")]
#[command(about = "Fetch one batch of social posts and write them as JSONL")]
struct Cli {
    /// Output JSONL file path
    #[arg(long, default_value = "./sample_data/posts.jsonl")]
    output: String,
    /// Number of posts to fetch
    #[arg(long, default_value_t = DEFAULT_BATCH)]
    count: usize,
    /// X API bearer token; without it posts are generated locally
    #[arg(long, env = "X_BEARER_TOKEN", hide_env_values = true)]
    x_bearer_token: Option<String>,
    /// Request timeout seconds
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
    /// Seed for the mock generator
    #[arg(long)]
    seed: Option<u64>,
    /// Id the target store will assign to the first post; names generated urls
    #[arg(long, default_value_t = SEED_DOCUMENT_COUNT + 1)]
    first_id: DocId,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();
    if let Some(dir) = std::path::Path::new(&args.output).parent() {
        fs::create_dir_all(dir).ok();
    }

    let crawler = SocialCrawler::new(CrawlerConfig {
        x_bearer_token: args.x_bearer_token,
        timeout: Duration::from_secs(args.timeout_secs),
        mock_seed: args.seed,
    })?;
    let docs = crawler.crawl(args.count, args.first_id).await;

    let mut out = BufWriter::new(File::create(&args.output)?);
    for doc in &docs {
        serde_json::to_writer(&mut out, doc)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    tracing::info!(emitted = docs.len(), output = %args.output, "crawl written");
    Ok(())
}
