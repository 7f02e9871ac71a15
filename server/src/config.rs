use clap::Parser;

/// Server options; every flag can also come from the environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "aiseek-server")]
#[command(about = "AISeek search web server")]
pub struct ServerConfig {
    /// Host to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,
    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,
    /// Extra documents to index at startup (JSON/JSONL file or directory)
    #[arg(long, env = "AISEEK_DOCUMENTS")]
    pub documents: Option<String>,
    /// Directory served under /static
    #[arg(long, env = "AISEEK_STATIC_DIR", default_value = "./static")]
    pub static_dir: String,
    /// Re-crawl and rebuild the index every N seconds (0 disables)
    #[arg(long, env = "AISEEK_REFRESH_SECS", default_value_t = 0)]
    pub refresh_secs: u64,
    /// Posts fetched per crawl
    #[arg(long, env = "AISEEK_CRAWL_LIMIT", default_value_t = aiseek_crawler::DEFAULT_BATCH)]
    pub crawl_limit: usize,
    /// Skip the crawl at startup
    #[arg(long, default_value_t = false)]
    pub no_crawl: bool,
    /// Crawler request timeout seconds
    #[arg(long, default_value_t = 12)]
    pub crawl_timeout_secs: u64,
    /// X API bearer token; without it the crawler generates posts locally
    #[arg(long, env = "X_BEARER_TOKEN", hide_env_values = true)]
    pub x_bearer_token: Option<String>,
    /// Token required in X-ADMIN-TOKEN for admin endpoints
    #[arg(long, env = "ADMIN_TOKEN", hide_env_values = true)]
    pub admin_token: Option<String>,
    /// Comma-separated allowed CORS origins (any origin when unset)
    #[arg(long, env = "CORS_ALLOW_ORIGIN")]
    pub cors_allow_origin: Option<String>,
    /// Query expansion cache size (0 disables the cache)
    #[arg(long, default_value_t = aiseek_core::cache::DEFAULT_CACHE_CAPACITY)]
    pub cache_capacity: usize,
}
