use aiseek_core::loader::load_documents;
use aiseek_core::seed::seed_documents;
use aiseek_core::cache::ExpansionCache;
use aiseek_core::{DocumentStore, IngestReport, QueryEngine, ScoringConfig, SearchResult, SearchService, SynonymTable};
use aiseek_crawler::{CrawlerConfig, SocialCrawler};
use anyhow::Result;
use axum::{extract::{Query, State}, http::{HeaderMap, StatusCode}, response::Html, routing::{get, post}, Form, Json, Router};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod html;
pub mod refresh;

pub use config::ServerConfig;

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RefreshStatus {
    pub refreshes: u64,
    pub last_added: usize,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub num_docs: usize,
    pub num_terms: usize,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub refresh: RefreshStatus,
}

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SearchService>,
    pub crawler: Arc<SocialCrawler>,
    pub crawl_limit: usize,
    pub admin_token: Option<String>,
    pub refresh_status: Arc<RwLock<RefreshStatus>>,
}

impl AppState {
    pub fn new(service: SearchService, crawler: SocialCrawler, config: &ServerConfig) -> Self {
        Self {
            service: Arc::new(service),
            crawler: Arc::new(crawler),
            crawl_limit: config.crawl_limit,
            admin_token: config.admin_token.clone().filter(|t| !t.is_empty()),
            refresh_status: Arc::new(RwLock::new(RefreshStatus::default())),
        }
    }
}

/// Seed corpus plus any configured documents, an engine, and a crawler.
/// Runs the startup crawl unless `no_crawl` is set.
pub async fn init_state(config: &ServerConfig) -> Result<AppState> {
    let mut store = DocumentStore::new();
    store.extend(seed_documents());
    if let Some(path) = &config.documents {
        let added = store.extend(load_documents(path)?);
        tracing::info!(path = %path, added, "loaded documents");
    }

    let mut engine = QueryEngine::new(SynonymTable::default(), ScoringConfig::default());
    if config.cache_capacity > 0 {
        engine = engine.with_cache(ExpansionCache::new(config.cache_capacity));
    }
    let crawler = SocialCrawler::new(CrawlerConfig {
        x_bearer_token: config.x_bearer_token.clone(),
        timeout: Duration::from_secs(config.crawl_timeout_secs),
        mock_seed: None,
    })?;

    let state = AppState::new(SearchService::new(engine, store), crawler, config);
    if !config.no_crawl {
        refresh::refresh_once(&state).await?;
    }
    Ok(state)
}

pub fn build_app(state: AppState, config: &ServerConfig) -> Router {
    let cors = match &config.cors_allow_origin {
        Some(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        None => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/", get(home).post(home_search))
        .route("/search", get(search_handler))
        .route("/health", get(health))
        .route("/stats", get(stats_handler))
        .route("/admin/refresh", post(admin_refresh))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn home() -> Html<String> {
    Html(html::render_page(None, &[], None))
}

async fn home_search(State(state): State<AppState>, Form(form): Form<SearchForm>) -> Html<String> {
    let results = state.service.search(&form.query);
    let expanded = state.service.engine().expand(&form.query);
    let matcher = html::term_matcher(expanded.iter());
    Html(html::render_page(Some(&form.query), &results, matcher.as_ref()))
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let results = state.service.search(&params.q);
    let elapsed = start.elapsed();
    Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), results })
}

async fn health() -> &'static str {
    tracing::debug!("health check hit");
    "OK"
}

async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let snap = state.service.snapshot();
    let (cache_hits, cache_misses) = state
        .service
        .engine()
        .cache()
        .map_or((0, 0), |c| (c.hits(), c.misses()));
    Json(StatsResponse {
        num_docs: snap.store.len(),
        num_terms: snap.index.vocabulary_size(),
        cache_hits,
        cache_misses,
        refresh: state.refresh_status.read().clone(),
    })
}

async fn admin_refresh(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<IngestReport>, (StatusCode, String)> {
    require_admin(&state, &headers)?;
    refresh::refresh_once(&state)
        .await
        .map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("refresh failed: {e:#}")))
}

/// Admin routes stay closed until an admin token is configured.
fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let Some(expected) = state.admin_token.as_deref() else {
        return Err((StatusCode::UNAUTHORIZED, "refresh disabled: ADMIN_TOKEN not set".into()));
    };
    match headers.get(ADMIN_TOKEN_HEADER).map(|v| v.as_bytes()) {
        Some(given) if given == expected.as_bytes() => Ok(()),
        Some(_) => Err((StatusCode::UNAUTHORIZED, "invalid admin token".into())),
        None => Err((StatusCode::UNAUTHORIZED, format!("missing {ADMIN_TOKEN_HEADER} header"))),
    }
}
