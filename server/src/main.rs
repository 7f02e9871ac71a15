use aiseek_server::refresh::spawn_refresh_loop;
use aiseek_server::{build_app, init_state, ServerConfig};
use anyhow::Result;
use axum::Router;
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let config = ServerConfig::parse();
    let state = init_state(&config).await?;

    if config.refresh_secs > 0 {
        spawn_refresh_loop(state.clone(), Duration::from_secs(config.refresh_secs));
        tracing::info!(every_secs = config.refresh_secs, "periodic refresh enabled");
    }
    let app: Router = build_app(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
