use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use portfolio_blog::{
    config::BlogConfig, server, state::AppState, ConfiguredProvider, PostRepository,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BlogConfig::load().context("Failed to load configuration")?;
    info!(source = ?config.content.source, cache_ttl_secs = config.cache_ttl_secs, "configuration loaded");

    let provider = ConfiguredProvider::from_config(&config.content)
        .context("Failed to set up the content provider")?;
    let blog = PostRepository::with_cache_ttl(provider, config.cache_ttl());
    let state = Arc::new(AppState::new(blog));

    let app = server::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "listening");
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}
