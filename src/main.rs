use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reelmatch::{
    api::{create_router, AppState},
    catalog::CatalogStore,
    config::Config,
    services::{CachedImageResolver, HttpImageResolver, ImageResolver, PassthroughImageResolver},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reelmatch=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // A catalog that does not line up with its matrix must never serve queries.
    let catalog = CatalogStore::load(&config.catalog_path, &config.similarity_path)
        .context("Failed to load movie catalog")?;
    if catalog.is_empty() {
        tracing::warn!("Catalog is empty; every recommendation will be empty");
    }

    let resolver = build_resolver(&config)?;
    tracing::info!(
        resolver = resolver.name(),
        timeout_secs = config.poster_timeout_secs,
        "Poster resolver ready"
    );

    let state = AppState::new(Arc::new(catalog), resolver);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(address = %address, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

fn build_resolver(config: &Config) -> anyhow::Result<Arc<dyn ImageResolver>> {
    if !config.verify_posters {
        return Ok(Arc::new(PassthroughImageResolver::new(
            config.default_poster_url.clone(),
        )));
    }

    let http = HttpImageResolver::new(config.default_poster_url.clone(), config.poster_timeout())
        .context("Failed to build poster HTTP client")?;

    if config.cache_posters {
        Ok(Arc::new(CachedImageResolver::new(http)))
    } else {
        Ok(Arc::new(http))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
