use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cini_plaza::{
    api::{create_router, AppState},
    config::Config,
    services::{
        providers::{MetadataProvider, OmdbProvider},
        seed, CatalogStore, MetadataCache, RecommendationService,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cini_plaza=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Bad catalog data is fatal: refuse to start
    let entries = match &config.catalog_path {
        Some(path) => seed::load_catalog_file(path)?,
        None => seed::builtin_entries(),
    };
    let items = seed::into_items(entries, config.feature_dimension, config.feature_seed)?;
    let catalog = Arc::new(CatalogStore::build(items).context("Invalid catalog")?);

    let provider: Arc<dyn MetadataProvider> = Arc::new(OmdbProvider::new(
        config.omdb_api_key.clone(),
        config.omdb_api_url.clone(),
        config.fetch_timeout(),
    )?);
    let metadata = MetadataCache::new(provider, config.fetch_timeout());

    let recommender = match config.trending_seed {
        Some(seed) => RecommendationService::with_seed(catalog, metadata, seed),
        None => RecommendationService::new(catalog, metadata),
    };

    let state = Arc::new(AppState::new(Arc::new(recommender), config.default_k));
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(addr = %addr, "Server running");

    axum::serve(listener, app).await?;

    Ok(())
}
