use std::sync::Arc;

use wardrobe_api::{
    api::{create_router, AppState},
    config::{Config, StorageBackend},
    db::{
        create_pool, create_redis_client, run_migrations, Cache, MemoryStore, OutfitStore,
        PgStore, WardrobeStore,
    },
    services::{OutfitService, RemoteAttributeExtractor},
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing()?;

    let config = Config::from_env()?;
    tracing::info!(storage = ?config.storage, "Configuration loaded");

    let (wardrobe, outfits): (Arc<dyn WardrobeStore>, Arc<dyn OutfitStore>) = match config.storage
    {
        StorageBackend::Postgres => {
            let pool = create_pool(&config.database_url).await?;
            run_migrations(&pool).await?;
            split_store(Arc::new(PgStore::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            split_store(Arc::new(MemoryStore::new()))
        }
    };

    let (cache, cache_writer) = match config.redis_url.as_deref() {
        Some(redis_url) => {
            let client = create_redis_client(redis_url)?;
            let (cache, handle) = Cache::new(client);
            (Some(cache), Some(handle))
        }
        None => {
            tracing::info!("REDIS_URL not set, attribute caching disabled");
            (None, None)
        }
    };

    let attributes = Arc::new(RemoteAttributeExtractor::new(
        config.attribute_service_url.clone(),
        cache,
    ));
    let outfit_service = Arc::new(OutfitService::new(wardrobe.clone(), outfits));
    let state = AppState::new(wardrobe, outfit_service, attributes);

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_writer {
        handle.shutdown().await;
    }

    Ok(())
}

/// One backend serves both store roles
fn split_store<S>(store: Arc<S>) -> (Arc<dyn WardrobeStore>, Arc<dyn OutfitStore>)
where
    S: WardrobeStore + OutfitStore + 'static,
{
    let wardrobe: Arc<dyn WardrobeStore> = store.clone();
    let outfits: Arc<dyn OutfitStore> = store;
    (wardrobe, outfits)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
