//! Visage Gateway - Entry Point

use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use visage_gateway::auth::SessionConfig;
use visage_gateway::cache::RenderCache;
use visage_gateway::config::GatewayConfig;
use visage_gateway::db::ProfileRepository;
use visage_gateway::storage::{BucketClient, InMemoryObjectStore, ObjectStore};
use visage_gateway::{build_routes, AppState, ProfileActions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "visage_gateway=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Visage Gateway v{}", env!("CARGO_PKG_VERSION"));

    let config = GatewayConfig::from_env()?;

    let repository = build_repository(&config).await?;
    let store: Arc<dyn ObjectStore> = match &config.storage {
        Some(storage) => Arc::new(BucketClient::new(
            &storage.endpoint,
            storage.bucket.clone(),
            storage.api_key.clone(),
        )),
        None => {
            tracing::warn!("storage endpoint not configured, using in-memory object store");
            Arc::new(InMemoryObjectStore::new())
        }
    };

    let sessions = SessionConfig::new(
        &config.session_secret,
        "visage".to_string(),
        "visage".to_string(),
    );
    let actions = ProfileActions::new(repository, store, RenderCache::new());

    let app = build_routes(AppState::new(actions, sessions))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
        .layer(TraceLayer::new_for_http());

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(feature = "persistence-sqlx")]
async fn build_repository(config: &GatewayConfig) -> anyhow::Result<Arc<dyn ProfileRepository>> {
    use visage_gateway::db::{init_pool, initialize_schema, SqlxProfileRepository};

    let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required with persistence-sqlx"))?;
    let pool = init_pool(database_url).await?;
    initialize_schema(&pool).await?;
    Ok(Arc::new(SqlxProfileRepository::new(pool)))
}

#[cfg(not(feature = "persistence-sqlx"))]
async fn build_repository(_config: &GatewayConfig) -> anyhow::Result<Arc<dyn ProfileRepository>> {
    use visage_gateway::db::InMemoryProfileRepository;

    tracing::warn!("persistence-sqlx disabled, using in-memory profile repository");
    Ok(Arc::new(InMemoryProfileRepository::new()))
}
