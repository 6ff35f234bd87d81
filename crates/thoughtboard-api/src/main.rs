use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use thoughtboard_api::{
    build_router,
    config::{Config, StorageBackend},
    state::AppState,
};
use thoughtboard_persist::{MemoryThoughtStore, MongoStoreBuilder, ThoughtStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!("Starting thoughtboard API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    let store = connect_store(&config).await?;

    let state = Arc::new(AppState::new(config.clone(), store));
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server running on http://{}", addr);
    tracing::info!("API docs: http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn ThoughtStore>> {
    let unique_content = config.thoughts.content_unique();

    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using the in-memory store, thoughts are lost on restart");
            Ok(Arc::new(
                MemoryThoughtStore::new().with_unique_content(unique_content),
            ))
        }
        StorageBackend::Mongodb => {
            tracing::info!("Connecting to MongoDB");
            let store = MongoStoreBuilder::new()
                .mongodb_uri(&config.mongodb_uri)
                .database(&config.mongodb.database)
                .collection(&config.mongodb.collection)
                .pool_size(config.mongodb.pool_size)
                .timeout_ms(config.mongodb.timeout_ms)
                .unique_content(unique_content)
                .build()
                .await?;
            tracing::info!("MongoDB connected");
            Ok(Arc::new(store))
        }
    }
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
