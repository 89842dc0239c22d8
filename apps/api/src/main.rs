use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use storefront_api::api::{build_router, AppState};
use storefront_api::config::{AppConfig, StoreBackend};
use storefront_api::domain::repositories::{ProductRepository, UserRepository};
use storefront_api::infrastructure::database;
use storefront_api::infrastructure::repositories::{
    InMemoryStore, MongoProductRepository, MongoUserRepository,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "loaded configuration");

    let (users, products): (Arc<dyn UserRepository>, Arc<dyn ProductRepository>) =
        match config.store_backend {
            StoreBackend::Mongo => {
                tracing::info!(database = %config.database_name, "Connecting to MongoDB...");
                let db = database::connect(&config.mongodb_uri, &config.database_name).await?;
                database::ensure_indexes(&db).await?;
                tracing::info!("Database connected successfully");

                let users: Arc<dyn UserRepository> = Arc::new(MongoUserRepository::new(&db));
                let products: Arc<dyn ProductRepository> =
                    Arc::new(MongoProductRepository::new(&db));
                (users, products)
            }
            StoreBackend::Memory => {
                tracing::warn!("using the in-memory store; data is lost on shutdown");
                let store = Arc::new(InMemoryStore::new());
                let users: Arc<dyn UserRepository> = store.clone();
                let products: Arc<dyn ProductRepository> = store;
                (users, products)
            }
        };

    let state = AppState::new(users, products, &config)?;
    let app = build_router(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
