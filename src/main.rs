mod adapters;
mod application;
mod domain;
mod services;

use std::sync::Arc;

use adapters::{
    repositories::{InMemoryMetadataRepository, PgMetadataRepository},
    routes::create_router,
    state::AppState,
    storage_registry::StorageRegistry,
};
use application::repositories::metadata_repository::MetadataRepository;
use domain::config::local::LocalConfig;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = LocalConfig::from_env().expect("ERROR: Invalid environment configuration");

    tracing::info!(
        "Starting file-storage-service with storage root {}",
        config.storage.storage_root
    );

    // Configure CORS
    let cors = match &config.cors_allowed_origins {
        Some(allowed_origins) => {
            let origins: Vec<_> = allowed_origins
                .iter()
                .map(|s| s.parse().expect("Invalid CORS origin"))
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        // Allow all origins if not specified (only for development)
        None => CorsLayer::permissive(),
    };

    let metadata_repository: Arc<dyn MetadataRepository> = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(std::time::Duration::from_secs(30))
                .connect(database_url)
                .await
                .expect("ERROR: Failed to connect to PostgreSQL database. Check DATABASE_URL and network connectivity.");

            let repository = PgMetadataRepository::new(pool);
            repository
                .ensure_schema()
                .await
                .expect("ERROR: Failed to prepare the files table");
            tracing::info!("Database connection established");
            Arc::new(repository)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, file metadata is kept in memory");
            Arc::new(InMemoryMetadataRepository::new())
        }
    };

    let storage_services = services::create_storage_services(&config)
        .await
        .expect("Failed to create storage services");

    let app_state = AppState {
        storage_services: StorageRegistry::new(storage_services),
        metadata_repository,
        default_locale: config.default_locale,
        storage_root: config.storage.storage_root.clone(),
    };

    let router = create_router(app_state, config.max_upload_size).layer(cors);

    // Start the server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", config.port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
