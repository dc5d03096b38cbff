//! # Planora API Server
//!
//! JSON HTTP API for the Planora planning service: projects, areas,
//! tasks, meetings, meeting notes, and template-driven project
//! bootstrapping.
//!
//! ## Architecture
//!
//! Built with Axum over a storage interface with two backends:
//! PostgreSQL (sqlx) or flat JSON files on disk, selected via
//! `STORAGE_BACKEND`. Authentication is JWT-based (register/login).
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p planora-api
//! ```

use std::sync::Arc;

use planora_api::app::{build_router, AppState};
use planora_api::config::{Config, StorageBackend};
use planora_api::seed::seed_bundled_templates;
use planora_shared::db::migrations::{ensure_database_exists, run_migrations};
use planora_shared::db::pool::{create_pool, DatabaseConfig};
use planora_shared::store::flatfile::FileStore;
use planora_shared::store::postgres::PgStore;
use planora_shared::store::Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planora_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Planora API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let store: Arc<dyn Store> = match config.storage.backend {
        StorageBackend::Postgres => {
            let url = config
                .storage
                .database_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;

            ensure_database_exists(&url).await?;

            let pool = create_pool(DatabaseConfig {
                url,
                max_connections: config.storage.database_max_connections,
                ..Default::default()
            })
            .await?;

            run_migrations(&pool).await?;

            Arc::new(PgStore::new(pool))
        }
        StorageBackend::File => {
            let store = FileStore::open(&config.storage.data_dir).await?;
            tracing::info!(data_dir = %store.root().display(), "Using flat-file storage");
            Arc::new(store)
        }
    };

    seed_bundled_templates(store.as_ref()).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(store, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    } else {
        tracing::info!("Shutdown signal received");
    }
}
