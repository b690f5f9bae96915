//! Catalog API - REST server for produits, marques, types and images

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_catalog::{InMemoryCatalog, PgCatalog};
use migration::Migrator;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::{Config, StorageBackend};
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(storage = %config.storage, "Starting {} v{}", config.app.name, config.app.version);

    let (api_routes, db) = match (config.storage, config.database.clone()) {
        (StorageBackend::Postgres, Some(database)) => {
            let db = database::postgres::connect_from_config_with_retry(database, None)
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;
            database::postgres::run_migrations::<Migrator>(&db, config.app.name).await?;

            let store = Arc::new(PgCatalog::new(db.clone()));
            (api::routes(store), Some(db))
        }
        (StorageBackend::Postgres, None) => {
            eyre::bail!("postgres storage selected without a database configuration")
        }
        (StorageBackend::Memory, _) => {
            tracing::warn!("In-memory storage: records are lost on restart");
            (api::routes(Arc::new(InMemoryCatalog::new())), None)
        }
    };

    let state = AppState { config, db };

    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)?;
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::health::router(state.clone()));

    info!("Starting Catalog API on port {}", state.config.server.port);

    let server_config = state.config.server.clone();
    create_production_app(app, &server_config, Duration::from_secs(30), async move {
        if let Some(db) = state.db {
            info!("Shutting down: closing PostgreSQL pool");
            if let Err(e) = db.close().await {
                tracing::warn!(error = %e, "Failed to close PostgreSQL pool");
            }
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
