//! API routes module

pub mod health;

use axum::Router;
use domain_catalog::CatalogStore;
use std::sync::Arc;

/// Catalog routes over the configured store; mounted under `/api`.
pub fn routes<S: CatalogStore>(store: Arc<S>) -> Router {
    domain_catalog::handlers::router(store)
}
