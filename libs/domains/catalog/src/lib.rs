//! Catalog Domain
//!
//! Produits, their brands (marques), their types and their images.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← axum routes, OpenAPI, audit events
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Name resolution, stock rules, filters, cascading deletes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Generic CRUD + exact-name lookup (Postgres or in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, patch allow-lists, scalar property tables
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{PgCatalog, ProduitService};
//! use sea_orm::Database;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let store = Arc::new(PgCatalog::new(db));
//! let produits = ProduitService::new(Arc::clone(&store));
//! let app = domain_catalog::handlers::router(store);
//! # Ok(())
//! # }
//! ```

pub mod conversions;
pub mod dto;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use dto::{
    CascadeReport, CreateImage, CreateProduit, LookupQuery, NomRequest, OwnerSummary,
    ProduitDetail, ProduitFilter, ProduitSummary, UpdateImage, UpdateProduit,
};
pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use models::{Image, Marque, Produit, TypeProduit};
pub use postgres::PgCatalog;
pub use repository::{
    CatalogEntity, CatalogStore, InMemoryCatalog, NamedEntity, NamedRepository, Repository,
    ScalarMatch,
};
pub use service::{
    ImageService, MarqueService, OwnerService, ProduitOwner, ProduitService, TypeProduitService,
};
