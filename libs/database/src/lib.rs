//! PostgreSQL connectivity shared by the catalog services.
//!
//! # Features
//!
//! - `postgres` (default): SeaORM connectors, migrations runner, health checks
//!   and the generic [`BaseRepository`]
//! - `config` (default): `core_config::FromEnv` for [`postgres::PostgresConfig`]
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "catalog-api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "postgres")]
pub mod repository;

pub use common::{DatabaseError, DatabaseResult};

#[cfg(feature = "postgres")]
pub use repository::BaseRepository;
