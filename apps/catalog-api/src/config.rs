//! Configuration for Catalog API

use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_parse_or, server::ServerConfig};
use database::postgres::PostgresConfig;
use std::fmt;
use std::str::FromStr;

pub use core_config::Environment;

/// Where the catalog keeps its records, read from `CATALOG_STORAGE`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    /// Process-local maps; everything is lost on restart
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend '{other}'")),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgres"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub storage: StorageBackend,
    /// Only read when `storage` is [`StorageBackend::Postgres`]
    pub database: Option<PostgresConfig>,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self::load()?)
    }

    fn load() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let storage = env_parse_or("CATALOG_STORAGE", StorageBackend::Postgres)?;
        let database = match storage {
            StorageBackend::Postgres => Some(PostgresConfig::from_env()?),
            StorageBackend::Memory => None,
        };
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            storage,
            database,
            server,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_needs_no_database() {
        temp_env::with_vars(
            [
                ("CATALOG_STORAGE", Some("memory")),
                ("DATABASE_URL", None),
            ],
            || {
                let config = Config::load().unwrap();
                assert_eq!(config.storage, StorageBackend::Memory);
                assert!(config.database.is_none());
            },
        );
    }

    #[test]
    fn test_postgres_backend_requires_database_url() {
        temp_env::with_vars(
            [("CATALOG_STORAGE", None::<&str>), ("DATABASE_URL", None)],
            || {
                let err = Config::load().unwrap_err();
                assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "DATABASE_URL"));
            },
        );
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        temp_env::with_var("CATALOG_STORAGE", Some("mongo"), || {
            let err = Config::load().unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { key, .. } if key == "CATALOG_STORAGE"));
        });
    }

    #[test]
    fn test_backend_parsing_ignores_case() {
        assert_eq!("Memory".parse::<StorageBackend>(), Ok(StorageBackend::Memory));
        assert_eq!("POSTGRES".parse::<StorageBackend>(), Ok(StorageBackend::Postgres));
        assert_eq!(StorageBackend::Memory.to_string(), "memory");
    }
}
