//! Application state management

use database::postgres::DatabaseConnection;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Absent with the in-memory backend
    pub db: Option<DatabaseConnection>,
}
