use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use std::time::Instant;
use tracing::debug;

use crate::common::DatabaseError;

/// Runs `SELECT 1` against the pool.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    db.query_one_raw(stmt)
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("PostgreSQL: {e}")))?;
    debug!("PostgreSQL health check passed");
    Ok(())
}

/// Outcome of [`check_health_detailed`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub healthy: bool,
    pub message: Option<String>,
    pub response_time_ms: u64,
}

impl HealthStatus {
    pub fn healthy(response_time_ms: u64) -> Self {
        Self {
            healthy: true,
            message: None,
            response_time_ms,
        }
    }

    pub fn unhealthy(message: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            healthy: false,
            message: Some(message.into()),
            response_time_ms,
        }
    }
}

/// [`check_health`] with the round-trip time, never failing.
pub async fn check_health_detailed(db: &DatabaseConnection) -> HealthStatus {
    let start = Instant::now();
    let result = check_health(db).await;
    let elapsed = start.elapsed().as_millis() as u64;
    match result {
        Ok(()) => HealthStatus::healthy(elapsed),
        Err(e) => HealthStatus::unhealthy(e.to_string(), elapsed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbErr, MockDatabase};

    #[tokio::test]
    async fn test_check_health_reports_query_failure() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_owned())])
            .into_connection();

        let status = check_health_detailed(&db).await;
        assert!(!status.healthy);
        assert!(status.message.unwrap().contains("connection reset"));
    }

    #[test]
    fn test_health_status_constructors() {
        assert_eq!(HealthStatus::healthy(3).message, None);
        let down = HealthStatus::unhealthy("timeout", 8000);
        assert!(!down.healthy);
        assert_eq!(down.message.as_deref(), Some("timeout"));
    }
}
