//! Readiness endpoint

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};

use crate::state::AppState;

async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let mut checks: Vec<(&str, HealthCheckFuture<'_>)> = Vec::new();

    if let Some(db) = &state.db {
        checks.push((
            "database",
            Box::pin(async move {
                database::postgres::check_health(db)
                    .await
                    .map_err(|e| e.to_string())
            }) as HealthCheckFuture<'_>,
        ));
    }

    run_health_checks(checks).await
}

/// `GET /ready`: 503 while the database is unreachable.
pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
