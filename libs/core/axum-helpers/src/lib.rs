//! # Axum Helpers
//!
//! Shared HTTP plumbing for the catalog services.
//!
//! - **[`server`]**: router assembly with OpenAPI UIs, health endpoints, graceful shutdown
//! - **[`errors`]**: [`AppError`] and the JSON [`ErrorResponse`] with typed [`ErrorCode`]s
//! - **[`extractors`]**: integer id path parameter, validated JSON body
//! - **[`audit`]**: audit trail on the `audit` tracing target

pub mod audit;
pub mod errors;
pub mod extractors;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPath, ValidatedJson};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
