pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every error response.
///
/// ```json
/// { "code": 1005, "error": "CONFLICT", "message": "Marque 'Nike' already exists" }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Numeric [`ErrorCode`]
    pub code: i32,
    /// Textual [`ErrorCode`]
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Error type shared by every HTTP handler. Domain errors convert into it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON parsing error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorResponse) {
        match self {
            AppError::SerdeJson(e) => {
                let code = ErrorCode::SerdeJsonError;
                tracing::error!(error_code = code.code(), error = ?e, "JSON parsing error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(code, code.default_message()),
                )
            }
            AppError::Database(e) => map_db_error(&e),
            AppError::JsonExtractorRejection(e) => {
                let code = ErrorCode::JsonExtraction;
                tracing::warn!(error_code = code.code(), error = ?e, "JSON extraction error");
                (e.status(), ErrorResponse::new(code, e.body_text()))
            }
            AppError::ValidationError(e) => {
                let code = ErrorCode::ValidationError;
                tracing::info!(error_code = code.code(), error = %e, "Validation error");
                let details = serde_json::to_value(&e).unwrap_or(serde_json::Value::Null);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(code, code.default_message()).with_details(details),
                )
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = ErrorCode::BadRequest.code(), "Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorResponse::new(ErrorCode::BadRequest, msg))
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorResponse::new(ErrorCode::NotFound, msg))
            }
            AppError::Conflict(msg) => {
                tracing::info!(error_code = ErrorCode::Conflict.code(), "Conflict: {}", msg);
                (StatusCode::CONFLICT, ErrorResponse::new(ErrorCode::Conflict, msg))
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(ErrorCode::InternalError, msg),
                )
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::new(ErrorCode::ServiceUnavailable, msg),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

/// Storage details stay in the logs; clients only see the default message.
fn map_db_error(error: &DbErr) -> (StatusCode, ErrorResponse) {
    let (status, code) = match error {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => {
            (StatusCode::NOT_FOUND, ErrorCode::DatabaseRecordNotFound)
        }
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, ErrorCode::DatabaseConnection)
        }
        DbErr::Query(_) | DbErr::Exec(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseQuery)
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseUnhandled),
    };

    if status.is_server_error() {
        tracing::error!(error_code = code.code(), error = ?error, "Database error");
    } else {
        tracing::info!(error_code = code.code(), error = %error, "Database record missing");
    }

    (status, ErrorResponse::new(code, code.default_message()))
}
