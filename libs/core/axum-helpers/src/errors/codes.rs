//! Error codes carried by every [`ErrorResponse`](super::ErrorResponse).
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! assert_eq!(ErrorCode::Conflict.as_str(), "CONFLICT");
//! assert_eq!(ErrorCode::Conflict.code(), 1005);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000s)
    ValidationError,
    /// Path parameter could not be parsed
    InvalidPathParameter,
    InvalidJson,
    NotFound,
    Conflict,
    /// Business rule violated by an otherwise well-formed request
    BadRequest,
    JsonExtraction,

    // Server errors (1500s)
    InternalError,
    ServiceUnavailable,

    // Database errors (2000s)
    DatabaseConnection,
    DatabaseRecordNotFound,
    DatabaseQuery,
    DatabaseUnhandled,

    SerdeJsonError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidPathParameter => "INVALID_PATH_PARAMETER",
            Self::InvalidJson => "INVALID_JSON",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::BadRequest => "BAD_REQUEST",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseConnection => "DATABASE_CONNECTION",
            Self::DatabaseRecordNotFound => "DATABASE_RECORD_NOT_FOUND",
            Self::DatabaseQuery => "DATABASE_QUERY",
            Self::DatabaseUnhandled => "DATABASE_UNHANDLED",
            Self::SerdeJsonError => "SERDE_JSON_ERROR",
        }
    }

    /// Numeric code for log aggregation
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidPathParameter => 1002,
            Self::InvalidJson => 1003,
            Self::NotFound => 1004,
            Self::Conflict => 1005,
            Self::BadRequest => 1006,
            Self::JsonExtraction => 1007,
            Self::InternalError => 1500,
            Self::ServiceUnavailable => 1503,
            Self::DatabaseConnection => 2001,
            Self::DatabaseRecordNotFound => 2002,
            Self::DatabaseQuery => 2003,
            Self::DatabaseUnhandled => 2099,
            Self::SerdeJsonError => 5001,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidPathParameter => "Invalid path parameter",
            Self::InvalidJson => "Invalid JSON in request body",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Resource already exists",
            Self::BadRequest => "Bad request",
            Self::JsonExtraction => "Failed to extract JSON from request body",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseConnection => "Database is unreachable",
            Self::DatabaseRecordNotFound => "Record not found",
            Self::DatabaseQuery => "A database error occurred",
            Self::DatabaseUnhandled => "An unexpected database error occurred",
            Self::SerdeJsonError => "Failed to process JSON",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let all = [
            ErrorCode::ValidationError,
            ErrorCode::InvalidPathParameter,
            ErrorCode::InvalidJson,
            ErrorCode::NotFound,
            ErrorCode::Conflict,
            ErrorCode::BadRequest,
            ErrorCode::JsonExtraction,
            ErrorCode::InternalError,
            ErrorCode::ServiceUnavailable,
            ErrorCode::DatabaseConnection,
            ErrorCode::DatabaseRecordNotFound,
            ErrorCode::DatabaseQuery,
            ErrorCode::DatabaseUnhandled,
            ErrorCode::SerdeJsonError,
        ];
        let mut codes: Vec<i32> = all.iter().map(ErrorCode::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn test_serde_matches_as_str() {
        let json = serde_json::to_string(&ErrorCode::InvalidPathParameter).unwrap();
        assert_eq!(json, "\"INVALID_PATH_PARAMETER\"");
        assert_eq!(ErrorCode::NotFound.to_string(), "NOT_FOUND");
    }
}
