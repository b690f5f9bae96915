use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{kind} {key} not found")]
    NotFound { kind: &'static str, key: String },

    /// Business rule violation; the message is shown to the caller.
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{kind} '{name}' already exists")]
    DuplicateName { kind: &'static str, name: String },

    #[error("Persistence failure: {0}")]
    Persistence(String),

    #[error("{kind} has no searchable property '{property}'")]
    NotSupported { kind: &'static str, property: String },
}

impl CatalogError {
    pub fn not_found(kind: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<DbErr> for CatalogError {
    fn from(err: DbErr) -> Self {
        CatalogError::Persistence(err.to_string())
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            e @ CatalogError::NotFound { .. } => AppError::NotFound(e.to_string()),
            CatalogError::InvalidArgument(msg) => AppError::BadRequest(msg),
            e @ CatalogError::DuplicateName { .. } => AppError::Conflict(e.to_string()),
            CatalogError::Persistence(msg) => AppError::InternalServerError(msg),
            // Only reachable through a caller-supplied property name
            e @ CatalogError::NotSupported { .. } => AppError::BadRequest(e.to_string()),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        match self {
            CatalogError::NotFound { kind, key } => {
                tracing::debug!(kind, key, "Not found");
                StatusCode::NOT_FOUND.into_response()
            }
            other => AppError::from(other).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_not_found_renders_empty_404() {
        use http_body_util::BodyExt;

        let response = CatalogError::not_found("Produit", 9).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (CatalogError::invalid("brand not found"), StatusCode::BAD_REQUEST),
            (
                CatalogError::DuplicateName {
                    kind: "Marque",
                    name: "Nike".into(),
                },
                StatusCode::CONFLICT,
            ),
            (
                CatalogError::Persistence("connection reset".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                CatalogError::NotSupported {
                    kind: "Marque",
                    property: "couleur".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_db_error_becomes_persistence() {
        let err: CatalogError = DbErr::Custom("boom".into()).into();
        assert!(matches!(err, CatalogError::Persistence(msg) if msg.contains("boom")));
    }
}
