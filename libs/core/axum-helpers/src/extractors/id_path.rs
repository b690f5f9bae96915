//! Integer identity path parameter.

use crate::errors::{ErrorCode, ErrorResponse};
use axum::{
    Json,
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};

/// Parses the single `{id}` segment of a route as an `i32` identity.
///
/// ```ignore
/// async fn get_marque(IdPath(id): IdPath) -> String {
///     format!("marque {id}")
/// }
///
/// let app = Router::new().route("/marques/{id}", get(get_marque));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        raw.parse::<i32>().map(IdPath).map_err(|_| {
            let body = ErrorResponse::new(ErrorCode::InvalidPathParameter, format!("Invalid id: {raw}"));
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        })
    }
}
