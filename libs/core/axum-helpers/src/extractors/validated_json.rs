//! JSON body extractor that runs `validator` rules before the handler sees the payload.

use crate::errors::{AppError, ErrorCode, ErrorResponse};
use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use validator::{Validate, ValidationErrors};

/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateMarque {
///     #[validate(length(min = 1, max = 100))]
///     nom: String,
/// }
///
/// async fn create(ValidatedJson(input): ValidatedJson<CreateMarque>) -> String {
///     input.nom
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        data.validate().map_err(|e| {
            let body = ErrorResponse::new(
                ErrorCode::ValidationError,
                ErrorCode::ValidationError.default_message(),
            )
            .with_details(field_errors(&e));
            (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
        })?;

        Ok(ValidatedJson(data))
    }
}

/// `{ field: [{code, message, params}] }`
fn field_errors(errors: &ValidationErrors) -> Value {
    let fields = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let entries: Vec<Value> = errs
                .iter()
                .map(|err| {
                    json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), Value::Array(entries))
        })
        .collect::<Map<_, _>>();
    Value::Object(fields)
}
