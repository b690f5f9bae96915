use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestPathResponse, BadRequestResponse, BadRequestValidationResponse,
        ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde_json::json;
use std::sync::Arc;

use super::MARQUES_TAG;
use crate::dto::{CascadeReport, LookupQuery, NomRequest, OwnerSummary};
use crate::error::CatalogResult;
use crate::repository::CatalogStore;
use crate::service::MarqueService;

/// List brands with their produit counts
#[utoipa::path(
    get,
    path = "",
    tag = MARQUES_TAG,
    responses(
        (status = 200, description = "All brands", body = Vec<OwnerSummary>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn list_marques<S: CatalogStore>(
    State(service): State<Arc<MarqueService<S>>>,
) -> CatalogResult<Json<Vec<OwnerSummary>>> {
    Ok(Json(service.get_all().await?))
}

/// First brand whose name contains the value, ignoring case
#[utoipa::path(
    get,
    path = "/lookup",
    tag = MARQUES_TAG,
    params(LookupQuery),
    responses(
        (status = 200, description = "Brand found", body = OwnerSummary),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn lookup_marque<S: CatalogStore>(
    State(service): State<Arc<MarqueService<S>>>,
    Query(query): Query<LookupQuery>,
) -> CatalogResult<Json<OwnerSummary>> {
    Ok(Json(service.lookup(&query.property, &query.value).await?))
}

/// Get a brand by its exact name
#[utoipa::path(
    get,
    path = "/name/{name}",
    tag = MARQUES_TAG,
    params(
        ("name" = String, Path, description = "Exact brand name")
    ),
    responses(
        (status = 200, description = "Brand found", body = OwnerSummary),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn get_marque_by_name<S: CatalogStore>(
    State(service): State<Arc<MarqueService<S>>>,
    Path(name): Path<String>,
) -> CatalogResult<Json<OwnerSummary>> {
    Ok(Json(service.get_by_name(&name).await?))
}

/// Create a brand
#[utoipa::path(
    post,
    path = "",
    tag = MARQUES_TAG,
    request_body = NomRequest,
    responses(
        (status = 201, description = "Brand created", body = OwnerSummary),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn create_marque<S: CatalogStore>(
    State(service): State<Arc<MarqueService<S>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<NomRequest>,
) -> CatalogResult<impl IntoResponse> {
    let marque = service.create(input).await?;

    AuditEvent::new(
        "marque.create",
        Some(format!("marque:{}", marque.id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(json!({ "nom": marque.nom }))
    .log();

    Ok((StatusCode::CREATED, Json(marque)))
}

/// Get a brand by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = MARQUES_TAG,
    params(
        ("id" = i32, Path, description = "Brand ID")
    ),
    responses(
        (status = 200, description = "Brand found", body = OwnerSummary),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn get_marque<S: CatalogStore>(
    State(service): State<Arc<MarqueService<S>>>,
    IdPath(id): IdPath,
) -> CatalogResult<Json<OwnerSummary>> {
    Ok(Json(service.get_by_id(id).await?))
}

/// Rename a brand
#[utoipa::path(
    put,
    path = "/{id}",
    tag = MARQUES_TAG,
    params(
        ("id" = i32, Path, description = "Brand ID")
    ),
    request_body = NomRequest,
    responses(
        (status = 200, description = "Brand renamed", body = OwnerSummary),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn rename_marque<S: CatalogStore>(
    State(service): State<Arc<MarqueService<S>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<NomRequest>,
) -> CatalogResult<Json<OwnerSummary>> {
    Ok(Json(service.rename(id, input).await?))
}

/// Delete a brand with its produits and their images
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = MARQUES_TAG,
    params(
        ("id" = i32, Path, description = "Brand ID")
    ),
    responses(
        (status = 200, description = "Brand deleted", body = CascadeReport),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn delete_marque<S: CatalogStore>(
    State(service): State<Arc<MarqueService<S>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> CatalogResult<Json<CascadeReport>> {
    let report = service.delete(id).await?;

    AuditEvent::new(
        "marque.delete",
        Some(format!("marque:{id}")),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(&report)
    .log();

    Ok(Json(report))
}
