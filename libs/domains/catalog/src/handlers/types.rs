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

use super::TYPES_TAG;
use crate::dto::{CascadeReport, LookupQuery, NomRequest, OwnerSummary};
use crate::error::CatalogResult;
use crate::repository::CatalogStore;
use crate::service::TypeProduitService;

/// List types with their produit counts
#[utoipa::path(
    get,
    path = "",
    tag = TYPES_TAG,
    responses(
        (status = 200, description = "All types", body = Vec<OwnerSummary>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn list_types<S: CatalogStore>(
    State(service): State<Arc<TypeProduitService<S>>>,
) -> CatalogResult<Json<Vec<OwnerSummary>>> {
    Ok(Json(service.get_all().await?))
}

/// First type whose name contains the value, ignoring case
#[utoipa::path(
    get,
    path = "/lookup",
    tag = TYPES_TAG,
    params(LookupQuery),
    responses(
        (status = 200, description = "Type found", body = OwnerSummary),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn lookup_type<S: CatalogStore>(
    State(service): State<Arc<TypeProduitService<S>>>,
    Query(query): Query<LookupQuery>,
) -> CatalogResult<Json<OwnerSummary>> {
    Ok(Json(service.lookup(&query.property, &query.value).await?))
}

/// Get a type by its exact name
#[utoipa::path(
    get,
    path = "/name/{name}",
    tag = TYPES_TAG,
    params(
        ("name" = String, Path, description = "Exact type name")
    ),
    responses(
        (status = 200, description = "Type found", body = OwnerSummary),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn get_type_by_name<S: CatalogStore>(
    State(service): State<Arc<TypeProduitService<S>>>,
    Path(name): Path<String>,
) -> CatalogResult<Json<OwnerSummary>> {
    Ok(Json(service.get_by_name(&name).await?))
}

/// Create a type
#[utoipa::path(
    post,
    path = "",
    tag = TYPES_TAG,
    request_body = NomRequest,
    responses(
        (status = 201, description = "Type created", body = OwnerSummary),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn create_type<S: CatalogStore>(
    State(service): State<Arc<TypeProduitService<S>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<NomRequest>,
) -> CatalogResult<impl IntoResponse> {
    let type_produit = service.create(input).await?;

    AuditEvent::new(
        "type_produit.create",
        Some(format!("type_produit:{}", type_produit.id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(json!({ "nom": type_produit.nom }))
    .log();

    Ok((StatusCode::CREATED, Json(type_produit)))
}

/// Get a type by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TYPES_TAG,
    params(
        ("id" = i32, Path, description = "Type ID")
    ),
    responses(
        (status = 200, description = "Type found", body = OwnerSummary),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn get_type<S: CatalogStore>(
    State(service): State<Arc<TypeProduitService<S>>>,
    IdPath(id): IdPath,
) -> CatalogResult<Json<OwnerSummary>> {
    Ok(Json(service.get_by_id(id).await?))
}

/// Rename a type
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TYPES_TAG,
    params(
        ("id" = i32, Path, description = "Type ID")
    ),
    request_body = NomRequest,
    responses(
        (status = 200, description = "Type renamed", body = OwnerSummary),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn rename_type<S: CatalogStore>(
    State(service): State<Arc<TypeProduitService<S>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<NomRequest>,
) -> CatalogResult<Json<OwnerSummary>> {
    Ok(Json(service.rename(id, input).await?))
}

/// Delete a type with its produits and their images
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TYPES_TAG,
    params(
        ("id" = i32, Path, description = "Type ID")
    ),
    responses(
        (status = 200, description = "Type deleted", body = CascadeReport),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn delete_type<S: CatalogStore>(
    State(service): State<Arc<TypeProduitService<S>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> CatalogResult<Json<CascadeReport>> {
    let report = service.delete(id).await?;

    AuditEvent::new(
        "type_produit.delete",
        Some(format!("type_produit:{id}")),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(&report)
    .log();

    Ok(Json(report))
}
