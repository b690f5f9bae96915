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
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde_json::json;
use std::sync::Arc;

use super::PRODUITS_TAG;
use crate::dto::{
    CreateProduit, LookupQuery, ProduitDetail, ProduitFilter, ProduitSummary, UpdateProduit,
};
use crate::error::CatalogResult;
use crate::repository::CatalogStore;
use crate::service::ProduitService;

/// List every produit
#[utoipa::path(
    get,
    path = "",
    tag = PRODUITS_TAG,
    responses(
        (status = 200, description = "All produits", body = Vec<ProduitSummary>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn list_produits<S: CatalogStore>(
    State(service): State<Arc<ProduitService<S>>>,
) -> CatalogResult<Json<Vec<ProduitSummary>>> {
    Ok(Json(service.get_all().await?))
}

/// Search produits; criteria combine with AND
#[utoipa::path(
    get,
    path = "/filter",
    tag = PRODUITS_TAG,
    params(ProduitFilter),
    responses(
        (status = 200, description = "Matching produits", body = Vec<ProduitSummary>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn filter_produits<S: CatalogStore>(
    State(service): State<Arc<ProduitService<S>>>,
    Query(filter): Query<ProduitFilter>,
) -> CatalogResult<Json<Vec<ProduitSummary>>> {
    Ok(Json(service.filter(filter).await?))
}

/// First produit whose `nom` or `description` contains the value
#[utoipa::path(
    get,
    path = "/lookup",
    tag = PRODUITS_TAG,
    params(LookupQuery),
    responses(
        (status = 200, description = "Produit found", body = ProduitDetail),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn lookup_produit<S: CatalogStore>(
    State(service): State<Arc<ProduitService<S>>>,
    Query(query): Query<LookupQuery>,
) -> CatalogResult<Json<ProduitDetail>> {
    Ok(Json(service.lookup(&query.property, &query.value).await?))
}

/// Get a produit by its exact name
#[utoipa::path(
    get,
    path = "/name/{name}",
    tag = PRODUITS_TAG,
    params(
        ("name" = String, Path, description = "Exact produit name")
    ),
    responses(
        (status = 200, description = "Produit found", body = ProduitDetail),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn get_produit_by_name<S: CatalogStore>(
    State(service): State<Arc<ProduitService<S>>>,
    Path(name): Path<String>,
) -> CatalogResult<Json<ProduitDetail>> {
    Ok(Json(service.get_by_name(&name).await?))
}

/// Create a produit from brand and type names
#[utoipa::path(
    post,
    path = "",
    tag = PRODUITS_TAG,
    request_body = CreateProduit,
    responses(
        (status = 201, description = "Produit created", body = ProduitDetail),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn create_produit<S: CatalogStore>(
    State(service): State<Arc<ProduitService<S>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateProduit>,
) -> CatalogResult<impl IntoResponse> {
    let produit = service.create(input).await?;

    AuditEvent::new(
        "produit.create",
        Some(format!("produit:{}", produit.id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(json!({
        "nom": produit.nom,
        "marque": produit.marque,
        "type": produit.type_produit,
    }))
    .log();

    Ok((StatusCode::CREATED, Json(produit)))
}

/// Get a produit by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = PRODUITS_TAG,
    params(
        ("id" = i32, Path, description = "Produit ID")
    ),
    responses(
        (status = 200, description = "Produit found", body = ProduitDetail),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn get_produit<S: CatalogStore>(
    State(service): State<Arc<ProduitService<S>>>,
    IdPath(id): IdPath,
) -> CatalogResult<Json<ProduitDetail>> {
    Ok(Json(service.get_by_id(id).await?))
}

/// Replace a produit's fields
#[utoipa::path(
    put,
    path = "/{id}",
    tag = PRODUITS_TAG,
    params(
        ("id" = i32, Path, description = "Produit ID")
    ),
    request_body = UpdateProduit,
    responses(
        (status = 200, description = "Produit updated", body = ProduitDetail),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn update_produit<S: CatalogStore>(
    State(service): State<Arc<ProduitService<S>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateProduit>,
) -> CatalogResult<Json<ProduitDetail>> {
    Ok(Json(service.update(id, input).await?))
}

/// Delete a produit and its images
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = PRODUITS_TAG,
    params(
        ("id" = i32, Path, description = "Produit ID")
    ),
    responses(
        (status = 204, description = "Produit deleted"),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn delete_produit<S: CatalogStore>(
    State(service): State<Arc<ProduitService<S>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> CatalogResult<impl IntoResponse> {
    let images = service.delete(id).await?;

    AuditEvent::new(
        "produit.delete",
        Some(format!("produit:{id}")),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(json!({ "images_supprimees": images }))
    .log();

    Ok(StatusCode::NO_CONTENT)
}
