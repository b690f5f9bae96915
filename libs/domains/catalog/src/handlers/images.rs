use axum::{
    Json,
    extract::{Query, State},
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
use std::sync::Arc;

use super::IMAGES_TAG;
use crate::dto::{CreateImage, LookupQuery, UpdateImage};
use crate::error::CatalogResult;
use crate::models::Image;
use crate::repository::CatalogStore;
use crate::service::ImageService;

#[utoipa::path(
    get,
    path = "",
    tag = IMAGES_TAG,
    responses(
        (status = 200, description = "All images", body = Vec<Image>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn list_images<S: CatalogStore>(
    State(service): State<Arc<ImageService<S>>>,
) -> CatalogResult<Json<Vec<Image>>> {
    Ok(Json(service.get_all().await?))
}

/// Images of one produit
#[utoipa::path(
    get,
    path = "/produit/{id}",
    tag = IMAGES_TAG,
    params(
        ("id" = i32, Path, description = "Produit ID")
    ),
    responses(
        (status = 200, description = "Images of the produit", body = Vec<Image>),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn list_images_of_produit<S: CatalogStore>(
    State(service): State<Arc<ImageService<S>>>,
    IdPath(id): IdPath,
) -> CatalogResult<Json<Vec<Image>>> {
    Ok(Json(service.by_produit(id).await?))
}

/// First image matching on `nom` (substring) or `url` (exact)
#[utoipa::path(
    get,
    path = "/lookup",
    tag = IMAGES_TAG,
    params(LookupQuery),
    responses(
        (status = 200, description = "Image found", body = Image),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn lookup_image<S: CatalogStore>(
    State(service): State<Arc<ImageService<S>>>,
    Query(query): Query<LookupQuery>,
) -> CatalogResult<Json<Image>> {
    Ok(Json(service.lookup(&query.property, &query.value).await?))
}

/// Attach an image to an existing produit
#[utoipa::path(
    post,
    path = "",
    tag = IMAGES_TAG,
    request_body = CreateImage,
    responses(
        (status = 201, description = "Image created", body = Image),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn create_image<S: CatalogStore>(
    State(service): State<Arc<ImageService<S>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateImage>,
) -> CatalogResult<impl IntoResponse> {
    let image = service.create(input).await?;

    AuditEvent::new(
        "image.create",
        Some(format!("image:{}", image.id_image)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(&image)
    .log();

    Ok((StatusCode::CREATED, Json(image)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = IMAGES_TAG,
    params(
        ("id" = i32, Path, description = "Image ID")
    ),
    responses(
        (status = 200, description = "Image found", body = Image),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn get_image<S: CatalogStore>(
    State(service): State<Arc<ImageService<S>>>,
    IdPath(id): IdPath,
) -> CatalogResult<Json<Image>> {
    Ok(Json(service.get_by_id(id).await?))
}

/// Change an image's name and URL
#[utoipa::path(
    put,
    path = "/{id}",
    tag = IMAGES_TAG,
    params(
        ("id" = i32, Path, description = "Image ID")
    ),
    request_body = UpdateImage,
    responses(
        (status = 200, description = "Image updated", body = Image),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn update_image<S: CatalogStore>(
    State(service): State<Arc<ImageService<S>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateImage>,
) -> CatalogResult<Json<Image>> {
    Ok(Json(service.update(id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = IMAGES_TAG,
    params(
        ("id" = i32, Path, description = "Image ID")
    ),
    responses(
        (status = 204, description = "Image deleted"),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn delete_image<S: CatalogStore>(
    State(service): State<Arc<ImageService<S>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> CatalogResult<impl IntoResponse> {
    service.delete(id).await?;

    AuditEvent::new("image.delete", Some(format!("image:{id}")), AuditOutcome::Success)
        .with_request(&headers)
        .log();

    Ok(StatusCode::NO_CONTENT)
}
