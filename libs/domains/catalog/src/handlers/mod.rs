mod images;
mod marques;
mod produits;
mod types;

use axum::{Router, routing::get};
use axum_helpers::errors::responses::{
    BadRequestPathResponse, BadRequestResponse, BadRequestValidationResponse, ConflictResponse,
    InternalServerErrorResponse, NotFoundResponse,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::dto::{
    CascadeReport, CreateImage, CreateProduit, NomRequest, OwnerSummary, ProduitDetail,
    ProduitSummary, UpdateImage, UpdateProduit,
};
use crate::models::Image;
use crate::repository::CatalogStore;
use crate::service::{ImageService, MarqueService, ProduitService, TypeProduitService};

pub const PRODUITS_TAG: &str = "Produits";
pub const MARQUES_TAG: &str = "Marques";
pub const TYPES_TAG: &str = "Types";
pub const IMAGES_TAG: &str = "Images";

/// OpenAPI documentation for the produit endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        produits::list_produits,
        produits::filter_produits,
        produits::lookup_produit,
        produits::get_produit_by_name,
        produits::create_produit,
        produits::get_produit,
        produits::update_produit,
        produits::delete_produit,
    ),
    components(
        schemas(ProduitSummary, ProduitDetail, CreateProduit, UpdateProduit),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            BadRequestPathResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Produits", description = "Products, with brand and type resolved by name")
    )
)]
pub struct ProduitsApiDoc;

/// OpenAPI documentation for the brand endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        marques::list_marques,
        marques::lookup_marque,
        marques::get_marque_by_name,
        marques::create_marque,
        marques::get_marque,
        marques::rename_marque,
        marques::delete_marque,
    ),
    components(
        schemas(OwnerSummary, NomRequest, CascadeReport),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            BadRequestPathResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Marques", description = "Brands; deleting one removes its products")
    )
)]
pub struct MarquesApiDoc;

/// OpenAPI documentation for the product type endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        types::list_types,
        types::lookup_type,
        types::get_type_by_name,
        types::create_type,
        types::get_type,
        types::rename_type,
        types::delete_type,
    ),
    components(
        schemas(OwnerSummary, NomRequest, CascadeReport),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            BadRequestPathResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Types", description = "Product types; deleting one removes its products")
    )
)]
pub struct TypesApiDoc;

/// OpenAPI documentation for the image endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        images::list_images,
        images::list_images_of_produit,
        images::lookup_image,
        images::create_image,
        images::get_image,
        images::update_image,
        images::delete_image,
    ),
    components(
        schemas(Image, CreateImage, UpdateImage),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            BadRequestPathResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Images", description = "Images owned by a product")
    )
)]
pub struct ImagesApiDoc;

/// Every catalog endpoint, relative to where [`router`] is mounted
#[derive(OpenApi)]
#[openapi(nest(
    (path = "/produits", api = ProduitsApiDoc),
    (path = "/marques", api = MarquesApiDoc),
    (path = "/types", api = TypesApiDoc),
    (path = "/images", api = ImagesApiDoc)
))]
pub struct ApiDoc;

pub fn produits_router<S: CatalogStore>(service: ProduitService<S>) -> Router {
    Router::new()
        .route(
            "/",
            get(produits::list_produits).post(produits::create_produit),
        )
        .route("/filter", get(produits::filter_produits))
        .route("/lookup", get(produits::lookup_produit))
        .route("/name/{name}", get(produits::get_produit_by_name))
        .route(
            "/{id}",
            get(produits::get_produit)
                .put(produits::update_produit)
                .delete(produits::delete_produit),
        )
        .with_state(Arc::new(service))
}

pub fn marques_router<S: CatalogStore>(service: MarqueService<S>) -> Router {
    Router::new()
        .route("/", get(marques::list_marques).post(marques::create_marque))
        .route("/lookup", get(marques::lookup_marque))
        .route("/name/{name}", get(marques::get_marque_by_name))
        .route(
            "/{id}",
            get(marques::get_marque)
                .put(marques::rename_marque)
                .delete(marques::delete_marque),
        )
        .with_state(Arc::new(service))
}

pub fn types_router<S: CatalogStore>(service: TypeProduitService<S>) -> Router {
    Router::new()
        .route("/", get(types::list_types).post(types::create_type))
        .route("/lookup", get(types::lookup_type))
        .route("/name/{name}", get(types::get_type_by_name))
        .route(
            "/{id}",
            get(types::get_type)
                .put(types::rename_type)
                .delete(types::delete_type),
        )
        .with_state(Arc::new(service))
}

pub fn images_router<S: CatalogStore>(service: ImageService<S>) -> Router {
    Router::new()
        .route("/", get(images::list_images).post(images::create_image))
        .route("/lookup", get(images::lookup_image))
        .route("/produit/{id}", get(images::list_images_of_produit))
        .route(
            "/{id}",
            get(images::get_image)
                .put(images::update_image)
                .delete(images::delete_image),
        )
        .with_state(Arc::new(service))
}

/// All four resources over one store
pub fn router<S: CatalogStore>(store: Arc<S>) -> Router {
    Router::new()
        .nest(
            "/produits",
            produits_router(ProduitService::new(Arc::clone(&store))),
        )
        .nest(
            "/marques",
            marques_router(MarqueService::new(Arc::clone(&store))),
        )
        .nest(
            "/types",
            types_router(TypeProduitService::new(Arc::clone(&store))),
        )
        .nest("/images", images_router(ImageService::new(store)))
}
