//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Products, brands, product types and images",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api", api = domain_catalog::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_mounted_under_api() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/produits",
            "/api/produits/filter",
            "/api/produits/{id}",
            "/api/marques/{id}",
            "/api/types/name/{name}",
            "/api/images/produit/{id}",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }
}
