//! Request and response bodies.
//!
//! Brands and types travel by name; their identities never appear in a
//! produit payload.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Produit as listed: no stock figures, no description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProduitSummary {
    pub id: i32,
    pub nom: String,
    #[serde(rename = "type")]
    pub type_produit: Option<String>,
    pub marque: Option<String>,
    /// Stock has fallen below the minimum
    pub en_reappro: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProduitDetail {
    pub id: i32,
    pub nom: String,
    #[serde(rename = "type")]
    pub type_produit: Option<String>,
    pub marque: Option<String>,
    pub description: Option<String>,
    pub stock: Option<i32>,
    pub stock_mini: Option<i32>,
    pub stock_maxi: Option<i32>,
    pub en_reappro: bool,
}

/// DTO for creating a produit. `id` and `enReappro` are accepted and ignored.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduit {
    #[validate(length(min = 1, max = 255))]
    pub nom: String,
    /// Name of an existing type
    #[serde(rename = "type", default)]
    pub type_produit: String,
    /// Name of an existing brand
    #[serde(default)]
    pub marque: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stock: Option<i32>,
    #[serde(default)]
    pub stock_mini: Option<i32>,
    #[serde(default)]
    pub stock_maxi: Option<i32>,
}

/// DTO for replacing a produit's fields.
///
/// A blank or missing `marque`/`type` keeps the current one.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduit {
    #[validate(length(min = 1, max = 255))]
    pub nom: String,
    #[serde(rename = "type", default)]
    pub type_produit: Option<String>,
    #[serde(default)]
    pub marque: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stock: Option<i32>,
    #[serde(default)]
    pub stock_mini: Option<i32>,
    #[serde(default)]
    pub stock_maxi: Option<i32>,
}

/// Query filters for searching produits. Criteria combine with AND.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProduitFilter {
    /// Case-insensitive substring of the name or description
    pub search: Option<String>,
    /// Exact brand name; `all` matches every brand
    pub marque: Option<String>,
    /// Exact type name; `all` matches every type
    #[serde(rename = "type")]
    pub type_produit: Option<String>,
}

/// Lookup on a searchable property, e.g. `?property=nom&value=chaus`
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LookupQuery {
    pub property: String,
    pub value: String,
}

/// Brand or type with the number of produits referencing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    pub id: i32,
    pub nom: String,
    pub nombre_produits: usize,
}

/// DTO for creating or renaming a brand or type
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct NomRequest {
    #[validate(length(min = 1, max = 255))]
    pub nom: String,
}

/// Outcome of deleting a record together with its dependents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CascadeReport {
    pub message: String,
    pub produits_supprimes: usize,
    pub images_supprimees: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateImage {
    #[validate(length(min = 1, max = 255))]
    pub nom: String,
    #[validate(length(min = 1))]
    pub url: String,
    pub id_produit: i32,
}

/// DTO for updating an image. The owning produit cannot change.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateImage {
    #[validate(length(min = 1, max = 255))]
    pub nom: String,
    #[validate(length(min = 1))]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_produit_ignores_identity_and_flag() {
        let input: CreateProduit = serde_json::from_value(json!({
            "id": 12,
            "nom": "Chaussure de trail",
            "type": "Chaussures",
            "marque": "Salomon",
            "stockMini": 2,
            "stockMaxi": 20,
            "enReappro": true
        }))
        .unwrap();

        assert_eq!(input.type_produit, "Chaussures");
        assert_eq!(input.stock_mini, Some(2));
        assert_eq!(input.stock, None);
    }

    #[test]
    fn test_summary_field_names() {
        let summary = ProduitSummary {
            id: 1,
            nom: "Casquette".into(),
            type_produit: Some("Accessoires".into()),
            marque: Some("Puma".into()),
            en_reappro: false,
        };

        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "id": 1,
                "nom": "Casquette",
                "type": "Accessoires",
                "marque": "Puma",
                "enReappro": false
            })
        );
    }

    #[test]
    fn test_blank_nom_fails_validation() {
        let input = NomRequest { nom: String::new() };
        assert!(input.validate().is_err());
    }
}
