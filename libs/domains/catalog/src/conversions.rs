//! Record ↔ transfer shape conversions
//!
//! Everything here is pure: brand and type names are handed in by the
//! caller, never fetched.

use std::collections::HashMap;

use crate::dto::{OwnerSummary, ProduitDetail, ProduitSummary};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Marque, Produit, TypeProduit};
use crate::repository::{CatalogEntity, NamedEntity};

/// Needs restock: `stock < stock_mini`. False when either value is absent.
pub fn en_reappro(stock: Option<i32>, stock_mini: Option<i32>) -> bool {
    matches!((stock, stock_mini), (Some(stock), Some(mini)) if stock < mini)
}

/// Rejects `stock_mini > stock_maxi`; a missing bound is unconstrained.
pub fn check_stock_bounds(stock_mini: Option<i32>, stock_maxi: Option<i32>) -> CatalogResult<()> {
    match (stock_mini, stock_maxi) {
        (Some(mini), Some(maxi)) if mini > maxi => Err(CatalogError::invalid(format!(
            "stockMini ({mini}) must not exceed stockMaxi ({maxi})"
        ))),
        _ => Ok(()),
    }
}

pub fn summary(produit: &Produit, marque: Option<&str>, type_produit: Option<&str>) -> ProduitSummary {
    ProduitSummary {
        id: produit.id_produit,
        nom: produit.nom.clone(),
        type_produit: type_produit.map(str::to_string),
        marque: marque.map(str::to_string),
        en_reappro: en_reappro(produit.stock, produit.stock_mini),
    }
}

pub fn detail(produit: &Produit, marque: Option<&str>, type_produit: Option<&str>) -> ProduitDetail {
    ProduitDetail {
        id: produit.id_produit,
        nom: produit.nom.clone(),
        type_produit: type_produit.map(str::to_string),
        marque: marque.map(str::to_string),
        description: produit.description.clone(),
        stock: produit.stock,
        stock_mini: produit.stock_mini,
        stock_maxi: produit.stock_maxi,
        en_reappro: en_reappro(produit.stock, produit.stock_mini),
    }
}

/// Brand and type names by identity, for mapping many produits at once.
#[derive(Debug, Default)]
pub struct NameLookup {
    marques: HashMap<i32, String>,
    types: HashMap<i32, String>,
}

impl NameLookup {
    pub fn new(marques: Vec<Marque>, types: Vec<TypeProduit>) -> Self {
        Self {
            marques: marques.into_iter().map(|m| (m.id_marque, m.nom)).collect(),
            types: types
                .into_iter()
                .map(|t| (t.id_type_produit, t.nom))
                .collect(),
        }
    }

    pub fn marque(&self, produit: &Produit) -> Option<&str> {
        produit
            .id_marque
            .and_then(|id| self.marques.get(&id))
            .map(String::as_str)
    }

    pub fn type_produit(&self, produit: &Produit) -> Option<&str> {
        produit
            .id_type_produit
            .and_then(|id| self.types.get(&id))
            .map(String::as_str)
    }

    pub fn summary(&self, produit: &Produit) -> ProduitSummary {
        summary(produit, self.marque(produit), self.type_produit(produit))
    }

    pub fn detail(&self, produit: &Produit) -> ProduitDetail {
        detail(produit, self.marque(produit), self.type_produit(produit))
    }
}

/// Counts the produits `owns` selects at mapping time.
pub fn owner_summary<O: NamedEntity>(
    owner: &O,
    produits: &[Produit],
    owns: impl Fn(&O, &Produit) -> bool,
) -> OwnerSummary {
    OwnerSummary {
        id: owner.id(),
        nom: owner.nom().to_string(),
        nombre_produits: produits.iter().filter(|p| owns(owner, p)).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn produit(stock: Option<i32>, mini: Option<i32>) -> Produit {
        Produit {
            id_produit: 3,
            nom: "Veste".into(),
            description: Some("Coupe-vent".into()),
            id_marque: Some(1),
            id_type_produit: Some(9),
            stock,
            stock_mini: mini,
            stock_maxi: Some(50),
        }
    }

    #[test]
    fn test_en_reappro() {
        assert!(en_reappro(Some(2), Some(5)));
        assert!(!en_reappro(Some(5), Some(5)));
        assert!(!en_reappro(Some(8), Some(5)));
    }

    #[test]
    fn test_en_reappro_absent_operand_is_false() {
        assert!(!en_reappro(None, Some(5)));
        assert!(!en_reappro(Some(-1), None));
        assert!(!en_reappro(None, None));
    }

    #[test]
    fn test_stock_bounds() {
        assert!(check_stock_bounds(Some(10), Some(50)).is_ok());
        assert!(check_stock_bounds(Some(50), Some(50)).is_ok());
        assert!(check_stock_bounds(None, Some(1)).is_ok());
        assert!(matches!(
            check_stock_bounds(Some(100), Some(50)),
            Err(CatalogError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_lookup_resolves_names() {
        let lookup = NameLookup::new(
            vec![Marque::new("Nike").with_id(1)],
            vec![TypeProduit::new("Vestes").with_id(9)],
        );

        let view = lookup.detail(&produit(Some(1), Some(4)));

        assert_eq!(view.marque.as_deref(), Some("Nike"));
        assert_eq!(view.type_produit.as_deref(), Some("Vestes"));
        assert_eq!(view.description.as_deref(), Some("Coupe-vent"));
        assert!(view.en_reappro);
    }

    #[test]
    fn test_lookup_dangling_reference_maps_to_none() {
        let lookup = NameLookup::default();
        let view = lookup.summary(&produit(None, None));

        assert_eq!(view.marque, None);
        assert_eq!(view.type_produit, None);
        assert!(!view.en_reappro);
    }

    #[test]
    fn test_owner_summary_counts_owned() {
        let nike = Marque::new("Nike").with_id(1);
        let mut other = produit(None, None);
        other.id_marque = Some(2);
        let produits = vec![produit(None, None), produit(Some(1), Some(1)), other];

        let view = owner_summary(&nike, &produits, |m, p| p.id_marque == Some(m.id_marque));

        assert_eq!(view.nombre_produits, 2);
        assert_eq!(view.nom, "Nike");
    }
}
