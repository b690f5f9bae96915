use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use super::cascade;
use crate::conversions::{self, NameLookup, check_stock_bounds};
use crate::dto::{CreateProduit, ProduitDetail, ProduitFilter, ProduitSummary, UpdateProduit};
use crate::error::{CatalogError, CatalogResult};
use crate::models::Produit;
use crate::repository::{CatalogEntity, CatalogStore, NamedRepository, Repository};

/// Filter value that disables a brand or type criterion
const ALL: &str = "all";

/// Produit operations: name resolution, filtering and cascading deletes
pub struct ProduitService<S: CatalogStore> {
    store: Arc<S>,
}

impl<S: CatalogStore> Clone for ProduitService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: CatalogStore> ProduitService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> CatalogResult<Vec<ProduitSummary>> {
        let produits = self.store.produits().get_all().await?;
        let names = self.names().await?;
        Ok(produits.iter().map(|p| names.summary(p)).collect())
    }

    #[instrument(skip(self), fields(produit_id = %id))]
    pub async fn get_by_id(&self, id: i32) -> CatalogResult<ProduitDetail> {
        let produit = self.find(id).await?;
        self.detail(&produit).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_name(&self, name: &str) -> CatalogResult<ProduitDetail> {
        let produit = self
            .store
            .produits()
            .get_by_name(name)
            .await?
            .ok_or_else(|| CatalogError::not_found(Produit::KIND, name))?;
        self.detail(&produit).await
    }

    #[instrument(skip(self))]
    pub async fn lookup(&self, property: &str, value: &str) -> CatalogResult<ProduitDetail> {
        let produit = self
            .store
            .produits()
            .get_by_scalar_property(property, value)
            .await?
            .ok_or_else(|| CatalogError::not_found(Produit::KIND, value))?;
        self.detail(&produit).await
    }

    /// Creates a produit from brand and type names.
    ///
    /// Every check runs before the single write.
    #[instrument(skip(self, input), fields(produit_nom = %input.nom))]
    pub async fn create(&self, input: CreateProduit) -> CatalogResult<ProduitDetail> {
        input
            .validate()
            .map_err(|e| CatalogError::invalid(e.to_string()))?;
        check_stock_bounds(input.stock_mini, input.stock_maxi)?;

        let marque = self
            .store
            .marques()
            .get_by_name(&input.marque)
            .await?
            .ok_or_else(|| CatalogError::invalid("brand not found"))?;
        let type_produit = self
            .store
            .types()
            .get_by_name(&input.type_produit)
            .await?
            .ok_or_else(|| CatalogError::invalid("type not found"))?;

        let produit = Produit {
            id_produit: 0,
            nom: input.nom,
            description: input.description,
            id_marque: Some(marque.id_marque),
            id_type_produit: Some(type_produit.id_type_produit),
            stock: input.stock,
            stock_mini: input.stock_mini,
            stock_maxi: input.stock_maxi,
        };

        let stored = self.store.produits().add(produit).await?;
        Ok(conversions::detail(
            &stored,
            Some(&marque.nom),
            Some(&type_produit.nom),
        ))
    }

    /// Replaces a produit's fields. Brand and type are re-resolved by name;
    /// a blank name keeps the current reference.
    #[instrument(skip(self, input), fields(produit_id = %id))]
    pub async fn update(&self, id: i32, input: UpdateProduit) -> CatalogResult<ProduitDetail> {
        input
            .validate()
            .map_err(|e| CatalogError::invalid(e.to_string()))?;

        let existing = self.find(id).await?;

        let id_marque = match non_blank(input.marque.as_deref()) {
            Some(nom) => Some(
                self.store
                    .marques()
                    .get_by_name(nom)
                    .await?
                    .ok_or_else(|| CatalogError::invalid("brand not found"))?
                    .id_marque,
            ),
            None => existing.id_marque,
        };
        let id_type_produit = match non_blank(input.type_produit.as_deref()) {
            Some(nom) => Some(
                self.store
                    .types()
                    .get_by_name(nom)
                    .await?
                    .ok_or_else(|| CatalogError::invalid("type not found"))?
                    .id_type_produit,
            ),
            None => existing.id_type_produit,
        };
        check_stock_bounds(input.stock_mini, input.stock_maxi)?;

        let incoming = Produit {
            id_produit: id,
            nom: input.nom,
            description: input.description,
            id_marque,
            id_type_produit,
            stock: input.stock,
            stock_mini: input.stock_mini,
            stock_maxi: input.stock_maxi,
        };

        let updated = self.store.produits().update(existing, &incoming).await?;
        self.detail(&updated).await
    }

    /// Deletes a produit and its images, returning the image count.
    #[instrument(skip(self), fields(produit_id = %id))]
    pub async fn delete(&self, id: i32) -> CatalogResult<usize> {
        let produit = self.find(id).await?;
        cascade::delete_produit(self.store.as_ref(), &produit).await
    }

    /// Produits matching every supplied criterion.
    #[instrument(skip(self))]
    pub async fn filter(&self, filter: ProduitFilter) -> CatalogResult<Vec<ProduitSummary>> {
        let produits = self.store.produits().get_all().await?;
        let names = self.names().await?;

        let search = non_blank(filter.search.as_deref()).map(str::to_lowercase);
        let marque = criterion(filter.marque.as_deref());
        let type_produit = criterion(filter.type_produit.as_deref());

        let matching = produits
            .iter()
            .filter(|p| {
                if let Some(ref term) = search {
                    let in_nom = p.nom.to_lowercase().contains(term);
                    let in_description = p
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(term));
                    if !in_nom && !in_description {
                        return false;
                    }
                }
                if let Some(nom) = marque {
                    if names.marque(p) != Some(nom) {
                        return false;
                    }
                }
                if let Some(nom) = type_produit {
                    if names.type_produit(p) != Some(nom) {
                        return false;
                    }
                }
                true
            })
            .map(|p| names.summary(p))
            .collect();

        Ok(matching)
    }

    async fn find(&self, id: i32) -> CatalogResult<Produit> {
        self.store
            .produits()
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(Produit::KIND, id))
    }

    async fn names(&self) -> CatalogResult<NameLookup> {
        let marques = self.store.marques().get_all().await?;
        let types = self.store.types().get_all().await?;
        Ok(NameLookup::new(marques, types))
    }

    async fn detail(&self, produit: &Produit) -> CatalogResult<ProduitDetail> {
        let marque = match produit.id_marque {
            Some(id) => self.store.marques().get_by_id(id).await?,
            None => None,
        };
        let type_produit = match produit.id_type_produit {
            Some(id) => self.store.types().get_by_id(id).await?,
            None => None,
        };
        Ok(conversions::detail(
            produit,
            marque.as_ref().map(|m| m.nom.as_str()),
            type_produit.as_ref().map(|t| t.nom.as_str()),
        ))
    }
}

/// Whitespace only decides blankness; the value itself is used as given.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn criterion(value: Option<&str>) -> Option<&str> {
    non_blank(value).filter(|v| !v.trim().eq_ignore_ascii_case(ALL))
}
