use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::dto::{CreateImage, UpdateImage};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Image, Produit};
use crate::repository::{CatalogEntity, CatalogStore, Repository};

/// Images always belong to an existing produit.
pub struct ImageService<S: CatalogStore> {
    store: Arc<S>,
}

impl<S: CatalogStore> Clone for ImageService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: CatalogStore> ImageService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> CatalogResult<Vec<Image>> {
        self.store.images().get_all().await
    }

    #[instrument(skip(self), fields(image_id = %id))]
    pub async fn get_by_id(&self, id: i32) -> CatalogResult<Image> {
        self.store
            .images()
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(Image::KIND, id))
    }

    #[instrument(skip(self))]
    pub async fn lookup(&self, property: &str, value: &str) -> CatalogResult<Image> {
        self.store
            .images()
            .get_by_scalar_property(property, value)
            .await?
            .ok_or_else(|| CatalogError::not_found(Image::KIND, value))
    }

    /// Images of one produit; the produit must exist.
    #[instrument(skip(self), fields(produit_id = %id_produit))]
    pub async fn by_produit(&self, id_produit: i32) -> CatalogResult<Vec<Image>> {
        self.ensure_produit(id_produit).await?;

        let images = self.store.images().get_all().await?;
        Ok(images
            .into_iter()
            .filter(|i| i.id_produit == id_produit)
            .collect())
    }

    #[instrument(skip(self, input), fields(produit_id = %input.id_produit))]
    pub async fn create(&self, input: CreateImage) -> CatalogResult<Image> {
        input
            .validate()
            .map_err(|e| CatalogError::invalid(e.to_string()))?;

        if self
            .store
            .produits()
            .get_by_id(input.id_produit)
            .await?
            .is_none()
        {
            return Err(CatalogError::invalid(format!(
                "produit {} does not exist",
                input.id_produit
            )));
        }

        self.store
            .images()
            .add(Image::new(input.nom, input.url, input.id_produit))
            .await
    }

    #[instrument(skip(self, input), fields(image_id = %id))]
    pub async fn update(&self, id: i32, input: UpdateImage) -> CatalogResult<Image> {
        input
            .validate()
            .map_err(|e| CatalogError::invalid(e.to_string()))?;

        let existing = self.get_by_id(id).await?;
        let incoming = Image::new(input.nom, input.url, existing.id_produit);
        self.store.images().update(existing, &incoming).await
    }

    #[instrument(skip(self), fields(image_id = %id))]
    pub async fn delete(&self, id: i32) -> CatalogResult<()> {
        let image = self.get_by_id(id).await?;
        self.store.images().delete(&image).await
    }

    async fn ensure_produit(&self, id_produit: i32) -> CatalogResult<()> {
        match self.store.produits().get_by_id(id_produit).await? {
            Some(_) => Ok(()),
            None => Err(CatalogError::not_found(Produit::KIND, id_produit)),
        }
    }
}
