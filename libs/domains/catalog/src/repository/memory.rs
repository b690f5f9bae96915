use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use super::{CatalogEntity, CatalogStore, NamedEntity, NamedRepository, Repository};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Image, Marque, Produit, TypeProduit};

/// In-memory repository (for development/testing).
///
/// Identities start at 1 and are never reused.
#[derive(Debug)]
pub struct InMemoryRepository<E> {
    rows: Arc<RwLock<BTreeMap<i32, E>>>,
    next_id: Arc<AtomicI32>,
}

impl<E> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for InMemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

#[async_trait]
impl<E: CatalogEntity> Repository<E> for InMemoryRepository<E> {
    async fn get_all(&self) -> CatalogResult<Vec<E>> {
        let rows = self.rows.read().await;
        Ok(rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> CatalogResult<Option<E>> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).cloned())
    }

    async fn add(&self, entity: E) -> CatalogResult<E> {
        let mut rows = self.rows.write().await;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = entity.with_id(id);
        rows.insert(id, stored.clone());

        tracing::info!(kind = E::KIND, id, "Created record");
        Ok(stored)
    }

    async fn update(&self, mut existing: E, incoming: &E) -> CatalogResult<E> {
        let mut rows = self.rows.write().await;

        let id = existing.id();
        let slot = rows
            .get_mut(&id)
            .ok_or_else(|| CatalogError::not_found(E::KIND, id))?;

        existing.apply_patch(incoming.patch());
        *slot = existing.clone();

        tracing::info!(kind = E::KIND, id, "Updated record");
        Ok(existing)
    }

    async fn delete(&self, entity: &E) -> CatalogResult<()> {
        let mut rows = self.rows.write().await;

        let id = entity.id();
        rows.remove(&id)
            .ok_or_else(|| CatalogError::not_found(E::KIND, id))?;

        tracing::info!(kind = E::KIND, id, "Deleted record");
        Ok(())
    }
}

#[async_trait]
impl<E: NamedEntity> NamedRepository<E> for InMemoryRepository<E> {
    async fn get_by_name(&self, name: &str) -> CatalogResult<Option<E>> {
        let rows = self.rows.read().await;
        Ok(rows.values().find(|e| e.nom() == name).cloned())
    }
}

/// All four repositories held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    produits: InMemoryRepository<Produit>,
    marques: InMemoryRepository<Marque>,
    types: InMemoryRepository<TypeProduit>,
    images: InMemoryRepository<Image>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogStore for InMemoryCatalog {
    type Produits = InMemoryRepository<Produit>;
    type Marques = InMemoryRepository<Marque>;
    type Types = InMemoryRepository<TypeProduit>;
    type Images = InMemoryRepository<Image>;

    fn produits(&self) -> &Self::Produits {
        &self.produits
    }

    fn marques(&self) -> &Self::Marques {
        &self.marques
    }

    fn types(&self) -> &Self::Types {
        &self.types
    }

    fn images(&self) -> &Self::Images {
        &self.images
    }
}
