//! Storage traits shared by every catalog record.
//!
//! [`Repository`] is the CRUD surface for one record kind. Kinds with a
//! business-unique name also implement [`NamedRepository`]. A backend bundles
//! one repository per kind behind [`CatalogStore`].

mod memory;

pub use memory::{InMemoryCatalog, InMemoryRepository};

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Image, Marque, Produit, TypeProduit};

/// How a scalar property is compared against a lookup value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarMatch {
    EqualsExact,
    ContainsCaseInsensitive,
}

impl ScalarMatch {
    pub fn matches(self, candidate: &str, value: &str) -> bool {
        match self {
            ScalarMatch::EqualsExact => candidate == value,
            ScalarMatch::ContainsCaseInsensitive => candidate
                .to_lowercase()
                .contains(&value.to_lowercase()),
        }
    }
}

/// A searchable property of `E`: its name, comparison and accessor.
pub struct ScalarProperty<E: 'static> {
    pub name: &'static str,
    pub matching: ScalarMatch,
    pub accessor: fn(&E) -> Option<&str>,
}

impl<E> ScalarProperty<E> {
    /// Absent values never match.
    pub fn matches(&self, entity: &E, value: &str) -> bool {
        (self.accessor)(entity).is_some_and(|candidate| self.matching.matches(candidate, value))
    }
}

impl<E> Debug for ScalarProperty<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarProperty")
            .field("name", &self.name)
            .field("matching", &self.matching)
            .finish()
    }
}

/// A persisted catalog record.
pub trait CatalogEntity: Clone + Debug + Send + Sync + 'static {
    /// Name used in errors and logs
    const KIND: &'static str;

    /// Fields an update is allowed to overwrite
    type Patch: Send;

    fn id(&self) -> i32;

    fn with_id(self, id: i32) -> Self;

    fn patch(&self) -> Self::Patch;

    fn apply_patch(&mut self, patch: Self::Patch);

    fn scalar_properties() -> &'static [ScalarProperty<Self>];

    fn scalar_property(name: &str) -> CatalogResult<&'static ScalarProperty<Self>> {
        Self::scalar_properties()
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| CatalogError::NotSupported {
                kind: Self::KIND,
                property: name.to_string(),
            })
    }
}

/// A record whose `nom` is its business key.
pub trait NamedEntity: CatalogEntity {
    fn nom(&self) -> &str;
}

/// CRUD over one record kind
#[async_trait]
pub trait Repository<E: CatalogEntity>: Send + Sync {
    /// Every record in storage order; empty when there are none.
    async fn get_all(&self) -> CatalogResult<Vec<E>>;

    async fn get_by_id(&self, id: i32) -> CatalogResult<Option<E>>;

    /// First record whose `property` matches `value` under that property's
    /// declared comparison.
    async fn get_by_scalar_property(&self, property: &str, value: &str) -> CatalogResult<Option<E>> {
        let property = E::scalar_property(property)?;
        let found = self
            .get_all()
            .await?
            .into_iter()
            .find(|entity| property.matches(entity, value));
        Ok(found)
    }

    /// Stores `entity` under a newly generated identity.
    async fn add(&self, entity: E) -> CatalogResult<E>;

    /// Overwrites the patchable fields of `existing` with those of `incoming`.
    async fn update(&self, existing: E, incoming: &E) -> CatalogResult<E>;

    /// Removing a record that is already gone is an error.
    async fn delete(&self, entity: &E) -> CatalogResult<()>;
}

#[async_trait]
pub trait NamedRepository<E: NamedEntity>: Repository<E> {
    /// Exact, case-sensitive match on `nom`.
    async fn get_by_name(&self, name: &str) -> CatalogResult<Option<E>>;
}

/// One repository per record kind, sharing a backend.
pub trait CatalogStore: Send + Sync + 'static {
    type Produits: NamedRepository<Produit> + 'static;
    type Marques: NamedRepository<Marque> + 'static;
    type Types: NamedRepository<TypeProduit> + 'static;
    type Images: Repository<Image> + 'static;

    fn produits(&self) -> &Self::Produits;
    fn marques(&self) -> &Self::Marques;
    fn types(&self) -> &Self::Types;
    fn images(&self) -> &Self::Images;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignores_case() {
        let matching = ScalarMatch::ContainsCaseInsensitive;
        assert!(matching.matches("Chaussure Confortable", "confortable"));
        assert!(!matching.matches("Sandale", "confortable"));
    }

    #[test]
    fn test_equals_exact_is_strict() {
        let matching = ScalarMatch::EqualsExact;
        assert!(matching.matches("Nike", "Nike"));
        assert!(!matching.matches("NikeAir", "Nike"));
        assert!(!matching.matches("nike", "Nike"));
    }

    #[test]
    fn test_absent_value_never_matches() {
        let description = Produit::scalar_property("description").unwrap();
        let produit = Produit {
            id_produit: 1,
            nom: "Casquette".into(),
            description: None,
            id_marque: None,
            id_type_produit: None,
            stock: None,
            stock_mini: None,
            stock_maxi: None,
        };
        assert!(!description.matches(&produit, ""));
    }
}
