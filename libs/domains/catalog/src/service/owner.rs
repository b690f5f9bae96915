use std::marker::PhantomData;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use super::cascade;
use crate::conversions::owner_summary;
use crate::dto::{CascadeReport, NomRequest, OwnerSummary};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Marque, Produit, TypeProduit};
use crate::repository::{CatalogStore, NamedEntity, NamedRepository, Repository};

/// A record that produits reference and that takes them down when deleted.
pub trait ProduitOwner: NamedEntity {
    fn named(nom: String) -> Self;

    fn owns(&self, produit: &Produit) -> bool;

    fn repository<S: CatalogStore>(store: &S) -> &dyn NamedRepository<Self>;
}

impl ProduitOwner for Marque {
    fn named(nom: String) -> Self {
        Marque::new(nom)
    }

    fn owns(&self, produit: &Produit) -> bool {
        produit.id_marque == Some(self.id_marque)
    }

    fn repository<S: CatalogStore>(store: &S) -> &dyn NamedRepository<Self> {
        store.marques()
    }
}

impl ProduitOwner for TypeProduit {
    fn named(nom: String) -> Self {
        TypeProduit::new(nom)
    }

    fn owns(&self, produit: &Produit) -> bool {
        produit.id_type_produit == Some(self.id_type_produit)
    }

    fn repository<S: CatalogStore>(store: &S) -> &dyn NamedRepository<Self> {
        store.types()
    }
}

/// Brand and type operations. Names are unique regardless of case.
pub struct OwnerService<S: CatalogStore, O: ProduitOwner> {
    store: Arc<S>,
    _owner: PhantomData<fn() -> O>,
}

pub type MarqueService<S> = OwnerService<S, Marque>;
pub type TypeProduitService<S> = OwnerService<S, TypeProduit>;

impl<S: CatalogStore, O: ProduitOwner> Clone for OwnerService<S, O> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _owner: PhantomData,
        }
    }
}

impl<S: CatalogStore, O: ProduitOwner> OwnerService<S, O> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            _owner: PhantomData,
        }
    }

    fn owners(&self) -> &dyn NamedRepository<O> {
        O::repository(self.store.as_ref())
    }

    #[instrument(skip(self), fields(kind = O::KIND))]
    pub async fn get_all(&self) -> CatalogResult<Vec<OwnerSummary>> {
        let owners = self.owners().get_all().await?;
        let produits = self.store.produits().get_all().await?;
        Ok(owners
            .iter()
            .map(|o| owner_summary(o, &produits, O::owns))
            .collect())
    }

    #[instrument(skip(self), fields(kind = O::KIND))]
    pub async fn get_by_id(&self, id: i32) -> CatalogResult<OwnerSummary> {
        let owner = self.find(id).await?;
        self.summarize(&owner).await
    }

    #[instrument(skip(self), fields(kind = O::KIND))]
    pub async fn get_by_name(&self, name: &str) -> CatalogResult<OwnerSummary> {
        let owner = self
            .owners()
            .get_by_name(name)
            .await?
            .ok_or_else(|| CatalogError::not_found(O::KIND, name))?;
        self.summarize(&owner).await
    }

    #[instrument(skip(self), fields(kind = O::KIND))]
    pub async fn lookup(&self, property: &str, value: &str) -> CatalogResult<OwnerSummary> {
        let owner = self
            .owners()
            .get_by_scalar_property(property, value)
            .await?
            .ok_or_else(|| CatalogError::not_found(O::KIND, value))?;
        self.summarize(&owner).await
    }

    #[instrument(skip(self, input), fields(kind = O::KIND, nom = %input.nom))]
    pub async fn create(&self, input: NomRequest) -> CatalogResult<OwnerSummary> {
        input
            .validate()
            .map_err(|e| CatalogError::invalid(e.to_string()))?;
        self.ensure_name_free(&input.nom, None).await?;

        let owner = self.owners().add(O::named(input.nom)).await?;
        Ok(owner_summary(&owner, &[], O::owns))
    }

    #[instrument(skip(self, input), fields(kind = O::KIND, nom = %input.nom))]
    pub async fn rename(&self, id: i32, input: NomRequest) -> CatalogResult<OwnerSummary> {
        input
            .validate()
            .map_err(|e| CatalogError::invalid(e.to_string()))?;

        let existing = self.find(id).await?;
        self.ensure_name_free(&input.nom, Some(id)).await?;

        let renamed = self
            .owners()
            .update(existing, &O::named(input.nom))
            .await?;
        self.summarize(&renamed).await
    }

    /// Deletes the owner after every produit it owns, images first.
    #[instrument(skip(self), fields(kind = O::KIND))]
    pub async fn delete(&self, id: i32) -> CatalogResult<CascadeReport> {
        let owner = self.find(id).await?;

        let owned: Vec<Produit> = self
            .store
            .produits()
            .get_all()
            .await?
            .into_iter()
            .filter(|p| owner.owns(p))
            .collect();

        let mut images_supprimees = 0;
        for produit in &owned {
            images_supprimees += cascade::delete_produit(self.store.as_ref(), produit).await?;
        }
        self.owners().delete(&owner).await?;

        tracing::info!(
            kind = O::KIND,
            id,
            produits = owned.len(),
            images = images_supprimees,
            "Deleted record with its produits"
        );

        Ok(CascadeReport {
            message: format!(
                "{} '{}' deleted along with {} produit(s) and {} image(s)",
                O::KIND,
                owner.nom(),
                owned.len(),
                images_supprimees
            ),
            produits_supprimes: owned.len(),
            images_supprimees,
        })
    }

    async fn find(&self, id: i32) -> CatalogResult<O> {
        self.owners()
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(O::KIND, id))
    }

    async fn summarize(&self, owner: &O) -> CatalogResult<OwnerSummary> {
        let produits = self.store.produits().get_all().await?;
        Ok(owner_summary(owner, &produits, O::owns))
    }

    async fn ensure_name_free(&self, nom: &str, except: Option<i32>) -> CatalogResult<()> {
        let wanted = nom.to_lowercase();
        let taken = self
            .owners()
            .get_all()
            .await?
            .iter()
            .any(|o| Some(o.id()) != except && o.nom().to_lowercase() == wanted);

        if taken {
            return Err(CatalogError::DuplicateName {
                kind: O::KIND,
                name: nom.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Image;
    use crate::repository::{CatalogEntity, InMemoryCatalog, InMemoryRepository};
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        pub MarqueRepo {}

        #[async_trait]
        impl Repository<Marque> for MarqueRepo {
            async fn get_all(&self) -> CatalogResult<Vec<Marque>>;
            async fn get_by_id(&self, id: i32) -> CatalogResult<Option<Marque>>;
            async fn add(&self, entity: Marque) -> CatalogResult<Marque>;
            async fn update(&self, existing: Marque, incoming: &Marque) -> CatalogResult<Marque>;
            async fn delete(&self, entity: &Marque) -> CatalogResult<()>;
        }

        #[async_trait]
        impl NamedRepository<Marque> for MarqueRepo {
            async fn get_by_name(&self, name: &str) -> CatalogResult<Option<Marque>>;
        }
    }

    /// Mocked marques, everything else in memory
    struct MockedStore {
        marques: MockMarqueRepo,
        rest: InMemoryCatalog,
    }

    impl CatalogStore for MockedStore {
        type Produits = InMemoryRepository<Produit>;
        type Marques = MockMarqueRepo;
        type Types = InMemoryRepository<TypeProduit>;
        type Images = InMemoryRepository<Image>;

        fn produits(&self) -> &Self::Produits {
            self.rest.produits()
        }

        fn marques(&self) -> &Self::Marques {
            &self.marques
        }

        fn types(&self) -> &Self::Types {
            self.rest.types()
        }

        fn images(&self) -> &Self::Images {
            self.rest.images()
        }
    }

    fn produit(nom: &str, id_marque: i32, id_type_produit: i32) -> Produit {
        Produit {
            id_produit: 0,
            nom: nom.to_string(),
            description: None,
            id_marque: Some(id_marque),
            id_type_produit: Some(id_type_produit),
            stock: Some(1),
            stock_mini: Some(0),
            stock_maxi: Some(10),
        }
    }

    fn nom(nom: &str) -> NomRequest {
        NomRequest {
            nom: nom.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_ignoring_case() {
        let service = MarqueService::new(Arc::new(InMemoryCatalog::new()));
        service.create(nom("Adidas")).await.unwrap();

        let err = service.create(nom("ADIDAS")).await.unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName { kind: "Marque", .. }));
    }

    #[tokio::test]
    async fn test_rename_to_own_name_in_other_case() {
        let service = TypeProduitService::new(Arc::new(InMemoryCatalog::new()));
        let created = service.create(nom("vestes")).await.unwrap();

        let renamed = service.rename(created.id, nom("Vestes")).await.unwrap();
        assert_eq!(renamed.nom, "Vestes");
    }

    #[tokio::test]
    async fn test_rename_onto_other_name_conflicts() {
        let service = TypeProduitService::new(Arc::new(InMemoryCatalog::new()));
        service.create(nom("Vestes")).await.unwrap();
        let pantalons = service.create(nom("Pantalons")).await.unwrap();

        let err = service.rename(pantalons.id, nom("vestes")).await.unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName { .. }));
    }

    #[tokio::test]
    async fn test_summary_counts_produits() {
        let store = Arc::new(InMemoryCatalog::new());
        let service = MarqueService::new(Arc::clone(&store));
        let nike = service.create(nom("Nike")).await.unwrap();
        assert_eq!(nike.nombre_produits, 0);

        store.produits().add(produit("Short", nike.id, 1)).await.unwrap();
        store.produits().add(produit("Maillot", nike.id, 1)).await.unwrap();

        let by_name = service.get_by_name("Nike").await.unwrap();
        assert_eq!(by_name.nombre_produits, 2);
        assert!(matches!(
            service.get_by_name("nike").await,
            Err(CatalogError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_cascades_through_produits_and_images() {
        const N: usize = 3;
        const M: usize = 4;

        let store = Arc::new(InMemoryCatalog::new());
        let marques = MarqueService::new(Arc::clone(&store));
        let nike = marques.create(nom("Nike")).await.unwrap();
        let puma = marques.create(nom("Puma")).await.unwrap();

        for i in 0..N {
            let p = store
                .produits()
                .add(produit(&format!("Nike {i}"), nike.id, 1))
                .await
                .unwrap();
            for j in 0..M {
                store
                    .images()
                    .add(Image::new(format!("vue {j}"), "https://cdn.example/n.png", p.id_produit))
                    .await
                    .unwrap();
            }
        }
        let survivor = store
            .produits()
            .add(produit("Puma 0", puma.id, 1))
            .await
            .unwrap();
        store
            .images()
            .add(Image::new("vue", "https://cdn.example/p.png", survivor.id_produit))
            .await
            .unwrap();

        let report = marques.delete(nike.id).await.unwrap();

        assert_eq!(report.produits_supprimes, N);
        assert_eq!(report.images_supprimees, N * M);
        assert_eq!(store.produits().get_all().await.unwrap(), vec![survivor.clone()]);
        let images = store.images().get_all().await.unwrap();
        assert_eq!(images.len(), 1);
        assert!(images.iter().all(|i| i.id_produit == survivor.id_produit));
        assert!(matches!(
            marques.get_by_id(nike.id).await,
            Err(CatalogError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_failed_owner_delete_keeps_produits_deleted() {
        let mut marques = MockMarqueRepo::new();
        marques
            .expect_get_by_id()
            .returning(|id| Ok(Some(Marque::new("Nike").with_id(id))));
        marques
            .expect_delete()
            .times(1)
            .returning(|_| Err(CatalogError::Persistence("connection reset".to_string())));

        let rest = InMemoryCatalog::new();
        let owned = rest.produits().add(produit("Short", 1, 1)).await.unwrap();
        rest.images()
            .add(Image::new("face", "https://cdn.example/s.png", owned.id_produit))
            .await
            .unwrap();
        let other = rest.produits().add(produit("Maillot", 2, 1)).await.unwrap();

        let store = Arc::new(MockedStore { marques, rest });
        let service = MarqueService::new(Arc::clone(&store));

        let err = service.delete(1).await.unwrap_err();

        assert!(matches!(err, CatalogError::Persistence(_)));
        assert_eq!(store.produits().get_all().await.unwrap(), vec![other]);
        assert!(store.images().get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_type_without_produits() {
        let service = TypeProduitService::new(Arc::new(InMemoryCatalog::new()));
        let created = service.create(nom("Gants")).await.unwrap();

        let report = service.delete(created.id).await.unwrap();

        assert_eq!(report.produits_supprimes, 0);
        assert_eq!(report.images_supprimees, 0);
        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_uses_substring() {
        let service = MarqueService::new(Arc::new(InMemoryCatalog::new()));
        service.create(nom("Le Coq Sportif")).await.unwrap();

        let found = service.lookup("nom", "coq").await.unwrap();
        assert_eq!(found.nom, "Le Coq Sportif");
    }
}
