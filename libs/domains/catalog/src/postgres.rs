use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, SqlErr};

use crate::{
    entity,
    error::{CatalogError, CatalogResult},
    models::{Image, Marque, Produit, TypeProduit},
    repository::{CatalogEntity, CatalogStore, NamedEntity, NamedRepository, Repository},
};

type ModelOf<E> = <<E as PgMapped>::Entity as EntityTrait>::Model;
type ActiveOf<E> = <<E as PgMapped>::Entity as EntityTrait>::ActiveModel;
type ColumnOf<E> = <<E as PgMapped>::Entity as EntityTrait>::Column;

/// Binds a catalog record to its SeaORM entity.
pub trait PgMapped: CatalogEntity {
    type Entity: EntityTrait;

    fn id_column() -> ColumnOf<Self>;

    fn from_model(model: ModelOf<Self>) -> Self;

    /// With `assign_id` false the identity is left to the database.
    fn to_active_model(&self, assign_id: bool) -> ActiveOf<Self>;

    /// Value guarded by a unique index, if the table has one.
    fn unique_name(&self) -> Option<&str> {
        None
    }
}

pub trait PgNamed: PgMapped + NamedEntity {
    fn nom_column() -> ColumnOf<Self>;
}

/// Postgres repository for any [`PgMapped`] record.
pub struct PgRepository<E: PgMapped> {
    base: BaseRepository<E::Entity>,
}

impl<E> PgRepository<E>
where
    E: PgMapped,
    ModelOf<E>: IntoActiveModel<ActiveOf<E>> + Send + Sync,
    ActiveOf<E>: Send + 'static,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl<E> Repository<E> for PgRepository<E>
where
    E: PgMapped,
    E::Entity: Send + Sync,
    ModelOf<E>: IntoActiveModel<ActiveOf<E>> + Send + Sync,
    ActiveOf<E>: Send + 'static,
{
    async fn get_all(&self) -> CatalogResult<Vec<E>> {
        let models = self.base.find_all(E::id_column()).await?;
        Ok(models.into_iter().map(E::from_model).collect())
    }

    async fn get_by_id(&self, id: i32) -> CatalogResult<Option<E>> {
        let model = self.base.find_one(E::id_column().eq(id)).await?;
        Ok(model.map(E::from_model))
    }

    async fn add(&self, entity: E) -> CatalogResult<E> {
        let model = self
            .base
            .insert(entity.to_active_model(false))
            .await
            .map_err(|err| write_error(&entity, err))?;
        let stored = E::from_model(model);

        tracing::info!(kind = E::KIND, id = stored.id(), "Created record");
        Ok(stored)
    }

    async fn update(&self, mut existing: E, incoming: &E) -> CatalogResult<E> {
        let id = existing.id();
        existing.apply_patch(incoming.patch());

        let model = self
            .base
            .update(existing.to_active_model(true))
            .await
            .map_err(|err| match err {
                DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => {
                    CatalogError::not_found(E::KIND, id)
                }
                other => write_error(&existing, other),
            })?;

        tracing::info!(kind = E::KIND, id, "Updated record");
        Ok(E::from_model(model))
    }

    async fn delete(&self, entity: &E) -> CatalogResult<()> {
        let id = entity.id();
        let rows_affected = self.base.delete_where(E::id_column().eq(id)).await?;

        if rows_affected == 0 {
            return Err(CatalogError::not_found(E::KIND, id));
        }

        tracing::info!(kind = E::KIND, id, "Deleted record");
        Ok(())
    }
}

#[async_trait]
impl<E> NamedRepository<E> for PgRepository<E>
where
    E: PgNamed,
    E::Entity: Send + Sync,
    ModelOf<E>: IntoActiveModel<ActiveOf<E>> + Send + Sync,
    ActiveOf<E>: Send + 'static,
{
    async fn get_by_name(&self, name: &str) -> CatalogResult<Option<E>> {
        let model = self.base.find_one(E::nom_column().eq(name)).await?;
        Ok(model.map(E::from_model))
    }
}

/// All four repositories sharing one connection pool.
pub struct PgCatalog {
    produits: PgRepository<Produit>,
    marques: PgRepository<Marque>,
    types: PgRepository<TypeProduit>,
    images: PgRepository<Image>,
}

impl PgCatalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            produits: PgRepository::new(db.clone()),
            marques: PgRepository::new(db.clone()),
            types: PgRepository::new(db.clone()),
            images: PgRepository::new(db),
        }
    }
}

impl CatalogStore for PgCatalog {
    type Produits = PgRepository<Produit>;
    type Marques = PgRepository<Marque>;
    type Types = PgRepository<TypeProduit>;
    type Images = PgRepository<Image>;

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

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        || err.to_string().contains("duplicate key")
}

/// Unique-index rejections surface as a name conflict, even when they slip
/// past the service-level check under concurrent writes.
fn write_error<E: PgMapped>(entity: &E, err: DbErr) -> CatalogError {
    match entity.unique_name() {
        Some(name) if is_unique_violation(&err) => CatalogError::DuplicateName {
            kind: E::KIND,
            name: name.to_string(),
        },
        _ => err.into(),
    }
}

fn identity(id: i32, assign_id: bool) -> sea_orm::ActiveValue<i32> {
    if assign_id { Set(id) } else { NotSet }
}

impl PgMapped for Marque {
    type Entity = entity::marque::Entity;

    fn id_column() -> entity::marque::Column {
        entity::marque::Column::IdMarque
    }

    fn from_model(model: entity::marque::Model) -> Self {
        Self {
            id_marque: model.id_marque,
            nom: model.nom,
        }
    }

    fn to_active_model(&self, assign_id: bool) -> entity::marque::ActiveModel {
        entity::marque::ActiveModel {
            id_marque: identity(self.id_marque, assign_id),
            nom: Set(self.nom.clone()),
        }
    }

    fn unique_name(&self) -> Option<&str> {
        Some(&self.nom)
    }
}

impl PgNamed for Marque {
    fn nom_column() -> entity::marque::Column {
        entity::marque::Column::Nom
    }
}

impl PgMapped for TypeProduit {
    type Entity = entity::type_produit::Entity;

    fn id_column() -> entity::type_produit::Column {
        entity::type_produit::Column::IdTypeProduit
    }

    fn from_model(model: entity::type_produit::Model) -> Self {
        Self {
            id_type_produit: model.id_type_produit,
            nom: model.nom,
        }
    }

    fn to_active_model(&self, assign_id: bool) -> entity::type_produit::ActiveModel {
        entity::type_produit::ActiveModel {
            id_type_produit: identity(self.id_type_produit, assign_id),
            nom: Set(self.nom.clone()),
        }
    }

    fn unique_name(&self) -> Option<&str> {
        Some(&self.nom)
    }
}

impl PgNamed for TypeProduit {
    fn nom_column() -> entity::type_produit::Column {
        entity::type_produit::Column::Nom
    }
}

impl PgMapped for Produit {
    type Entity = entity::produit::Entity;

    fn id_column() -> entity::produit::Column {
        entity::produit::Column::IdProduit
    }

    fn from_model(model: entity::produit::Model) -> Self {
        Self {
            id_produit: model.id_produit,
            nom: model.nom,
            description: model.description,
            id_marque: model.id_marque,
            id_type_produit: model.id_type_produit,
            stock: model.stock,
            stock_mini: model.stock_mini,
            stock_maxi: model.stock_maxi,
        }
    }

    fn to_active_model(&self, assign_id: bool) -> entity::produit::ActiveModel {
        entity::produit::ActiveModel {
            id_produit: identity(self.id_produit, assign_id),
            nom: Set(self.nom.clone()),
            description: Set(self.description.clone()),
            id_marque: Set(self.id_marque),
            id_type_produit: Set(self.id_type_produit),
            stock: Set(self.stock),
            stock_mini: Set(self.stock_mini),
            stock_maxi: Set(self.stock_maxi),
        }
    }
}

impl PgNamed for Produit {
    fn nom_column() -> entity::produit::Column {
        entity::produit::Column::Nom
    }
}

impl PgMapped for Image {
    type Entity = entity::image::Entity;

    fn id_column() -> entity::image::Column {
        entity::image::Column::IdImage
    }

    fn from_model(model: entity::image::Model) -> Self {
        Self {
            id_image: model.id_image,
            nom: model.nom,
            url: model.url,
            id_produit: model.id_produit,
        }
    }

    fn to_active_model(&self, assign_id: bool) -> entity::image::ActiveModel {
        entity::image::ActiveModel {
            id_image: identity(self.id_image, assign_id),
            nom: Set(self.nom.clone()),
            url: Set(self.url.clone()),
            id_produit: Set(self.id_produit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, RuntimeErr};

    fn nike() -> entity::marque::Model {
        entity::marque::Model {
            id_marque: 1,
            nom: "Nike".to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_by_name_maps_model() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![nike()]])
            .into_connection();
        let repo = PgRepository::<Marque>::new(db);

        let found = repo.get_by_name("Nike").await.unwrap();
        assert_eq!(found, Some(Marque::new("Nike").with_id(1)));
    }

    #[tokio::test]
    async fn test_add_returns_database_identity() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![entity::image::Model {
                id_image: 5,
                nom: "face".to_string(),
                url: "https://cdn.example/face.png".to_string(),
                id_produit: 2,
            }]])
            .into_connection();
        let repo = PgRepository::<Image>::new(db);

        let stored = repo
            .add(Image::new("face", "https://cdn.example/face.png", 2))
            .await
            .unwrap();

        assert_eq!(stored.id_image, 5);
    }

    #[tokio::test]
    async fn test_delete_without_rows_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PgRepository::<Marque>::new(db);

        let err = repo.delete(&Marque::new("Nike").with_id(1)).await.unwrap_err();
        assert_eq!(err, CatalogError::not_found("Marque", 1));
    }

    fn unique_violation() -> DbErr {
        DbErr::Query(RuntimeErr::Internal(
            "duplicate key value violates unique constraint \"marques_nom_key\"".to_string(),
        ))
    }

    #[tokio::test]
    async fn test_unique_violation_on_add_is_duplicate_name() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([unique_violation()])
            .into_connection();
        let repo = PgRepository::<Marque>::new(db);

        let err = repo.add(Marque::new("Nike")).await.unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateName {
                kind: "Marque",
                name: "Nike".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_unique_violation_on_rename_reports_new_name() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([unique_violation()])
            .into_connection();
        let repo = PgRepository::<TypeProduit>::new(db);

        let err = repo
            .update(
                TypeProduit::new("Textile").with_id(3),
                &TypeProduit::new("Chaussures"),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DuplicateName { kind: "TypeProduit", ref name } if name == "Chaussures"
        ));
    }

    #[tokio::test]
    async fn test_unique_violation_without_unique_name_stays_persistence() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([unique_violation()])
            .into_connection();
        let repo = PgRepository::<Image>::new(db);

        let err = repo
            .add(Image::new("face", "https://cdn.example/face.png", 2))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Persistence(_)));
    }

    #[tokio::test]
    async fn test_storage_failure_is_persistence_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = PgRepository::<TypeProduit>::new(db);

        let err = repo.get_all().await.unwrap_err();
        assert!(matches!(err, CatalogError::Persistence(_)));
    }
}
