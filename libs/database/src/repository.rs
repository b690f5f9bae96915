//! Generic SeaORM access shared by every Postgres-backed repository.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, sea_query::IntoCondition,
};
use std::marker::PhantomData;

/// CRUD over one SeaORM entity. Domain repositories wrap it and map models
/// to their own types.
///
/// ```ignore
/// let base = BaseRepository::<marque::Entity>::new(db);
/// let nike = base.find_one(marque::Column::Nom.eq("Nike")).await?;
/// ```
pub struct BaseRepository<E: EntityTrait> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> Clone for BaseRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> BaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelBehavior + Send + 'static,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Every row, ordered by `order` ascending.
    pub async fn find_all<C>(&self, order: C) -> Result<Vec<E::Model>, DbErr>
    where
        C: sea_orm::ColumnTrait,
    {
        E::find().order_by_asc(order).all(&self.db).await
    }

    /// Every row matching `condition`, ordered by `order` ascending.
    pub async fn find_where<F, C>(&self, condition: F, order: C) -> Result<Vec<E::Model>, DbErr>
    where
        F: IntoCondition,
        C: sea_orm::ColumnTrait,
    {
        E::find()
            .filter(condition)
            .order_by_asc(order)
            .all(&self.db)
            .await
    }

    /// First row matching `condition`.
    pub async fn find_one<F: IntoCondition>(&self, condition: F) -> Result<Option<E::Model>, DbErr> {
        E::find().filter(condition).one(&self.db).await
    }

    /// Inserts and returns the stored row, including database-generated columns.
    pub async fn insert(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        model.insert(&self.db).await
    }

    /// Updates by primary key. Fails with [`DbErr::RecordNotUpdated`] when no row matched.
    pub async fn update(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        model.update(&self.db).await
    }

    /// Deletes rows matching `condition`, returning how many were removed.
    pub async fn delete_where<F: IntoCondition>(&self, condition: F) -> Result<u64, DbErr> {
        let result = E::delete_many().filter(condition).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue::{NotSet, Set};
    use sea_orm::entity::prelude::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    mod shelf {
        use sea_orm::entity::prelude::*;

        #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
        #[sea_orm(table_name = "shelves")]
        pub struct Model {
            #[sea_orm(primary_key)]
            pub id: i32,
            pub label: String,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}
    }

    fn shelf(id: i32, label: &str) -> shelf::Model {
        shelf::Model {
            id,
            label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_one_returns_first_match() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![shelf(7, "Chaussures")]])
            .into_connection();
        let repo = BaseRepository::<shelf::Entity>::new(db);

        let found = repo
            .find_one(shelf::Column::Label.eq("Chaussures"))
            .await
            .unwrap();

        assert_eq!(found, Some(shelf(7, "Chaussures")));
    }

    #[tokio::test]
    async fn test_find_all_empty_table() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<shelf::Model>::new()])
            .into_connection();
        let repo = BaseRepository::<shelf::Entity>::new(db);

        assert!(repo.find_all(shelf::Column::Id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_returns_generated_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![shelf(1, "Sport")]])
            .into_connection();
        let repo = BaseRepository::<shelf::Entity>::new(db);

        let stored = repo
            .insert(shelf::ActiveModel {
                id: NotSet,
                label: Set("Sport".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(stored.id, 1);
    }

    #[tokio::test]
    async fn test_delete_where_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 3,
            }])
            .into_connection();
        let repo = BaseRepository::<shelf::Entity>::new(db);

        let removed = repo.delete_where(shelf::Column::Id.gt(0)).await.unwrap();
        assert_eq!(removed, 3);
    }
}
