use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "marques")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_marque: i32,
    #[sea_orm(unique)]
    pub nom: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::produit::Entity")]
    Produit,
}

impl Related<super::produit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Produit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
