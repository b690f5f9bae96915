use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_image: i32,
    pub nom: String,
    #[sea_orm(column_type = "Text")]
    pub url: String,
    pub id_produit: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::produit::Entity",
        from = "Column::IdProduit",
        to = "super::produit::Column::IdProduit",
        on_delete = "Restrict"
    )]
    Produit,
}

impl Related<super::produit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Produit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
