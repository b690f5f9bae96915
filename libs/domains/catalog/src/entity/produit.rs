use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "produits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_produit: i32,
    pub nom: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub id_marque: Option<i32>,
    pub id_type_produit: Option<i32>,
    pub stock: Option<i32>,
    pub stock_mini: Option<i32>,
    pub stock_maxi: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::marque::Entity",
        from = "Column::IdMarque",
        to = "super::marque::Column::IdMarque",
        on_delete = "Restrict"
    )]
    Marque,
    #[sea_orm(
        belongs_to = "super::type_produit::Entity",
        from = "Column::IdTypeProduit",
        to = "super::type_produit::Column::IdTypeProduit",
        on_delete = "Restrict"
    )]
    TypeProduit,
    #[sea_orm(has_many = "super::image::Entity")]
    Image,
}

impl Related<super::marque::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Marque.def()
    }
}

impl Related<super::type_produit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TypeProduit.def()
    }
}

impl Related<super::image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
