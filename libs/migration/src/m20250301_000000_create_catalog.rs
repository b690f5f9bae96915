use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Marques::Table)
                    .if_not_exists()
                    .col(pk_auto(Marques::IdMarque))
                    .col(string_uniq(Marques::Nom))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TypesProduit::Table)
                    .if_not_exists()
                    .col(pk_auto(TypesProduit::IdTypeProduit))
                    .col(string_uniq(TypesProduit::Nom))
                    .to_owned(),
            )
            .await?;

        // No ON DELETE CASCADE: children are removed explicitly before their parent.
        manager
            .create_table(
                Table::create()
                    .table(Produits::Table)
                    .if_not_exists()
                    .col(pk_auto(Produits::IdProduit))
                    .col(string(Produits::Nom))
                    .col(text_null(Produits::Description))
                    .col(integer_null(Produits::IdMarque))
                    .col(integer_null(Produits::IdTypeProduit))
                    .col(integer_null(Produits::Stock))
                    .col(integer_null(Produits::StockMini))
                    .col(integer_null(Produits::StockMaxi))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_produits_id_marque")
                            .from(Produits::Table, Produits::IdMarque)
                            .to(Marques::Table, Marques::IdMarque)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_produits_id_type_produit")
                            .from(Produits::Table, Produits::IdTypeProduit)
                            .to(TypesProduit::Table, TypesProduit::IdTypeProduit)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Images::Table)
                    .if_not_exists()
                    .col(pk_auto(Images::IdImage))
                    .col(string(Images::Nom))
                    .col(text(Images::Url))
                    .col(integer(Images::IdProduit))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_images_id_produit")
                            .from(Images::Table, Images::IdProduit)
                            .to(Produits::Table, Produits::IdProduit)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, table, column) in [
            ("idx_produits_id_marque", Produits::Table, Produits::IdMarque),
            ("idx_produits_id_type_produit", Produits::Table, Produits::IdTypeProduit),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_index(
                Index::create()
                    .name("idx_images_id_produit")
                    .table(Images::Table)
                    .col(Images::IdProduit)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Images::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Produits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TypesProduit::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Marques::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Marques {
    Table,
    IdMarque,
    Nom,
}

#[derive(DeriveIden)]
enum TypesProduit {
    Table,
    IdTypeProduit,
    Nom,
}

#[derive(DeriveIden)]
enum Produits {
    Table,
    IdProduit,
    Nom,
    Description,
    IdMarque,
    IdTypeProduit,
    Stock,
    StockMini,
    StockMaxi,
}

#[derive(DeriveIden)]
enum Images {
    Table,
    IdImage,
    Nom,
    Url,
    IdProduit,
}
