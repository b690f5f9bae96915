//! Integration tests for the catalog domain
//!
//! These use real PostgreSQL via testcontainers to ensure:
//! - Generated identities and column mappings round-trip
//! - Name lookups are exact at the SQL level
//! - Cascading deletes satisfy the RESTRICT foreign keys
//!
//! Docker is required: `cargo test -- --ignored`

use domain_catalog::*;
use std::sync::Arc;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_add_and_get_marque() {
    let db = TestDatabase::new().await;
    let catalog = PgCatalog::new(db.connection());
    let builder = TestDataBuilder::from_test_name("add_and_get_marque");

    let created = catalog
        .marques()
        .add(Marque::new(builder.name("marque", "main")))
        .await
        .unwrap();
    assert!(created.id_marque > 0);

    let retrieved = catalog.marques().get_by_id(created.id_marque).await.unwrap();
    let retrieved = assert_some(retrieved, "marque should exist");
    assert_eq!(retrieved, created);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_get_by_name_is_exact() {
    let db = TestDatabase::new().await;
    let catalog = PgCatalog::new(db.connection());

    catalog.marques().add(Marque::new("NikeAir")).await.unwrap();

    assert_none(
        catalog.marques().get_by_name("Nike").await.unwrap(),
        "prefix must not match",
    );
    assert_some(
        catalog.marques().get_by_name("NikeAir").await.unwrap(),
        "exact name",
    );

    db.reset().await;
    assert!(catalog.marques().get_all().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_name_constraint() {
    let db = TestDatabase::new().await;
    let catalog = PgCatalog::new(db.connection());

    catalog.types().add(TypeProduit::new("Textile")).await.unwrap();
    let err = catalog
        .types()
        .add(TypeProduit::new("Textile"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        CatalogError::DuplicateName {
            kind: "TypeProduit",
            name: "Textile".to_string(),
        }
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_record_is_not_found() {
    let db = TestDatabase::new().await;
    let catalog = PgCatalog::new(db.connection());

    let ghost = Marque {
        id_marque: 999,
        nom: "Ghost".to_string(),
    };
    let err = catalog
        .marques()
        .update(ghost, &Marque::new("Renamed"))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::NotFound { .. }));
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_produit_resolves_names() {
    let db = TestDatabase::new().await;
    let store = Arc::new(PgCatalog::new(db.connection()));
    store.marques().add(Marque::new("Nike")).await.unwrap();
    store.types().add(TypeProduit::new("Chaussures")).await.unwrap();

    let service = ProduitService::new(Arc::clone(&store));
    let created = service
        .create(CreateProduit {
            nom: "Pegasus".to_string(),
            type_produit: "Chaussures".to_string(),
            marque: "Nike".to_string(),
            description: Some("Chaussure de running".to_string()),
            stock: Some(2),
            stock_mini: Some(5),
            stock_maxi: Some(50),
        })
        .await
        .unwrap();

    assert_eq!(created.marque.as_deref(), Some("Nike"));
    assert!(created.en_reappro);

    let fetched = service.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_marque_cascades_through_images() {
    let db = TestDatabase::new().await;
    let store = Arc::new(PgCatalog::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("cascade");

    let marque = store.marques().add(Marque::new("Nike")).await.unwrap();
    let other = store.marques().add(Marque::new("Puma")).await.unwrap();

    let mut kept = None;
    for (i, id_marque) in [marque.id_marque, marque.id_marque, other.id_marque]
        .into_iter()
        .enumerate()
    {
        let produit = store
            .produits()
            .add(Produit {
                id_produit: 0,
                nom: builder.name("produit", &i.to_string()),
                description: None,
                id_marque: Some(id_marque),
                id_type_produit: None,
                stock: None,
                stock_mini: None,
                stock_maxi: None,
            })
            .await
            .unwrap();
        for side in ["face", "dos"] {
            store
                .images()
                .add(Image::new(side, builder.url(&format!("{i}-{side}")), produit.id_produit))
                .await
                .unwrap();
        }
        if id_marque == other.id_marque {
            kept = Some(produit.id_produit);
        }
    }

    let report = MarqueService::new(Arc::clone(&store))
        .delete(marque.id_marque)
        .await
        .unwrap();

    assert_eq!(report.produits_supprimes, 2);
    assert_eq!(report.images_supprimees, 4);

    let produits = store.produits().get_all().await.unwrap();
    assert_eq!(produits.len(), 1);
    assert_eq!(Some(produits[0].id_produit), kept);
    assert_eq!(store.images().get_all().await.unwrap().len(), 2);
    assert_none(
        store.marques().get_by_id(marque.id_marque).await.unwrap(),
        "deleted marque",
    );
}
