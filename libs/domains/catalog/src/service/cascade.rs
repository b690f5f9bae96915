use crate::error::CatalogResult;
use crate::models::Produit;
use crate::repository::{CatalogStore, Repository};

/// Deletes the images of `produit`, then `produit` itself, and returns how
/// many images went with it.
///
/// The writes are independent: if the produit delete fails, its images are
/// already gone.
pub(crate) async fn delete_produit<S: CatalogStore>(
    store: &S,
    produit: &Produit,
) -> CatalogResult<usize> {
    let images: Vec<_> = store
        .images()
        .get_all()
        .await?
        .into_iter()
        .filter(|image| image.id_produit == produit.id_produit)
        .collect();

    for image in &images {
        store.images().delete(image).await?;
    }
    store.produits().delete(produit).await?;

    tracing::info!(
        produit_id = produit.id_produit,
        images = images.len(),
        "Deleted produit with its images"
    );
    Ok(images.len())
}
