mod cascade;
mod image;
mod owner;
mod produit;

pub use image::ImageService;
pub use owner::{MarqueService, OwnerService, ProduitOwner, TypeProduitService};
pub use produit::ProduitService;
