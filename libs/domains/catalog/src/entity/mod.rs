//! SeaORM entities backing the Postgres repositories.

pub mod image;
pub mod marque;
pub mod produit;
pub mod type_produit;
