//! Persisted catalog records.
//!
//! Navigation collections (a brand's products, a product's images) are not
//! stored on the records; they are reached through the repositories.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::repository::{CatalogEntity, NamedEntity, ScalarMatch, ScalarProperty};

/// Brand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Marque {
    pub id_marque: i32,
    pub nom: String,
}

/// Product category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypeProduit {
    pub id_type_produit: i32,
    pub nom: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Produit {
    pub id_produit: i32,
    pub nom: String,
    pub description: Option<String>,
    pub id_marque: Option<i32>,
    pub id_type_produit: Option<i32>,
    pub stock: Option<i32>,
    pub stock_mini: Option<i32>,
    pub stock_maxi: Option<i32>,
}

/// Named URL owned by exactly one [`Produit`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id_image: i32,
    pub nom: String,
    pub url: String,
    pub id_produit: i32,
}

/// Fields of a [`Marque`] or [`TypeProduit`] that an update may overwrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NomPatch {
    pub nom: String,
}

/// Fields of a [`Produit`] that an update may overwrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProduitPatch {
    pub nom: String,
    pub description: Option<String>,
    pub id_marque: Option<i32>,
    pub id_type_produit: Option<i32>,
    pub stock: Option<i32>,
    pub stock_mini: Option<i32>,
    pub stock_maxi: Option<i32>,
}

/// Fields of an [`Image`] that an update may overwrite. The owner is fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePatch {
    pub nom: String,
    pub url: String,
}

impl Marque {
    pub fn new(nom: impl Into<String>) -> Self {
        Self {
            id_marque: 0,
            nom: nom.into(),
        }
    }
}

impl TypeProduit {
    pub fn new(nom: impl Into<String>) -> Self {
        Self {
            id_type_produit: 0,
            nom: nom.into(),
        }
    }
}

impl Image {
    pub fn new(nom: impl Into<String>, url: impl Into<String>, id_produit: i32) -> Self {
        Self {
            id_image: 0,
            nom: nom.into(),
            url: url.into(),
            id_produit,
        }
    }
}

fn marque_nom(m: &Marque) -> Option<&str> {
    Some(&m.nom)
}

fn type_produit_nom(t: &TypeProduit) -> Option<&str> {
    Some(&t.nom)
}

fn produit_nom(p: &Produit) -> Option<&str> {
    Some(&p.nom)
}

fn produit_description(p: &Produit) -> Option<&str> {
    p.description.as_deref()
}

fn image_nom(i: &Image) -> Option<&str> {
    Some(&i.nom)
}

fn image_url(i: &Image) -> Option<&str> {
    Some(&i.url)
}

static MARQUE_PROPERTIES: [ScalarProperty<Marque>; 1] = [ScalarProperty {
    name: "nom",
    matching: ScalarMatch::ContainsCaseInsensitive,
    accessor: marque_nom,
}];

static TYPE_PRODUIT_PROPERTIES: [ScalarProperty<TypeProduit>; 1] = [ScalarProperty {
    name: "nom",
    matching: ScalarMatch::ContainsCaseInsensitive,
    accessor: type_produit_nom,
}];

static PRODUIT_PROPERTIES: [ScalarProperty<Produit>; 2] = [
    ScalarProperty {
        name: "nom",
        matching: ScalarMatch::ContainsCaseInsensitive,
        accessor: produit_nom,
    },
    ScalarProperty {
        name: "description",
        matching: ScalarMatch::ContainsCaseInsensitive,
        accessor: produit_description,
    },
];

static IMAGE_PROPERTIES: [ScalarProperty<Image>; 2] = [
    ScalarProperty {
        name: "nom",
        matching: ScalarMatch::ContainsCaseInsensitive,
        accessor: image_nom,
    },
    ScalarProperty {
        name: "url",
        matching: ScalarMatch::EqualsExact,
        accessor: image_url,
    },
];

impl CatalogEntity for Marque {
    const KIND: &'static str = "Marque";
    type Patch = NomPatch;

    fn id(&self) -> i32 {
        self.id_marque
    }

    fn with_id(mut self, id: i32) -> Self {
        self.id_marque = id;
        self
    }

    fn patch(&self) -> NomPatch {
        NomPatch {
            nom: self.nom.clone(),
        }
    }

    fn apply_patch(&mut self, patch: NomPatch) {
        self.nom = patch.nom;
    }

    fn scalar_properties() -> &'static [ScalarProperty<Self>] {
        &MARQUE_PROPERTIES
    }
}

impl NamedEntity for Marque {
    fn nom(&self) -> &str {
        &self.nom
    }
}

impl CatalogEntity for TypeProduit {
    const KIND: &'static str = "TypeProduit";
    type Patch = NomPatch;

    fn id(&self) -> i32 {
        self.id_type_produit
    }

    fn with_id(mut self, id: i32) -> Self {
        self.id_type_produit = id;
        self
    }

    fn patch(&self) -> NomPatch {
        NomPatch {
            nom: self.nom.clone(),
        }
    }

    fn apply_patch(&mut self, patch: NomPatch) {
        self.nom = patch.nom;
    }

    fn scalar_properties() -> &'static [ScalarProperty<Self>] {
        &TYPE_PRODUIT_PROPERTIES
    }
}

impl NamedEntity for TypeProduit {
    fn nom(&self) -> &str {
        &self.nom
    }
}

impl CatalogEntity for Produit {
    const KIND: &'static str = "Produit";
    type Patch = ProduitPatch;

    fn id(&self) -> i32 {
        self.id_produit
    }

    fn with_id(mut self, id: i32) -> Self {
        self.id_produit = id;
        self
    }

    fn patch(&self) -> ProduitPatch {
        ProduitPatch {
            nom: self.nom.clone(),
            description: self.description.clone(),
            id_marque: self.id_marque,
            id_type_produit: self.id_type_produit,
            stock: self.stock,
            stock_mini: self.stock_mini,
            stock_maxi: self.stock_maxi,
        }
    }

    fn apply_patch(&mut self, patch: ProduitPatch) {
        self.nom = patch.nom;
        self.description = patch.description;
        self.id_marque = patch.id_marque;
        self.id_type_produit = patch.id_type_produit;
        self.stock = patch.stock;
        self.stock_mini = patch.stock_mini;
        self.stock_maxi = patch.stock_maxi;
    }

    fn scalar_properties() -> &'static [ScalarProperty<Self>] {
        &PRODUIT_PROPERTIES
    }
}

impl NamedEntity for Produit {
    fn nom(&self) -> &str {
        &self.nom
    }
}

impl CatalogEntity for Image {
    const KIND: &'static str = "Image";
    type Patch = ImagePatch;

    fn id(&self) -> i32 {
        self.id_image
    }

    fn with_id(mut self, id: i32) -> Self {
        self.id_image = id;
        self
    }

    fn patch(&self) -> ImagePatch {
        ImagePatch {
            nom: self.nom.clone(),
            url: self.url.clone(),
        }
    }

    fn apply_patch(&mut self, patch: ImagePatch) {
        self.nom = patch.nom;
        self.url = patch.url;
    }

    fn scalar_properties() -> &'static [ScalarProperty<Self>] {
        &IMAGE_PROPERTIES
    }
}
