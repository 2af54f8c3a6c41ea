//! Catalog products.

use brunela_core::{Price, ProductId};
use serde::Serialize;

use super::cart::LineItem;

/// What kind of thing a product is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Cookie,
    Merch,
}

/// A fixed catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub kind: ProductKind,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: String,
    /// Short text shown under the image.
    pub caption: String,
    /// Badges shown on the detail page, e.g. `SIN GLUTEN`.
    pub tags: Vec<String>,
    /// Filter tags such as `premium` or `sin-gluten`.
    pub categories: Vec<String>,
    /// Flavor tags such as `chocolate` or `frutal`.
    pub flavors: Vec<String>,
}

impl Product {
    /// Whether any of `tags` is among this product's categories or flavors.
    #[must_use]
    pub fn has_any_tag<T: AsRef<str>>(&self, tags: &[T]) -> bool {
        tags.iter().any(|tag| {
            let tag = tag.as_ref();
            self.categories.iter().chain(&self.flavors).any(|t| t == tag)
        })
    }

    /// A one-unit cart line for this product.
    #[must_use]
    pub fn to_line_item(&self) -> LineItem {
        let item = LineItem::new(self.id.clone(), self.name.clone(), self.price, self.image.clone())
            .with_description(self.description.clone());
        match self.categories.first() {
            Some(category) => item.with_category(category.clone()),
            None => item,
        }
    }
}
