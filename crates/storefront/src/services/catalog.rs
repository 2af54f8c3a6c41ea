//! Product catalog.
//!
//! The assortment is fixed: six signature cookies and the house tote bag.

use brunela_core::{Price, ProductId};
use thiserror::Error;

use crate::models::{Product, ProductKind};

/// Product shown when a requested cookie does not exist.
pub const DEFAULT_COOKIE: &str = "sabor1";

/// Merch product shown by default.
pub const DEFAULT_MERCH: &str = "bolso-brunela";

/// Errors that can occur during catalog lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product has this id.
    #[error("product not found: {0}")]
    NotFound(ProductId),
}

/// Criteria for narrowing the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Active tags; a product matches if it carries any of them.
    pub tags: Vec<String>,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
}

impl ProductFilter {
    /// Whether `product` passes this filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let above_min = self.min_price.is_none_or(|min| product.price >= min);
        let below_max = self.max_price.is_none_or(|max| product.price <= max);
        let tagged = self.tags.is_empty() || product.has_any_tag(&self.tags);
        above_min && below_max && tagged
    }
}

/// The storefront's products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from arbitrary products.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The Brunela assortment.
    #[must_use]
    pub fn brunela() -> Self {
        Self::new(vec![
            cookie(
                "sabor1",
                "JX Experiment Cookie",
                2500,
                "img/sabor1.png",
                "JX Experiment cookie",
                "Una galleta increíble, con sabor a dulce horneado con relleno de chocolate y un poco de harina por encima.",
                &["CHOCOLATE CHIP", "NUEVAS", "PREMIUM"],
                &["nuevas", "chocolate", "chocolate-chip"],
                &["chocolate-chip", "chocolate"],
            ),
            cookie(
                "sabor2",
                "JS Cinnamon Roll",
                1800,
                "img/sabor2.png",
                "JS Cinnamon Roll cookie",
                "Una deliciosa galleta estilo cinnamon roll con canela y azúcar. Perfecta para acompañar tu café de la mañana.",
                &["SEMANAL", "CANELA", "TRADICIONAL"],
                &["semanal", "chocolate", "tradicional"],
                &["canela", "chocolate"],
            ),
            cookie(
                "sabor3",
                "Premium Chocolate Deluxe",
                3200,
                "img/sabor3.png",
                "Premium Chocolate Deluxe",
                "Una galleta premium con chocolate belga, nueces del mediterráneo y un toque de vainilla francesa.",
                &["ESPECIALES", "PREMIUM", "CHOCOLATE BELGA"],
                &["especiales", "premium", "chocolate-chip"],
                &["vainilla", "chocolate-chip", "nuez"],
            ),
            cookie(
                "sabor4",
                "Gluten-Free Berry Bliss",
                2700,
                "img/sabor4.png",
                "Gluten-Free Berry Bliss",
                "Galleta sin gluten elaborada con harina de almendras, arándanos frescos y esencia de vainilla natural.",
                &["SIN GLUTEN", "FRESA", "NUEVAS"],
                &["nuevas", "sin-gluten", "premium"],
                &["fresa", "vainilla"],
            ),
            cookie(
                "sabor5",
                "Classic Vanilla Bean",
                2000,
                "img/sabor5.png",
                "Classic Vanilla Bean cookie",
                "Una clásica galleta de vainilla elaborada con granos de vainilla de Madagascar. Simple pero exquisita.",
                &["SEMANAL", "VAINILLA", "TRADICIONAL"],
                &["semanal", "chocolate", "tradicional"],
                &["vainilla", "chocolate"],
            ),
            cookie(
                "sabor6",
                "Chocolate Supreme Deluxe",
                3600,
                "img/sabor6.jpg",
                "Chocolate Supreme Deluxe",
                "La galleta más extravagante: triple chocolate con ganache, chips de chocolate negro y crema batida.",
                &["ESPECIALES", "PREMIUM", "TRIPLE CHOCOLATE"],
                &["especiales", "premium", "chocolate-chip"],
                &["chocolate", "chocolate-chip", "nuez"],
            ),
            merch(
                DEFAULT_MERCH,
                25_000,
                "img/merch/bolso 1.png",
                "Un producto increíble de Brunela, diseñado con amor y dedicación para nuestros clientes más especiales.",
            ),
        ])
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    /// Look up a product, failing with [`CatalogError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no product has this id.
    pub fn get(&self, id: &str) -> Result<&Product, CatalogError> {
        self.find(id)
            .ok_or_else(|| CatalogError::NotFound(ProductId::new(id)))
    }

    /// Look up a cookie, falling back to the house cookie when `id` is
    /// absent or unknown.
    ///
    /// Returns `None` only for a catalog without the house cookie.
    #[must_use]
    pub fn find_or_default(&self, id: Option<&str>) -> Option<&Product> {
        id.and_then(|id| self.find(id))
            .or_else(|| self.find(DEFAULT_COOKIE))
    }

    /// Products passing `filter`, in display order.
    pub fn filter<'a>(&'a self, filter: &'a ProductFilter) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |p| filter.matches(p))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::brunela()
    }
}

/// Display tags for a merch product, derived from keywords in its title.
#[must_use]
pub fn merch_tags(title: &str) -> [&'static str; 4] {
    let title = title.to_lowercase();
    if title.contains("bolso") {
        ["Accesorio", "Práctico", "Diseño Exclusivo", "Calidad Premium"]
    } else if title.contains("camiseta") {
        ["Ropa", "Cómodo", "Algodón", "Estilo Casual"]
    } else if title.contains("gorra") {
        ["Accesorio", "Ajustable", "Protección UV", "Estilo Urbano"]
    } else if title.contains("termo") {
        ["Accesorio", "Acero Inoxidable", "Mantiene Temperatura", "Portátil"]
    } else if title.contains("combo") {
        ["Oferta Especial", "Múltiples Productos", "Ahorro", "Regalo Perfecto"]
    } else if title.contains("sobre") {
        ["Hogar", "Decorativo", "Estilo Elegante", "Casa Brunela"]
    } else {
        ["Producto Brunela", "Calidad Premium", "Diseño Exclusivo", "Hecho con Amor"]
    }
}

/// `bolso-brunela` -> `BOLSO BRUNELA`.
fn merch_title(slug: &str) -> String {
    slug.replace('-', " ").to_uppercase()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

#[allow(clippy::too_many_arguments)]
fn cookie(
    id: &str,
    name: &str,
    price: u32,
    image: &str,
    caption: &str,
    description: &str,
    tags: &[&str],
    categories: &[&str],
    flavors: &[&str],
) -> Product {
    Product {
        id: ProductId::new(id),
        kind: ProductKind::Cookie,
        name: name.to_owned(),
        description: description.to_owned(),
        price: Price::from(price),
        image: image.to_owned(),
        caption: caption.to_owned(),
        tags: strings(tags),
        categories: strings(categories),
        flavors: strings(flavors),
    }
}

fn merch(slug: &str, price: u32, image: &str, description: &str) -> Product {
    let title = merch_title(slug);
    Product {
        id: ProductId::new(slug),
        kind: ProductKind::Merch,
        name: title.clone(),
        description: description.to_owned(),
        price: Price::from(price),
        image: image.to_owned(),
        caption: title,
        tags: strings(&merch_tags(slug)),
        categories: vec!["merch".to_owned()],
        flavors: Vec::new(),
    }
}
