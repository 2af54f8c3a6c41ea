//! Catalog commands.
//!
//! # Usage
//!
//! ```bash
//! brunela catalog list
//! brunela catalog list --tag chocolate --tag canela --min 2000 --max 3000
//! brunela catalog show sabor6
//! ```

use clap::Subcommand;

use brunela_core::Price;
use brunela_storefront::services::catalog::ProductFilter;
use brunela_storefront::storage::KeyValueStore;
use brunela_storefront::{AppError, Storefront};

use super::output::{self, Output};

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List products, optionally filtered
    List {
        /// Only products carrying any of these category or flavor tags
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Minimum price in pesos
        #[arg(long)]
        min: Option<u64>,

        /// Maximum price in pesos
        #[arg(long)]
        max: Option<u64>,
    },
    /// Show one product; unknown cookie ids show the house cookie
    Show {
        /// Product id
        id: Option<String>,
    },
}

pub fn run<S: KeyValueStore>(
    shop: &Storefront<S>,
    action: CatalogAction,
    out: Output,
) -> Result<(), AppError> {
    match action {
        CatalogAction::List { tags, min, max } => {
            let filter = ProductFilter {
                tags,
                min_price: min.map(Price::from_pesos),
                max_price: max.map(Price::from_pesos),
            };
            let products: Vec<_> = shop.catalog().filter(&filter).collect();
            tracing::debug!(matches = products.len(), "catalog filtered");
            out.show(&products, |products| {
                if products.is_empty() {
                    return "No hay productos que coincidan".to_owned();
                }
                products
                    .iter()
                    .map(|p| output::product_row(p))
                    .collect::<Vec<_>>()
                    .join("\n")
            });
        }
        CatalogAction::Show { id } => {
            let Some(product) = shop.catalog().find_or_default(id.as_deref()) else {
                return Err(AppError::InvalidInput("catalog is empty".to_owned()));
            };
            if id.as_deref().is_some_and(|id| id != product.id.as_str()) {
                tracing::warn!(requested = ?id, shown = %product.id, "unknown product, showing default");
            }
            out.show(product, output::product_detail);
        }
    }
    Ok(())
}
