//! Integration tests for the Brunela storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p brunela-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart mutations and summaries end to end
//! - `accounts` - Registration, login and per-user carts
//! - `file_store` - Persistence across reopened JSON stores

use std::path::Path;

use brunela_core::{Price, ProductId};
use brunela_storefront::Storefront;
use brunela_storefront::config::StorefrontConfig;
use brunela_storefront::models::LineItem;
use brunela_storefront::storage::{FileStore, MemoryStore};

/// A storefront over a fresh in-memory store.
#[must_use]
pub fn memory_storefront() -> Storefront<MemoryStore> {
    Storefront::new(StorefrontConfig::default(), MemoryStore::new())
}

/// A storefront over the JSON document at `path`.
#[must_use]
pub fn file_storefront(path: &Path) -> Storefront<FileStore> {
    let config = StorefrontConfig {
        data_file: path.to_path_buf(),
        ..StorefrontConfig::default()
    };
    Storefront::open(config)
}

/// A plain line item with one unit at `pesos`.
#[must_use]
pub fn item(id: &str, pesos: u64) -> LineItem {
    LineItem::new(
        ProductId::new(id),
        format!("Producto {id}"),
        Price::from_pesos(pesos),
        "img/test.png",
    )
}
