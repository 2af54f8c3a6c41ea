//! Storefront context shared by every front end.

use std::sync::Arc;

use url::Url;

use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::models::ShopperSession;
use crate::services::auth::AuthService;
use crate::services::cart::CartController;
use crate::services::catalog::Catalog;
use crate::services::whatsapp;
use crate::storage::{FileStore, KeyValueStore, StorageError};

/// Configuration, storage and catalog in one place.
///
/// This struct is cheaply cloneable via `Arc` and hands out the services,
/// each borrowing the shared store.
pub struct Storefront<S: KeyValueStore> {
    inner: Arc<StorefrontInner<S>>,
}

impl<S: KeyValueStore> Clone for Storefront<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct StorefrontInner<S> {
    config: StorefrontConfig,
    store: S,
    catalog: Catalog,
}

impl Storefront<FileStore> {
    /// Open the storefront on the JSON document named by `config`.
    #[must_use]
    pub fn open(config: StorefrontConfig) -> Self {
        let store = FileStore::open(config.data_file.clone());
        Self::new(config, store)
    }
}

impl<S: KeyValueStore> Storefront<S> {
    /// Create a storefront over `store`.
    #[must_use]
    pub fn new(config: StorefrontConfig, store: S) -> Self {
        Self {
            inner: Arc::new(StorefrontInner {
                config,
                store,
                catalog: Catalog::brunela(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the key-value store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.inner.store
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The shopper whose cart is active.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    pub fn session(&self) -> std::result::Result<ShopperSession, StorageError> {
        ShopperSession::resolve(self.store())
    }

    /// Cart controller for the active shopper.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the active shopper cannot be read.
    pub fn cart(&self) -> Result<CartController<'_, S>> {
        Ok(self.cart_for(self.session()?))
    }

    /// Cart controller for `session`, with the configured shipping policy.
    #[must_use]
    pub fn cart_for(&self, session: ShopperSession) -> CartController<'_, S> {
        CartController::new(self.store(), session).with_shipping(self.config().shipping)
    }

    /// Account service.
    #[must_use]
    pub fn accounts(&self) -> AuthService<'_, S> {
        AuthService::new(self.store())
    }

    /// WhatsApp enquiry link for catalog product `id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` for an unknown product, or `AppError::Link`
    /// if the configured number cannot form a URL.
    pub fn whatsapp_link(&self, id: &str) -> Result<Url> {
        let product = self.catalog().get(id)?;
        let message = whatsapp::product_message(product);
        Ok(whatsapp::link(&self.config().whatsapp_number, &message)?)
    }
}
