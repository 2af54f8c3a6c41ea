//! Per-user cart persistence.

use brunela_core::Username;
use tracing::instrument;

use super::{KeyValueStore, StorageError, load_json, save_json};
use crate::models::LineItem;
use crate::models::session::keys;

/// Repository for cart slots (`cart_<user>`).
pub struct CartRepository<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> CartRepository<'a, S> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Load `user`'s cart.
    ///
    /// A missing slot is an empty cart. So is a slot that is not a JSON
    /// array. Inside an array, each line decodes on its own: a line that does
    /// not decode is logged and left out, and the rest of the cart is kept.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only if the backend itself cannot be read.
    #[instrument(skip(self), fields(user = %user))]
    pub fn load(&self, user: &Username) -> Result<Vec<LineItem>, StorageError> {
        let entries = match load_json::<Vec<serde_json::Value>, _>(self.store, &keys::cart(user)) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e @ StorageError::Malformed { .. }) => {
                tracing::warn!(error = %e, "discarding unreadable cart");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        Ok(entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(index, error = %e, "dropping unreadable cart line");
                    None
                }
            })
            .collect())
    }

    /// Replace `user`'s cart with `items` in a single write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    #[instrument(skip(self, items), fields(user = %user, lines = items.len()))]
    pub fn save(&self, user: &Username, items: &[LineItem]) -> Result<(), StorageError> {
        save_json(self.store, &keys::cart(user), items)
    }
}
