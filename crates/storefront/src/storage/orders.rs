//! Personalized cookie snapshot.

use chrono::Utc;

use super::{KeyValueStore, StorageError, load_json, save_json};
use crate::models::session::keys;
use crate::models::{CustomCookieOrder, CustomizationSelection, RawCustomization};

/// Repository for the `customCookieOrder` snapshot.
pub struct CustomOrderRepository<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> CustomOrderRepository<'a, S> {
    /// Create a new repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Record `selection` as the most recent personalized cookie.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub fn record(&self, selection: &CustomizationSelection) -> Result<CustomCookieOrder, StorageError> {
        let order = CustomCookieOrder {
            selection: selection.clone(),
            timestamp: Utc::now(),
        };
        save_json(self.store, keys::CUSTOM_COOKIE_ORDER, &order)?;
        Ok(order)
    }

    /// The most recent personalized cookie, if any.
    ///
    /// The snapshot may have been written by a page that knows options this
    /// crate does not; those fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub fn last(&self) -> Result<Option<CustomizationSelection>, StorageError> {
        match load_json::<RawCustomization, _>(self.store, keys::CUSTOM_COOKIE_ORDER) {
            Ok(raw) => Ok(raw.map(RawCustomization::into_selection)),
            Err(e @ StorageError::Malformed { .. }) => {
                tracing::warn!(error = %e, "ignoring unreadable custom cookie snapshot");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use brunela_core::{CreamType, Shape};

    #[test]
    fn test_record_and_read_back() {
        let store = MemoryStore::new();
        let orders = CustomOrderRepository::new(&store);
        assert!(orders.last().unwrap().is_none());

        let selection = CustomizationSelection {
            shape: Shape::Star,
            cream_type: CreamType::Vanilla,
            ..CustomizationSelection::default()
        };
        orders.record(&selection).unwrap();
        assert_eq!(orders.last().unwrap(), Some(selection));
    }

    #[test]
    fn test_foreign_snapshot_is_read_leniently() {
        let store = MemoryStore::new();
        store
            .set_item(
                keys::CUSTOM_COOKIE_ORDER,
                r#"{"shape":"heart","creamType":"pistachio","toppings":["nuts"]}"#,
            )
            .unwrap();
        let last = CustomOrderRepository::new(&store).last().unwrap().unwrap();
        assert_eq!(last.shape, Shape::Heart);
        assert_eq!(last.cream_type, CreamType::None);
        assert_eq!(last.toppings.len(), 1);
    }
}
