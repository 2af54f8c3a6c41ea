//! Key-value storage for storefront records.
//!
//! # Model
//!
//! Storage is a flat map of string keys to string values, the same shape as
//! browser `localStorage`. Structured records are stored as JSON text:
//!
//! - `cart_<user>` - ordered line items for one user
//! - `currentUser` - plain username used to pick the cart slot
//! - `userSession` - the logged-in session record
//! - `registeredUsers` - local accounts
//! - `customCookieOrder` - last personalized cookie snapshot
//!
//! Key names live in [`crate::models::session::keys`].
//!
//! # Backends
//!
//! - [`MemoryStore`] - process-local map, used by tests and embedders
//! - [`FileStore`] - one JSON document on disk, replaced atomically on write
//!
//! Writes are read-modify-write with no cross-process coordination: two
//! processes mutating the same slot can lose an update (last writer wins).

mod file;
mod memory;

pub mod carts;
pub mod orders;
pub mod users;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be encoded as JSON.
    #[error("failed to encode {key}: {source}")]
    Encode {
        /// Key being written.
        key: String,
        /// Underlying serializer error.
        source: serde_json::Error,
    },

    /// A stored value is not valid JSON for the expected record type.
    #[error("malformed data under {key}: {source}")]
    Malformed {
        /// Key being read.
        key: String,
        /// Underlying parser error.
        source: serde_json::Error,
    },

    /// A lock guarding in-memory state was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A string-keyed, string-valued store.
///
/// Mirrors the browser storage API: absent keys read as `None`, writes
/// replace the whole value, removal of an absent key is not an error.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key` if present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Read and decode a JSON record.
///
/// # Errors
///
/// Returns `StorageError::Malformed` if the stored text does not decode as
/// `T`, or any backend error.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get_item(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Malformed {
            key: key.to_owned(),
            source,
        })
}

/// Encode and write a JSON record in a single `set_item`.
///
/// # Errors
///
/// Returns `StorageError::Encode` if `value` cannot be serialized, or any
/// backend error.
pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_owned(),
        source,
    })?;
    store.set_item(key, &raw)
}
