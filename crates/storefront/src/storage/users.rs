//! Account and session persistence.

use brunela_core::{Email, Username};
use tracing::instrument;

use super::{KeyValueStore, StorageError, load_json, save_json};
use crate::models::session::keys;
use crate::models::{RegisteredUser, UserSession};

/// Repository for `registeredUsers`, `userSession` and `currentUser`.
pub struct UserRepository<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> UserRepository<'a, S> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All registered accounts.
    ///
    /// Entries that do not decode as accounts (for example records written
    /// before passwords were hashed) are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Malformed` if the list itself is not a JSON
    /// array, or any backend error.
    pub fn list(&self) -> Result<Vec<RegisteredUser>, StorageError> {
        let Some(entries) = load_json::<Vec<serde_json::Value>, _>(self.store, keys::REGISTERED_USERS)?
        else {
            return Ok(Vec::new());
        };

        Ok(entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping unreadable account record");
                    None
                }
            })
            .collect())
    }

    /// Find an account by username, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the account list cannot be read.
    pub fn find_by_username(&self, username: &str) -> Result<Option<RegisteredUser>, StorageError> {
        Ok(self
            .list()?
            .into_iter()
            .find(|user| user.username.matches(username)))
    }

    /// Find an account by email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the account list cannot be read.
    pub fn find_by_email(&self, email: &Email) -> Result<Option<RegisteredUser>, StorageError> {
        Ok(self.list()?.into_iter().find(|user| user.email.matches(email)))
    }

    /// Append an account.
    ///
    /// Uniqueness is checked by the caller. Stored entries are carried over
    /// as they are, including ones [`UserRepository::list`] skips.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be read or written.
    #[instrument(skip(self, user), fields(username = %user.username))]
    pub fn insert(&self, user: RegisteredUser) -> Result<(), StorageError> {
        let mut entries =
            load_json::<Vec<serde_json::Value>, _>(self.store, keys::REGISTERED_USERS)?.unwrap_or_default();
        let entry = serde_json::to_value(&user).map_err(|source| StorageError::Encode {
            key: keys::REGISTERED_USERS.to_owned(),
            source,
        })?;
        entries.push(entry);
        save_json(self.store, keys::REGISTERED_USERS, &entries)
    }

    /// The stored session, if one decodes and is marked logged in.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub fn session(&self) -> Result<Option<UserSession>, StorageError> {
        match load_json::<UserSession, _>(self.store, keys::USER_SESSION) {
            Ok(session) => Ok(session.filter(|s| s.is_logged_in)),
            Err(e @ StorageError::Malformed { .. }) => {
                tracing::warn!(error = %e, "treating unreadable session as logged out");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Store `session` and make its user the cart owner.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if either write fails.
    pub fn start_session(&self, session: &UserSession) -> Result<(), StorageError> {
        save_json(self.store, keys::USER_SESSION, session)?;
        self.store.set_item(keys::CURRENT_USER, session.username.as_str())
    }

    /// Remove the session and the cart owner; carts are left in place.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if either removal fails.
    pub fn end_session(&self) -> Result<(), StorageError> {
        self.store.remove_item(keys::USER_SESSION)?;
        self.store.remove_item(keys::CURRENT_USER)
    }

    /// The raw cart owner, if set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub fn current_user(&self) -> Result<Option<Username>, StorageError> {
        Ok(self
            .store
            .get_item(keys::CURRENT_USER)?
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .map(Username::new))
    }
}
