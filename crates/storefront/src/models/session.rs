//! Session-related types.
//!
//! Who is shopping, and whether they are logged in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brunela_core::Username;

use crate::storage::{KeyValueStore, StorageError};

/// Logged-in session record, stored under [`keys::USER_SESSION`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    #[serde(default)]
    pub is_logged_in: bool,
    pub username: Username,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    pub login_time: DateTime<Utc>,
}

/// The shopper whose cart operations apply.
///
/// Resolved once per operation from the `currentUser` key; absent or blank
/// means guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopperSession {
    /// Cart owner.
    pub user: Username,
}

impl ShopperSession {
    /// A guest shopper.
    #[must_use]
    pub fn guest() -> Self {
        Self {
            user: Username::guest(),
        }
    }

    /// A named shopper.
    #[must_use]
    pub const fn for_user(user: Username) -> Self {
        Self { user }
    }

    /// Read the current shopper from storage.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub fn resolve<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self, StorageError> {
        let user = store
            .get_item(keys::CURRENT_USER)?
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .map_or_else(Username::guest, Username::new);
        Ok(Self { user })
    }

    /// Storage key of this shopper's cart.
    #[must_use]
    pub fn cart_key(&self) -> String {
        keys::cart(&self.user)
    }
}

/// Storage keys shared with the storefront pages.
pub mod keys {
    use brunela_core::Username;

    /// Username whose cart is active. Plain string, not JSON.
    pub const CURRENT_USER: &str = "currentUser";

    /// Logged-in session record.
    pub const USER_SESSION: &str = "userSession";

    /// Local accounts.
    pub const REGISTERED_USERS: &str = "registeredUsers";

    /// Snapshot of the last personalized cookie.
    pub const CUSTOM_COOKIE_ORDER: &str = "customCookieOrder";

    /// Prefix of per-user cart keys.
    pub const CART_PREFIX: &str = "cart_";

    /// Cart key for `user`.
    #[must_use]
    pub fn cart(user: &Username) -> String {
        format!("{CART_PREFIX}{user}")
    }
}
