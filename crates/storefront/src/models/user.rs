//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brunela_core::{Email, StoredPasswordHash, Username};

/// A local storefront account.
///
/// Only the argon2 hash of the password is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    /// Display name.
    pub full_name: String,
    /// Contact address, unique case-insensitively.
    pub email: Email,
    /// Login name, unique case-insensitively.
    pub username: Username,
    /// PHC-format argon2 hash.
    pub password_hash: StoredPasswordHash,
    /// When the account was created.
    pub registered_at: DateTime<Utc>,
}
