//! Password credential types.
//!
//! Type-safe wrapper for stored password hashes.

use serde::{Deserialize, Serialize};

/// An encoded password hash (PHC string format, e.g. `$argon2id$...`).
///
/// Plaintext passwords never reach storage; this is the only password
/// representation that is persisted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredPasswordHash(String);

impl StoredPasswordHash {
    /// Wrap an already-encoded hash.
    #[must_use]
    pub const fn new(encoded: String) -> Self {
        Self(encoded)
    }

    /// Get the encoded hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Debug for StoredPasswordHash {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("StoredPasswordHash([REDACTED])")
    }
}

impl AsRef<str> for StoredPasswordHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for StoredPasswordHash {
    fn from(encoded: String) -> Self {
        Self(encoded)
    }
}
