//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] brunela_core::EmailError),

    /// Full name too short.
    #[error("full name must be at least {min} characters")]
    InvalidName { min: usize },

    /// Username too short.
    #[error("username must be at least {min} characters")]
    InvalidUsername { min: usize },

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Username already registered.
    #[error("username already taken")]
    UsernameTaken,

    /// Email already registered.
    #[error("email already registered")]
    EmailTaken,

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
