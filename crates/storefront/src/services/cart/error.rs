//! Cart error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during cart operations.
///
/// Rejected mutations are not errors; they come back as
/// [`super::CartOutcome::Rejected`].
#[derive(Debug, Error)]
pub enum CartError {
    /// Storage could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Checkout was requested with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,
}
