//! Unified error handling.
//!
//! Provides a unified `AppError` type for front ends such as the CLI. Every
//! service error converts into it, and [`AppError::user_message`] gives the
//! Spanish text a shopper should see.

use thiserror::Error;

use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::services::cart::CartError;
use crate::services::catalog::CatalogError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A deep link could not be built.
    #[error("Link error: {0}")]
    Link(#[from] url::ParseError),

    /// Bad input from the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Message safe to show a shopper.
    ///
    /// Internal details (paths, parser errors) are not exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(err) => format!("Configuración inválida: {err}"),
            Self::Storage(_) | Self::Cart(CartError::Storage(_)) | Self::Auth(AuthError::Storage(_)) => {
                "No se pudo acceder al almacenamiento".to_owned()
            }
            Self::Cart(CartError::EmptyCart) => "Carrito vacío".to_owned(),
            Self::Auth(err) => match err {
                AuthError::InvalidEmail(_) => "Ingresa un correo electrónico válido".to_owned(),
                AuthError::InvalidName { min } => {
                    format!("El nombre debe tener al menos {min} caracteres")
                }
                AuthError::InvalidUsername { min } => {
                    format!("El usuario debe tener al menos {min} caracteres")
                }
                AuthError::WeakPassword(_) => {
                    "La contraseña debe tener al menos 6 caracteres".to_owned()
                }
                AuthError::PasswordMismatch => "Las contraseñas no coinciden".to_owned(),
                AuthError::UsernameTaken => "Este nombre de usuario ya está en uso".to_owned(),
                AuthError::EmailTaken => "Este correo electrónico ya está registrado".to_owned(),
                AuthError::InvalidCredentials => {
                    "Datos inválidos. Usuario o contraseña incorrectos.".to_owned()
                }
                AuthError::PasswordHash | AuthError::Storage(_) => {
                    "Error de autenticación".to_owned()
                }
            },
            Self::Catalog(CatalogError::NotFound(id)) => format!("Producto no encontrado: {id}"),
            Self::Link(_) => "No se pudo generar el enlace de WhatsApp".to_owned(),
            Self::InvalidInput(msg) => msg.clone(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
