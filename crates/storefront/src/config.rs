//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `BRUNELA_DATA_FILE` - JSON document backing storage (default: brunela-storage.json)
//! - `BRUNELA_WHATSAPP_NUMBER` - Enquiry number, digits only with country code
//!   (default: 573001234567)
//! - `BRUNELA_FREE_SHIPPING_THRESHOLD` - Subtotal in pesos that ships free (default: 50000)
//! - `BRUNELA_SHIPPING_FEE` - Flat fee in pesos below the threshold (default: 5000)

use std::path::PathBuf;

use thiserror::Error;

use brunela_core::Price;

use crate::services::cart::ShippingPolicy;
use crate::services::whatsapp;

const DEFAULT_DATA_FILE: &str = "brunela-storage.json";
const DEFAULT_FREE_SHIPPING_THRESHOLD: u64 = 50_000;
const DEFAULT_SHIPPING_FEE: u64 = 5_000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Path of the JSON storage document
    pub data_file: PathBuf,
    /// WhatsApp number enquiries are sent to
    pub whatsapp_number: String,
    /// Free-shipping threshold and flat fee
    pub shipping: ShippingPolicy,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            whatsapp_number: whatsapp::DEFAULT_NUMBER.to_owned(),
            shipping: ShippingPolicy::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let data_file = PathBuf::from(env.get_or_default("BRUNELA_DATA_FILE", DEFAULT_DATA_FILE));
        let whatsapp_number = parse_phone_number(
            "BRUNELA_WHATSAPP_NUMBER",
            &env.get_or_default("BRUNELA_WHATSAPP_NUMBER", whatsapp::DEFAULT_NUMBER),
        )?;
        let shipping = ShippingPolicy {
            free_threshold: env.get_pesos(
                "BRUNELA_FREE_SHIPPING_THRESHOLD",
                DEFAULT_FREE_SHIPPING_THRESHOLD,
            )?,
            flat_fee: env.get_pesos("BRUNELA_SHIPPING_FEE", DEFAULT_SHIPPING_FEE)?,
        };

        Ok(Self {
            data_file,
            whatsapp_number,
            shipping,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable; blank counts as unset.
    fn get_optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }

    /// Get a variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get_optional(key)
            .unwrap_or_else(|| default.to_owned())
    }

    /// Get a whole-peso amount.
    fn get_pesos(&self, key: &str, default: u64) -> Result<Price, ConfigError> {
        self.get_optional(key).map_or(Ok(Price::from_pesos(default)), |raw| {
            raw.parse::<u64>()
                .map(Price::from_pesos)
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
        })
    }
}

/// Accept `573001234567` or `+57 300 123 4567`; return digits only.
fn parse_phone_number(key: &str, raw: &str) -> Result<String, ConfigError> {
    let digits: String = raw
        .trim_start_matches('+')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_owned(),
            "must contain only digits and an optional leading +".to_owned(),
        ));
    }
    Ok(digits)
}
