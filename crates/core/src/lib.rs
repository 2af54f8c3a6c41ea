//! Brunela Core - Shared types library.
//!
//! This crate provides common types used across all Brunela components:
//! - `storefront` - Cart, pricing, catalog and account logic over key-value storage
//! - `cli` - Terminal front-end for the storefront
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, quantities,
//!   emails and customization options

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
