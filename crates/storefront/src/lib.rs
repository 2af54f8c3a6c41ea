//! Brunela Storefront library.
//!
//! Everything the storefront pages do without a server: a per-user cart kept
//! in key-value storage, the personalized-cookie price calculator, the cart
//! summary, the product catalog, local accounts and WhatsApp enquiry links.
//!
//! # Architecture
//!
//! - [`storage`] - Key-value backends (memory, JSON file) and the repositories
//!   that read and write storefront records through them
//! - [`services`] - Cart controller, pricing, catalog, accounts, WhatsApp
//! - [`state`] - [`Storefront`](state::Storefront), the context object that
//!   owns configuration and storage and hands out services
//!
//! All operations are synchronous and run to completion; the only shared
//! resource is the key-value store, which is last-writer-wins.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;

pub use error::{AppError, Result};
pub use state::Storefront;
