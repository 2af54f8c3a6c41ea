//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Local accounts (register, login, logout)
//! - `cart` - Cart mutations, totals and checkout
//! - `catalog` - Fixed product assortment and filtering
//! - `pricing` - Personalized cookie price tables
//! - `whatsapp` - Enquiry deep links

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod pricing;
pub mod whatsapp;
