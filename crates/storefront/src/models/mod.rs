//! Domain models for the storefront.
//!
//! Field names serialize in camelCase so records stay readable by the
//! storefront pages that share the same storage.

pub mod cart;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{CustomCookieOrder, CustomizationSelection, LineItem, RawCustomization};
pub use product::{Product, ProductKind};
pub use session::{ShopperSession, UserSession};
pub use user::RegisteredUser;
