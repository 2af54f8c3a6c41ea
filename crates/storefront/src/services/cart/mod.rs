//! Cart service.
//!
//! Every mutation reads the shopper's cart, computes the new cart, saves it
//! in one write and returns a [`CartUpdate`] describing what the view should
//! show. A rejected mutation saves nothing and the update carries the
//! persisted state so the caller can resynchronise.

mod error;
pub mod summary;

pub use error::CartError;
pub use summary::{
    CartState, CartSummary, CheckoutAffordance, ShippingPolicy, SummaryLine, summarize,
    summarize_with,
};

use std::fmt;

use serde::Serialize;
use tracing::instrument;

use brunela_core::{Price, ProductId, Quantity, QuantityError};

use crate::models::{CustomizationSelection, LineItem, ShopperSession};
use crate::services::pricing::{self, PriceBreakdown};
use crate::storage::KeyValueStore;
use crate::storage::carts::CartRepository;
use crate::storage::orders::CustomOrderRepository;

/// Message shown when checkout reaches the payment step.
pub const PAYMENT_PENDING_MESSAGE: &str = "Funcionalidad de pago en desarrollo";

/// User-facing confirmation of an applied mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    Added,
    PersonalizedAdded,
    Increased,
    Decreased,
    Updated,
    Removed,
    Cleared,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Added => "Producto agregado al carrito",
            Self::PersonalizedAdded => "¡Galleta personalizada agregada al carrito!",
            Self::Increased => "Cantidad aumentada",
            Self::Decreased => "Cantidad disminuida",
            Self::Updated => "Cantidad actualizada",
            Self::Removed => "Producto eliminado",
            Self::Cleared => "Carrito vaciado",
        })
    }
}

/// Why a mutation left the cart unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    /// No line item has this id.
    NotInCart { id: ProductId },
    /// Decrement at quantity 1; use remove instead.
    AtMinimum,
    /// Increment at the maximum quantity.
    AtMaximum,
    /// Requested quantity outside the allowed range.
    OutOfRange {
        #[serde(skip)]
        error: QuantityError,
    },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInCart { id } => write!(f, "{id} no está en el carrito"),
            Self::AtMinimum => f.write_str("La cantidad mínima es 1"),
            Self::AtMaximum => write!(f, "La cantidad máxima es {}", Quantity::MAX),
            Self::OutOfRange { error } => write!(f, "Cantidad no válida: {error}"),
        }
    }
}

/// Result of a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CartOutcome {
    Applied { notice: Notice },
    Rejected { reason: RejectReason },
}

impl CartOutcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

impl fmt::Display for CartOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied { notice } => fmt::Display::fmt(notice, f),
            Self::Rejected { reason } => fmt::Display::fmt(reason, f),
        }
    }
}

/// Display state of the line item a mutation touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemLine {
    pub id: ProductId,
    pub quantity: Quantity,
    pub line_total: Price,
}

/// Everything a view needs to refresh after a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartUpdate {
    pub outcome: CartOutcome,
    /// The touched item, if it is still in the cart.
    pub item: Option<ItemLine>,
    pub summary: CartSummary,
    /// Badge count; same as `summary.item_count`.
    pub item_count: u32,
}

/// What happened when checkout was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutStatus {
    pub summary: CartSummary,
    /// Payment is not available yet; always false.
    pub payment_available: bool,
    pub message: &'static str,
}

/// Cart operations for one shopper.
pub struct CartController<'a, S: KeyValueStore + ?Sized> {
    carts: CartRepository<'a, S>,
    orders: CustomOrderRepository<'a, S>,
    session: ShopperSession,
    shipping: ShippingPolicy,
}

impl<'a, S: KeyValueStore + ?Sized> CartController<'a, S> {
    /// Create a controller for `session`'s cart.
    #[must_use]
    pub fn new(store: &'a S, session: ShopperSession) -> Self {
        Self {
            carts: CartRepository::new(store),
            orders: CustomOrderRepository::new(store),
            session,
            shipping: ShippingPolicy::default(),
        }
    }

    /// Use `policy` for shipping instead of the default.
    #[must_use]
    pub fn with_shipping(mut self, policy: ShippingPolicy) -> Self {
        self.shipping = policy;
        self
    }

    /// The shopper this controller acts for.
    #[must_use]
    pub const fn session(&self) -> &ShopperSession {
        &self.session
    }

    // =========================================================================
    // Read-only views
    // =========================================================================

    /// Current line items in display order.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the backend cannot be read.
    pub fn items(&self) -> Result<Vec<LineItem>, CartError> {
        Ok(self.carts.load(&self.session.user)?)
    }

    /// Total units across all lines.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the backend cannot be read.
    pub fn item_count(&self) -> Result<u32, CartError> {
        Ok(summary::item_count(&self.items()?))
    }

    /// Totals and checkout state.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the backend cannot be read.
    pub fn summary(&self) -> Result<CartSummary, CartError> {
        Ok(summarize_with(&self.items()?, &self.shipping))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of `item`, merging with an existing line of the same id.
    ///
    /// A new line always starts at quantity 1, whatever `item` carries.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be read or written.
    #[instrument(skip(self, item), fields(user = %self.session.user, id = %item.id))]
    pub fn add_or_increment(&self, item: LineItem) -> Result<CartUpdate, CartError> {
        let mut items = self.items()?;
        let id = item.id.clone();

        if let Some(existing) = items.iter_mut().find(|i| i.id == id) {
            let Some(next) = existing.quantity.incremented() else {
                return self.rejected(&items, &id, RejectReason::AtMaximum);
            };
            existing.quantity = next;
        } else {
            items.push(LineItem {
                quantity: Quantity::ONE,
                ..item
            });
        }

        self.applied(&items, Some(&id), Notice::Added)
    }

    /// Add one unit to an existing line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be read or written.
    #[instrument(skip(self), fields(user = %self.session.user))]
    pub fn increment(&self, id: &ProductId) -> Result<CartUpdate, CartError> {
        let mut items = self.items()?;
        let Some(existing) = items.iter_mut().find(|i| &i.id == id) else {
            return self.not_in_cart(&items, id);
        };
        let Some(next) = existing.quantity.incremented() else {
            return self.rejected(&items, id, RejectReason::AtMaximum);
        };
        existing.quantity = next;
        self.applied(&items, Some(id), Notice::Increased)
    }

    /// Remove one unit from an existing line; never removes the line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be read or written.
    #[instrument(skip(self), fields(user = %self.session.user))]
    pub fn decrement(&self, id: &ProductId) -> Result<CartUpdate, CartError> {
        let mut items = self.items()?;
        let Some(existing) = items.iter_mut().find(|i| &i.id == id) else {
            return self.not_in_cart(&items, id);
        };
        let Some(next) = existing.quantity.decremented() else {
            return self.rejected(&items, id, RejectReason::AtMinimum);
        };
        existing.quantity = next;
        self.applied(&items, Some(id), Notice::Decreased)
    }

    /// Set a line's quantity to exactly `quantity`, which must be in `1..=99`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be read or written.
    #[instrument(skip(self), fields(user = %self.session.user))]
    pub fn set_quantity(&self, id: &ProductId, quantity: i64) -> Result<CartUpdate, CartError> {
        let mut items = self.items()?;
        let quantity = match Quantity::new(quantity) {
            Ok(q) => q,
            Err(error) => return self.rejected(&items, id, RejectReason::OutOfRange { error }),
        };
        let Some(existing) = items.iter_mut().find(|i| &i.id == id) else {
            return self.not_in_cart(&items, id);
        };
        existing.quantity = quantity;
        self.applied(&items, Some(id), Notice::Updated)
    }

    /// Delete a line entirely. The cart stays persisted even when emptied.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be read or written.
    #[instrument(skip(self), fields(user = %self.session.user))]
    pub fn remove(&self, id: &ProductId) -> Result<CartUpdate, CartError> {
        let mut items = self.items()?;
        let before = items.len();
        items.retain(|i| &i.id != id);
        if items.len() == before {
            return self.not_in_cart(&items, id);
        }
        self.applied(&items, None, Notice::Removed)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be written.
    #[instrument(skip(self), fields(user = %self.session.user))]
    pub fn clear(&self) -> Result<CartUpdate, CartError> {
        self.applied(&[], None, Notice::Cleared)
    }

    /// Price `selection` without touching the cart, and record it as the
    /// last personalized order.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the snapshot cannot be written.
    #[instrument(skip(self, selection), fields(user = %self.session.user))]
    pub fn quote_personalized(
        &self,
        selection: &CustomizationSelection,
    ) -> Result<PriceBreakdown, CartError> {
        let breakdown = pricing::price(selection);
        self.orders.record(selection)?;
        tracing::debug!(total = %breakdown.total, "personalized cookie quoted");
        Ok(breakdown)
    }

    /// Price `selection`, add it as its own line and record it as the last
    /// personalized order.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart or snapshot cannot be written.
    #[instrument(skip(self, selection), fields(user = %self.session.user))]
    pub fn add_personalized(
        &self,
        selection: CustomizationSelection,
    ) -> Result<(LineItem, CartUpdate), CartError> {
        let breakdown = pricing::price(&selection);
        self.orders.record(&selection)?;

        let item = LineItem::personalized(selection, breakdown.total);
        let mut items = self.items()?;
        items.push(item.clone());

        tracing::debug!(id = %item.id, price = %item.price, "personalized cookie priced");
        let update = self.applied(&items, Some(&item.id), Notice::PersonalizedAdded)?;
        Ok((item, update))
    }

    /// Start checkout.
    ///
    /// Payment is not implemented; a non-empty cart reports so and is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns `CartError::EmptyCart` if there is nothing to buy, or
    /// `CartError::Storage` if the cart cannot be read.
    #[instrument(skip(self), fields(user = %self.session.user))]
    pub fn checkout(&self) -> Result<CheckoutStatus, CartError> {
        let summary = self.summary()?;
        if summary.is_empty() {
            return Err(CartError::EmptyCart);
        }
        tracing::info!(total = %summary.total, "checkout requested");
        Ok(CheckoutStatus {
            summary,
            payment_available: false,
            message: PAYMENT_PENDING_MESSAGE,
        })
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn applied(
        &self,
        items: &[LineItem],
        touched: Option<&ProductId>,
        notice: Notice,
    ) -> Result<CartUpdate, CartError> {
        self.carts.save(&self.session.user, items)?;
        tracing::debug!(?notice, lines = items.len(), "cart updated");
        Ok(self.update(items, touched, CartOutcome::Applied { notice }))
    }

    fn rejected(
        &self,
        items: &[LineItem],
        touched: &ProductId,
        reason: RejectReason,
    ) -> Result<CartUpdate, CartError> {
        tracing::debug!(%reason, "cart mutation rejected");
        Ok(self.update(items, Some(touched), CartOutcome::Rejected { reason }))
    }

    fn not_in_cart(&self, items: &[LineItem], id: &ProductId) -> Result<CartUpdate, CartError> {
        self.rejected(items, id, RejectReason::NotInCart { id: id.clone() })
    }

    fn update(
        &self,
        items: &[LineItem],
        touched: Option<&ProductId>,
        outcome: CartOutcome,
    ) -> CartUpdate {
        let item = touched.and_then(|id| {
            items.iter().find(|i| &i.id == id).map(|i| ItemLine {
                id: i.id.clone(),
                quantity: i.quantity,
                line_total: i.line_total(),
            })
        });
        let summary = summarize_with(items, &self.shipping);
        CartUpdate {
            outcome,
            item,
            item_count: summary.item_count,
            summary,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use brunela_core::{Shape, Topping, Username};

    fn product(id: &str, price: u64) -> LineItem {
        LineItem::new(ProductId::new(id), id, Price::from_pesos(price), "img/x.png")
    }

    fn guest_cart(store: &MemoryStore) -> CartController<'_, MemoryStore> {
        CartController::new(store, ShopperSession::guest())
    }

    #[test]
    fn test_add_twice_merges() {
        let store = MemoryStore::new();
        let cart = guest_cart(&store);
        cart.add_or_increment(product("a", 500)).unwrap();
        let update = cart.add_or_increment(product("a", 500)).unwrap();

        let items = cart.items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity.get(), 2);
        assert_eq!(items[0].price, Price::from_pesos(500));
        assert_eq!(update.item.unwrap().line_total, Price::from_pesos(1000));
        assert_eq!(update.item_count, 2);
    }

    #[test]
    fn test_new_line_starts_at_one() {
        let store = MemoryStore::new();
        let cart = guest_cart(&store);
        let mut item = product("a", 500);
        item.quantity = Quantity::new(7).unwrap();
        cart.add_or_increment(item).unwrap();
        assert_eq!(cart.items().unwrap()[0].quantity, Quantity::ONE);
    }

    #[test]
    fn test_decrement_floor() {
        let store = MemoryStore::new();
        let cart = guest_cart(&store);
        cart.add_or_increment(product("a", 500)).unwrap();

        let update = cart.decrement(&ProductId::new("a")).unwrap();
        assert_eq!(
            update.outcome,
            CartOutcome::Rejected {
                reason: RejectReason::AtMinimum
            }
        );
        assert_eq!(cart.items().unwrap()[0].quantity, Quantity::ONE);
    }

    #[test]
    fn test_increment_then_decrement() {
        let store = MemoryStore::new();
        let cart = guest_cart(&store);
        cart.add_or_increment(product("a", 500)).unwrap();
        let id = ProductId::new("a");

        assert!(cart.increment(&id).unwrap().outcome.is_applied());
        assert_eq!(cart.items().unwrap()[0].quantity.get(), 2);
        let update = cart.decrement(&id).unwrap();
        assert_eq!(update.outcome.to_string(), "Cantidad disminuida");
        assert_eq!(cart.items().unwrap()[0].quantity.get(), 1);
    }

    #[test]
    fn test_increment_caps_at_maximum() {
        let store = MemoryStore::new();
        let cart = guest_cart(&store);
        let id = ProductId::new("a");
        cart.add_or_increment(product("a", 500)).unwrap();
        cart.set_quantity(&id, 99).unwrap();

        let update = cart.increment(&id).unwrap();
        assert!(matches!(
            update.outcome,
            CartOutcome::Rejected {
                reason: RejectReason::AtMaximum
            }
        ));
        let update = cart.add_or_increment(product("a", 500)).unwrap();
        assert!(!update.outcome.is_applied());
        assert_eq!(cart.items().unwrap()[0].quantity.get(), 99);
    }

    #[test]
    fn test_set_quantity_bounds() {
        let store = MemoryStore::new();
        let cart = guest_cart(&store);
        let id = ProductId::new("a");
        cart.add_or_increment(product("a", 500)).unwrap();
        cart.set_quantity(&id, 4).unwrap();

        for bad in [0, -1, 100, 1000] {
            let before = store.get_item("cart_guest").unwrap();
            let update = cart.set_quantity(&id, bad).unwrap();
            assert!(matches!(
                update.outcome,
                CartOutcome::Rejected {
                    reason: RejectReason::OutOfRange { .. }
                }
            ));
            assert_eq!(update.item.unwrap().quantity.get(), 4);
            assert_eq!(store.get_item("cart_guest").unwrap(), before);
        }

        assert!(cart.set_quantity(&id, 99).unwrap().outcome.is_applied());
        assert!(cart.set_quantity(&id, 1).unwrap().outcome.is_applied());
    }

    #[test]
    fn test_missing_target_is_noop() {
        let store = MemoryStore::new();
        let cart = guest_cart(&store);
        let ghost = ProductId::new("ghost");
        for update in [
            cart.increment(&ghost).unwrap(),
            cart.decrement(&ghost).unwrap(),
            cart.set_quantity(&ghost, 3).unwrap(),
            cart.remove(&ghost).unwrap(),
        ] {
            assert!(matches!(
                update.outcome,
                CartOutcome::Rejected {
                    reason: RejectReason::NotInCart { .. }
                }
            ));
            assert!(update.item.is_none());
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_last_item_leaves_empty_cart() {
        let store = MemoryStore::new();
        let cart = guest_cart(&store);
        cart.add_or_increment(product("a", 500)).unwrap();

        let update = cart.remove(&ProductId::new("a")).unwrap();
        assert!(update.summary.is_empty());
        assert!(!update.summary.checkout.enabled);
        assert_eq!(update.item_count, 0);
        assert_eq!(store.get_item("cart_guest").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_clear() {
        let store = MemoryStore::new();
        let cart = guest_cart(&store);
        cart.add_or_increment(product("a", 500)).unwrap();
        cart.add_or_increment(product("b", 700)).unwrap();
        cart.clear().unwrap();
        assert!(cart.items().unwrap().is_empty());
    }

    #[test]
    fn test_personalized_items_never_merge() {
        let store = MemoryStore::new();
        let cart = guest_cart(&store);
        let selection = CustomizationSelection {
            toppings: [Topping::Coconut].into_iter().collect(),
            ..CustomizationSelection::default()
        };

        let (first, _) = cart.add_personalized(selection.clone()).unwrap();
        let (second, update) = cart.add_personalized(selection).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.price, Price::from_pesos(3400));
        assert_eq!(update.summary.lines.len(), 2);
        assert!(store.get_item("customCookieOrder").unwrap().is_some());
    }

    #[test]
    fn test_quote_records_snapshot_without_adding() {
        let store = MemoryStore::new();
        let cart = guest_cart(&store);
        let selection = CustomizationSelection {
            shape: Shape::Heart,
            toppings: [Topping::Nuts].into_iter().collect(),
            ..CustomizationSelection::default()
        };

        let breakdown = cart.quote_personalized(&selection).unwrap();
        assert_eq!(breakdown.total, Price::from_pesos(3800));
        assert!(cart.items().unwrap().is_empty());

        let last = CustomOrderRepository::new(&store).last().unwrap();
        assert_eq!(last, Some(selection));
    }

    #[test]
    fn test_checkout() {
        let store = MemoryStore::new();
        let cart = guest_cart(&store);
        assert!(matches!(cart.checkout(), Err(CartError::EmptyCart)));

        cart.add_or_increment(product("a", 60_000)).unwrap();
        let status = cart.checkout().unwrap();
        assert!(!status.payment_available);
        assert!(status.summary.shipping.is_zero());
        assert_eq!(cart.items().unwrap().len(), 1);
    }

    #[test]
    fn test_carts_follow_session() {
        let store = MemoryStore::new();
        guest_cart(&store).add_or_increment(product("a", 500)).unwrap();
        let ana = CartController::new(&store, ShopperSession::for_user(Username::new("ana")));
        assert!(ana.items().unwrap().is_empty());
        ana.add_or_increment(product("b", 500)).unwrap();
        assert_eq!(guest_cart(&store).items().unwrap()[0].id.as_str(), "a");
    }
}
