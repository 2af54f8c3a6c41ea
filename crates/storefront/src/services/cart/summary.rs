//! Cart totals and checkout affordance.

use serde::Serialize;

use brunela_core::{Price, ProductId, Quantity};

use crate::models::LineItem;

/// Label shown on the checkout button of an empty cart.
pub const EMPTY_CHECKOUT_LABEL: &str = "Carrito Vacío";
/// Label shown on the checkout button when there is something to buy.
pub const CHECKOUT_LABEL: &str = "Proceder al Pago";
/// How zero shipping is displayed.
pub const FREE_SHIPPING_LABEL: &str = "Gratis";

/// Free-shipping threshold and flat fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    /// Subtotals at or above this ship free.
    pub free_threshold: Price,
    /// Charged below the threshold.
    pub flat_fee: Price,
}

impl ShippingPolicy {
    /// Shipping cost for `subtotal`.
    #[must_use]
    pub fn shipping_for(&self, subtotal: Price) -> Price {
        if subtotal >= self.free_threshold {
            Price::ZERO
        } else {
            self.flat_fee
        }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_threshold: Price::from_pesos(50_000),
            flat_fee: Price::from_pesos(5_000),
        }
    }
}

/// The two states of the cart view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CartState {
    Empty,
    Populated,
}

/// Whether checkout can start and what the button says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutAffordance {
    pub enabled: bool,
    pub label: &'static str,
}

/// Per-item row of the order summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryLine {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: Quantity,
    pub line_total: Price,
}

/// Aggregate view of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub lines: Vec<SummaryLine>,
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
    /// Sum of quantities, shown on the cart badge.
    pub item_count: u32,
    pub state: CartState,
    pub checkout: CheckoutAffordance,
}

impl CartSummary {
    /// `Gratis` for free shipping, otherwise the formatted fee.
    #[must_use]
    pub fn shipping_label(&self) -> String {
        if self.shipping.is_zero() {
            FREE_SHIPPING_LABEL.to_owned()
        } else {
            self.shipping.display()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state == CartState::Empty
    }
}

/// Summarize `items` under the default shipping policy.
#[must_use]
pub fn summarize(items: &[LineItem]) -> CartSummary {
    summarize_with(items, &ShippingPolicy::default())
}

/// Summarize `items` under `policy`.
#[must_use]
pub fn summarize_with(items: &[LineItem], policy: &ShippingPolicy) -> CartSummary {
    let lines: Vec<SummaryLine> = items
        .iter()
        .map(|item| SummaryLine {
            id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            quantity: item.quantity,
            line_total: item.line_total(),
        })
        .collect();

    let subtotal: Price = lines.iter().map(|line| line.line_total).sum();
    let shipping = policy.shipping_for(subtotal);
    let item_count = item_count(items);

    let (state, checkout) = if items.is_empty() {
        (
            CartState::Empty,
            CheckoutAffordance {
                enabled: false,
                label: EMPTY_CHECKOUT_LABEL,
            },
        )
    } else {
        (
            CartState::Populated,
            CheckoutAffordance {
                enabled: true,
                label: CHECKOUT_LABEL,
            },
        )
    };

    CartSummary {
        lines,
        subtotal,
        shipping,
        total: subtotal + shipping,
        item_count,
        state,
        checkout,
    }
}

/// Sum of quantities across `items`, saturating at `u32::MAX`.
#[must_use]
pub fn item_count(items: &[LineItem]) -> u32 {
    items
        .iter()
        .fold(0u32, |count, item| count.saturating_add(item.quantity.get()))
}
