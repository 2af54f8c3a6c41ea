//! End-to-end cart behaviour for the active shopper.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::HashSet;

use brunela_core::{Price, ProductId, Quantity, Topping};
use brunela_integration_tests::{item, memory_storefront};
use brunela_storefront::models::{CustomizationSelection, ShopperSession, session::keys};
use brunela_storefront::services::cart::{
    CartOutcome, CartState, CartUpdate, RejectReason, summary,
};
use brunela_storefront::storage::KeyValueStore;

fn pesos(n: u64) -> Price {
    Price::from_pesos(n)
}

fn quantity_of(update: &CartUpdate) -> Option<u32> {
    update.item.as_ref().map(|line| line.quantity.get())
}

// ============================================================================
// Worked scenarios
// ============================================================================

#[test]
fn test_two_products_summary() {
    let shop = memory_storefront();
    let cart = shop.cart().unwrap();

    cart.add_or_increment(item("a", 1000)).unwrap();
    cart.add_or_increment(item("a", 1000)).unwrap();
    let update = cart.add_or_increment(item("b", 2000)).unwrap();

    assert_eq!(update.summary.subtotal, pesos(4000));
    assert_eq!(update.summary.shipping, pesos(5000));
    assert_eq!(update.summary.total, pesos(9000));
    assert_eq!(update.item_count, 3);
    assert_eq!(update.summary.state, CartState::Populated);
}

#[test]
fn test_adding_same_product_twice_merges() {
    let shop = memory_storefront();
    let cart = shop.cart().unwrap();

    cart.add_or_increment(item("a", 500)).unwrap();
    cart.add_or_increment(item("a", 500)).unwrap();

    let items = cart.items().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, ProductId::new("a"));
    assert_eq!(items[0].price, pesos(500));
    assert_eq!(items[0].quantity.get(), 2);
}

// ============================================================================
// Quantity rules
// ============================================================================

#[test]
fn test_ids_stay_unique_across_adds() {
    let shop = memory_storefront();
    let cart = shop.cart().unwrap();

    for id in ["a", "b", "a", "c", "b", "a", "c", "c"] {
        cart.add_or_increment(item(id, 1000)).unwrap();
    }

    let items = cart.items().unwrap();
    let ids: HashSet<_> = items.iter().map(|i| i.id.clone()).collect();
    assert_eq!(ids.len(), items.len());
    assert_eq!(cart.item_count().unwrap(), 8);
}

#[test]
fn test_decrement_never_drops_below_one() {
    let shop = memory_storefront();
    let cart = shop.cart().unwrap();
    let id = ProductId::new("a");

    cart.add_or_increment(item("a", 1000)).unwrap();
    cart.increment(&id).unwrap();

    let update = cart.decrement(&id).unwrap();
    assert!(update.outcome.is_applied());
    assert_eq!(quantity_of(&update), Some(1));

    let update = cart.decrement(&id).unwrap();
    assert_eq!(
        update.outcome,
        CartOutcome::Rejected {
            reason: RejectReason::AtMinimum
        }
    );
    assert_eq!(quantity_of(&update), Some(1));
    assert_eq!(cart.items().unwrap().len(), 1);
}

#[test]
fn test_set_quantity_outside_range_leaves_cart_unchanged() {
    let shop = memory_storefront();
    let cart = shop.cart().unwrap();
    let id = ProductId::new("a");

    cart.add_or_increment(item("a", 1000)).unwrap();
    cart.set_quantity(&id, 4).unwrap();
    let before = cart.items().unwrap();

    for n in [0, -1, 100, 1_000, i64::MIN] {
        let update = cart.set_quantity(&id, n).unwrap();
        assert!(!update.outcome.is_applied(), "{n} should be rejected");
        // The returned state is the persisted one, for resynchronising views.
        assert_eq!(quantity_of(&update), Some(4));
        assert_eq!(cart.items().unwrap(), before);
    }

    for n in [1, 50, 99] {
        let update = cart.set_quantity(&id, n).unwrap();
        assert!(update.outcome.is_applied());
        assert_eq!(quantity_of(&update).map(i64::from), Some(n));
    }
}

#[test]
fn test_increment_stops_at_maximum() {
    let shop = memory_storefront();
    let cart = shop.cart().unwrap();
    let id = ProductId::new("a");

    cart.add_or_increment(item("a", 100)).unwrap();
    cart.set_quantity(&id, i64::from(Quantity::MAX)).unwrap();

    let update = cart.increment(&id).unwrap();
    assert_eq!(
        update.outcome,
        CartOutcome::Rejected {
            reason: RejectReason::AtMaximum
        }
    );
    let update = cart.add_or_increment(item("a", 100)).unwrap();
    assert!(!update.outcome.is_applied());
    assert_eq!(quantity_of(&update), Some(Quantity::MAX));
}

#[test]
fn test_unknown_id_is_reported_not_applied() {
    let shop = memory_storefront();
    let cart = shop.cart().unwrap();
    cart.add_or_increment(item("a", 1000)).unwrap();

    let missing = ProductId::new("missing");
    for update in [
        cart.increment(&missing).unwrap(),
        cart.decrement(&missing).unwrap(),
        cart.set_quantity(&missing, 3).unwrap(),
        cart.remove(&missing).unwrap(),
    ] {
        assert_eq!(
            update.outcome,
            CartOutcome::Rejected {
                reason: RejectReason::NotInCart {
                    id: missing.clone()
                }
            }
        );
        assert_eq!(update.item_count, 1);
    }
}

// ============================================================================
// Summary
// ============================================================================

#[test]
fn test_free_shipping_threshold() {
    let at = summary::summarize(&[item("a", 50_000)]);
    assert_eq!(at.shipping, Price::ZERO);
    assert_eq!(at.shipping_label(), "Gratis");
    assert_eq!(at.total, pesos(50_000));

    let below = summary::summarize(&[item("a", 49_999)]);
    assert_eq!(below.shipping, pesos(5000));
    assert_eq!(below.total, pesos(54_999));
}

#[test]
fn test_removing_last_item_empties_cart() {
    let shop = memory_storefront();
    let cart = shop.cart().unwrap();
    let id = ProductId::new("a");

    cart.add_or_increment(item("a", 1000)).unwrap();
    let update = cart.remove(&id).unwrap();

    assert!(update.item.is_none());
    assert_eq!(update.item_count, 0);
    assert_eq!(update.summary.state, CartState::Empty);
    assert!(!update.summary.checkout.enabled);
    assert_eq!(update.summary.checkout.label, "Carrito Vacío");
    assert!(cart.checkout().is_err());
}

#[test]
fn test_checkout_reports_payment_unavailable() {
    let shop = memory_storefront();
    let cart = shop.cart().unwrap();
    cart.add_or_increment(item("a", 1000)).unwrap();

    let status = cart.checkout().unwrap();
    assert!(!status.payment_available);
    assert!(status.summary.checkout.enabled);
    assert_eq!(status.summary.checkout.label, "Proceder al Pago");
    // Checkout does not consume the cart.
    assert_eq!(cart.item_count().unwrap(), 1);
}

// ============================================================================
// Catalog and personalized items
// ============================================================================

#[test]
fn test_catalog_products_go_into_cart() {
    let shop = memory_storefront();
    let cart = shop.cart().unwrap();

    let cookie = shop.catalog().get("sabor3").unwrap().to_line_item();
    cart.add_or_increment(cookie.clone()).unwrap();
    let update = cart.add_or_increment(cookie).unwrap();

    assert_eq!(update.summary.subtotal, pesos(6400));
    assert_eq!(update.summary.lines[0].line_total, pesos(6400));
}

#[test]
fn test_personalized_cookies_never_merge() {
    let shop = memory_storefront();
    let cart = shop.cart().unwrap();
    let selection = CustomizationSelection {
        toppings: [Topping::Nuts].into_iter().collect(),
        ..CustomizationSelection::default()
    };

    let (first, _) = cart.add_personalized(selection.clone()).unwrap();
    let (second, update) = cart.add_personalized(selection).unwrap();

    assert_ne!(first.id, second.id);
    assert!(first.id.as_str().starts_with("personalized-"));
    assert_eq!(first.price, pesos(3800));
    assert_eq!(update.item_count, 2);
    assert_eq!(cart.items().unwrap().len(), 2);

    let snapshot = shop.store().get_item(keys::CUSTOM_COOKIE_ORDER).unwrap();
    assert!(snapshot.is_some());
}

// ============================================================================
// Persisted state
// ============================================================================

#[test]
fn test_malformed_cart_reads_as_empty() {
    let shop = memory_storefront();
    let guest = ShopperSession::guest();
    shop.store()
        .set_item(&guest.cart_key(), "{not json")
        .unwrap();

    let cart = shop.cart().unwrap();
    assert!(cart.items().unwrap().is_empty());
    assert_eq!(cart.summary().unwrap().state, CartState::Empty);

    // The next write replaces the malformed value.
    cart.add_or_increment(item("a", 1000)).unwrap();
    assert_eq!(cart.items().unwrap().len(), 1);
}

#[test]
fn test_cart_is_stored_as_json_array() {
    let shop = memory_storefront();
    shop.cart()
        .unwrap()
        .add_or_increment(item("a", 1500))
        .unwrap();

    let raw = shop.store().get_item("cart_guest").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["id"], "a");
    assert_eq!(value[0]["quantity"], 1);
    assert_eq!(value[0]["price"], 1500);
    assert!(raw.contains(r#""price":1500,"#));
}

#[test]
fn test_unknown_option_on_one_line_keeps_the_rest() {
    let shop = memory_storefront();
    shop.store()
        .set_item(
            "cart_guest",
            r#"[{"id":"sabor1","name":"Sabor 1","price":2500,"quantity":3},
                {"id":"personalized-1","name":"Galleta Personalizada","price":4300,
                 "quantity":1,"customization":{"shape":"square","creamType":"vanilla"}}]"#,
        )
        .unwrap();

    let cart = shop.cart().unwrap();
    assert_eq!(cart.items().unwrap().len(), 2);

    cart.add_or_increment(item("sabor2", 1800)).unwrap();
    let items = cart.items().unwrap();
    let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["sabor1", "personalized-1", "sabor2"]);
    assert_eq!(items[0].quantity.get(), 3);
}

#[test]
fn test_out_of_range_stored_quantity_does_not_panic() {
    let shop = memory_storefront();
    shop.store()
        .set_item(
            "cart_guest",
            r#"[{"id":"a","name":"A","price":1000,"quantity":4294967295},
                {"id":"b","name":"B","price":1000,"quantity":5}]"#,
        )
        .unwrap();

    let summary = shop.cart().unwrap().summary().unwrap();
    assert_eq!(summary.item_count, 5);
    assert_eq!(summary.subtotal, pesos(5000));
    assert_eq!(summary.lines.len(), 1);
}
