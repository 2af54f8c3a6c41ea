//! Cart commands.
//!
//! All commands act on the active shopper's cart: the logged-in user, or
//! `guest`.
//!
//! # Usage
//!
//! ```bash
//! brunela cart add sabor1
//! brunela cart inc sabor1
//! brunela cart set sabor1 12
//! brunela cart remove sabor1
//! brunela cart checkout
//! ```

use clap::Subcommand;
use serde::Serialize;

use brunela_core::ProductId;
use brunela_storefront::models::LineItem;
use brunela_storefront::services::cart::{CartSummary, CartUpdate};
use brunela_storefront::storage::KeyValueStore;
use brunela_storefront::{AppError, Storefront};

use super::output::{self, Output};

#[derive(Subcommand)]
pub enum CartAction {
    /// Show items, totals and checkout state
    Show,
    /// Add one unit of a catalog product
    Add {
        /// Catalog product id
        id: String,
    },
    /// Increase a line's quantity by one
    Inc { id: String },
    /// Decrease a line's quantity by one (never below 1)
    Dec { id: String },
    /// Set a line's quantity (1-99)
    Set {
        id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove { id: String },
    /// Remove every line
    Clear,
    /// Proceed to payment
    Checkout,
}

#[derive(Serialize)]
struct CartView<'a> {
    items: &'a [LineItem],
    summary: &'a CartSummary,
}

pub fn run<S: KeyValueStore>(
    shop: &Storefront<S>,
    action: CartAction,
    out: Output,
) -> Result<(), AppError> {
    let cart = shop.cart()?;
    tracing::debug!(user = %cart.session().user, "active cart");

    let update = match action {
        CartAction::Show => {
            let items = cart.items()?;
            let summary = cart.summary()?;
            out.show(
                &CartView {
                    items: &items,
                    summary: &summary,
                },
                |view| output::summary(view.summary, view.items),
            );
            return Ok(());
        }
        CartAction::Checkout => {
            let status = cart.checkout()?;
            out.show(&status, |s| format!("Total: {}\n{}", s.summary.total, s.message));
            return Ok(());
        }
        CartAction::Add { id } => {
            let item = shop.catalog().get(&id)?.to_line_item();
            cart.add_or_increment(item)?
        }
        CartAction::Inc { id } => cart.increment(&ProductId::new(id))?,
        CartAction::Dec { id } => cart.decrement(&ProductId::new(id))?,
        CartAction::Set { id, quantity } => cart.set_quantity(&ProductId::new(id), quantity)?,
        CartAction::Remove { id } => cart.remove(&ProductId::new(id))?,
        CartAction::Clear => cart.clear()?,
    };

    print_update(&update, out);
    Ok(())
}

fn print_update(update: &CartUpdate, out: Output) {
    out.show(update, output::update);
}
