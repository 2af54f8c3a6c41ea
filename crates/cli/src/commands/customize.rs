//! Personalized cookie command.
//!
//! Prints the price breakdown for a selection and records it as the last
//! personalized order. With `--add` the cookie also goes in the active cart.
//!
//! # Usage
//!
//! ```bash
//! brunela customize --shape heart --flavor chocolate --cream caramel \
//!     --topping nuts --topping sprinkles --toppings-quantity 15 --gluten-free --add
//! ```

use std::collections::BTreeSet;
use std::fmt::Write as _;

use clap::Args;
use serde::Serialize;

use brunela_core::{CreamType, DoughColor, FillingType, GlutenType, Shape, Topping};
use brunela_storefront::models::CustomizationSelection;
use brunela_storefront::services::cart::CartUpdate;
use brunela_storefront::services::pricing::{self, PriceBreakdown};
use brunela_storefront::storage::KeyValueStore;
use brunela_storefront::{AppError, Storefront};

use super::output::{self, Output};

#[derive(Args)]
pub struct CustomizeArgs {
    /// Cookie outline (circle, heart, star)
    #[arg(long, default_value_t = Shape::default())]
    shape: Shape,

    /// Dough colour as #RRGGBB
    #[arg(long, default_value = DoughColor::DEFAULT)]
    color: String,

    /// Main flavor
    #[arg(long, default_value = CustomizationSelection::DEFAULT_MAIN_FLAVOR)]
    flavor: String,

    /// Cream (none, vanilla, chocolate, strawberry, caramel)
    #[arg(long, default_value_t = CreamType::default())]
    cream: CreamType,

    /// Filling (none, chocolate, jam, cream, nutella)
    #[arg(long, default_value_t = FillingType::default())]
    filling: FillingType,

    /// Topping; repeat for several (chocolate-chips, nuts, sprinkles, coconut)
    #[arg(long = "topping")]
    toppings: Vec<Topping>,

    /// Units of each topping; charged per started block of 10
    #[arg(long, default_value_t = CustomizationSelection::DEFAULT_TOPPINGS_QUANTITY)]
    toppings_quantity: u32,

    /// Gluten-free dough
    #[arg(long)]
    gluten_free: bool,

    /// Add the cookie to the active cart
    #[arg(long)]
    add: bool,
}

impl CustomizeArgs {
    fn into_selection(self) -> Result<CustomizationSelection, AppError> {
        let dough_color =
            DoughColor::parse(&self.color).map_err(|e| AppError::InvalidInput(e.to_string()))?;
        let main_flavor = self.flavor.trim();
        if main_flavor.is_empty() {
            return Err(AppError::InvalidInput("flavor must not be blank".to_owned()));
        }

        Ok(CustomizationSelection {
            shape: self.shape,
            dough_color,
            main_flavor: main_flavor.to_owned(),
            cream_type: self.cream,
            filling_type: self.filling,
            toppings: self.toppings.into_iter().collect::<BTreeSet<_>>(),
            toppings_quantity: self.toppings_quantity,
            gluten_type: if self.gluten_free {
                GlutenType::GlutenFree
            } else {
                GlutenType::WithGluten
            },
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Quote<'a> {
    description: String,
    selection: &'a CustomizationSelection,
    breakdown: PriceBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    cart: Option<CartUpdate>,
}

pub fn run<S: KeyValueStore>(
    shop: &Storefront<S>,
    args: CustomizeArgs,
    out: Output,
) -> Result<(), AppError> {
    let add = args.add;
    let selection = args.into_selection()?;
    let cart = shop.cart()?;

    let (breakdown, update) = if add {
        let (_, update) = cart.add_personalized(selection.clone())?;
        (pricing::price(&selection), Some(update))
    } else {
        (cart.quote_personalized(&selection)?, None)
    };

    let quote = Quote {
        description: selection.describe(),
        selection: &selection,
        breakdown,
        cart: update,
    };
    out.show(&quote, render);
    Ok(())
}

fn render(quote: &Quote<'_>) -> String {
    let b = &quote.breakdown;
    let mut text = format!("{}\n\n", quote.description);
    let _ = writeln!(text, "Base:      {:>9}", b.base);
    let _ = writeln!(text, "Toppings:  {:>9}", b.toppings);
    let _ = writeln!(text, "Crema:     {:>9}", b.cream);
    let _ = writeln!(text, "Relleno:   {:>9}", b.filling);
    let _ = writeln!(text, "Sin gluten:{:>9}", b.gluten);
    let _ = write!(text, "Total:     {:>9}", b.total);
    if let Some(update) = &quote.cart {
        let _ = write!(text, "\n\n{}", output::update(update));
    }
    text
}
