//! Personalized cookie pricing.
//!
//! `total = base + toppings + cream + filling + gluten surcharge`, where the
//! topping cost is the sum of the selected toppings' unit prices times the
//! number of started blocks of ten pieces.

use serde::Serialize;

use brunela_core::{CreamType, FillingType, GlutenType, Price, Topping};

use crate::models::CustomizationSelection;

/// Price of a plain cookie before options.
pub const BASE_PRICE: u32 = 3000;

/// Topping pieces covered by one unit price.
pub const TOPPING_BLOCK: u32 = 10;

/// Surcharge for a gluten-free dough.
pub const GLUTEN_FREE_SURCHARGE: u32 = 1000;

/// Unit price of one topping block.
#[must_use]
pub const fn topping_price(topping: Topping) -> u32 {
    match topping {
        Topping::ChocolateChips => 500,
        Topping::Nuts => 800,
        Topping::Sprinkles => 300,
        Topping::Coconut => 400,
    }
}

#[must_use]
pub const fn cream_price(cream: CreamType) -> u32 {
    match cream {
        CreamType::None => 0,
        CreamType::Vanilla => 600,
        CreamType::Chocolate => 700,
        CreamType::Strawberry => 650,
        CreamType::Caramel => 800,
    }
}

#[must_use]
pub const fn filling_price(filling: FillingType) -> u32 {
    match filling {
        FillingType::None => 0,
        FillingType::Chocolate => 1000,
        FillingType::Jam => 800,
        FillingType::Cream => 900,
        FillingType::Nutella => 1200,
    }
}

#[must_use]
pub const fn gluten_surcharge(gluten: GlutenType) -> u32 {
    match gluten {
        GlutenType::WithGluten => 0,
        GlutenType::GlutenFree => GLUTEN_FREE_SURCHARGE,
    }
}

/// Itemised price of a personalized cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base: Price,
    pub toppings: Price,
    pub cream: Price,
    pub filling: Price,
    pub gluten: Price,
    pub total: Price,
}

/// Price `selection`.
///
/// Pure: the same selection always yields the same breakdown.
#[must_use]
pub fn price(selection: &CustomizationSelection) -> PriceBreakdown {
    let blocks = selection.toppings_quantity.div_ceil(TOPPING_BLOCK);
    let per_block: u32 = selection.toppings.iter().map(|t| topping_price(*t)).sum();

    let base = Price::from(BASE_PRICE);
    let toppings = Price::from(per_block) * blocks;
    let cream = Price::from(cream_price(selection.cream_type));
    let filling = Price::from(filling_price(selection.filling_type));
    let gluten = Price::from(gluten_surcharge(selection.gluten_type));

    PriceBreakdown {
        base,
        toppings,
        cream,
        filling,
        gluten,
        total: base + toppings + cream + filling + gluten,
    }
}
