//! Cart line items and cookie customizations.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use brunela_core::{
    CreamType, DoughColor, FillingType, GlutenType, Price, ProductId, Quantity, Shape, Topping,
};

/// One priced, quantified entry in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Unique within a cart.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image path relative to the site root.
    #[serde(default)]
    pub image: String,
    /// Unit price.
    pub price: Price,
    #[serde(default)]
    pub quantity: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Options a personalized cookie was made with, kept for the order summary.
    ///
    /// Decoded leniently: an option this crate does not know falls back to
    /// its default instead of failing the whole line.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_customization"
    )]
    pub customization: Option<CustomizationSelection>,
}

fn lenient_customization<'de, D>(deserializer: D) -> Result<Option<CustomizationSelection>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawCustomization>::deserialize(deserializer)?.map(RawCustomization::into_selection))
}

impl LineItem {
    /// Name every personalized cookie is listed under.
    pub const PERSONALIZED_NAME: &'static str = "Galleta Personalizada";
    /// Category tag for personalized cookies.
    pub const PERSONALIZED_CATEGORY: &'static str = "personalizada";
    /// Image shown for personalized cookies.
    pub const PERSONALIZED_IMAGE: &'static str = "img/sabor1.png";

    /// A single unit of a plain product.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Price, image: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            image: image.into(),
            price,
            quantity: Quantity::ONE,
            category: None,
            customization: None,
        }
    }

    /// A personalized cookie priced at `price`, with a fresh unique id.
    #[must_use]
    pub fn personalized(selection: CustomizationSelection, price: Price) -> Self {
        let id = ProductId::new(format!("personalized-{}", uuid::Uuid::new_v4().simple()));
        Self {
            id,
            name: Self::PERSONALIZED_NAME.to_owned(),
            description: Some(selection.describe()),
            image: Self::PERSONALIZED_IMAGE.to_owned(),
            price,
            quantity: Quantity::ONE,
            category: Some(Self::PERSONALIZED_CATEGORY.to_owned()),
            customization: Some(selection),
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity.get()
    }
}

/// The options a shopper picked for a made-to-order cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomizationSelection {
    pub shape: Shape,
    pub dough_color: DoughColor,
    pub main_flavor: String,
    pub cream_type: CreamType,
    pub filling_type: FillingType,
    pub toppings: BTreeSet<Topping>,
    /// How many topping pieces; cost scales per started block of ten.
    pub toppings_quantity: u32,
    pub gluten_type: GlutenType,
}

impl CustomizationSelection {
    /// Slider position the form starts at.
    pub const DEFAULT_TOPPINGS_QUANTITY: u32 = 10;
    /// Flavor the form starts at.
    pub const DEFAULT_MAIN_FLAVOR: &'static str = "vanilla";

    /// Order description, e.g. `Galleta heart de vanilla con nuts, crema de caramel`.
    #[must_use]
    pub fn describe(&self) -> String {
        let toppings = if self.toppings.is_empty() {
            "sin toppings".to_owned()
        } else {
            self.toppings
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut text = format!("Galleta {} de {} con {toppings}", self.shape, self.main_flavor);
        if self.cream_type != CreamType::None {
            text.push_str(&format!(", crema de {}", self.cream_type));
        }
        if self.filling_type != FillingType::None {
            text.push_str(&format!(", relleno de {}", self.filling_type));
        }
        if self.gluten_type == GlutenType::GlutenFree {
            text.push_str(", sin gluten");
        }
        text
    }
}

impl Default for CustomizationSelection {
    fn default() -> Self {
        Self {
            shape: Shape::default(),
            dough_color: DoughColor::default(),
            main_flavor: Self::DEFAULT_MAIN_FLAVOR.to_owned(),
            cream_type: CreamType::default(),
            filling_type: FillingType::default(),
            toppings: BTreeSet::new(),
            toppings_quantity: Self::DEFAULT_TOPPINGS_QUANTITY,
            gluten_type: GlutenType::default(),
        }
    }
}

/// Snapshot of the last personalized cookie, stored under `customCookieOrder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCookieOrder {
    #[serde(flatten)]
    pub selection: CustomizationSelection,
    pub timestamp: DateTime<Utc>,
}

/// An untyped customization as the form writes it.
///
/// Pages other than this crate may store option names this crate does not
/// know. Converting with [`RawCustomization::into_selection`] keeps every
/// recognised option and drops the rest to their zero-cost defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCustomization {
    pub shape: Option<String>,
    pub dough_color: Option<String>,
    pub main_flavor: Option<String>,
    pub cream_type: Option<String>,
    pub filling_type: Option<String>,
    pub toppings: Vec<String>,
    pub toppings_quantity: Option<u32>,
    pub gluten_type: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl RawCustomization {
    /// Convert leniently, logging every unrecognised option.
    #[must_use]
    pub fn into_selection(self) -> CustomizationSelection {
        fn pick<T: std::str::FromStr + Default>(raw: Option<&str>) -> T
        where
            T::Err: std::fmt::Display,
        {
            raw.map_or_else(T::default, |value| {
                value.parse().unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "unrecognised customization option, using default");
                    T::default()
                })
            })
        }

        let toppings = self
            .toppings
            .iter()
            .filter_map(|name| match name.parse::<Topping>() {
                Ok(topping) => Some(topping),
                Err(e) => {
                    tracing::warn!(error = %e, "dropping unrecognised topping");
                    None
                }
            })
            .collect();

        let dough_color = self.dough_color.as_deref().map_or_else(DoughColor::default, |raw| {
            DoughColor::parse(raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "invalid dough color, using default");
                DoughColor::default()
            })
        });

        CustomizationSelection {
            shape: pick(self.shape.as_deref()),
            dough_color,
            main_flavor: self
                .main_flavor
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| CustomizationSelection::DEFAULT_MAIN_FLAVOR.to_owned()),
            cream_type: pick(self.cream_type.as_deref()),
            filling_type: pick(self.filling_type.as_deref()),
            toppings,
            toppings_quantity: self
                .toppings_quantity
                .unwrap_or(CustomizationSelection::DEFAULT_TOPPINGS_QUANTITY),
            gluten_type: pick(self.gluten_type.as_deref()),
        }
    }
}
