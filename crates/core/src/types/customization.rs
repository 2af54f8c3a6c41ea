//! Options for made-to-order ("personalizada") cookies.
//!
//! Every option serializes with the same kebab-case names the customization
//! form uses (`chocolate-chips`, `gluten-free`, ...).

use serde::{Deserialize, Serialize};

/// A string did not name a known option.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} option: {value}")]
pub struct UnknownOption {
    /// Which option family was being parsed (e.g. "cream").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

macro_rules! define_option {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant, in form order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The form value for this option.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(UnknownOption {
                        kind: $kind,
                        value: s.to_owned(),
                    }),
                }
            }
        }
    };
}

define_option! {
    /// Cookie outline.
    #[derive(Default)]
    Shape, "shape" {
        #[default]
        Circle => "circle",
        Heart => "heart",
        Star => "star",
    }
}

define_option! {
    /// Cream layer spread over the cookie.
    #[derive(Default)]
    CreamType, "cream" {
        #[default]
        None => "none",
        Vanilla => "vanilla",
        Chocolate => "chocolate",
        Strawberry => "strawberry",
        Caramel => "caramel",
    }
}

define_option! {
    /// Filling in the cookie's centre.
    #[derive(Default)]
    FillingType, "filling" {
        #[default]
        None => "none",
        Chocolate => "chocolate",
        Jam => "jam",
        Cream => "cream",
        Nutella => "nutella",
    }
}

define_option! {
    /// A topping that can be scattered over the cookie.
    Topping, "topping" {
        ChocolateChips => "chocolate-chips",
        Nuts => "nuts",
        Sprinkles => "sprinkles",
        Coconut => "coconut",
    }
}

define_option! {
    /// Whether the dough contains gluten.
    #[derive(Default)]
    GlutenType, "gluten" {
        #[default]
        WithGluten => "with-gluten",
        GlutenFree => "gluten-free",
    }
}

/// A dough colour in `#RRGGBB` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoughColor(String);

impl DoughColor {
    /// The form's default golden dough.
    pub const DEFAULT: &'static str = "#D4AF37";

    /// Parse a `#RRGGBB` colour.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownOption`] if the input is not a `#` followed by six
    /// hex digits.
    pub fn parse(s: &str) -> Result<Self, UnknownOption> {
        let valid = s.len() == 7
            && s.starts_with('#')
            && s.chars().skip(1).all(|c| c.is_ascii_hexdigit());
        if valid {
            Ok(Self(s.to_ascii_uppercase()))
        } else {
            Err(UnknownOption {
                kind: "dough color",
                value: s.to_owned(),
            })
        }
    }

    /// The colour as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DoughColor {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl core::fmt::Display for DoughColor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
