//! WhatsApp enquiry links.

use url::Url;

use brunela_core::Price;

use crate::models::{Product, ProductKind};

/// Number enquiries go to when none is configured.
pub const DEFAULT_NUMBER: &str = "573001234567";

/// Enquiry text for a cookie.
#[must_use]
pub fn enquiry_message(name: &str, price: Price) -> String {
    format!("¡Hola! Me interesa la galleta \"{name}\" por {price}. ¿Podrías darme más información?")
}

/// Enquiry text for a merch product.
#[must_use]
pub fn merch_message(title: &str, price: Price) -> String {
    format!("¡Hola! Me interesa el producto: {title} - {price}")
}

/// Enquiry text appropriate for `product`.
#[must_use]
pub fn product_message(product: &Product) -> String {
    match product.kind {
        ProductKind::Cookie => enquiry_message(&product.name, product.price),
        ProductKind::Merch => merch_message(&product.name, product.price),
    }
}

/// Deep link that opens a chat with `number` prefilled with `message`.
///
/// # Errors
///
/// Returns `url::ParseError` if `number` cannot form a valid URL path.
pub fn link(number: &str, message: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!(
        "https://wa.me/{number}?text={}",
        urlencoding::encode(message)
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_message() {
        let message = enquiry_message("JS Cinnamon Roll", Price::from_pesos(1800));
        assert_eq!(
            message,
            "¡Hola! Me interesa la galleta \"JS Cinnamon Roll\" por $1.800. ¿Podrías darme más información?"
        );
    }

    #[test]
    fn test_merch_message() {
        assert_eq!(
            merch_message("BOLSO BRUNELA", Price::from_pesos(25_000)),
            "¡Hola! Me interesa el producto: BOLSO BRUNELA - $25.000"
        );
    }

    #[test]
    fn test_link_is_percent_encoded() {
        let url = link(DEFAULT_NUMBER, "¡Hola! 100% \"galleta\"").unwrap();
        assert_eq!(url.host_str(), Some("wa.me"));
        assert_eq!(url.path(), "/573001234567");
        let query = url.query().unwrap();
        assert!(query.starts_with("text=%C2%A1Hola%21%20100%25%20%22galleta%22"));

        let (_, text) = url.query_pairs().next().unwrap();
        assert_eq!(text, "¡Hola! 100% \"galleta\"");
    }
}
