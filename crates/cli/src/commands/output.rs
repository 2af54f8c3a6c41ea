//! Terminal rendering.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fmt::Write as _;

use serde::Serialize;

use brunela_storefront::AppError;
use brunela_storefront::models::{LineItem, Product};
use brunela_storefront::services::cart::{CartSummary, CartUpdate};

/// Where and how results are printed.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub const fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print a plain line.
    pub fn line(self, text: &str) {
        println!("{text}");
    }

    /// Print `value` as JSON, or as text produced by `render`.
    pub fn show<T: Serialize>(self, value: &T, render: impl FnOnce(&T) -> String) {
        if self.json {
            match serde_json::to_string_pretty(value) {
                Ok(json) => {
                    println!("{json}");
                    return;
                }
                Err(e) => tracing::warn!(error = %e, "falling back to text output"),
            }
        }
        println!("{}", render(value));
    }
}

/// Print the shopper-facing message for a failed command.
pub fn failure(error: &AppError) {
    eprintln!("{}", error.user_message());
}

pub fn product_row(product: &Product) -> String {
    format!("{:<16} {:<28} {:>9}", product.id, product.name, product.price)
}

pub fn product_detail(product: &Product) -> String {
    let mut text = format!(
        "{}\n{}\n\n{}\n\nPrecio: {}\n",
        product.name, product.caption, product.description, product.price
    );
    if !product.tags.is_empty() {
        let _ = writeln!(text, "Etiquetas: {}", product.tags.join(" · "));
    }
    let _ = write!(text, "Imagen: {}", product.image);
    text
}

pub fn summary(summary: &CartSummary, items: &[LineItem]) -> String {
    if summary.is_empty() {
        return format!("Tu carrito está vacío\n[{}]", summary.checkout.label);
    }

    let mut text = String::new();
    for (line, item) in summary.lines.iter().zip(items) {
        let _ = writeln!(
            text,
            "{:<40} {:>9} x {:>2} = {:>10}",
            line.name, line.unit_price, line.quantity, line.line_total
        );
        if let Some(description) = &item.description {
            let _ = writeln!(text, "    {description}");
        }
    }
    let _ = writeln!(text, "\nSubtotal: {}", summary.subtotal);
    let _ = writeln!(text, "Envío:    {}", summary.shipping_label());
    let _ = writeln!(text, "Total:    {}", summary.total);
    let _ = write!(
        text,
        "Productos: {}\n[{}]",
        summary.item_count, summary.checkout.label
    );
    text
}

pub fn update(update: &CartUpdate) -> String {
    let mut text = update.outcome.to_string();
    if let Some(item) = &update.item {
        let _ = write!(text, "\n{}: {} = {}", item.id, item.quantity, item.line_total);
    }
    let _ = write!(
        text,
        "\nTotal: {} ({} productos)",
        update.summary.total, update.item_count
    );
    text
}
