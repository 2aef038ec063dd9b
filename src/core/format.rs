//! Text formatting for amounts and order items shown in statements.

use crate::entities::OrderItem;

/// Formats an amount with two decimals behind a currency symbol.
///
/// Negative amounts keep the sign in front: `-₹20.00`. Anything that rounds
/// to zero cents prints as `₹0.00`.
#[must_use]
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let cents = (amount * 100.0).round();
    if cents < 0.0 {
        format!("-{symbol}{:.2}", -cents / 100.0)
    } else {
        format!("{symbol}{:.2}", cents.abs() / 100.0)
    }
}

/// One-line description of an order's items, e.g. `Milk x 2, Curd x 0.5`
#[must_use]
pub fn describe_items(items: &[OrderItem]) -> String {
    items
        .iter()
        .map(|item| format!("{} x {}", item.product_name, item.quantity))
        .collect::<Vec<_>>()
        .join(", ")
}
