//! Ad-hoc pricing of arbitrary quantities against a product's listed price.
//!
//! A product priced at 60 for 1 L costs 30 for 500 ml: the entered quantity is
//! converted into the product's unit and multiplied by the price per unit.
//! Anything that cannot be priced yields `None` rather than an error, so a
//! caller can show a "no price" hint while the user is still typing.

use super::units::{convert, convertible_units};
use crate::entities::{Unit, product};

/// Price of `quantity` of `unit` of a product.
///
/// Returns `None` when the quantity is not a finite positive number, when the
/// product's own quantity is not positive, or when `unit` cannot be used for the
/// product (a piece product only accepts pieces, others never accept pieces).
#[must_use]
pub fn calculate_price(product: &product::Model, quantity: f64, unit: Unit) -> Option<f64> {
    if !quantity.is_finite() || quantity <= 0.0 || product.quantity <= 0.0 {
        return None;
    }
    if !convertible_units(product.unit).contains(&unit) {
        return None;
    }

    let converted = convert(quantity, unit, product.unit);
    let price_per_unit = product.price / product.quantity;
    Some(converted * price_per_unit)
}

/// Parses a typed quantity and prices it with [`calculate_price`]
#[must_use]
pub fn calculate_price_from_input(
    product: &product::Model,
    input: &str,
    unit: Unit,
) -> Option<f64> {
    let quantity = input.trim().parse::<f64>().ok()?;
    calculate_price(product, quantity, unit)
}
