//! Unit conversion between volume and weight units.
//!
//! Dairy liquids and solids are treated as 1 g/ml, so `ml` and `gm` share the same
//! base and `L`/`kg` are both 1000 of it. `piece` is a count and never converts:
//! asking for a conversion involving it returns the value unchanged.

use crate::entities::Unit;

/// Factor from a unit to its base unit (ml or gm), `None` for `piece`
#[must_use]
pub const fn base_factor(unit: Unit) -> Option<f64> {
    match unit {
        Unit::Millilitre | Unit::Gram => Some(1.0),
        Unit::Litre | Unit::Kilogram => Some(1000.0),
        Unit::Piece => None,
    }
}

/// Converts `value` from one unit to another.
///
/// Identical units return `value` exactly. A conversion that involves `piece`
/// on only one side has no meaning and also returns `value` unchanged.
#[must_use]
pub fn convert(value: f64, from: Unit, to: Unit) -> f64 {
    if from == to {
        return value;
    }

    match (base_factor(from), base_factor(to)) {
        (Some(from_factor), Some(to_factor)) => value * from_factor / to_factor,
        _ => value,
    }
}

/// Units a quantity may be entered in when pricing a product sold in `product_unit`
#[must_use]
pub fn convertible_units(product_unit: Unit) -> Vec<Unit> {
    if product_unit == Unit::Piece {
        return vec![Unit::Piece];
    }
    Unit::ALL
        .into_iter()
        .filter(|u| *u != Unit::Piece)
        .collect()
}

/// Label used in the daily product summary: `pcs` for pieces, nothing for ml,
/// the unit name otherwise
#[must_use]
pub const fn summary_label(unit: Unit) -> &'static str {
    match unit {
        Unit::Piece => "pcs",
        Unit::Millilitre => "",
        other => other.as_str(),
    }
}

/// A ready-made quantity offered for quick selection
#[derive(Debug, Clone, PartialEq)]
pub struct PresetQuantity {
    /// Text shown to the user, e.g. "250 ml" or "2 pieces"
    pub label: String,
    /// Amount of `unit`
    pub quantity: f64,
    /// Unit of the amount
    pub unit: Unit,
}

impl PresetQuantity {
    fn new(quantity: f64, unit: Unit) -> Self {
        let label = match unit {
            Unit::Piece if (quantity - 1.0).abs() < f64::EPSILON => "1 piece".to_string(),
            Unit::Piece => format!("{quantity} pieces"),
            other => format!("{quantity} {other}"),
        };
        Self {
            label,
            quantity,
            unit,
        }
    }
}

/// Preset quantities for products sold in `product_unit`
#[must_use]
pub fn preset_quantities(product_unit: Unit) -> Vec<PresetQuantity> {
    let (small, large) = match product_unit {
        Unit::Millilitre | Unit::Litre => (Unit::Millilitre, Unit::Litre),
        Unit::Gram | Unit::Kilogram => (Unit::Gram, Unit::Kilogram),
        Unit::Piece => {
            return [1.0, 2.0, 5.0, 10.0]
                .into_iter()
                .map(|q| PresetQuantity::new(q, Unit::Piece))
                .collect();
        }
    };

    [100.0, 200.0, 250.0, 500.0]
        .into_iter()
        .map(|q| PresetQuantity::new(q, small))
        .chain(
            [1.0, 1.5, 2.0]
                .into_iter()
                .map(|q| PresetQuantity::new(q, large)),
        )
        .collect()
}
