//! Measurement units shared by products and order line items.
//!
//! Stored as text so a row reads the same as the label shown to the user.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit a product is sold in
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Unit {
    /// Millilitre, base volume unit
    #[sea_orm(string_value = "ml")]
    #[serde(rename = "ml")]
    Millilitre,
    /// Litre, 1000 ml
    #[sea_orm(string_value = "L")]
    #[serde(rename = "L")]
    Litre,
    /// Gram, base weight unit
    #[sea_orm(string_value = "gm")]
    #[serde(rename = "gm")]
    Gram,
    /// Kilogram, 1000 gm
    #[sea_orm(string_value = "kg")]
    #[serde(rename = "kg")]
    Kilogram,
    /// Counted item, not convertible to volume or weight
    #[sea_orm(string_value = "piece")]
    #[serde(rename = "piece")]
    Piece,
}

impl Unit {
    /// Every unit, in the order they are offered for selection
    pub const ALL: [Self; 5] = [
        Self::Millilitre,
        Self::Litre,
        Self::Gram,
        Self::Kilogram,
        Self::Piece,
    ];

    /// Short name as stored and displayed
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Millilitre => "ml",
            Self::Litre => "L",
            Self::Gram => "gm",
            Self::Kilogram => "kg",
            Self::Piece => "piece",
        }
    }

    /// Parses a stored or user-entered unit name
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.as_str() == s.trim())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
