//! Product entity - Items the dairy sells, priced per a stated quantity.
//!
//! `price` buys `quantity` of `unit`, e.g. 60.0 for 1 L of milk or 25.0 for
//! 200 gm of curd. Each product belongs to one owning account.

use super::unit::Unit;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning account
    pub user_id: String,
    /// Name of the product (e.g., "Cow Milk", "Paneer")
    pub name: String,
    /// Price charged for `quantity` of `unit`
    pub price: f64,
    /// Amount of `unit` that `price` buys, always positive
    pub quantity: f64,
    /// Unit the product is sold in
    pub unit: Unit,
    /// Optional photo URL
    pub photo: Option<String>,
    /// When the product was created
    pub created_at: DateTimeUtc,
}

/// Products have no foreign keys; order items carry snapshots instead
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
