//! Daily order entity - One delivery to one customer on one calendar date.
//!
//! Line items are frozen at creation and stored as a JSON array, together with
//! the customer's name at that time. Later edits to products or customers never
//! reach back into an existing order. After creation only `status` and
//! `amount_paid` change, and `amount_paid` only ever grows by payment increments.

use super::unit::Unit;
use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Delivery status of an order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Not yet delivered
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Handed over to the customer
    #[sea_orm(string_value = "delivered")]
    Delivered,
}

impl OrderStatus {
    /// Lowercase name as stored and displayed
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a product as it was ordered
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product the line was created from; may no longer exist
    pub product_id: i64,
    /// Product name at order time
    pub product_name: String,
    /// Number of product units ordered
    pub quantity: f64,
    /// Product unit at order time
    pub unit: Unit,
    /// Product price at order time
    pub price: f64,
    /// `quantity * price`
    pub total: f64,
}

/// Ordered line items of an order, stored as one JSON column
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct OrderItems(pub Vec<OrderItem>);

impl Deref for OrderItems {
    type Target = [OrderItem];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<OrderItem>> for OrderItems {
    fn from(items: Vec<OrderItem>) -> Self {
        Self(items)
    }
}

/// Daily order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning account
    pub user_id: String,
    /// Customer the order is for; may no longer exist
    pub customer_id: i64,
    /// Customer name at order time
    pub customer_name: String,
    /// Delivery date, a calendar date without time of day
    pub date: Date,
    /// Frozen line items
    #[sea_orm(column_type = "Json")]
    pub items: OrderItems,
    /// Sum of the item totals
    pub total_amount: f64,
    /// Payments received so far; absent in older records means nothing paid
    #[serde(default)]
    pub amount_paid: f64,
    /// Delivery status
    pub status: OrderStatus,
    /// When the order was created
    pub created_at: DateTimeUtc,
}

impl Model {
    /// Amount still owed; negative after a confirmed overpayment
    #[must_use]
    pub fn balance(&self) -> f64 {
        self.total_amount - self.amount_paid
    }
}

/// Snapshot fields replace relations to customers and products
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_missing_amount_paid_reads_as_zero() {
        let json = r#"{
            "id": 4,
            "user_id": "local",
            "customer_id": 2,
            "customer_name": "Asha",
            "date": "2024-03-01",
            "items": [
                {"product_id": 1, "product_name": "Milk", "quantity": 2.0,
                 "unit": "L", "price": 60.0, "total": 120.0}
            ],
            "total_amount": 120.0,
            "status": "pending",
            "created_at": "2024-03-01T06:30:00Z"
        }"#;

        let order: Model = serde_json::from_str(json).unwrap();
        assert_eq!(order.amount_paid, 0.0);
        assert_eq!(order.balance(), 120.0);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].unit, Unit::Litre);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_status_text() {
        assert_eq!(OrderStatus::Delivered.to_string(), "delivered");
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"pending\""
        );
    }
}
