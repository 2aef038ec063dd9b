//! Shared test utilities for the dairy ledger.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults.

use crate::{
    core::{
        customer::{self, CustomerInput},
        order::{self, NewOrder, OrderLine},
        product::{self, ProductInput},
    },
    entities::{self, OrderItem, OrderItems, OrderStatus, Unit},
    errors::Result,
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::DatabaseConnection;

/// Account that owns every record created by these helpers
pub const TEST_ACCOUNT: &str = "test_account";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Shorthand for a calendar date in tests.
///
/// # Panics
/// Panics on an impossible date.
#[allow(clippy::expect_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Creates a test product with sensible defaults.
///
/// # Defaults
/// * price: 60.0 for 1 L
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::product::Model> {
    create_custom_product(db, name, 60.0, Unit::Litre).await
}

/// Creates a test product with a custom price and unit, sold per single unit.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
    unit: Unit,
) -> Result<entities::product::Model> {
    product::create_product(
        db,
        TEST_ACCOUNT,
        ProductInput {
            name: name.to_string(),
            price,
            quantity: 1.0,
            unit,
            photo: None,
        },
    )
    .await
}

/// Creates a test customer with an empty address and contact number.
pub async fn create_test_customer(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::customer::Model> {
    customer::create_customer(
        db,
        TEST_ACCOUNT,
        CustomerInput {
            name: name.to_string(),
            address: String::new(),
            contact_number: String::new(),
        },
    )
    .await
}

/// Places a single-line order for `customer`.
pub async fn create_test_order(
    db: &DatabaseConnection,
    customer: &entities::customer::Model,
    product: &entities::product::Model,
    quantity: f64,
    date: NaiveDate,
) -> Result<entities::daily_order::Model> {
    order::create_order(
        db,
        TEST_ACCOUNT,
        NewOrder {
            customer_id: customer.id,
            date,
            lines: vec![OrderLine {
                product_id: product.id,
                quantity,
            }],
        },
    )
    .await
}

fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Builds a product record without touching a database.
pub fn product_model(
    id: i64,
    name: &str,
    price: f64,
    quantity: f64,
    unit: Unit,
) -> entities::product::Model {
    entities::product::Model {
        id,
        user_id: TEST_ACCOUNT.to_string(),
        name: name.to_string(),
        price,
        quantity,
        unit,
        photo: None,
        created_at: fixed_timestamp(),
    }
}

/// Builds a customer record without touching a database.
pub fn customer_model(id: i64, name: &str) -> entities::customer::Model {
    entities::customer::Model {
        id,
        user_id: TEST_ACCOUNT.to_string(),
        name: name.to_string(),
        address: String::new(),
        contact_number: String::new(),
        created_at: fixed_timestamp(),
    }
}

/// Builds a pending order record without touching a database.
///
/// The order holds one line of 1 L "Milk" (product 1) priced at `total`.
pub fn order_model(
    id: i64,
    customer_id: i64,
    customer_name: &str,
    date: NaiveDate,
    total: f64,
    paid: f64,
) -> entities::daily_order::Model {
    entities::daily_order::Model {
        id,
        user_id: TEST_ACCOUNT.to_string(),
        customer_id,
        customer_name: customer_name.to_string(),
        date,
        items: OrderItems(vec![OrderItem {
            product_id: 1,
            product_name: "Milk".to_string(),
            quantity: 1.0,
            unit: Unit::Litre,
            price: total,
            total,
        }]),
        total_amount: total,
        amount_paid: paid,
        status: OrderStatus::Pending,
        created_at: fixed_timestamp(),
    }
}
