//! Order business logic - Placing, listing and deleting daily orders.
//!
//! An order copies the customer's name and each product's name, unit and price
//! when it is created. Those copies are never refreshed, so a statement for last
//! month still shows what was actually sold even after prices change or a
//! product is removed.

use crate::{
    entities::{DailyOrder, OrderItem, OrderItems, OrderStatus, daily_order, product},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use std::cmp::Reverse;
use tracing::{debug, info};

/// A product and how many of its units to deliver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderLine {
    /// Product to order
    pub product_id: i64,
    /// Number of product units
    pub quantity: f64,
}

/// Request to place an order
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    /// Customer receiving the delivery
    pub customer_id: i64,
    /// Delivery date
    pub date: NaiveDate,
    /// Requested lines, in display order
    pub lines: Vec<OrderLine>,
}

/// One customer's orders for a single day
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDay {
    /// Customer the orders belong to
    pub customer_id: i64,
    /// Name as recorded on the first order of the day
    pub customer_name: String,
    /// The customer's orders that day, in insertion order
    pub orders: Vec<daily_order::Model>,
}

/// Freezes a product into an order line.
///
/// # Errors
/// Returns [`Error::InvalidQuantity`] unless `quantity` is a finite positive number.
pub fn build_order_item(product: &product::Model, quantity: f64) -> Result<OrderItem> {
    if quantity <= 0.0 || !quantity.is_finite() {
        return Err(Error::InvalidQuantity { quantity });
    }

    Ok(OrderItem {
        product_id: product.id,
        product_name: product.name.clone(),
        quantity,
        unit: product.unit,
        price: product.price,
        total: quantity * product.price,
    })
}

/// Sum of the item totals of an order
#[must_use]
pub fn order_total(items: &[OrderItem]) -> f64 {
    items.iter().map(|item| item.total).sum()
}

/// Groups the orders of `date` by customer, keeping the order in which each
/// customer first appears.
#[must_use]
pub fn group_orders_for_day(orders: &[daily_order::Model], date: NaiveDate) -> Vec<CustomerDay> {
    let mut groups: Vec<CustomerDay> = Vec::new();

    for order in orders.iter().filter(|o| o.date == date) {
        match groups
            .iter_mut()
            .find(|g| g.customer_id == order.customer_id)
        {
            Some(group) => group.orders.push(order.clone()),
            None => groups.push(CustomerDay {
                customer_id: order.customer_id,
                customer_name: order.customer_name.clone(),
                orders: vec![order.clone()],
            }),
        }
    }

    groups
}

/// Places an order with snapshots of the customer and products.
///
/// The order starts pending with nothing paid.
///
/// # Errors
/// Returns an error if there are no lines, a quantity is invalid, the customer or
/// a product does not exist for the account, or the insert fails.
pub async fn create_order(
    db: &DatabaseConnection,
    user_id: &str,
    new_order: NewOrder,
) -> Result<daily_order::Model> {
    if new_order.lines.is_empty() {
        return Err(Error::EmptyOrder);
    }
    if let Some(line) = new_order
        .lines
        .iter()
        .find(|l| l.quantity <= 0.0 || !l.quantity.is_finite())
    {
        return Err(Error::InvalidQuantity {
            quantity: line.quantity,
        });
    }

    let customer = super::customer::get_customer_by_id(db, user_id, new_order.customer_id)
        .await?
        .ok_or(Error::CustomerNotFound {
            id: new_order.customer_id,
        })?;

    let mut items = Vec::with_capacity(new_order.lines.len());
    for line in &new_order.lines {
        let product = super::product::get_product_by_id(db, user_id, line.product_id)
            .await?
            .ok_or(Error::ProductNotFound {
                id: line.product_id,
            })?;
        items.push(build_order_item(&product, line.quantity)?);
    }

    let total_amount = order_total(&items);
    let order = daily_order::ActiveModel {
        user_id: Set(user_id.to_string()),
        customer_id: Set(customer.id),
        customer_name: Set(customer.name),
        date: Set(new_order.date),
        items: Set(OrderItems(items)),
        total_amount: Set(total_amount),
        amount_paid: Set(0.0),
        status: Set(OrderStatus::Pending),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let created = order.insert(db).await?;
    info!(
        "Created order {} for {} on {} totalling {:.2}",
        created.id, created.customer_name, created.date, created.total_amount
    );
    Ok(created)
}

/// Retrieves every order of the account in the order they were placed.
pub async fn get_all_orders(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<daily_order::Model>> {
    debug!("Fetching orders for account {}", user_id);
    DailyOrder::find()
        .filter(daily_order::Column::UserId.eq(user_id))
        .order_by_asc(daily_order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves an order by ID, `None` if missing or owned by another account.
pub async fn get_order_by_id(
    db: &DatabaseConnection,
    user_id: &str,
    order_id: i64,
) -> Result<Option<daily_order::Model>> {
    DailyOrder::find_by_id(order_id)
        .filter(daily_order::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves one customer's orders, newest date first.
pub async fn get_orders_for_customer(
    db: &DatabaseConnection,
    user_id: &str,
    customer_id: i64,
) -> Result<Vec<daily_order::Model>> {
    let mut orders = DailyOrder::find()
        .filter(daily_order::Column::UserId.eq(user_id))
        .filter(daily_order::Column::CustomerId.eq(customer_id))
        .order_by_asc(daily_order::Column::Id)
        .all(db)
        .await?;
    orders.sort_by_key(|o| Reverse(o.date));
    Ok(orders)
}

/// Permanently deletes an order.
///
/// # Errors
/// Returns an error if the order does not exist for the account or the delete
/// fails.
pub async fn delete_order(db: &DatabaseConnection, user_id: &str, order_id: i64) -> Result<()> {
    let result = DailyOrder::delete_many()
        .filter(daily_order::Column::Id.eq(order_id))
        .filter(daily_order::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::OrderNotFound { id: order_id });
    }

    info!("Deleted order {}", order_id);
    Ok(())
}
