//! Customer business logic - CRUD for customers and the per-customer account view.

use crate::{
    entities::{Customer, customer, daily_order},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::cmp::Reverse;
use tracing::info;

/// Fields a user supplies when creating or editing a customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerInput {
    /// Display name, required
    pub name: String,
    /// Delivery address
    pub address: String,
    /// Phone number
    pub contact_number: String,
}

impl CustomerInput {
    fn validate(&self) -> Result<String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidName {
                field: "Customer name",
            });
        }
        Ok(name.to_string())
    }
}

/// Everything shown on a customer's detail page
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerSummary {
    /// The customer's orders, newest date first
    pub orders: Vec<daily_order::Model>,
    /// Number of orders
    pub total_orders: usize,
    /// Sum of order totals
    pub total_value: f64,
    /// Sum of payments received
    pub total_paid: f64,
    /// `total_value - total_paid`
    pub pending_amount: f64,
}

/// Builds the detail view for one customer from the account's orders.
#[must_use]
pub fn customer_summary(orders: &[daily_order::Model], customer_id: i64) -> CustomerSummary {
    let mut customer_orders: Vec<daily_order::Model> = orders
        .iter()
        .filter(|o| o.customer_id == customer_id)
        .cloned()
        .collect();
    customer_orders.sort_by_key(|o| Reverse(o.date));

    let total_value: f64 = customer_orders.iter().map(|o| o.total_amount).sum();
    let total_paid: f64 = customer_orders.iter().map(|o| o.amount_paid).sum();

    CustomerSummary {
        total_orders: customer_orders.len(),
        orders: customer_orders,
        total_value,
        total_paid,
        pending_amount: total_value - total_paid,
    }
}

/// Retrieves every customer of the account, ordered alphabetically by name.
pub async fn get_all_customers(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<customer::Model>> {
    Customer::find()
        .filter(customer::Column::UserId.eq(user_id))
        .order_by_asc(customer::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a customer by ID, `None` if missing or owned by another account.
pub async fn get_customer_by_id(
    db: &DatabaseConnection,
    user_id: &str,
    customer_id: i64,
) -> Result<Option<customer::Model>> {
    Customer::find_by_id(customer_id)
        .filter(customer::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new customer.
///
/// # Errors
/// Returns an error if the name is blank or the insert fails.
pub async fn create_customer(
    db: &DatabaseConnection,
    user_id: &str,
    input: CustomerInput,
) -> Result<customer::Model> {
    let name = input.validate()?;

    let customer = customer::ActiveModel {
        user_id: Set(user_id.to_string()),
        name: Set(name),
        address: Set(input.address.trim().to_string()),
        contact_number: Set(input.contact_number.trim().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let created = customer.insert(db).await?;
    info!("Created customer {} ({})", created.name, created.id);
    Ok(created)
}

/// Replaces a customer's name, address and contact number.
///
/// Existing orders keep the name they were placed under.
///
/// # Errors
/// Returns an error if the name is blank, the customer does not exist for the
/// account, or the update fails.
pub async fn update_customer(
    db: &DatabaseConnection,
    user_id: &str,
    customer_id: i64,
    input: CustomerInput,
) -> Result<customer::Model> {
    let name = input.validate()?;

    let mut customer: customer::ActiveModel = get_customer_by_id(db, user_id, customer_id)
        .await?
        .ok_or(Error::CustomerNotFound { id: customer_id })?
        .into();

    customer.name = Set(name);
    customer.address = Set(input.address.trim().to_string());
    customer.contact_number = Set(input.contact_number.trim().to_string());

    customer.update(db).await.map_err(Into::into)
}

/// Permanently deletes a customer. Their orders are kept.
///
/// # Errors
/// Returns an error if the customer does not exist for the account or the delete
/// fails.
pub async fn delete_customer(
    db: &DatabaseConnection,
    user_id: &str,
    customer_id: i64,
) -> Result<()> {
    let result = Customer::delete_many()
        .filter(customer::Column::Id.eq(customer_id))
        .filter(customer::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::CustomerNotFound { id: customer_id });
    }

    info!("Deleted customer {}", customer_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn input(name: &str) -> CustomerInput {
        CustomerInput {
            name: name.to_string(),
            address: " 12 Gandhi Road ".to_string(),
            contact_number: "98765 43210".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_customer_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_customer(&db, TEST_ACCOUNT, input("  ")).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidName { field: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_update_customer() -> Result<()> {
        let db = setup_test_db().await?;

        let customer = create_customer(&db, TEST_ACCOUNT, input(" Asha ")).await?;
        assert_eq!(customer.name, "Asha");
        assert_eq!(customer.address, "12 Gandhi Road");

        let updated = update_customer(&db, TEST_ACCOUNT, customer.id, input("Asha Patel")).await?;
        assert_eq!(updated.name, "Asha Patel");

        let all = get_all_customers(&db, TEST_ACCOUNT).await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Asha Patel");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_customer_keeps_orders() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "Ravi").await?;
        let milk = create_test_product(&db, "Milk").await?;
        let order = create_test_order(&db, &customer, &milk, 2.0, date(2024, 3, 1)).await?;

        delete_customer(&db, TEST_ACCOUNT, customer.id).await?;
        assert!(get_customer_by_id(&db, TEST_ACCOUNT, customer.id).await?.is_none());

        let kept = crate::core::order::get_order_by_id(&db, TEST_ACCOUNT, order.id)
            .await?
            .unwrap();
        assert_eq!(kept.customer_name, "Ravi");

        let result = delete_customer(&db, TEST_ACCOUNT, customer.id).await;
        assert!(matches!(result.unwrap_err(), Error::CustomerNotFound { id: _ }));

        Ok(())
    }

    #[test]
    fn test_customer_summary() {
        let orders = vec![
            order_model(1, 7, "Asha", date(2024, 3, 1), 100.0, 40.0),
            order_model(2, 8, "Ravi", date(2024, 3, 2), 80.0, 80.0),
            order_model(3, 7, "Asha", date(2024, 3, 5), 60.0, 0.0),
            order_model(4, 7, "Asha", date(2024, 3, 3), 50.0, 50.0),
        ];

        let summary = customer_summary(&orders, 7);
        let ids: Vec<i64> = summary.orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![3, 4, 1]);
        assert_eq!(summary.total_orders, 3);
        assert_eq!(summary.total_value, 210.0);
        assert_eq!(summary.total_paid, 90.0);
        assert_eq!(summary.pending_amount, 120.0);
    }

    #[test]
    fn test_customer_summary_without_orders() {
        let summary = customer_summary(&[], 7);
        assert!(summary.orders.is_empty());
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.pending_amount, 0.0);
    }
}
