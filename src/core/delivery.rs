//! Delivery status changes.
//!
//! Marking an order delivered goes through a confirmation that shows the
//! customer and the amount; moving it back to pending needs none.

use crate::{
    entities::{DailyOrder, OrderStatus, daily_order},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::info;

/// What to show the user before an order is marked delivered.
///
/// Only [`request_status_toggle`] hands these out.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryConfirmation {
    order_id: i64,
    customer_name: String,
    total_amount: f64,
}

impl DeliveryConfirmation {
    /// Order to mark delivered
    #[must_use]
    pub const fn order_id(&self) -> i64 {
        self.order_id
    }

    /// Customer the order belongs to
    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Order total
    #[must_use]
    pub const fn total_amount(&self) -> f64 {
        self.total_amount
    }
}

/// Next step when the user toggles an order's status
#[derive(Debug, Clone, PartialEq)]
pub enum StatusToggle {
    /// Ask the user, then call [`confirm_delivery`]
    ConfirmDelivery(DeliveryConfirmation),
    /// Call [`mark_pending`] directly
    Revert {
        /// Order to move back to pending
        order_id: i64,
    },
}

/// Decides what toggling an order's status requires.
#[must_use]
pub fn request_status_toggle(order: &daily_order::Model) -> StatusToggle {
    match order.status {
        OrderStatus::Pending => StatusToggle::ConfirmDelivery(DeliveryConfirmation {
            order_id: order.id,
            customer_name: order.customer_name.clone(),
            total_amount: order.total_amount,
        }),
        OrderStatus::Delivered => StatusToggle::Revert { order_id: order.id },
    }
}

async fn set_status(
    db: &DatabaseConnection,
    user_id: &str,
    order_id: i64,
    status: OrderStatus,
) -> Result<daily_order::Model> {
    let current = DailyOrder::find_by_id(order_id)
        .filter(daily_order::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    if status == OrderStatus::Delivered && current.status == OrderStatus::Delivered {
        return Err(Error::AlreadyDelivered { id: order_id });
    }

    let mut order: daily_order::ActiveModel = current.into();
    order.status = Set(status);
    let updated = order.update(db).await?;
    info!("Order {} is now {}", order_id, status);
    Ok(updated)
}

/// Marks an order delivered once the user has accepted the confirmation.
///
/// # Errors
/// Returns [`Error::AlreadyDelivered`] if the order was delivered since the
/// confirmation was issued, or an error if the order does not exist for the
/// account or the update fails.
pub async fn confirm_delivery(
    db: &DatabaseConnection,
    user_id: &str,
    confirmation: &DeliveryConfirmation,
) -> Result<daily_order::Model> {
    set_status(db, user_id, confirmation.order_id, OrderStatus::Delivered).await
}

/// Moves an order back to pending.
///
/// # Errors
/// Returns an error if the order does not exist for the account or the update fails.
pub async fn mark_pending(
    db: &DatabaseConnection,
    user_id: &str,
    order_id: i64,
) -> Result<daily_order::Model> {
    set_status(db, user_id, order_id, OrderStatus::Pending).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_pending_order_needs_confirmation() {
        let order = order_model(3, 7, "Asha", date(2024, 3, 1), 120.0, 0.0);

        assert_eq!(
            request_status_toggle(&order),
            StatusToggle::ConfirmDelivery(DeliveryConfirmation {
                order_id: 3,
                customer_name: "Asha".to_string(),
                total_amount: 120.0,
            })
        );
    }

    #[test]
    fn test_delivered_order_reverts_directly() {
        let mut order = order_model(3, 7, "Asha", date(2024, 3, 1), 120.0, 0.0);
        order.status = OrderStatus::Delivered;

        assert_eq!(
            request_status_toggle(&order),
            StatusToggle::Revert { order_id: 3 }
        );
    }

    #[tokio::test]
    async fn test_status_round_trip() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "Asha").await?;
        let milk = create_test_product(&db, "Milk").await?;
        let order = create_test_order(&db, &customer, &milk, 1.0, date(2024, 3, 1)).await?;

        let StatusToggle::ConfirmDelivery(confirmation) = request_status_toggle(&order) else {
            panic!("pending order should ask for confirmation");
        };
        let delivered = confirm_delivery(&db, TEST_ACCOUNT, &confirmation).await?;
        assert_eq!(delivered.status, OrderStatus::Delivered);
        assert_eq!(delivered.amount_paid, order.amount_paid);

        let pending = mark_pending(&db, TEST_ACCOUNT, order.id).await?;
        assert_eq!(pending.status, OrderStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn test_stale_confirmation_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "Asha").await?;
        let milk = create_test_product(&db, "Milk").await?;
        let order = create_test_order(&db, &customer, &milk, 1.0, date(2024, 3, 1)).await?;

        let StatusToggle::ConfirmDelivery(confirmation) = request_status_toggle(&order) else {
            panic!("pending order should ask for confirmation");
        };
        assert_eq!(confirmation.order_id(), order.id);
        assert_eq!(confirmation.customer_name(), "Asha");
        assert_eq!(confirmation.total_amount(), 60.0);

        confirm_delivery(&db, TEST_ACCOUNT, &confirmation).await?;
        let result = confirm_delivery(&db, TEST_ACCOUNT, &confirmation).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::AlreadyDelivered { id } if id == order.id
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_status_change_unknown_order() -> Result<()> {
        let db = setup_test_db().await?;

        let result = mark_pending(&db, TEST_ACCOUNT, 77).await;
        assert!(matches!(result.unwrap_err(), Error::OrderNotFound { id: 77 }));

        Ok(())
    }
}
