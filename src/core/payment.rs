//! Payment recording for daily orders.
//!
//! Payments accumulate: each one adds to `amount_paid`, nothing overwrites it.
//! A payment larger than the remaining balance is allowed only when the caller
//! passes [`Overpayment::Confirmed`], which it should do after asking the user.

use crate::{
    entities::{DailyOrder, daily_order},
    errors::{Error, Result},
};
use sea_orm::{TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{info, warn};

/// Whether the user has agreed to record more than the balance due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overpayment {
    /// Refuse payments above the balance
    Reject,
    /// The user confirmed the overpayment
    Confirmed,
}

/// Effect a payment would have on an order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentPlan {
    /// Order being paid
    pub order_id: i64,
    /// Payment being recorded
    pub amount: f64,
    /// Amount paid before this payment
    pub previous_paid: f64,
    /// Amount paid after this payment
    pub new_amount_paid: f64,
    /// Balance due before this payment
    pub balance_before: f64,
    /// Balance due after this payment, negative when overpaid
    pub balance_after: f64,
}

impl PaymentPlan {
    /// True when the payment exceeds the balance due
    #[must_use]
    pub fn is_overpayment(&self) -> bool {
        self.amount > self.balance_before
    }

    /// Checks the plan against the user's overpayment decision.
    ///
    /// # Errors
    /// Returns [`Error::OverpaymentNotConfirmed`] for an unconfirmed overpayment.
    pub fn authorize(&self, overpayment: Overpayment) -> Result<()> {
        if self.is_overpayment() && overpayment == Overpayment::Reject {
            return Err(Error::OverpaymentNotConfirmed {
                amount: self.amount,
                balance: self.balance_before,
            });
        }
        Ok(())
    }
}

/// Rejects payment amounts that are not finite and positive.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] for zero, negative or non-finite amounts.
pub fn validate_payment_amount(amount: f64) -> Result<()> {
    if amount <= 0.0 || !amount.is_finite() {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

/// Works out what recording `amount` against `order` would do.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] for zero, negative or non-finite amounts.
pub fn plan_payment(order: &daily_order::Model, amount: f64) -> Result<PaymentPlan> {
    validate_payment_amount(amount)?;

    let previous_paid = order.amount_paid;
    let new_amount_paid = previous_paid + amount;
    Ok(PaymentPlan {
        order_id: order.id,
        amount,
        previous_paid,
        new_amount_paid,
        balance_before: order.total_amount - previous_paid,
        balance_after: order.total_amount - new_amount_paid,
    })
}

/// Adds a payment to an order and returns the updated order.
///
/// The increment is applied in the database as `amount_paid = amount_paid + amount`
/// inside a transaction, so a payment recorded elsewhere in the meantime is not
/// lost.
///
/// # Errors
/// Returns an error if the amount is invalid, the order does not exist for the
/// account, an overpayment was not confirmed, or the update fails. Nothing is
/// written in any of these cases.
pub async fn record_payment(
    db: &DatabaseConnection,
    user_id: &str,
    order_id: i64,
    amount: f64,
    overpayment: Overpayment,
) -> Result<daily_order::Model> {
    validate_payment_amount(amount)?;

    let txn = db.begin().await?;

    let order = DailyOrder::find_by_id(order_id)
        .filter(daily_order::Column::UserId.eq(user_id))
        .one(&txn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    let plan = plan_payment(&order, amount)?;
    if let Err(e) = plan.authorize(overpayment) {
        warn!(
            "Rejected unconfirmed overpayment of {:.2} on order {} (balance {:.2})",
            amount, order_id, plan.balance_before
        );
        return Err(e);
    }

    DailyOrder::update_many()
        .col_expr(
            daily_order::Column::AmountPaid,
            Expr::col(daily_order::Column::AmountPaid).add(amount),
        )
        .filter(daily_order::Column::Id.eq(order_id))
        .exec(&txn)
        .await?;

    let updated = DailyOrder::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    txn.commit().await?;

    info!(
        "Recorded payment of {:.2} on order {}; paid {:.2} of {:.2}",
        amount, order_id, updated.amount_paid, updated.total_amount
    );
    Ok(updated)
}
