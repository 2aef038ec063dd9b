//! Statement generation - folds dated orders into per-customer and overall totals.
//!
//! A statement covers an inclusive range of calendar dates and either every
//! customer or one. It is a read-only snapshot: building it never touches the
//! orders it was built from, and building it again from the same inputs gives
//! the same result.

use super::format::describe_items;
use crate::{
    entities::{OrderStatus, customer, daily_order},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

const UNKNOWN_CUSTOMER: &str = "Unknown";

/// Which customers a statement covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerFilter {
    /// Every customer with orders in the period
    All,
    /// A single customer by id
    Customer(i64),
}

impl CustomerFilter {
    /// True when orders of `customer_id` belong in the statement
    #[must_use]
    pub const fn matches(self, customer_id: i64) -> bool {
        match self {
            Self::All => true,
            Self::Customer(id) => id == customer_id,
        }
    }
}

/// Inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementPeriod {
    /// First date included
    pub start: NaiveDate,
    /// Last date included
    pub end: NaiveDate,
}

impl StatementPeriod {
    /// Creates a period from `start` to `end`, both included
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A period covering a single day
    #[must_use]
    pub const fn single_day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// True when `date` falls within the period
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Totals and orders of one customer within a statement
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerStatement {
    /// Customer the orders belong to
    pub customer_id: i64,
    /// Name shown for the customer
    pub customer_name: String,
    /// Orders in ascending date order
    pub orders: Vec<daily_order::Model>,
    /// Sum of order totals
    pub total_amount: f64,
    /// Sum of payments
    pub total_paid: f64,
    /// `total_amount - total_paid`
    pub pending_amount: f64,
}

/// A generated statement
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Dates covered
    pub period: StatementPeriod,
    /// Customers covered
    pub filter: CustomerFilter,
    /// One entry per customer, sorted by name
    pub customer_statements: Vec<CustomerStatement>,
    /// Sum of every customer's `total_amount`
    pub grand_total_amount: f64,
    /// Sum of every customer's `total_paid`
    pub grand_total_paid: f64,
    /// `grand_total_amount - grand_total_paid`
    pub grand_total_pending: f64,
    /// Number of orders in the statement
    pub total_orders: usize,
}

/// A single order as a statement table row
#[derive(Debug, Clone, PartialEq)]
pub struct StatementRow {
    /// Delivery date
    pub date: NaiveDate,
    /// Items, e.g. `Milk x 2, Curd x 1`
    pub items: String,
    /// Order total
    pub total: f64,
    /// Paid so far
    pub paid: f64,
    /// Still owed
    pub balance: f64,
    /// Delivery status
    pub status: OrderStatus,
}

fn customer_name_for(
    filter: CustomerFilter,
    customers: &[customer::Model],
    customer_id: i64,
    first_placed: &daily_order::Model,
) -> String {
    // A statement for one customer shows their current record; the combined
    // statement shows the name of the first order placed in the period.
    let name = match filter {
        CustomerFilter::Customer(_) => customers
            .iter()
            .find(|c| c.id == customer_id)
            .map(|c| c.name.clone()),
        CustomerFilter::All => Some(first_placed.customer_name.clone()),
    };

    name.filter(|n| !n.is_empty())
        .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string())
}

/// Builds a statement from the account's orders.
///
/// Orders are kept when their date lies within `period` (both ends included)
/// and their customer matches `filter`. They are grouped by customer, each
/// group's orders sorted by date with ties left in input order, and the groups
/// sorted by customer name. No matching orders gives an empty statement with
/// all totals zero.
#[must_use]
pub fn build_statement(
    orders: &[daily_order::Model],
    customers: &[customer::Model],
    period: StatementPeriod,
    filter: CustomerFilter,
) -> Statement {
    let filtered: Vec<&daily_order::Model> = orders
        .iter()
        .filter(|o| period.contains(o.date) && filter.matches(o.customer_id))
        .collect();

    let mut groups: Vec<(i64, Vec<daily_order::Model>)> = Vec::new();
    for order in &filtered {
        match groups.iter_mut().find(|(id, _)| *id == order.customer_id) {
            Some((_, group)) => group.push((*order).clone()),
            None => groups.push((order.customer_id, vec![(*order).clone()])),
        }
    }

    let mut customer_statements: Vec<CustomerStatement> = groups
        .into_iter()
        .map(|(customer_id, mut customer_orders)| {
            let customer_name =
                customer_name_for(filter, customers, customer_id, &customer_orders[0]);
            customer_orders.sort_by_key(|o| o.date);
            let total_amount: f64 = customer_orders.iter().map(|o| o.total_amount).sum();
            let total_paid: f64 = customer_orders.iter().map(|o| o.amount_paid).sum();

            CustomerStatement {
                customer_id,
                customer_name,
                orders: customer_orders,
                total_amount,
                total_paid,
                pending_amount: total_amount - total_paid,
            }
        })
        .collect();
    customer_statements.sort_by(|a, b| a.customer_name.cmp(&b.customer_name));

    let grand_total_amount: f64 = customer_statements.iter().map(|cs| cs.total_amount).sum();
    let grand_total_paid: f64 = customer_statements.iter().map(|cs| cs.total_paid).sum();

    Statement {
        period,
        filter,
        customer_statements,
        grand_total_amount,
        grand_total_paid,
        grand_total_pending: grand_total_amount - grand_total_paid,
        total_orders: filtered.len(),
    }
}

/// Fetches the account's orders and customers and builds a statement.
///
/// # Errors
/// Returns an error if either query fails.
pub async fn generate_statement(
    db: &DatabaseConnection,
    user_id: &str,
    period: StatementPeriod,
    filter: CustomerFilter,
) -> Result<Statement> {
    let orders = super::order::get_all_orders(db, user_id).await?;
    let customers = super::customer::get_all_customers(db, user_id).await?;
    Ok(build_statement(&orders, &customers, period, filter))
}

/// Table rows for one customer's section of a statement
#[must_use]
pub fn statement_rows(statement: &CustomerStatement) -> Vec<StatementRow> {
    statement
        .orders
        .iter()
        .map(|order| StatementRow {
            date: order.date,
            items: describe_items(&order.items),
            total: order.total_amount,
            paid: order.amount_paid,
            balance: order.balance(),
            status: order.status,
        })
        .collect()
}

/// File name without extension for an exported statement, e.g.
/// `Statement_All_Customers_2024-03-01_to_2024-03-31`
#[must_use]
pub fn export_file_stem(
    filter: CustomerFilter,
    customers: &[customer::Model],
    period: StatementPeriod,
) -> String {
    let who = match filter {
        CustomerFilter::All => "All_Customers".to_string(),
        CustomerFilter::Customer(id) => customers
            .iter()
            .find(|c| c.id == id)
            .map_or_else(
                || "Customer".to_string(),
                |c| c.name.split_whitespace().collect::<Vec<_>>().join("_"),
            ),
    };

    format!(
        "Statement_{who}_{}_to_{}",
        period.start.format("%Y-%m-%d"),
        period.end.format("%Y-%m-%d")
    )
}
