//! Account-scoped handle over the data store.
//!
//! A [`Ledger`] owns the database connection, the account it acts for, and the
//! products, customers and orders last fetched for that account. Every write
//! goes to the store first; the cached lists change only after the store
//! reports success, so a failed call leaves them exactly as they were.
//! Statements, the dashboard and prices are computed from the cached lists.

use crate::{
    core::{
        customer::{self, CustomerInput, CustomerSummary},
        dashboard::{self, DashboardSummary},
        delivery::{self, DeliveryConfirmation},
        order::{self, CustomerDay, NewOrder},
        payment::{self, Overpayment},
        pricing,
        product::{self, ProductInput},
        statement::{self, CustomerFilter, Statement, StatementPeriod},
    },
    entities::{Unit, customer as customer_entity, daily_order, product as product_entity},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tracing::{debug, info};

/// Connection, account and fetched records for one signed-in account
#[derive(Debug)]
pub struct Ledger {
    db: DatabaseConnection,
    account_id: String,
    products: Vec<product_entity::Model>,
    customers: Vec<customer_entity::Model>,
    orders: Vec<daily_order::Model>,
}

impl Ledger {
    /// Opens a ledger for `account_id` and fetches its records.
    ///
    /// # Errors
    /// Returns an error if any of the initial queries fail.
    pub async fn open(db: DatabaseConnection, account_id: impl Into<String>) -> Result<Self> {
        let mut ledger = Self {
            db,
            account_id: account_id.into(),
            products: Vec::new(),
            customers: Vec::new(),
            orders: Vec::new(),
        };
        ledger.refresh().await?;
        Ok(ledger)
    }

    /// Re-fetches products, customers and orders.
    ///
    /// # Errors
    /// Returns an error if a query fails; the cached lists are then unchanged.
    pub async fn refresh(&mut self) -> Result<()> {
        let products = product::get_all_products(&self.db, &self.account_id).await?;
        let customers = customer::get_all_customers(&self.db, &self.account_id).await?;
        let orders = order::get_all_orders(&self.db, &self.account_id).await?;

        info!(
            "Loaded {} products, {} customers and {} orders for account {}",
            products.len(),
            customers.len(),
            orders.len(),
            self.account_id
        );

        self.products = products;
        self.customers = customers;
        self.orders = orders;
        Ok(())
    }

    /// The underlying connection
    #[must_use]
    pub const fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Account the ledger acts for
    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Products, ordered by name
    #[must_use]
    pub fn products(&self) -> &[product_entity::Model] {
        &self.products
    }

    /// Customers, ordered by name
    #[must_use]
    pub fn customers(&self) -> &[customer_entity::Model] {
        &self.customers
    }

    /// Orders, in the order they were placed
    #[must_use]
    pub fn orders(&self) -> &[daily_order::Model] {
        &self.orders
    }

    /// Cached product by id
    #[must_use]
    pub fn product(&self, product_id: i64) -> Option<&product_entity::Model> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Cached customer by id
    #[must_use]
    pub fn customer(&self, customer_id: i64) -> Option<&customer_entity::Model> {
        self.customers.iter().find(|c| c.id == customer_id)
    }

    /// Cached order by id
    #[must_use]
    pub fn order(&self, order_id: i64) -> Option<&daily_order::Model> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    fn store_product(&mut self, stored: product_entity::Model) {
        match self.products.iter_mut().find(|p| p.id == stored.id) {
            Some(existing) => *existing = stored,
            None => self.products.push(stored),
        }
        self.products.sort_by(|a, b| a.name.cmp(&b.name));
    }

    fn store_customer(&mut self, stored: customer_entity::Model) {
        match self.customers.iter_mut().find(|c| c.id == stored.id) {
            Some(existing) => *existing = stored,
            None => self.customers.push(stored),
        }
        self.customers.sort_by(|a, b| a.name.cmp(&b.name));
    }

    fn store_order(&mut self, stored: daily_order::Model) {
        match self.orders.iter_mut().find(|o| o.id == stored.id) {
            Some(existing) => *existing = stored,
            None => self.orders.push(stored),
        }
    }

    /// Adds a product.
    ///
    /// # Errors
    /// See [`product::create_product`].
    pub async fn add_product(&mut self, input: ProductInput) -> Result<product_entity::Model> {
        let created = product::create_product(&self.db, &self.account_id, input).await?;
        self.store_product(created.clone());
        Ok(created)
    }

    /// Edits a product. Existing orders are unaffected.
    ///
    /// # Errors
    /// See [`product::update_product`].
    pub async fn edit_product(
        &mut self,
        product_id: i64,
        input: ProductInput,
    ) -> Result<product_entity::Model> {
        let updated =
            product::update_product(&self.db, &self.account_id, product_id, input).await?;
        self.store_product(updated.clone());
        Ok(updated)
    }

    /// Deletes a product. Existing orders are unaffected.
    ///
    /// # Errors
    /// See [`product::delete_product`].
    pub async fn remove_product(&mut self, product_id: i64) -> Result<()> {
        product::delete_product(&self.db, &self.account_id, product_id).await?;
        self.products.retain(|p| p.id != product_id);
        Ok(())
    }

    /// Adds a customer.
    ///
    /// # Errors
    /// See [`customer::create_customer`].
    pub async fn add_customer(&mut self, input: CustomerInput) -> Result<customer_entity::Model> {
        let created = customer::create_customer(&self.db, &self.account_id, input).await?;
        self.store_customer(created.clone());
        Ok(created)
    }

    /// Edits a customer. Existing orders keep the old name.
    ///
    /// # Errors
    /// See [`customer::update_customer`].
    pub async fn edit_customer(
        &mut self,
        customer_id: i64,
        input: CustomerInput,
    ) -> Result<customer_entity::Model> {
        let updated =
            customer::update_customer(&self.db, &self.account_id, customer_id, input).await?;
        self.store_customer(updated.clone());
        Ok(updated)
    }

    /// Deletes a customer. Their orders are kept.
    ///
    /// # Errors
    /// See [`customer::delete_customer`].
    pub async fn remove_customer(&mut self, customer_id: i64) -> Result<()> {
        customer::delete_customer(&self.db, &self.account_id, customer_id).await?;
        self.customers.retain(|c| c.id != customer_id);
        Ok(())
    }

    /// Places an order.
    ///
    /// # Errors
    /// See [`order::create_order`].
    pub async fn place_order(&mut self, new_order: NewOrder) -> Result<daily_order::Model> {
        let created = order::create_order(&self.db, &self.account_id, new_order).await?;
        self.store_order(created.clone());
        Ok(created)
    }

    /// Deletes an order.
    ///
    /// # Errors
    /// See [`order::delete_order`].
    pub async fn remove_order(&mut self, order_id: i64) -> Result<()> {
        order::delete_order(&self.db, &self.account_id, order_id).await?;
        self.orders.retain(|o| o.id != order_id);
        Ok(())
    }

    /// Adds a payment to an order.
    ///
    /// # Errors
    /// See [`payment::record_payment`].
    pub async fn record_payment(
        &mut self,
        order_id: i64,
        amount: f64,
        overpayment: Overpayment,
    ) -> Result<daily_order::Model> {
        let updated =
            payment::record_payment(&self.db, &self.account_id, order_id, amount, overpayment)
                .await?;
        self.store_order(updated.clone());
        Ok(updated)
    }

    /// Marks an order delivered after the user accepted `confirmation`.
    ///
    /// # Errors
    /// See [`delivery::confirm_delivery`].
    pub async fn confirm_delivery(
        &mut self,
        confirmation: &DeliveryConfirmation,
    ) -> Result<daily_order::Model> {
        let updated =
            delivery::confirm_delivery(&self.db, &self.account_id, confirmation).await?;
        self.store_order(updated.clone());
        Ok(updated)
    }

    /// Moves an order back to pending.
    ///
    /// # Errors
    /// See [`delivery::mark_pending`].
    pub async fn mark_pending(&mut self, order_id: i64) -> Result<daily_order::Model> {
        let updated = delivery::mark_pending(&self.db, &self.account_id, order_id).await?;
        self.store_order(updated.clone());
        Ok(updated)
    }

    /// Statement over the cached orders
    #[must_use]
    pub fn statement(&self, period: StatementPeriod, filter: CustomerFilter) -> Statement {
        debug!(
            "Building statement from {} to {} for {:?}",
            period.start, period.end, filter
        );
        statement::build_statement(&self.orders, &self.customers, period, filter)
    }

    /// Dashboard for `today` over the cached records
    #[must_use]
    pub fn dashboard(&self, today: NaiveDate) -> DashboardSummary {
        dashboard::dashboard_summary(&self.orders, &self.products, self.customers.len(), today)
    }

    /// Orders of `date` grouped by customer
    #[must_use]
    pub fn orders_for_day(&self, date: NaiveDate) -> Vec<CustomerDay> {
        order::group_orders_for_day(&self.orders, date)
    }

    /// Detail view of one customer's orders
    #[must_use]
    pub fn customer_summary(&self, customer_id: i64) -> CustomerSummary {
        customer::customer_summary(&self.orders, customer_id)
    }

    /// Price of `quantity` of `unit` of a cached product
    #[must_use]
    pub fn price_for(&self, product_id: i64, quantity: f64, unit: Unit) -> Option<f64> {
        self.product(product_id)
            .and_then(|p| pricing::calculate_price(p, quantity, unit))
    }
}
