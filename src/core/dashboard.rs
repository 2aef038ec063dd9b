//! Daily dashboard - today's orders, collections and quantities to deliver.

use super::units::summary_label;
use crate::entities::{OrderStatus, daily_order, product};
use chrono::{NaiveDate, Utc};

const MISSING_PRODUCT_LABEL: &str = "units";

/// Today's calendar date in UTC
#[must_use]
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Quantity of one product ordered for the day
#[derive(Debug, Clone, PartialEq)]
pub struct ProductTally {
    /// Display label, e.g. `Milk (L)`, or just the name when there is no unit suffix
    pub label: String,
    /// Product name as recorded on the orders
    pub product_name: String,
    /// Unit suffix; empty for millilitres
    pub unit_label: String,
    /// Sum of the item quantities
    pub quantity: f64,
}

/// Totals for a single day
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// Day summarised
    pub date: NaiveDate,
    /// Orders placed for the day
    pub total_orders: usize,
    /// Of those, how many were delivered
    pub delivered_orders: usize,
    /// Sum of order totals
    pub total_amount: f64,
    /// Sum of payments received on the day's orders
    pub total_collected: f64,
    /// `total_amount - total_collected`
    pub total_pending: f64,
    /// Products in the catalog
    pub product_count: usize,
    /// Customers on record
    pub customer_count: usize,
    /// Quantities per product, largest first
    pub product_summary: Vec<ProductTally>,
}

impl DashboardSummary {
    /// True when nothing was ordered for the day
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_orders == 0
    }
}

fn tally_products(
    orders: &[&daily_order::Model],
    products: &[product::Model],
) -> Vec<ProductTally> {
    let mut tallies: Vec<ProductTally> = Vec::new();

    for item in orders.iter().flat_map(|o| o.items.iter()) {
        // The unit comes from the current catalog entry, not the snapshot.
        let unit_label = products
            .iter()
            .find(|p| p.id == item.product_id)
            .map_or(MISSING_PRODUCT_LABEL, |p| summary_label(p.unit));

        match tallies
            .iter_mut()
            .find(|t| t.product_name == item.product_name && t.unit_label == unit_label)
        {
            Some(tally) => tally.quantity += item.quantity,
            None => tallies.push(ProductTally {
                label: if unit_label.is_empty() {
                    item.product_name.clone()
                } else {
                    format!("{} ({unit_label})", item.product_name)
                },
                product_name: item.product_name.clone(),
                unit_label: unit_label.to_string(),
                quantity: item.quantity,
            }),
        }
    }

    tallies.sort_by(|a, b| b.quantity.total_cmp(&a.quantity));
    tallies
}

/// Summarises the orders dated `today`.
///
/// Orders of any other date are ignored. Products are tallied by the name on
/// the order and labelled with the unit of the product as it is now.
#[must_use]
pub fn dashboard_summary(
    orders: &[daily_order::Model],
    products: &[product::Model],
    customer_count: usize,
    today: NaiveDate,
) -> DashboardSummary {
    let todays: Vec<&daily_order::Model> = orders.iter().filter(|o| o.date == today).collect();

    let total_amount: f64 = todays.iter().map(|o| o.total_amount).sum();
    let total_collected: f64 = todays.iter().map(|o| o.amount_paid).sum();

    DashboardSummary {
        date: today,
        total_orders: todays.len(),
        delivered_orders: todays
            .iter()
            .filter(|o| o.status == OrderStatus::Delivered)
            .count(),
        total_amount,
        total_collected,
        total_pending: total_amount - total_collected,
        product_count: products.len(),
        customer_count,
        product_summary: tally_products(&todays, products),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::{OrderItem, OrderItems, Unit};
    use crate::test_utils::*;

    fn item(product_id: i64, name: &str, quantity: f64) -> OrderItem {
        OrderItem {
            product_id,
            product_name: name.to_string(),
            quantity,
            unit: Unit::Litre,
            price: 10.0,
            total: quantity * 10.0,
        }
    }

    fn order_with_items(id: i64, day: NaiveDate, items: Vec<OrderItem>) -> daily_order::Model {
        let mut order = order_model(id, 7, "Asha", day, 0.0, 0.0);
        order.total_amount = items.iter().map(|i| i.total).sum();
        order.items = OrderItems(items);
        order
    }

    #[test]
    fn test_totals_cover_only_today() {
        let today = date(2024, 3, 5);
        let mut delivered = order_model(1, 7, "Asha", today, 100.0, 60.0);
        delivered.status = OrderStatus::Delivered;
        let orders = vec![
            delivered,
            order_model(2, 8, "Ravi", today, 50.0, 0.0),
            order_model(3, 8, "Ravi", date(2024, 3, 4), 500.0, 500.0),
        ];

        let summary = dashboard_summary(&orders, &[], 4, today);
        assert_eq!(summary.date, today);
        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.delivered_orders, 1);
        assert_eq!(summary.total_amount, 150.0);
        assert_eq!(summary.total_collected, 60.0);
        assert_eq!(summary.total_pending, 90.0);
        assert_eq!(summary.customer_count, 4);
        assert!(!summary.is_empty());
    }

    #[test]
    fn test_product_summary_labels_and_order() {
        let today = date(2024, 3, 5);
        let products = vec![
            product_model(1, "Milk", 60.0, 1.0, Unit::Litre),
            product_model(2, "Eggs", 42.0, 6.0, Unit::Piece),
            product_model(3, "Cream", 40.0, 200.0, Unit::Millilitre),
        ];
        let orders = vec![
            order_with_items(1, today, vec![item(1, "Milk", 2.0), item(2, "Eggs", 6.0)]),
            order_with_items(2, today, vec![item(1, "Milk", 1.5), item(3, "Cream", 1.0)]),
            order_with_items(3, today, vec![item(9, "Ghee", 3.0)]),
            order_with_items(4, date(2024, 3, 6), vec![item(1, "Milk", 40.0)]),
        ];

        let summary = dashboard_summary(&orders, &products, 0, today);
        let tallies: Vec<(&str, f64)> = summary
            .product_summary
            .iter()
            .map(|t| (t.label.as_str(), t.quantity))
            .collect();
        assert_eq!(
            tallies,
            vec![
                ("Eggs (pcs)", 6.0),
                ("Milk (L)", 3.5),
                ("Ghee (units)", 3.0),
                ("Cream", 1.0),
            ]
        );
        assert_eq!(summary.product_count, 3);
    }

    #[test]
    fn test_equal_quantities_keep_first_seen_order() {
        let today = date(2024, 3, 5);
        let orders = vec![order_with_items(
            1,
            today,
            vec![item(1, "Paneer", 1.0), item(2, "Butter", 1.0)],
        )];

        let summary = dashboard_summary(&orders, &[], 0, today);
        let names: Vec<&str> = summary
            .product_summary
            .iter()
            .map(|t| t.product_name.as_str())
            .collect();
        assert_eq!(names, vec!["Paneer", "Butter"]);
    }

    #[test]
    fn test_empty_day() {
        let summary = dashboard_summary(&[], &[], 0, date(2024, 3, 5));
        assert!(summary.is_empty());
        assert_eq!(summary.total_amount, 0.0);
        assert_eq!(summary.total_pending, 0.0);
        assert!(summary.product_summary.is_empty());
    }
}
