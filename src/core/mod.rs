/// Customer records and the per-customer detail summary
pub mod customer;
/// Today's totals and product quantities
pub mod dashboard;
/// Pending and delivered status changes
pub mod delivery;
/// Currency and item text formatting
pub mod format;
/// Placing, listing, grouping and deleting daily orders
pub mod order;
/// Accumulating payments against orders
pub mod payment;
/// Price of an entered quantity
pub mod pricing;
/// Product catalog records
pub mod product;
/// Per-customer statements over a date range
pub mod statement;
/// Unit conversion and quantity presets
pub mod units;
