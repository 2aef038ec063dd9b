//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the records supplied by the data store.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod customer;
pub mod daily_order;
pub mod product;
pub mod unit;

// Re-export specific types to avoid conflicts
pub use customer::{Column as CustomerColumn, Entity as Customer, Model as CustomerModel};
pub use daily_order::{
    Column as DailyOrderColumn, Entity as DailyOrder, Model as DailyOrderModel, OrderItem,
    OrderItems, OrderStatus,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use unit::Unit;
