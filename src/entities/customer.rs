//! Customer entity - Households and shops on the delivery round.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    /// Unique identifier for the customer
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning account
    pub user_id: String,
    /// Display name
    pub name: String,
    /// Delivery address
    pub address: String,
    /// Phone number
    pub contact_number: String,
    /// When the customer was created
    pub created_at: DateTimeUtc,
}

/// Orders keep the customer's name as a snapshot, so no relation is declared
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
