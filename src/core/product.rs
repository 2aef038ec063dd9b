//! Product business logic - Handles all product-related operations.
//!
//! Products are scoped to an owning account: every lookup, update and delete
//! filters on `user_id`, and another account's product is reported as not found.
//! Deleting a product leaves existing orders untouched since their items are
//! snapshots.

use crate::{
    config::catalog::ProductConfig,
    entities::{Product, Unit, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// Fields a user supplies when creating or editing a product
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    /// Display name
    pub name: String,
    /// Price for `quantity` of `unit`
    pub price: f64,
    /// Amount of `unit` the price buys
    pub quantity: f64,
    /// Unit the product is sold in
    pub unit: Unit,
    /// Optional photo URL
    pub photo: Option<String>,
}

impl ProductInput {
    /// Checks the input and returns the trimmed name.
    ///
    /// # Errors
    /// Returns an error if the name is blank, the price is negative or not finite,
    /// or the quantity is not a finite positive number.
    pub fn validate(&self) -> Result<String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidName {
                field: "Product name",
            });
        }

        if self.price < 0.0 || !self.price.is_finite() {
            return Err(Error::InvalidAmount { amount: self.price });
        }

        if self.quantity <= 0.0 || !self.quantity.is_finite() {
            return Err(Error::InvalidQuantity {
                quantity: self.quantity,
            });
        }

        Ok(name.to_string())
    }
}

fn clean_photo(photo: Option<String>) -> Option<String> {
    photo
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
}

/// Retrieves every product of the account, ordered alphabetically by name.
pub async fn get_all_products(db: &DatabaseConnection, user_id: &str) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::UserId.eq(user_id))
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID, `None` if missing or owned by
/// another account.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    user_id: &str,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .filter(product::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a product of the account by exact name.
pub async fn get_product_by_name(
    db: &DatabaseConnection,
    user_id: &str,
    name: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::UserId.eq(user_id))
        .filter(product::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new product after validating the input.
///
/// # Errors
/// Returns an error if validation fails (see [`ProductInput::validate`]) or the
/// insert fails.
pub async fn create_product(
    db: &DatabaseConnection,
    user_id: &str,
    input: ProductInput,
) -> Result<product::Model> {
    let name = input.validate()?;

    let product = product::ActiveModel {
        user_id: Set(user_id.to_string()),
        name: Set(name),
        price: Set(input.price),
        quantity: Set(input.quantity),
        unit: Set(input.unit),
        photo: Set(clean_photo(input.photo)),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let created = product.insert(db).await?;
    info!("Created product {} ({})", created.name, created.id);
    Ok(created)
}

/// Replaces the editable fields of an existing product.
///
/// Orders already placed keep the name, unit and price they were created with.
///
/// # Errors
/// Returns an error if validation fails, the product does not exist for the
/// account, or the update fails.
pub async fn update_product(
    db: &DatabaseConnection,
    user_id: &str,
    product_id: i64,
    input: ProductInput,
) -> Result<product::Model> {
    let name = input.validate()?;

    let mut product: product::ActiveModel = get_product_by_id(db, user_id, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?
        .into();

    product.name = Set(name);
    product.price = Set(input.price);
    product.quantity = Set(input.quantity);
    product.unit = Set(input.unit);
    product.photo = Set(clean_photo(input.photo));

    product.update(db).await.map_err(Into::into)
}

/// Permanently deletes a product.
///
/// # Errors
/// Returns an error if the product does not exist for the account or the delete
/// fails.
pub async fn delete_product(db: &DatabaseConnection, user_id: &str, product_id: i64) -> Result<()> {
    let result = Product::delete_many()
        .filter(product::Column::Id.eq(product_id))
        .filter(product::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::ProductNotFound { id: product_id });
    }

    info!("Deleted product {}", product_id);
    Ok(())
}

/// Inserts catalog products whose names the account does not have yet.
///
/// Returns the number of products inserted.
pub async fn seed_products(
    db: &DatabaseConnection,
    user_id: &str,
    catalog: &[ProductConfig],
) -> Result<usize> {
    let mut inserted = 0;

    for entry in catalog {
        if get_product_by_name(db, user_id, entry.name.trim())
            .await?
            .is_some()
        {
            debug!("Catalog product {} already present", entry.name);
            continue;
        }

        create_product(
            db,
            user_id,
            ProductInput {
                name: entry.name.clone(),
                price: entry.price,
                quantity: entry.quantity,
                unit: entry.unit,
                photo: None,
            },
        )
        .await?;
        inserted += 1;
    }

    Ok(inserted)
}
