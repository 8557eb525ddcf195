//! Product repository for catalog CRUD and stock alerts.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use duka_core::catalog;

use crate::entities::products;

/// Error types for product operations.
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    /// Product not found.
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    /// Optional category reference.
    pub category_id: Option<Uuid>,
    /// Product name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Selling price.
    pub price: Decimal,
    /// Buying price.
    pub cost_price: Decimal,
    /// Initial stock on hand.
    pub stock_quantity: i32,
    /// Low-stock alert level.
    pub min_stock_level: i32,
}

/// Input for updating a product. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    /// New category reference.
    pub category_id: Option<Option<Uuid>>,
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New selling price.
    pub price: Option<Decimal>,
    /// New buying price.
    pub cost_price: Option<Decimal>,
    /// New low-stock alert level.
    pub min_stock_level: Option<i32>,
    /// Activate or deactivate the product.
    pub is_active: Option<bool>,
}

/// Product repository.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    /// Creates a new product repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, input: CreateProductInput) -> Result<products::Model, ProductError> {
        let now = Utc::now().into();
        let product = products::ActiveModel {
            id: Set(Uuid::new_v4()),
            category_id: Set(input.category_id),
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            cost_price: Set(input.cost_price),
            stock_quantity: Set(input.stock_quantity),
            min_stock_level: Set(input.min_stock_level),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(product.insert(&self.db).await?)
    }

    /// Lists products by name, optionally filtered by active flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, is_active: Option<bool>) -> Result<Vec<products::Model>, ProductError> {
        let mut query = products::Entity::find();

        if let Some(active) = is_active {
            query = query.filter(products::Column::IsActive.eq(active));
        }

        let products = query
            .order_by_asc(products::Column::Name)
            .all(&self.db)
            .await?;
        Ok(products)
    }

    /// Gets a product by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the query fails.
    pub async fn get(&self, product_id: Uuid) -> Result<products::Model, ProductError> {
        products::Entity::find_by_id(product_id)
            .one(&self.db)
            .await?
            .ok_or(ProductError::NotFound(product_id))
    }

    /// Updates product attributes. Stock is NOT writable here; it only moves
    /// through recorded transactions.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the update fails.
    pub async fn update(
        &self,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> Result<products::Model, ProductError> {
        let product = self.get(product_id).await?;

        let mut active: products::ActiveModel = product.into();
        if let Some(category_id) = input.category_id {
            active.category_id = Set(category_id);
        }
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(cost_price) = input.cost_price {
            active.cost_price = Set(cost_price);
        }
        if let Some(min_stock_level) = input.min_stock_level {
            active.min_stock_level = Set(min_stock_level);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a product and its transactions.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the delete fails.
    pub async fn delete(&self, product_id: Uuid) -> Result<(), ProductError> {
        let result = products::Entity::delete_by_id(product_id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ProductError::NotFound(product_id));
        }
        Ok(())
    }

    /// Lists active products that need restocking: at or below their own
    /// minimum, or under the fixed low-stock threshold.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_low_stock(&self) -> Result<Vec<products::Model>, ProductError> {
        let mut products = self.list(Some(true)).await?;
        products.retain(|p| catalog::is_low_stock(p.stock_quantity, p.min_stock_level));
        products.sort_by_key(|p| p.stock_quantity);
        Ok(products)
    }
}
