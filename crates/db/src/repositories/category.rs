//! Category repository for product category CRUD.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::categories;

/// Error types for category operations.
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    /// Category not found.
    #[error("Category not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    /// Category name (unique).
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Input for updating a category. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Category repository.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (e.g. duplicate name).
    pub async fn create(
        &self,
        input: CreateCategoryInput,
    ) -> Result<categories::Model, CategoryError> {
        let category = categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            description: Set(input.description),
            created_at: Set(Utc::now().into()),
        };

        Ok(category.insert(&self.db).await?)
    }

    /// Lists all categories by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self) -> Result<Vec<categories::Model>, CategoryError> {
        let categories = categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await?;
        Ok(categories)
    }

    /// Gets a category by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the category does not exist or the query fails.
    pub async fn get(&self, category_id: Uuid) -> Result<categories::Model, CategoryError> {
        categories::Entity::find_by_id(category_id)
            .one(&self.db)
            .await?
            .ok_or(CategoryError::NotFound(category_id))
    }

    /// Updates a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the category does not exist or the update fails.
    pub async fn update(
        &self,
        category_id: Uuid,
        input: UpdateCategoryInput,
    ) -> Result<categories::Model, CategoryError> {
        let category = self.get(category_id).await?;

        let mut active: categories::ActiveModel = category.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a category. Products keep existing with their category unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the category does not exist or the delete fails.
    pub async fn delete(&self, category_id: Uuid) -> Result<(), CategoryError> {
        let result = categories::Entity::delete_by_id(category_id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(CategoryError::NotFound(category_id));
        }
        Ok(())
    }
}
