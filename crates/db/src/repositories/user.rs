//! User repository for role lookups and user administration reads.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use duka_core::access::Role;

use crate::entities::{sea_orm_active_enums::UserRole, users};

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// User not found.
    #[error("User not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Maps the stored role onto the domain role used for permission checks.
#[must_use]
pub fn domain_role(role: &UserRole) -> Role {
    match role {
        UserRole::Boss => Role::Boss,
        UserRole::Manager => Role::Manager,
        UserRole::Seller => Role::Seller,
    }
}

/// User repository.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the query fails.
    pub async fn find_by_id(&self, user_id: Uuid) -> Result<users::Model, UserError> {
        users::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or(UserError::NotFound(user_id))
    }

    /// Finds an active user by ID. Inactive users are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if no active user exists or the query fails.
    pub async fn find_active_by_id(&self, user_id: Uuid) -> Result<users::Model, UserError> {
        users::Entity::find_by_id(user_id)
            .filter(users::Column::IsActive.eq(true))
            .one(&self.db)
            .await?
            .ok_or(UserError::NotFound(user_id))
    }

    /// Lists all users, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self) -> Result<Vec<users::Model>, UserError> {
        let users = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_role_mapping() {
        assert_eq!(domain_role(&UserRole::Boss), Role::Boss);
        assert_eq!(domain_role(&UserRole::Manager), Role::Manager);
        assert_eq!(domain_role(&UserRole::Seller), Role::Seller);
    }
}
