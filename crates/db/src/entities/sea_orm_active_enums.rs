//! Postgres enum types mapped to Rust enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role of a back-office user.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Owner with full access.
    #[sea_orm(string_value = "boss")]
    Boss,
    /// Catalog and stock management.
    #[sea_orm(string_value = "manager")]
    Manager,
    /// Records sales.
    #[sea_orm(string_value = "seller")]
    Seller,
}

/// Kind of inventory transaction.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_type")]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Stock sold to a customer.
    #[sea_orm(string_value = "sale")]
    Sale,
    /// Stock bought from a supplier.
    #[sea_orm(string_value = "purchase")]
    Purchase,
    /// Stock returned by a customer.
    #[sea_orm(string_value = "return")]
    Return,
}
