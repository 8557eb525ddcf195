//! Roles and their capabilities.
//!
//! Permissions are explicit: every operation that is role-gated takes a
//! `Role` parameter instead of consulting ambient request state.

use serde::{Deserialize, Serialize};

/// Role of a back-office user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Owner. Full access, including profit reports.
    Boss,
    /// Manages catalog and stock, sees all transactions.
    Manager,
    /// Records sales; sees only their own transactions.
    Seller,
}

impl Role {
    /// Returns true if this role may view profit/summary reports.
    #[must_use]
    pub fn can_view_reports(self) -> bool {
        matches!(self, Self::Boss)
    }

    /// Returns true if this role may create or modify products and categories.
    #[must_use]
    pub fn can_manage_catalog(self) -> bool {
        matches!(self, Self::Boss | Self::Manager)
    }

    /// Returns true if this role sees every transaction, not just its own.
    #[must_use]
    pub fn can_view_all_transactions(self) -> bool {
        matches!(self, Self::Boss | Self::Manager)
    }

    /// Returns true if this role may administer users.
    #[must_use]
    pub fn can_manage_users(self) -> bool {
        matches!(self, Self::Boss)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Boss => write!(f, "BOSS"),
            Self::Manager => write!(f, "MANAGER"),
            Self::Seller => write!(f, "SELLER"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BOSS" => Ok(Self::Boss),
            "MANAGER" => Ok(Self::Manager),
            "SELLER" => Ok(Self::Seller),
            _ => Err(format!("Unknown role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_only_boss_views_reports() {
        assert!(Role::Boss.can_view_reports());
        assert!(!Role::Manager.can_view_reports());
        assert!(!Role::Seller.can_view_reports());
    }

    #[test]
    fn test_catalog_management() {
        assert!(Role::Boss.can_manage_catalog());
        assert!(Role::Manager.can_manage_catalog());
        assert!(!Role::Seller.can_manage_catalog());
    }

    #[test]
    fn test_transaction_visibility() {
        assert!(Role::Manager.can_view_all_transactions());
        assert!(!Role::Seller.can_view_all_transactions());
    }

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::Boss, Role::Manager, Role::Seller] {
            assert_eq!(Role::from_str(&role.to_string()).unwrap(), role);
        }
        assert_eq!(Role::from_str("seller").unwrap(), Role::Seller);
        assert!(Role::from_str("INTERN").is_err());
    }
}
