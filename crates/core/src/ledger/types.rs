//! Ledger domain types.

use serde::{Deserialize, Serialize};

/// Kind of inventory transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Stock leaves the shop; the only kind that earns profit.
    Sale,
    /// Restocking from a supplier.
    Purchase,
    /// A customer return. Stock comes back; no profit reversal is tracked.
    Return,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sale => write!(f, "SALE"),
            Self::Purchase => write!(f, "PURCHASE"),
            Self::Return => write!(f, "RETURN"),
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SALE" => Ok(Self::Sale),
            "PURCHASE" => Ok(Self::Purchase),
            "RETURN" => Ok(Self::Return),
            _ => Err(format!("Unknown transaction type: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_roundtrip() {
        for kind in [
            TransactionKind::Sale,
            TransactionKind::Purchase,
            TransactionKind::Return,
        ] {
            assert_eq!(TransactionKind::from_str(&kind.to_string()).unwrap(), kind);
        }
        assert_eq!(
            TransactionKind::from_str("sale").unwrap(),
            TransactionKind::Sale
        );
        assert!(TransactionKind::from_str("REFUND").is_err());
    }
}
