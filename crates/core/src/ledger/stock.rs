//! Stock mutation rules.
//!
//! The one place stock arithmetic happens. Callers persist the returned
//! value together with the transaction row, or not at all.

use thiserror::Error;

use super::types::TransactionKind;

/// Errors from applying a stock change.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StockError {
    /// A sale asked for more units than are on hand.
    #[error("Insufficient stock: have {available}, requested {requested}")]
    Insufficient {
        /// Units currently on hand.
        available: i32,
        /// Units the sale asked for.
        requested: i32,
    },
}

/// Applies a transaction's stock movement and returns the new stock level.
///
/// SALE requires `current_stock >= quantity` and subtracts; PURCHASE and
/// RETURN add unconditionally.
///
/// # Errors
///
/// Returns [`StockError::Insufficient`] when a sale would drive stock below
/// zero. The caller must not persist anything in that case.
pub fn apply_stock_change(
    current_stock: i32,
    kind: TransactionKind,
    quantity: i32,
) -> Result<i32, StockError> {
    match kind {
        TransactionKind::Sale => {
            if current_stock < quantity {
                return Err(StockError::Insufficient {
                    available: current_stock,
                    requested: quantity,
                });
            }
            Ok(current_stock - quantity)
        }
        TransactionKind::Purchase | TransactionKind::Return => Ok(current_stock + quantity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sale_reduces_stock() {
        assert_eq!(apply_stock_change(100, TransactionKind::Sale, 10), Ok(90));
    }

    #[test]
    fn test_sale_of_entire_stock_allowed() {
        assert_eq!(apply_stock_change(10, TransactionKind::Sale, 10), Ok(0));
    }

    #[test]
    fn test_oversell_rejected() {
        assert_eq!(
            apply_stock_change(5, TransactionKind::Sale, 6),
            Err(StockError::Insufficient {
                available: 5,
                requested: 6,
            })
        );
    }

    #[test]
    fn test_purchase_and_return_add() {
        assert_eq!(apply_stock_change(5, TransactionKind::Purchase, 20), Ok(25));
        assert_eq!(apply_stock_change(5, TransactionKind::Return, 2), Ok(7));
    }

    proptest! {
        /// Stock after a successful mutation is never negative.
        #[test]
        fn prop_stock_never_negative(
            stock in 0i32..100_000,
            quantity in 1i32..10_000,
            kind_idx in 0usize..3,
        ) {
            let kind = [
                TransactionKind::Sale,
                TransactionKind::Purchase,
                TransactionKind::Return,
            ][kind_idx];

            if let Ok(updated) = apply_stock_change(stock, kind, quantity) {
                prop_assert!(updated >= 0);
            }
        }

        /// A failed sale reports the exact shortfall inputs.
        #[test]
        fn prop_failed_sale_preserves_inputs(stock in 0i32..1_000, excess in 1i32..1_000) {
            let quantity = stock + excess;
            let err = apply_stock_change(stock, TransactionKind::Sale, quantity).unwrap_err();
            prop_assert_eq!(err, StockError::Insufficient {
                available: stock,
                requested: quantity,
            });
        }
    }
}
