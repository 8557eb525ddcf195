//! Derived amounts for transactions.
//!
//! `total_amount` and `profit` are always recomputed at write time from
//! quantity, unit price, and the product's cost price.

use rust_decimal::Decimal;

use super::types::TransactionKind;

/// Total amount of a transaction: quantity x unit price.
#[must_use]
pub fn total_amount(quantity: i32, unit_price: Decimal) -> Decimal {
    Decimal::from(quantity) * unit_price
}

/// Profit of a transaction.
///
/// Only sales earn profit: `(unit_price - cost_price) x quantity`, with a
/// missing cost price treated as zero cost. PURCHASE and RETURN yield zero.
#[must_use]
pub fn sale_profit(
    kind: TransactionKind,
    quantity: i32,
    unit_price: Decimal,
    cost_price: Option<Decimal>,
) -> Decimal {
    if kind != TransactionKind::Sale {
        return Decimal::ZERO;
    }
    let cost = cost_price.unwrap_or(Decimal::ZERO);
    (unit_price - cost) * Decimal::from(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_total_amount() {
        assert_eq!(total_amount(10, dec!(25000)), dec!(250000));
        assert_eq!(total_amount(0, dec!(25000)), dec!(0));
    }

    #[test]
    fn test_sale_profit() {
        // Scenario from the sales ledger: 10 units at 25000 costing 15000 each.
        assert_eq!(
            sale_profit(TransactionKind::Sale, 10, dec!(25000), Some(dec!(15000))),
            dec!(100000)
        );
    }

    #[test]
    fn test_missing_cost_price_treated_as_zero() {
        assert_eq!(
            sale_profit(TransactionKind::Sale, 3, dec!(500), None),
            dec!(1500)
        );
    }

    #[test]
    fn test_non_sale_kinds_earn_nothing() {
        assert_eq!(
            sale_profit(TransactionKind::Purchase, 10, dec!(25000), Some(dec!(15000))),
            dec!(0)
        );
        assert_eq!(
            sale_profit(TransactionKind::Return, 10, dec!(25000), Some(dec!(15000))),
            dec!(0)
        );
    }

    #[test]
    fn test_selling_below_cost_is_negative_profit() {
        assert_eq!(
            sale_profit(TransactionKind::Sale, 2, dec!(100), Some(dec!(150))),
            dec!(-100)
        );
    }
}
