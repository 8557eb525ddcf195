//! Product-side calculations and stock alerts.

use rust_decimal::Decimal;

/// Fixed stock level below which any product counts as low, regardless of
/// its configured minimum.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// Profit earned per unit sold at list price. Missing prices count as zero.
#[must_use]
pub fn profit_per_unit(price: Option<Decimal>, cost_price: Option<Decimal>) -> Decimal {
    price.unwrap_or(Decimal::ZERO) - cost_price.unwrap_or(Decimal::ZERO)
}

/// Returns true if a product should appear in the low-stock alert: at or
/// below its configured minimum, or under the fixed threshold.
#[must_use]
pub fn is_low_stock(stock_quantity: i32, min_stock_level: i32) -> bool {
    stock_quantity <= min_stock_level || stock_quantity < LOW_STOCK_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_profit_per_unit() {
        assert_eq!(
            profit_per_unit(Some(dec!(25000)), Some(dec!(15000))),
            dec!(10000)
        );
        assert_eq!(profit_per_unit(None, Some(dec!(15000))), dec!(-15000));
        assert_eq!(profit_per_unit(Some(dec!(25000)), None), dec!(25000));
        assert_eq!(profit_per_unit(None, None), dec!(0));
    }

    #[test]
    fn test_low_stock_by_configured_minimum() {
        assert!(is_low_stock(15, 15));
        assert!(!is_low_stock(16, 15));
    }

    #[test]
    fn test_low_stock_by_fixed_threshold() {
        // Minimum of zero still alerts under the fixed threshold.
        assert!(is_low_stock(9, 0));
        assert!(!is_low_stock(10, 0));
    }
}
