//! Summary aggregation service.

use rust_decimal::Decimal;

use super::types::{PeriodTotals, TransactionFacts};
use crate::ledger::TransactionKind;

/// Service for computing period totals and growth figures.
pub struct SummaryService;

impl SummaryService {
    /// Folds transaction facts into period totals.
    ///
    /// Sales contribute to `total_sales` and `profit_loss`, purchases to
    /// `total_purchases`, returns only to the transaction count. Running
    /// this twice over the same facts yields identical totals.
    #[must_use]
    pub fn aggregate<I>(transactions: I) -> PeriodTotals
    where
        I: IntoIterator<Item = TransactionFacts>,
    {
        let mut totals = PeriodTotals::default();

        for tx in transactions {
            totals.total_transactions += 1;
            match tx.kind {
                TransactionKind::Sale => {
                    totals.total_sales += tx.total_amount;
                    totals.profit_loss += tx.profit;
                }
                TransactionKind::Purchase => {
                    totals.total_purchases += tx.total_amount;
                }
                TransactionKind::Return => {}
            }
        }

        totals
    }

    /// Sales growth versus the preceding period, as a percentage.
    ///
    /// A period growing out of nothing is 100%; two empty periods are flat.
    #[must_use]
    pub fn growth_percent(previous_sales: Decimal, current_sales: Decimal) -> Decimal {
        if previous_sales.is_zero() {
            if current_sales.is_zero() {
                Decimal::ZERO
            } else {
                Decimal::ONE_HUNDRED
            }
        } else {
            ((current_sales - previous_sales) / previous_sales * Decimal::ONE_HUNDRED).round_dp(2)
        }
    }
}
