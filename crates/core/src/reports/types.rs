//! Summary data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::TransactionKind;
use crate::period::{
    self, PeriodWindow, day_window, month_window, week_window, year_window,
};

/// Granularity of a materialized summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    /// One calendar day.
    Daily,
    /// One Monday-to-Sunday week.
    Weekly,
    /// One calendar month.
    Monthly,
    /// One calendar year.
    Yearly,
}

impl PeriodKind {
    /// The window of this granularity containing `date`.
    #[must_use]
    pub fn window(self, date: NaiveDate) -> PeriodWindow {
        match self {
            Self::Daily => day_window(date),
            Self::Weekly => week_window(date),
            Self::Monthly => month_window(date),
            Self::Yearly => year_window(date),
        }
    }

    /// The window of this granularity immediately before the one
    /// containing `date`.
    #[must_use]
    pub fn prior_window(self, date: NaiveDate) -> PeriodWindow {
        match self {
            Self::Daily => period::prior_day_window(date),
            Self::Weekly => period::prior_week_window(date),
            Self::Monthly => period::prior_month_window(date),
            Self::Yearly => period::prior_year_window(date),
        }
    }
}

/// The facts about one transaction that aggregation needs.
#[derive(Debug, Clone, Copy)]
pub struct TransactionFacts {
    /// Transaction kind.
    pub kind: TransactionKind,
    /// Derived total amount.
    pub total_amount: Decimal,
    /// Derived profit (zero for non-sales).
    pub profit: Decimal,
}

/// Derived totals for one period window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Sum of total_amount over SALE transactions.
    pub total_sales: Decimal,
    /// Sum of total_amount over PURCHASE transactions.
    pub total_purchases: Decimal,
    /// Count of all transactions in the window, any kind.
    pub total_transactions: i32,
    /// Sum of profit over SALE transactions.
    pub profit_loss: Decimal,
}
