//! Tests for summary aggregation and growth.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use chrono::NaiveDate;

use super::service::SummaryService;
use super::types::{PeriodKind, PeriodTotals, TransactionFacts};
use crate::ledger::{TransactionKind, pricing};

fn sale(total: Decimal, profit: Decimal) -> TransactionFacts {
    TransactionFacts {
        kind: TransactionKind::Sale,
        total_amount: total,
        profit,
    }
}

fn purchase(total: Decimal) -> TransactionFacts {
    TransactionFacts {
        kind: TransactionKind::Purchase,
        total_amount: total,
        profit: Decimal::ZERO,
    }
}

fn ret(total: Decimal) -> TransactionFacts {
    TransactionFacts {
        kind: TransactionKind::Return,
        total_amount: total,
        profit: Decimal::ZERO,
    }
}

#[test]
fn test_empty_window_aggregates_to_zeros() {
    assert_eq!(
        SummaryService::aggregate(std::iter::empty()),
        PeriodTotals::default()
    );
}

#[test]
fn test_mixed_kinds() {
    let totals = SummaryService::aggregate([
        sale(dec!(250000), dec!(100000)),
        sale(dec!(50000), dec!(20000)),
        purchase(dec!(300000)),
        ret(dec!(25000)),
    ]);

    assert_eq!(totals.total_sales, dec!(300000));
    assert_eq!(totals.total_purchases, dec!(300000));
    assert_eq!(totals.total_transactions, 4);
    assert_eq!(totals.profit_loss, dec!(120000));
}

#[test]
fn test_returns_count_but_contribute_nothing() {
    let totals = SummaryService::aggregate([ret(dec!(1000)), ret(dec!(2000))]);
    assert_eq!(totals.total_sales, dec!(0));
    assert_eq!(totals.total_purchases, dec!(0));
    assert_eq!(totals.profit_loss, dec!(0));
    assert_eq!(totals.total_transactions, 2);
}

#[test]
fn test_aggregation_is_deterministic() {
    let facts = [
        sale(dec!(100), dec!(40)),
        purchase(dec!(70)),
        sale(dec!(30), dec!(10)),
    ];
    assert_eq!(
        SummaryService::aggregate(facts),
        SummaryService::aggregate(facts)
    );
}

#[test]
fn test_adding_a_sale_grows_totals() {
    let before = SummaryService::aggregate([sale(dec!(100), dec!(40))]);
    let after = SummaryService::aggregate([sale(dec!(100), dec!(40)), sale(dec!(60), dec!(25))]);

    assert!(after.total_sales > before.total_sales);
    assert!(after.total_transactions > before.total_transactions);
    assert!(after.profit_loss > before.profit_loss);
}

#[test]
fn test_sale_scenario_from_ledger() {
    // Product costing 15000, sold 10 units at 25000 each.
    let total = pricing::total_amount(10, dec!(25000));
    let profit = pricing::sale_profit(TransactionKind::Sale, 10, dec!(25000), Some(dec!(15000)));
    let totals = SummaryService::aggregate([sale(total, profit)]);

    assert_eq!(totals.total_sales, dec!(250000));
    assert_eq!(totals.profit_loss, dec!(100000));
    assert_eq!(totals.total_transactions, 1);
}

// ============================================================================
// Window dispatch
// ============================================================================

#[test]
fn test_kind_dispatches_to_the_right_window() {
    let wednesday = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();

    let daily = PeriodKind::Daily.window(wednesday);
    assert_eq!(daily.start, wednesday);
    assert_eq!(daily.end, wednesday);

    let weekly = PeriodKind::Weekly.window(wednesday);
    assert_eq!(weekly.start, NaiveDate::from_ymd_opt(2026, 8, 3).unwrap());
    assert_eq!(weekly.end, NaiveDate::from_ymd_opt(2026, 8, 9).unwrap());

    let monthly = PeriodKind::Monthly.window(wednesday);
    assert_eq!(monthly.start, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());

    let yearly = PeriodKind::Yearly.window(wednesday);
    assert_eq!(yearly.end, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
}

#[test]
fn test_prior_window_abuts_current_window() {
    let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();

    for kind in [
        PeriodKind::Daily,
        PeriodKind::Weekly,
        PeriodKind::Monthly,
        PeriodKind::Yearly,
    ] {
        let current = kind.window(date);
        let prior = kind.prior_window(date);
        assert_eq!(prior.end.succ_opt().unwrap(), current.start);
    }
}

// ============================================================================
// Growth boundaries
// ============================================================================

#[test]
fn test_growth_flat_when_both_empty() {
    assert_eq!(
        SummaryService::growth_percent(dec!(0), dec!(0)),
        Decimal::ZERO
    );
}

#[test]
fn test_growth_from_nothing_is_one_hundred() {
    assert_eq!(
        SummaryService::growth_percent(dec!(0), dec!(500)),
        dec!(100)
    );
}

#[test]
fn test_growth_ratio() {
    assert_eq!(
        SummaryService::growth_percent(dec!(200), dec!(300)),
        dec!(50)
    );
    assert_eq!(
        SummaryService::growth_percent(dec!(400), dec!(100)),
        dec!(-75)
    );
}

#[test]
fn test_growth_rounds_to_two_places() {
    assert_eq!(
        SummaryService::growth_percent(dec!(300), dec!(400)),
        dec!(33.33)
    );
}

// ============================================================================
// Properties
// ============================================================================

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_00).prop_map(|n| Decimal::new(n, 2))
}

fn facts_strategy() -> impl Strategy<Value = TransactionFacts> {
    (0usize..3, amount_strategy(), amount_strategy()).prop_map(|(kind_idx, total, profit)| {
        let kind = [
            TransactionKind::Sale,
            TransactionKind::Purchase,
            TransactionKind::Return,
        ][kind_idx];
        TransactionFacts {
            kind,
            total_amount: total,
            profit: if kind == TransactionKind::Sale {
                profit
            } else {
                Decimal::ZERO
            },
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every transaction in the window is counted, whatever its kind.
    #[test]
    fn prop_count_matches_input(facts in proptest::collection::vec(facts_strategy(), 0..50)) {
        let totals = SummaryService::aggregate(facts.clone());
        prop_assert_eq!(totals.total_transactions, i32::try_from(facts.len()).unwrap());
    }

    /// Sales totals equal the sum over sale facts alone.
    #[test]
    fn prop_sales_sum(facts in proptest::collection::vec(facts_strategy(), 0..50)) {
        let expected: Decimal = facts
            .iter()
            .filter(|f| f.kind == TransactionKind::Sale)
            .map(|f| f.total_amount)
            .sum();
        let totals = SummaryService::aggregate(facts);
        prop_assert_eq!(totals.total_sales, expected);
    }

    /// Aggregation splits across any partition of the window.
    #[test]
    fn prop_aggregation_is_additive(
        left in proptest::collection::vec(facts_strategy(), 0..25),
        right in proptest::collection::vec(facts_strategy(), 0..25),
    ) {
        let whole = SummaryService::aggregate(left.iter().chain(right.iter()).copied());
        let a = SummaryService::aggregate(left);
        let b = SummaryService::aggregate(right);

        prop_assert_eq!(whole.total_sales, a.total_sales + b.total_sales);
        prop_assert_eq!(whole.total_purchases, a.total_purchases + b.total_purchases);
        prop_assert_eq!(whole.total_transactions, a.total_transactions + b.total_transactions);
        prop_assert_eq!(whole.profit_loss, a.profit_loss + b.profit_loss);
    }

    /// Growth against a non-zero base is finite and symmetric around zero change.
    #[test]
    fn prop_growth_zero_when_unchanged(sales in amount_strategy()) {
        prop_assume!(!sales.is_zero());
        prop_assert_eq!(SummaryService::growth_percent(sales, sales), Decimal::ZERO);
    }
}
