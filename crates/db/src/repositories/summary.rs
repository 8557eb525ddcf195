//! Summary repository: materializes period rollups from the transaction table.
//!
//! Each granularity follows the same shape: resolve the period window, pull
//! the transactions inside it, fold them into totals, then upsert the one
//! summary row keyed by the period identity. Re-running with unchanged data
//! writes the same values back (last writer wins, no versioning).

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use duka_core::period::PeriodWindow;
use duka_core::reports::{PeriodKind, PeriodTotals, SummaryService, TransactionFacts};

use crate::entities::{
    daily_summaries, monthly_summaries, transactions, weekly_summaries, yearly_summaries,
};
use crate::repositories::transaction::to_domain_kind;

/// How many daily rows the historical read returns.
pub const RECENT_DAILY_ROWS: u64 = 30;
/// How many weekly rows the historical read returns.
pub const RECENT_WEEKLY_ROWS: u64 = 12;
/// How many monthly rows the historical read returns.
pub const RECENT_MONTHLY_ROWS: u64 = 12;
/// How many yearly rows the historical read returns.
pub const RECENT_YEARLY_ROWS: u64 = 5;

/// Error types for summary operations.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// One full materialization pass: the four fresh rows plus growth versus
/// the immediately preceding period (yearly carries none).
#[derive(Debug, Clone)]
pub struct GeneratedSummaries {
    /// Today's summary row.
    pub daily: daily_summaries::Model,
    /// Sales growth versus yesterday, percent.
    pub daily_growth: Decimal,
    /// This week's summary row.
    pub weekly: weekly_summaries::Model,
    /// Sales growth versus last week, percent.
    pub weekly_growth: Decimal,
    /// This month's summary row.
    pub monthly: monthly_summaries::Model,
    /// Sales growth versus last month, percent.
    pub monthly_growth: Decimal,
    /// This year's summary row.
    pub yearly: yearly_summaries::Model,
}

/// Converts an inclusive date window into half-open UTC datetime bounds.
///
/// A transaction timestamped anywhere on the window's last day is inside;
/// the first instant of the following day is out.
pub(crate) fn utc_bounds(window: &PeriodWindow) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = window
        .start
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now);
    let end = window
        .end
        .succ_opt()
        .and_then(|next| next.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now);
    (start, end)
}

/// Summary repository.
#[derive(Debug, Clone)]
pub struct SummaryRepository {
    db: DatabaseConnection,
}

impl SummaryRepository {
    /// Creates a new summary repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Folds every transaction inside the window into period totals.
    async fn window_totals(&self, window: &PeriodWindow) -> Result<PeriodTotals, SummaryError> {
        let (start, end) = utc_bounds(window);

        let rows = transactions::Entity::find()
            .filter(transactions::Column::TransactionDate.gte(start))
            .filter(transactions::Column::TransactionDate.lt(end))
            .all(&self.db)
            .await?;

        let facts = rows.iter().map(|tx| TransactionFacts {
            kind: to_domain_kind(&tx.transaction_type),
            total_amount: tx.total_amount,
            profit: tx.profit,
        });

        Ok(SummaryService::aggregate(facts))
    }

    /// Materializes the daily summary for `date` (get-or-create, then
    /// overwrite).
    ///
    /// # Errors
    ///
    /// Returns an error if the database fails.
    pub async fn materialize_daily(
        &self,
        date: NaiveDate,
    ) -> Result<daily_summaries::Model, SummaryError> {
        let totals = self.window_totals(&PeriodKind::Daily.window(date)).await?;

        let existing = daily_summaries::Entity::find()
            .filter(daily_summaries::Column::SummaryDate.eq(date))
            .one(&self.db)
            .await?;

        let model = match existing {
            Some(row) => {
                let mut active: daily_summaries::ActiveModel = row.into();
                Self::overwrite_daily(&mut active, &totals);
                active.update(&self.db).await?
            }
            None => {
                let mut active = daily_summaries::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    summary_date: Set(date),
                    ..Default::default()
                };
                Self::overwrite_daily(&mut active, &totals);
                active.insert(&self.db).await?
            }
        };

        Ok(model)
    }

    fn overwrite_daily(active: &mut daily_summaries::ActiveModel, totals: &PeriodTotals) {
        active.total_sales = Set(totals.total_sales);
        active.total_purchases = Set(totals.total_purchases);
        active.total_transactions = Set(totals.total_transactions);
        active.profit_loss = Set(totals.profit_loss);
        active.updated_at = Set(Utc::now().into());
    }

    /// Materializes the weekly summary for the week containing `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database fails.
    pub async fn materialize_weekly(
        &self,
        date: NaiveDate,
    ) -> Result<weekly_summaries::Model, SummaryError> {
        let window = PeriodKind::Weekly.window(date);
        let totals = self.window_totals(&window).await?;

        let existing = weekly_summaries::Entity::find()
            .filter(weekly_summaries::Column::WeekStart.eq(window.start))
            .filter(weekly_summaries::Column::WeekEnd.eq(window.end))
            .one(&self.db)
            .await?;

        let model = match existing {
            Some(row) => {
                let mut active: weekly_summaries::ActiveModel = row.into();
                Self::overwrite_weekly(&mut active, &totals);
                active.update(&self.db).await?
            }
            None => {
                let mut active = weekly_summaries::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    week_start: Set(window.start),
                    week_end: Set(window.end),
                    ..Default::default()
                };
                Self::overwrite_weekly(&mut active, &totals);
                active.insert(&self.db).await?
            }
        };

        Ok(model)
    }

    fn overwrite_weekly(active: &mut weekly_summaries::ActiveModel, totals: &PeriodTotals) {
        active.total_sales = Set(totals.total_sales);
        active.total_purchases = Set(totals.total_purchases);
        active.total_transactions = Set(totals.total_transactions);
        active.profit_loss = Set(totals.profit_loss);
        active.updated_at = Set(Utc::now().into());
    }

    /// Materializes the monthly summary for the month containing `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database fails.
    pub async fn materialize_monthly(
        &self,
        date: NaiveDate,
    ) -> Result<monthly_summaries::Model, SummaryError> {
        let totals = self
            .window_totals(&PeriodKind::Monthly.window(date))
            .await?;
        let year = date.year();
        let month = i32::try_from(date.month()).unwrap_or_default();

        let existing = monthly_summaries::Entity::find()
            .filter(monthly_summaries::Column::Year.eq(year))
            .filter(monthly_summaries::Column::Month.eq(month))
            .one(&self.db)
            .await?;

        let model = match existing {
            Some(row) => {
                let mut active: monthly_summaries::ActiveModel = row.into();
                Self::overwrite_monthly(&mut active, &totals);
                active.update(&self.db).await?
            }
            None => {
                let mut active = monthly_summaries::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    year: Set(year),
                    month: Set(month),
                    ..Default::default()
                };
                Self::overwrite_monthly(&mut active, &totals);
                active.insert(&self.db).await?
            }
        };

        Ok(model)
    }

    fn overwrite_monthly(active: &mut monthly_summaries::ActiveModel, totals: &PeriodTotals) {
        active.total_sales = Set(totals.total_sales);
        active.total_purchases = Set(totals.total_purchases);
        active.total_transactions = Set(totals.total_transactions);
        active.profit_loss = Set(totals.profit_loss);
        active.updated_at = Set(Utc::now().into());
    }

    /// Materializes the yearly summary for the year containing `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database fails.
    pub async fn materialize_yearly(
        &self,
        date: NaiveDate,
    ) -> Result<yearly_summaries::Model, SummaryError> {
        let totals = self.window_totals(&PeriodKind::Yearly.window(date)).await?;
        let year = date.year();

        let existing = yearly_summaries::Entity::find()
            .filter(yearly_summaries::Column::Year.eq(year))
            .one(&self.db)
            .await?;

        let model = match existing {
            Some(row) => {
                let mut active: yearly_summaries::ActiveModel = row.into();
                Self::overwrite_yearly(&mut active, &totals);
                active.update(&self.db).await?
            }
            None => {
                let mut active = yearly_summaries::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    year: Set(year),
                    ..Default::default()
                };
                Self::overwrite_yearly(&mut active, &totals);
                active.insert(&self.db).await?
            }
        };

        Ok(model)
    }

    fn overwrite_yearly(active: &mut yearly_summaries::ActiveModel, totals: &PeriodTotals) {
        active.total_sales = Set(totals.total_sales);
        active.total_purchases = Set(totals.total_purchases);
        active.total_transactions = Set(totals.total_transactions);
        active.profit_loss = Set(totals.profit_loss);
        active.updated_at = Set(Utc::now().into());
    }

    /// Runs all four materializations anchored at `today` and computes growth
    /// against each immediately preceding period (none for yearly).
    ///
    /// Prior-period sales come straight from the transaction table, so growth
    /// does not depend on the prior period ever having been materialized.
    ///
    /// # Errors
    ///
    /// Returns an error if the database fails.
    pub async fn generate_all(&self, today: NaiveDate) -> Result<GeneratedSummaries, SummaryError> {
        tracing::debug!(%today, "Materializing all summary granularities");

        let daily = self.materialize_daily(today).await?;
        let weekly = self.materialize_weekly(today).await?;
        let monthly = self.materialize_monthly(today).await?;
        let yearly = self.materialize_yearly(today).await?;

        let prior_day = self
            .window_totals(&PeriodKind::Daily.prior_window(today))
            .await?;
        let prior_week = self
            .window_totals(&PeriodKind::Weekly.prior_window(today))
            .await?;
        let prior_month = self
            .window_totals(&PeriodKind::Monthly.prior_window(today))
            .await?;

        Ok(GeneratedSummaries {
            daily_growth: SummaryService::growth_percent(prior_day.total_sales, daily.total_sales),
            weekly_growth: SummaryService::growth_percent(
                prior_week.total_sales,
                weekly.total_sales,
            ),
            monthly_growth: SummaryService::growth_percent(
                prior_month.total_sales,
                monthly.total_sales,
            ),
            daily,
            weekly,
            monthly,
            yearly,
        })
    }

    /// Most recently materialized daily rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn recent_daily(
        &self,
        limit: u64,
    ) -> Result<Vec<daily_summaries::Model>, SummaryError> {
        let rows = daily_summaries::Entity::find()
            .order_by_desc(daily_summaries::Column::SummaryDate)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Most recently materialized weekly rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn recent_weekly(
        &self,
        limit: u64,
    ) -> Result<Vec<weekly_summaries::Model>, SummaryError> {
        let rows = weekly_summaries::Entity::find()
            .order_by_desc(weekly_summaries::Column::WeekStart)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Most recently materialized monthly rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn recent_monthly(
        &self,
        limit: u64,
    ) -> Result<Vec<monthly_summaries::Model>, SummaryError> {
        let rows = monthly_summaries::Entity::find()
            .order_by_desc(monthly_summaries::Column::Year)
            .order_by_desc(monthly_summaries::Column::Month)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Most recently materialized yearly rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn recent_yearly(
        &self,
        limit: u64,
    ) -> Result<Vec<yearly_summaries::Model>, SummaryError> {
        let rows = yearly_summaries::Entity::find()
            .order_by_desc(yearly_summaries::Column::Year)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_utc_bounds_cover_the_whole_last_day() {
        let window = PeriodKind::Weekly.window(d(2026, 8, 5));
        let (start, end) = utc_bounds(&window);

        assert_eq!(start.date_naive(), d(2026, 8, 3));
        // End is exclusive: first instant of the Monday after.
        assert_eq!(end.date_naive(), d(2026, 8, 10));

        let sunday_evening = d(2026, 8, 9).and_hms_opt(23, 59, 59).unwrap().and_utc();
        assert!(sunday_evening >= start && sunday_evening < end);

        let next_monday = d(2026, 8, 10).and_hms_opt(0, 0, 0).unwrap().and_utc();
        assert!(next_monday >= end);
    }

    #[test]
    fn test_utc_bounds_single_day() {
        let window = PeriodKind::Daily.window(d(2026, 8, 5));
        let (start, end) = utc_bounds(&window);
        assert_eq!(start.date_naive(), d(2026, 8, 5));
        assert_eq!(end.date_naive(), d(2026, 8, 6));
    }

    proptest! {
        /// For any date, the bounds of every granularity start at midnight
        /// and cover exactly the window's days.
        #[test]
        fn prop_bounds_span_whole_days(days in 0i32..20_000, kind_idx in 0usize..4) {
            let base = d(1990, 1, 1);
            let date = base + chrono::Days::new(u64::try_from(days).unwrap());
            let kind = [
                PeriodKind::Daily,
                PeriodKind::Weekly,
                PeriodKind::Monthly,
                PeriodKind::Yearly,
            ][kind_idx];

            let window = kind.window(date);
            let (start, end) = utc_bounds(&window);

            prop_assert_eq!(start.time(), chrono::NaiveTime::MIN);
            prop_assert_eq!(end.time(), chrono::NaiveTime::MIN);
            prop_assert_eq!(start.date_naive(), window.start);
            prop_assert_eq!(end.date_naive(), window.end.succ_opt().unwrap());
            prop_assert!(window.contains(date));
        }
    }
}
