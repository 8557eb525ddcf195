//! Report routes: summary materialization and historical reads.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::{AppState, error::error_response, extract::ActingUser};
use duka_shared::AppError;
use duka_db::entities::{
    daily_summaries, monthly_summaries, weekly_summaries, yearly_summaries,
};
use duka_db::repositories::summary::{
    GeneratedSummaries, RECENT_DAILY_ROWS, RECENT_MONTHLY_ROWS, RECENT_WEEKLY_ROWS,
    RECENT_YEARLY_ROWS, SummaryError, SummaryRepository,
};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/generate-all-summaries", get(generate_all_summaries))
        .route("/reports/historical-summaries", get(historical_summaries))
}

// ============================================================================
// Response Types
// ============================================================================

/// Daily block of the generated report.
#[derive(Debug, Serialize)]
pub struct DailyReport {
    /// Summary date.
    pub date: String,
    /// Sum of sale amounts.
    pub total_sales: String,
    /// Sum of purchase amounts.
    pub total_purchases: String,
    /// Profit over the day.
    pub profit_loss: String,
    /// Count of all transactions.
    pub total_transactions: i32,
    /// Sales growth versus yesterday, percent.
    pub sales_growth: String,
}

/// Weekly block of the generated report.
#[derive(Debug, Serialize)]
pub struct WeeklyReport {
    /// First day of the week (Monday).
    pub week_start: String,
    /// Last day of the week (Sunday).
    pub week_end: String,
    /// Human-readable window descriptor.
    pub date_range: String,
    /// Sum of sale amounts.
    pub total_sales: String,
    /// Sum of purchase amounts.
    pub total_purchases: String,
    /// Profit over the week.
    pub profit_loss: String,
    /// Count of all transactions.
    pub total_transactions: i32,
    /// Sales growth versus last week, percent.
    pub sales_growth: String,
}

/// Monthly block of the generated report.
#[derive(Debug, Serialize)]
pub struct MonthlyReport {
    /// Calendar year.
    pub year: i32,
    /// Month number (1-12).
    pub month: i32,
    /// Human-readable "month/year" descriptor.
    pub period: String,
    /// Sum of sale amounts.
    pub total_sales: String,
    /// Sum of purchase amounts.
    pub total_purchases: String,
    /// Profit over the month.
    pub profit_loss: String,
    /// Count of all transactions.
    pub total_transactions: i32,
    /// Sales growth versus last month, percent.
    pub sales_growth: String,
}

/// Yearly block of the generated report. Carries no growth figure.
#[derive(Debug, Serialize)]
pub struct YearlyReport {
    /// Calendar year.
    pub year: i32,
    /// Sum of sale amounts.
    pub total_sales: String,
    /// Sum of purchase amounts.
    pub total_purchases: String,
    /// Profit over the year.
    pub profit_loss: String,
    /// Count of all transactions.
    pub total_transactions: i32,
}

/// Full generated report.
#[derive(Debug, Serialize)]
pub struct GeneratedReportResponse {
    /// Today's rollup.
    pub daily: DailyReport,
    /// This week's rollup.
    pub weekly: WeeklyReport,
    /// This month's rollup.
    pub monthly: MonthlyReport,
    /// This year's rollup.
    pub yearly: YearlyReport,
}

fn assemble_report(generated: GeneratedSummaries) -> GeneratedReportResponse {
    let GeneratedSummaries {
        daily,
        daily_growth,
        weekly,
        weekly_growth,
        monthly,
        monthly_growth,
        yearly,
    } = generated;

    GeneratedReportResponse {
        daily: DailyReport {
            date: daily.summary_date.to_string(),
            total_sales: daily.total_sales.to_string(),
            total_purchases: daily.total_purchases.to_string(),
            profit_loss: daily.profit_loss.to_string(),
            total_transactions: daily.total_transactions,
            sales_growth: daily_growth.to_string(),
        },
        weekly: WeeklyReport {
            week_start: weekly.week_start.to_string(),
            week_end: weekly.week_end.to_string(),
            date_range: format!("{} - {}", weekly.week_start, weekly.week_end),
            total_sales: weekly.total_sales.to_string(),
            total_purchases: weekly.total_purchases.to_string(),
            profit_loss: weekly.profit_loss.to_string(),
            total_transactions: weekly.total_transactions,
            sales_growth: weekly_growth.to_string(),
        },
        monthly: MonthlyReport {
            year: monthly.year,
            month: monthly.month,
            period: format!("{}/{}", monthly.month, monthly.year),
            total_sales: monthly.total_sales.to_string(),
            total_purchases: monthly.total_purchases.to_string(),
            profit_loss: monthly.profit_loss.to_string(),
            total_transactions: monthly.total_transactions,
            sales_growth: monthly_growth.to_string(),
        },
        yearly: YearlyReport {
            year: yearly.year,
            total_sales: yearly.total_sales.to_string(),
            total_purchases: yearly.total_purchases.to_string(),
            profit_loss: yearly.profit_loss.to_string(),
            total_transactions: yearly.total_transactions,
        },
    }
}

/// Historical daily row.
#[derive(Debug, Serialize)]
pub struct DailyHistoryItem {
    /// Summary date.
    pub date: String,
    /// Sum of sale amounts.
    pub total_sales: String,
    /// Sum of purchase amounts.
    pub total_purchases: String,
    /// Profit over the day.
    pub profit_loss: String,
    /// Count of all transactions.
    pub total_transactions: i32,
}

/// Historical weekly row.
#[derive(Debug, Serialize)]
pub struct WeeklyHistoryItem {
    /// First day of the week.
    pub week_start: String,
    /// Last day of the week.
    pub week_end: String,
    /// Sum of sale amounts.
    pub total_sales: String,
    /// Sum of purchase amounts.
    pub total_purchases: String,
    /// Profit over the week.
    pub profit_loss: String,
    /// Count of all transactions.
    pub total_transactions: i32,
}

/// Historical monthly row.
#[derive(Debug, Serialize)]
pub struct MonthlyHistoryItem {
    /// Calendar year.
    pub year: i32,
    /// Month number (1-12).
    pub month: i32,
    /// Sum of sale amounts.
    pub total_sales: String,
    /// Sum of purchase amounts.
    pub total_purchases: String,
    /// Profit over the month.
    pub profit_loss: String,
    /// Count of all transactions.
    pub total_transactions: i32,
}

/// Historical yearly row.
#[derive(Debug, Serialize)]
pub struct YearlyHistoryItem {
    /// Calendar year.
    pub year: i32,
    /// Sum of sale amounts.
    pub total_sales: String,
    /// Sum of purchase amounts.
    pub total_purchases: String,
    /// Profit over the year.
    pub profit_loss: String,
    /// Count of all transactions.
    pub total_transactions: i32,
}

fn daily_history(row: daily_summaries::Model) -> DailyHistoryItem {
    DailyHistoryItem {
        date: row.summary_date.to_string(),
        total_sales: row.total_sales.to_string(),
        total_purchases: row.total_purchases.to_string(),
        profit_loss: row.profit_loss.to_string(),
        total_transactions: row.total_transactions,
    }
}

fn weekly_history(row: weekly_summaries::Model) -> WeeklyHistoryItem {
    WeeklyHistoryItem {
        week_start: row.week_start.to_string(),
        week_end: row.week_end.to_string(),
        total_sales: row.total_sales.to_string(),
        total_purchases: row.total_purchases.to_string(),
        profit_loss: row.profit_loss.to_string(),
        total_transactions: row.total_transactions,
    }
}

fn monthly_history(row: monthly_summaries::Model) -> MonthlyHistoryItem {
    MonthlyHistoryItem {
        year: row.year,
        month: row.month,
        total_sales: row.total_sales.to_string(),
        total_purchases: row.total_purchases.to_string(),
        profit_loss: row.profit_loss.to_string(),
        total_transactions: row.total_transactions,
    }
}

fn yearly_history(row: yearly_summaries::Model) -> YearlyHistoryItem {
    YearlyHistoryItem {
        year: row.year,
        total_sales: row.total_sales.to_string(),
        total_purchases: row.total_purchases.to_string(),
        profit_loss: row.profit_loss.to_string(),
        total_transactions: row.total_transactions,
    }
}

fn forbidden() -> axum::response::Response {
    error_response(&AppError::Forbidden(
        "Only BOSS can access profit reports".into(),
    ))
}

fn repo_error(e: &SummaryError) -> axum::response::Response {
    let SummaryError::Database(err) = e;
    error_response(&AppError::Database(err.to_string()))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/reports/generate-all-summaries` - Recompute and upsert all four
/// granularities anchored at today, then return the assembled report.
async fn generate_all_summaries(
    State(state): State<AppState>,
    acting: ActingUser,
) -> impl IntoResponse {
    if !acting.role.can_view_reports() {
        return forbidden();
    }

    let repo = SummaryRepository::new((*state.db).clone());
    let today = Utc::now().date_naive();

    match repo.generate_all(today).await {
        Ok(generated) => (StatusCode::OK, Json(assemble_report(generated))).into_response(),
        Err(e) => repo_error(&e),
    }
}

/// GET `/reports/historical-summaries` - Bounded lists of previously
/// materialized rows, newest first. No recomputation happens here.
async fn historical_summaries(
    State(state): State<AppState>,
    acting: ActingUser,
) -> impl IntoResponse {
    if !acting.role.can_view_reports() {
        return forbidden();
    }

    let repo = SummaryRepository::new((*state.db).clone());

    let daily = match repo.recent_daily(RECENT_DAILY_ROWS).await {
        Ok(rows) => rows,
        Err(e) => return repo_error(&e),
    };
    let weekly = match repo.recent_weekly(RECENT_WEEKLY_ROWS).await {
        Ok(rows) => rows,
        Err(e) => return repo_error(&e),
    };
    let monthly = match repo.recent_monthly(RECENT_MONTHLY_ROWS).await {
        Ok(rows) => rows,
        Err(e) => return repo_error(&e),
    };
    let yearly = match repo.recent_yearly(RECENT_YEARLY_ROWS).await {
        Ok(rows) => rows,
        Err(e) => return repo_error(&e),
    };

    let payload = json!({
        "daily": daily.into_iter().map(daily_history).collect::<Vec<_>>(),
        "weekly": weekly.into_iter().map(weekly_history).collect::<Vec<_>>(),
        "monthly": monthly.into_iter().map(monthly_history).collect::<Vec<_>>(),
        "yearly": yearly.into_iter().map(yearly_history).collect::<Vec<_>>(),
    });

    (StatusCode::OK, Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn generated_fixture() -> GeneratedSummaries {
        let now = Utc::now().into();
        GeneratedSummaries {
            daily: daily_summaries::Model {
                id: Uuid::new_v4(),
                summary_date: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
                total_sales: Decimal::from(250_000),
                total_purchases: Decimal::ZERO,
                total_transactions: 1,
                profit_loss: Decimal::from(100_000),
                updated_at: now,
            },
            daily_growth: Decimal::ONE_HUNDRED,
            weekly: weekly_summaries::Model {
                id: Uuid::new_v4(),
                week_start: NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
                week_end: NaiveDate::from_ymd_opt(2026, 8, 9).unwrap(),
                total_sales: Decimal::from(250_000),
                total_purchases: Decimal::ZERO,
                total_transactions: 1,
                profit_loss: Decimal::from(100_000),
                updated_at: now,
            },
            weekly_growth: Decimal::ZERO,
            monthly: monthly_summaries::Model {
                id: Uuid::new_v4(),
                year: 2026,
                month: 8,
                total_sales: Decimal::from(250_000),
                total_purchases: Decimal::ZERO,
                total_transactions: 1,
                profit_loss: Decimal::from(100_000),
                updated_at: now,
            },
            monthly_growth: Decimal::ZERO,
            yearly: yearly_summaries::Model {
                id: Uuid::new_v4(),
                year: 2026,
                total_sales: Decimal::from(250_000),
                total_purchases: Decimal::ZERO,
                total_transactions: 1,
                profit_loss: Decimal::from(100_000),
                updated_at: now,
            },
        }
    }

    #[test]
    fn test_assemble_report_descriptors() {
        let report = assemble_report(generated_fixture());

        assert_eq!(report.daily.date, "2026-08-07");
        assert_eq!(report.daily.sales_growth, "100");
        assert_eq!(report.weekly.date_range, "2026-08-03 - 2026-08-09");
        assert_eq!(report.monthly.period, "8/2026");
        assert_eq!(report.yearly.year, 2026);
    }

    #[test]
    fn test_assemble_report_carries_totals() {
        let report = assemble_report(generated_fixture());

        assert_eq!(report.daily.total_sales, "250000");
        assert_eq!(report.daily.profit_loss, "100000");
        assert_eq!(report.daily.total_transactions, 1);
        assert_eq!(report.yearly.total_purchases, "0");
    }
}
