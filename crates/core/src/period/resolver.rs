//! Period window resolution.
//!
//! Pure date arithmetic, no I/O. Every window is inclusive of both
//! endpoints; weeks run Monday through Sunday (ISO convention).

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inclusive date range identifying one reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    /// First date of the period.
    pub start: NaiveDate,
    /// Last date of the period.
    pub end: NaiveDate,
}

impl PeriodWindow {
    /// Returns true if the given date falls within this window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// The single-day window containing `date`.
#[must_use]
pub fn day_window(date: NaiveDate) -> PeriodWindow {
    PeriodWindow {
        start: date,
        end: date,
    }
}

/// The single-day window immediately before `date`.
#[must_use]
pub fn prior_day_window(date: NaiveDate) -> PeriodWindow {
    let prev = date.checked_sub_days(Days::new(1)).unwrap_or(date);
    day_window(prev)
}

/// The Monday-to-Sunday week containing `date`.
#[must_use]
pub fn week_window(date: NaiveDate) -> PeriodWindow {
    let offset = u64::from(date.weekday().num_days_from_monday());
    let start = date.checked_sub_days(Days::new(offset)).unwrap_or(date);
    let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
    PeriodWindow { start, end }
}

/// The week immediately before the one containing `date`.
#[must_use]
pub fn prior_week_window(date: NaiveDate) -> PeriodWindow {
    let this_week = week_window(date);
    let prev_start = this_week
        .start
        .checked_sub_days(Days::new(7))
        .unwrap_or(this_week.start);
    let prev_end = this_week
        .end
        .checked_sub_days(Days::new(7))
        .unwrap_or(this_week.end);
    PeriodWindow {
        start: prev_start,
        end: prev_end,
    }
}

/// The calendar month containing `date`.
#[must_use]
pub fn month_window(date: NaiveDate) -> PeriodWindow {
    let start = date.with_day(1).unwrap_or(date);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(start);
    PeriodWindow { start, end }
}

/// The calendar month immediately before the one containing `date`.
#[must_use]
pub fn prior_month_window(date: NaiveDate) -> PeriodWindow {
    let start_of_month = date.with_day(1).unwrap_or(date);
    let in_prior = start_of_month.pred_opt().unwrap_or(start_of_month);
    month_window(in_prior)
}

/// The calendar year containing `date`.
#[must_use]
pub fn year_window(date: NaiveDate) -> PeriodWindow {
    let start = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
    let end = NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date);
    PeriodWindow { start, end }
}

/// The calendar year immediately before the one containing `date`.
#[must_use]
pub fn prior_year_window(date: NaiveDate) -> PeriodWindow {
    let prior_year = date.year() - 1;
    let start = NaiveDate::from_ymd_opt(prior_year, 1, 1).unwrap_or(date);
    let end = NaiveDate::from_ymd_opt(prior_year, 12, 31).unwrap_or(date);
    PeriodWindow { start, end }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_week_of_a_wednesday() {
        // Wednesday 2026-08-05: week is Mon 08-03 through Sun 08-09.
        let window = week_window(d(2026, 8, 5));
        assert_eq!(window.start, d(2026, 8, 3));
        assert_eq!(window.end, d(2026, 8, 9));
    }

    #[test]
    fn test_week_boundaries_are_inclusive() {
        let window = week_window(d(2026, 8, 5));
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(d(2026, 8, 10))); // Monday of next week
    }

    #[rstest]
    #[case(d(2026, 8, 3))] // Monday maps to itself
    #[case(d(2026, 8, 9))] // Sunday maps back to Monday
    fn test_week_start_is_monday(#[case] date: NaiveDate) {
        assert_eq!(week_window(date).start, d(2026, 8, 3));
    }

    #[test]
    fn test_week_crossing_month_boundary() {
        // 2026-08-01 is a Saturday; its week starts in July.
        let window = week_window(d(2026, 8, 1));
        assert_eq!(window.start, d(2026, 7, 27));
        assert_eq!(window.end, d(2026, 8, 2));
    }

    #[test]
    fn test_prior_week_is_exactly_seven_days_back() {
        let prior = prior_week_window(d(2026, 8, 5));
        assert_eq!(prior.start, d(2026, 7, 27));
        assert_eq!(prior.end, d(2026, 8, 2));
    }

    #[test]
    fn test_month_window() {
        let window = month_window(d(2026, 8, 19));
        assert_eq!(window.start, d(2026, 8, 1));
        assert_eq!(window.end, d(2026, 8, 31));
    }

    #[test]
    fn test_february_leap_year() {
        let window = month_window(d(2028, 2, 10));
        assert_eq!(window.end, d(2028, 2, 29));
        let non_leap = month_window(d(2026, 2, 10));
        assert_eq!(non_leap.end, d(2026, 2, 28));
    }

    #[test]
    fn test_prior_month_crosses_year() {
        let prior = prior_month_window(d(2026, 1, 15));
        assert_eq!(prior.start, d(2025, 12, 1));
        assert_eq!(prior.end, d(2025, 12, 31));
    }

    #[test]
    fn test_year_windows() {
        let window = year_window(d(2026, 8, 5));
        assert_eq!(window.start, d(2026, 1, 1));
        assert_eq!(window.end, d(2026, 12, 31));

        let prior = prior_year_window(d(2026, 8, 5));
        assert_eq!(prior.start, d(2025, 1, 1));
        assert_eq!(prior.end, d(2025, 12, 31));
    }

    #[test]
    fn test_day_windows() {
        let window = day_window(d(2026, 8, 5));
        assert_eq!(window.start, window.end);
        assert_eq!(prior_day_window(d(2026, 8, 1)).start, d(2026, 7, 31));
    }
}
