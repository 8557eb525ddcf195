//! Reporting period arithmetic.

pub mod resolver;

pub use resolver::{
    PeriodWindow, day_window, month_window, prior_day_window, prior_month_window,
    prior_week_window, prior_year_window, week_window, year_window,
};
