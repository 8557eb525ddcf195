//! Periodic sales summaries.
//!
//! Pure aggregation over transaction facts plus growth-versus-prior-period
//! arithmetic. Fetching transactions and persisting summary rows is the
//! database layer's job; everything here is deterministic.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::SummaryService;
pub use types::{PeriodKind, PeriodTotals, TransactionFacts};
