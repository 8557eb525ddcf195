//! Product catalog rules.

pub mod product;

pub use product::{LOW_STOCK_THRESHOLD, is_low_stock, profit_per_unit};
