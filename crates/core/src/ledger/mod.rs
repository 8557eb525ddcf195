//! Transaction ledger rules.
//!
//! The ledger records SALE/PURCHASE/RETURN events against products. Stock
//! movement and derived amounts are computed here, never trusted from input.

pub mod pricing;
pub mod stock;
pub mod types;

pub use pricing::{sale_profit, total_amount};
pub use stock::{StockError, apply_stock_change};
pub use types::TransactionKind;
