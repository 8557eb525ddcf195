//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod category;
pub mod product;
pub mod summary;
pub mod transaction;
pub mod user;

pub use category::{CategoryError, CategoryRepository, CreateCategoryInput, UpdateCategoryInput};
pub use product::{
    CreateProductInput, ProductError, ProductRepository, UpdateProductInput,
};
pub use summary::{GeneratedSummaries, SummaryError, SummaryRepository};
pub use transaction::{
    RecordTransactionInput, TransactionError, TransactionFilter, TransactionRepository,
};
pub use user::{UserError, UserRepository};
