//! Transaction repository: the one writer of product stock.
//!
//! Recording a transaction recomputes all derived amounts and moves stock
//! inside a single database transaction. Either the stock change and the
//! ledger row both commit, or neither does.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use duka_core::ledger::{self, StockError, TransactionKind};
use duka_shared::types::{PageRequest, PageResponse};

use crate::entities::{products, sea_orm_active_enums::TransactionType, transactions};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    /// Quantity must be positive.
    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(i32),

    /// Unit price must not be negative.
    #[error("Unit price must not be negative, got {0}")]
    NegativeUnitPrice(Decimal),

    /// A sale asked for more units than are in stock.
    #[error("Insufficient stock: have {available}, requested {requested}")]
    InsufficientStock {
        /// Units currently on hand.
        available: i32,
        /// Units requested.
        requested: i32,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Maps the domain transaction kind onto the stored enum.
#[must_use]
pub fn to_db_kind(kind: TransactionKind) -> TransactionType {
    match kind {
        TransactionKind::Sale => TransactionType::Sale,
        TransactionKind::Purchase => TransactionType::Purchase,
        TransactionKind::Return => TransactionType::Return,
    }
}

/// Maps the stored enum onto the domain transaction kind.
#[must_use]
pub fn to_domain_kind(db_kind: &TransactionType) -> TransactionKind {
    match db_kind {
        TransactionType::Sale => TransactionKind::Sale,
        TransactionType::Purchase => TransactionKind::Purchase,
        TransactionType::Return => TransactionKind::Return,
    }
}

/// Input for recording a transaction.
#[derive(Debug, Clone)]
pub struct RecordTransactionInput {
    /// Product the transaction is against.
    pub product_id: Uuid,
    /// Transaction kind.
    pub kind: TransactionKind,
    /// Unit count (positive).
    pub quantity: i32,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Event timestamp; defaults to now.
    pub transaction_date: Option<DateTime<Utc>>,
    /// Free-text note.
    pub notes: Option<String>,
    /// User who recorded the transaction.
    pub recorded_by: Option<Uuid>,
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by transaction kind.
    pub kind: Option<TransactionKind>,
    /// Filter by product.
    pub product_id: Option<Uuid>,
    /// Filter by recording user (seller scoping).
    pub recorded_by: Option<Uuid>,
    /// Filter by date range start.
    pub date_from: Option<NaiveDate>,
    /// Filter by date range end (inclusive).
    pub date_to: Option<NaiveDate>,
}

/// Transaction repository.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a transaction and moves product stock atomically.
    ///
    /// `total_amount` and `profit` are recomputed here, never taken from
    /// input. The product row is locked for the duration so concurrent sales
    /// cannot both pass the stock check.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the product is unknown, a sale
    /// would drive stock negative, or the database fails. No partial state
    /// is left behind on any error.
    pub async fn record(
        &self,
        input: RecordTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        if input.quantity <= 0 {
            return Err(TransactionError::InvalidQuantity(input.quantity));
        }
        if input.unit_price < Decimal::ZERO {
            return Err(TransactionError::NegativeUnitPrice(input.unit_price));
        }

        let txn = self.db.begin().await?;

        // Lock the product row; the stock check and adjustment must not race.
        let product = products::Entity::find_by_id(input.product_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(TransactionError::ProductNotFound(input.product_id))?;

        let updated_stock =
            ledger::apply_stock_change(product.stock_quantity, input.kind, input.quantity)
                .map_err(|StockError::Insufficient {
                    available,
                    requested,
                }| TransactionError::InsufficientStock {
                    available,
                    requested,
                })?;

        let total_amount = ledger::total_amount(input.quantity, input.unit_price);
        let profit = ledger::sale_profit(
            input.kind,
            input.quantity,
            input.unit_price,
            Some(product.cost_price),
        );

        let now = Utc::now();

        let mut product_active: products::ActiveModel = product.into();
        product_active.stock_quantity = Set(updated_stock);
        product_active.updated_at = Set(now.into());
        product_active.update(&txn).await?;

        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(input.product_id),
            transaction_type: Set(to_db_kind(input.kind)),
            quantity: Set(input.quantity),
            unit_price: Set(input.unit_price),
            total_amount: Set(total_amount),
            profit: Set(profit),
            transaction_date: Set(input.transaction_date.unwrap_or(now).into()),
            notes: Set(input.notes),
            recorded_by: Set(input.recorded_by),
            created_at: Set(now.into()),
        };

        let inserted = transaction.insert(&txn).await?;

        txn.commit().await?;

        Ok(inserted)
    }

    /// Lists transactions with optional filters, newest first, paginated.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        filter: TransactionFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<transactions::Model>, TransactionError> {
        let mut query = transactions::Entity::find();

        if let Some(kind) = filter.kind {
            query = query.filter(transactions::Column::TransactionType.eq(to_db_kind(kind)));
        }

        if let Some(product_id) = filter.product_id {
            query = query.filter(transactions::Column::ProductId.eq(product_id));
        }

        if let Some(recorded_by) = filter.recorded_by {
            query = query.filter(transactions::Column::RecordedBy.eq(recorded_by));
        }

        if let Some(date_from) = filter.date_from {
            let from = date_from
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc())
                .unwrap_or_else(Utc::now);
            query = query.filter(transactions::Column::TransactionDate.gte(from));
        }

        if let Some(date_to) = filter.date_to {
            let to = date_to
                .succ_opt()
                .and_then(|next| next.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
                .unwrap_or_else(Utc::now);
            query = query.filter(transactions::Column::TransactionDate.lt(to));
        }

        let paginator = query
            .order_by_desc(transactions::Column::TransactionDate)
            .order_by_desc(transactions::Column::CreatedAt)
            .paginate(&self.db, page.limit().max(1));

        let total = paginator.num_items().await?;
        let rows = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;

        Ok(PageResponse::new(rows, page.page, page.per_page, total))
    }

    /// Gets a transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction does not exist or the query fails.
    pub async fn get(&self, transaction_id: Uuid) -> Result<transactions::Model, TransactionError> {
        transactions::Entity::find_by_id(transaction_id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(transaction_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping_roundtrip() {
        for kind in [
            TransactionKind::Sale,
            TransactionKind::Purchase,
            TransactionKind::Return,
        ] {
            assert_eq!(to_domain_kind(&to_db_kind(kind)), kind);
        }
    }
}
