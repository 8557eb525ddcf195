//! Transaction routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use uuid::Uuid;

use crate::{AppState, error::error_response, extract::ActingUser};
use duka_core::ledger::TransactionKind;
use duka_shared::AppError;
use duka_shared::types::PageRequest;
use duka_db::{
    entities::transactions,
    repositories::transaction::{
        RecordTransactionInput, TransactionError, TransactionFilter, TransactionRepository,
        to_domain_kind,
    },
};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions", post(create_transaction))
        .route("/transactions/{transaction_id}", get(get_transaction))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Filter by transaction type.
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// Filter by product.
    pub product: Option<Uuid>,
    /// Filter by date range start (YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// Filter by date range end (YYYY-MM-DD).
    pub to: Option<NaiveDate>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// Request body for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Product the transaction is against.
    pub product_id: Uuid,
    /// Transaction type: SALE, PURCHASE or RETURN.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Unit count.
    pub quantity: i32,
    /// Price per unit.
    pub unit_price: String,
    /// Optional free-text note.
    pub notes: Option<String>,
}

/// Response for a transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Product ID.
    pub product_id: Uuid,
    /// Transaction type.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Unit count.
    pub quantity: i32,
    /// Price per unit.
    pub unit_price: String,
    /// Computed total amount.
    pub total_amount: String,
    /// Computed profit (zero for non-sales).
    pub profit: String,
    /// Event timestamp.
    pub transaction_date: String,
    /// Free-text note.
    pub notes: Option<String>,
    /// User who recorded the transaction.
    pub recorded_by: Option<Uuid>,
    /// Created at timestamp.
    pub created_at: String,
}

fn transaction_response(tx: transactions::Model) -> TransactionResponse {
    TransactionResponse {
        id: tx.id,
        product_id: tx.product_id,
        transaction_type: to_domain_kind(&tx.transaction_type).to_string(),
        quantity: tx.quantity,
        unit_price: tx.unit_price.to_string(),
        total_amount: tx.total_amount.to_string(),
        profit: tx.profit.to_string(),
        transaction_date: tx.transaction_date.to_rfc3339(),
        notes: tx.notes,
        recorded_by: tx.recorded_by,
        created_at: tx.created_at.to_rfc3339(),
    }
}

fn repo_error(e: &TransactionError) -> axum::response::Response {
    let app_error = match e {
        TransactionError::NotFound(id) => AppError::NotFound(format!("Transaction {id}")),
        TransactionError::ProductNotFound(id) => AppError::NotFound(format!("Product {id}")),
        TransactionError::InvalidQuantity(q) => {
            AppError::Validation(format!("Quantity must be positive, got {q}"))
        }
        TransactionError::NegativeUnitPrice(p) => {
            AppError::Validation(format!("Unit price must not be negative, got {p}"))
        }
        TransactionError::InsufficientStock {
            available,
            requested,
        } => AppError::InsufficientStock(format!("have {available}, requested {requested}")),
        TransactionError::Database(err) => AppError::Database(err.to_string()),
    };
    error_response(&app_error)
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/transactions` - List transactions with filters.
///
/// Sellers only see what they recorded themselves.
async fn list_transactions(
    State(state): State<AppState>,
    acting: ActingUser,
    Query(query): Query<ListTransactionsQuery>,
) -> impl IntoResponse {
    let kind = match query.transaction_type.as_deref() {
        Some(raw) => match TransactionKind::from_str(raw) {
            Ok(kind) => Some(kind),
            Err(_) => {
                return error_response(&AppError::Validation(
                    "Transaction type must be SALE, PURCHASE or RETURN".into(),
                ));
            }
        },
        None => None,
    };

    let recorded_by = if acting.role.can_view_all_transactions() {
        None
    } else {
        Some(acting.id)
    };

    let mut page = PageRequest::default();
    if let Some(number) = query.page {
        page.page = number.max(1);
    }
    if let Some(per_page) = query.per_page {
        page.per_page = per_page.clamp(1, 100);
    }

    let repo = TransactionRepository::new((*state.db).clone());
    let filter = TransactionFilter {
        kind,
        product_id: query.product,
        recorded_by,
        date_from: query.from,
        date_to: query.to,
    };

    match repo.list(filter, &page).await {
        Ok(page_response) => {
            let items: Vec<TransactionResponse> = page_response
                .data
                .into_iter()
                .map(transaction_response)
                .collect();
            (
                StatusCode::OK,
                Json(json!({ "transactions": items, "meta": page_response.meta })),
            )
                .into_response()
        }
        Err(e) => repo_error(&e),
    }
}

/// POST `/transactions` - Record a transaction.
async fn create_transaction(
    State(state): State<AppState>,
    acting: ActingUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    let Ok(kind) = TransactionKind::from_str(&payload.transaction_type) else {
        return error_response(&AppError::Validation(
            "Transaction type must be SALE, PURCHASE or RETURN".into(),
        ));
    };

    let Ok(unit_price) = Decimal::from_str(&payload.unit_price) else {
        return error_response(&AppError::Validation(
            "unit_price is not a valid amount".into(),
        ));
    };

    let repo = TransactionRepository::new((*state.db).clone());
    let input = RecordTransactionInput {
        product_id: payload.product_id,
        kind,
        quantity: payload.quantity,
        unit_price,
        transaction_date: None,
        notes: payload.notes,
        recorded_by: Some(acting.id),
    };

    match repo.record(input).await {
        Ok(tx) => (StatusCode::CREATED, Json(transaction_response(tx))).into_response(),
        Err(e) => repo_error(&e),
    }
}

/// GET `/transactions/{transaction_id}` - Get a transaction.
async fn get_transaction(
    State(state): State<AppState>,
    acting: ActingUser,
    Path(transaction_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.get(transaction_id).await {
        Ok(tx) => {
            // Sellers may only inspect their own transactions.
            if !acting.role.can_view_all_transactions() && tx.recorded_by != Some(acting.id) {
                return error_response(&AppError::Forbidden(
                    "You can only view your own transactions".into(),
                ));
            }
            (StatusCode::OK, Json(transaction_response(tx))).into_response()
        }
        Err(e) => repo_error(&e),
    }
}
