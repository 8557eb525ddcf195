//! Product catalog routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use uuid::Uuid;

use crate::{AppState, error::error_response, extract::ActingUser};
use duka_core::catalog;
use duka_shared::AppError;
use duka_db::{
    entities::products,
    repositories::product::{
        CreateProductInput, ProductError, ProductRepository, UpdateProductInput,
    },
};

/// Creates the product routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products", post(create_product))
        .route("/products/low-stock", get(low_stock))
        .route("/products/{product_id}", get(get_product))
        .route("/products/{product_id}", patch(update_product))
        .route("/products/{product_id}", delete(delete_product))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing products.
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    /// Filter by active flag.
    pub is_active: Option<bool>,
}

/// Request body for creating a product.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    /// Optional category reference.
    pub category_id: Option<Uuid>,
    /// Product name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Selling price.
    pub price: String,
    /// Buying price.
    pub cost_price: String,
    /// Initial stock on hand.
    #[serde(default)]
    pub stock_quantity: i32,
    /// Low-stock alert level.
    #[serde(default = "default_min_stock_level")]
    pub min_stock_level: i32,
}

fn default_min_stock_level() -> i32 {
    5
}

/// Request body for updating a product.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    /// New category reference.
    pub category_id: Option<Uuid>,
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New selling price.
    pub price: Option<String>,
    /// New buying price.
    pub cost_price: Option<String>,
    /// New low-stock alert level.
    pub min_stock_level: Option<i32>,
    /// Activate or deactivate.
    pub is_active: Option<bool>,
}

/// Response for a product.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    /// Product ID.
    pub id: Uuid,
    /// Category reference.
    pub category_id: Option<Uuid>,
    /// Name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Selling price.
    pub price: String,
    /// Buying price.
    pub cost_price: String,
    /// Profit per unit at list price.
    pub profit_per_unit: String,
    /// Stock on hand.
    pub stock_quantity: i32,
    /// Low-stock alert level.
    pub min_stock_level: i32,
    /// Whether the product currently needs restocking.
    pub low_stock: bool,
    /// Active flag.
    pub is_active: bool,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

fn product_response(product: products::Model) -> ProductResponse {
    ProductResponse {
        id: product.id,
        category_id: product.category_id,
        name: product.name,
        description: product.description,
        price: product.price.to_string(),
        cost_price: product.cost_price.to_string(),
        profit_per_unit: catalog::profit_per_unit(Some(product.price), Some(product.cost_price))
            .to_string(),
        stock_quantity: product.stock_quantity,
        min_stock_level: product.min_stock_level,
        low_stock: catalog::is_low_stock(product.stock_quantity, product.min_stock_level),
        is_active: product.is_active,
        created_at: product.created_at.to_rfc3339(),
        updated_at: product.updated_at.to_rfc3339(),
    }
}

fn parse_amount(raw: &str, field: &str) -> Result<Decimal, axum::response::Response> {
    match Decimal::from_str(raw) {
        Ok(amount) if amount >= Decimal::ZERO => Ok(amount),
        Ok(_) => Err(error_response(&AppError::Validation(format!(
            "{field} must not be negative"
        )))),
        Err(_) => Err(error_response(&AppError::Validation(format!(
            "{field} is not a valid amount"
        )))),
    }
}

fn forbidden() -> axum::response::Response {
    error_response(&AppError::Forbidden(
        "Only BOSS or MANAGER can manage the catalog".into(),
    ))
}

fn repo_error(e: &ProductError) -> axum::response::Response {
    let app_error = match e {
        ProductError::NotFound(id) => AppError::NotFound(format!("Product {id}")),
        ProductError::Database(err) => AppError::Database(err.to_string()),
    };
    error_response(&app_error)
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/products` - List products.
async fn list_products(
    State(state): State<AppState>,
    _acting: ActingUser,
    Query(query): Query<ListProductsQuery>,
) -> impl IntoResponse {
    let repo = ProductRepository::new((*state.db).clone());

    match repo.list(query.is_active).await {
        Ok(products) => {
            let items: Vec<ProductResponse> = products.into_iter().map(product_response).collect();
            (StatusCode::OK, Json(json!({ "products": items }))).into_response()
        }
        Err(e) => repo_error(&e),
    }
}

/// GET `/products/low-stock` - Products that need restocking.
async fn low_stock(State(state): State<AppState>, _acting: ActingUser) -> impl IntoResponse {
    let repo = ProductRepository::new((*state.db).clone());

    match repo.list_low_stock().await {
        Ok(products) => {
            let items: Vec<ProductResponse> = products.into_iter().map(product_response).collect();
            (StatusCode::OK, Json(json!({ "products": items }))).into_response()
        }
        Err(e) => repo_error(&e),
    }
}

/// POST `/products` - Create a product.
async fn create_product(
    State(state): State<AppState>,
    acting: ActingUser,
    Json(payload): Json<CreateProductRequest>,
) -> impl IntoResponse {
    if !acting.role.can_manage_catalog() {
        return forbidden();
    }

    let price = match parse_amount(&payload.price, "price") {
        Ok(amount) => amount,
        Err(response) => return response,
    };
    let cost_price = match parse_amount(&payload.cost_price, "cost_price") {
        Ok(amount) => amount,
        Err(response) => return response,
    };

    if payload.stock_quantity < 0 || payload.min_stock_level < 0 {
        return error_response(&AppError::Validation(
            "Stock fields must not be negative".into(),
        ));
    }

    let repo = ProductRepository::new((*state.db).clone());
    let input = CreateProductInput {
        category_id: payload.category_id,
        name: payload.name,
        description: payload.description,
        price,
        cost_price,
        stock_quantity: payload.stock_quantity,
        min_stock_level: payload.min_stock_level,
    };

    match repo.create(input).await {
        Ok(product) => (StatusCode::CREATED, Json(product_response(product))).into_response(),
        Err(e) => repo_error(&e),
    }
}

/// GET `/products/{product_id}` - Get a product.
async fn get_product(
    State(state): State<AppState>,
    _acting: ActingUser,
    Path(product_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ProductRepository::new((*state.db).clone());

    match repo.get(product_id).await {
        Ok(product) => (StatusCode::OK, Json(product_response(product))).into_response(),
        Err(e) => repo_error(&e),
    }
}

/// PATCH `/products/{product_id}` - Update a product.
async fn update_product(
    State(state): State<AppState>,
    acting: ActingUser,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> impl IntoResponse {
    if !acting.role.can_manage_catalog() {
        return forbidden();
    }

    let price = match payload.price.as_deref().map(|p| parse_amount(p, "price")) {
        Some(Ok(amount)) => Some(amount),
        Some(Err(response)) => return response,
        None => None,
    };
    let cost_price = match payload
        .cost_price
        .as_deref()
        .map(|p| parse_amount(p, "cost_price"))
    {
        Some(Ok(amount)) => Some(amount),
        Some(Err(response)) => return response,
        None => None,
    };

    let repo = ProductRepository::new((*state.db).clone());
    let input = UpdateProductInput {
        category_id: payload.category_id.map(Some),
        name: payload.name,
        description: payload.description,
        price,
        cost_price,
        min_stock_level: payload.min_stock_level,
        is_active: payload.is_active,
    };

    match repo.update(product_id, input).await {
        Ok(product) => (StatusCode::OK, Json(product_response(product))).into_response(),
        Err(e) => repo_error(&e),
    }
}

/// DELETE `/products/{product_id}` - Delete a product.
async fn delete_product(
    State(state): State<AppState>,
    acting: ActingUser,
    Path(product_id): Path<Uuid>,
) -> impl IntoResponse {
    if !acting.role.can_manage_catalog() {
        return forbidden();
    }

    let repo = ProductRepository::new((*state.db).clone());

    match repo.delete(product_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => repo_error(&e),
    }
}
