//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod categories;
pub mod health;
pub mod products;
pub mod reports;
pub mod transactions;
pub mod users;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(products::routes())
        .merge(categories::routes())
        .merge(transactions::routes())
        .merge(reports::routes())
        .merge(users::routes())
}
