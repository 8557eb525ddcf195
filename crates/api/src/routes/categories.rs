//! Category routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, error::error_response, extract::ActingUser};
use duka_shared::AppError;
use duka_db::{
    entities::categories,
    repositories::category::{
        CategoryError, CategoryRepository, CreateCategoryInput, UpdateCategoryInput,
    },
};

/// Creates the category routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories", post(create_category))
        .route("/categories/{category_id}", get(get_category))
        .route("/categories/{category_id}", patch(update_category))
        .route("/categories/{category_id}", delete(delete_category))
}

/// Request body for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// Category name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Request body for updating a category.
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Response for a category.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    /// Category ID.
    pub id: Uuid,
    /// Name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Created at timestamp.
    pub created_at: String,
}

fn category_response(category: categories::Model) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        name: category.name,
        description: category.description,
        created_at: category.created_at.to_rfc3339(),
    }
}

fn forbidden() -> axum::response::Response {
    error_response(&AppError::Forbidden(
        "Only BOSS or MANAGER can manage the catalog".into(),
    ))
}

fn repo_error(e: &CategoryError) -> axum::response::Response {
    let app_error = match e {
        CategoryError::NotFound(id) => AppError::NotFound(format!("Category {id}")),
        CategoryError::Database(err) => AppError::Database(err.to_string()),
    };
    error_response(&app_error)
}

/// GET `/categories` - List categories.
async fn list_categories(State(state): State<AppState>, _acting: ActingUser) -> impl IntoResponse {
    let repo = CategoryRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(categories) => {
            let items: Vec<CategoryResponse> =
                categories.into_iter().map(category_response).collect();
            (StatusCode::OK, Json(json!({ "categories": items }))).into_response()
        }
        Err(e) => repo_error(&e),
    }
}

/// POST `/categories` - Create a category.
async fn create_category(
    State(state): State<AppState>,
    acting: ActingUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> impl IntoResponse {
    if !acting.role.can_manage_catalog() {
        return forbidden();
    }

    if payload.name.trim().is_empty() {
        return error_response(&AppError::Validation(
            "Category name must not be empty".into(),
        ));
    }

    let repo = CategoryRepository::new((*state.db).clone());
    let input = CreateCategoryInput {
        name: payload.name,
        description: payload.description,
    };

    match repo.create(input).await {
        Ok(category) => (StatusCode::CREATED, Json(category_response(category))).into_response(),
        Err(e) => repo_error(&e),
    }
}

/// GET `/categories/{category_id}` - Get a category.
async fn get_category(
    State(state): State<AppState>,
    _acting: ActingUser,
    Path(category_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = CategoryRepository::new((*state.db).clone());

    match repo.get(category_id).await {
        Ok(category) => (StatusCode::OK, Json(category_response(category))).into_response(),
        Err(e) => repo_error(&e),
    }
}

/// PATCH `/categories/{category_id}` - Update a category.
async fn update_category(
    State(state): State<AppState>,
    acting: ActingUser,
    Path(category_id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> impl IntoResponse {
    if !acting.role.can_manage_catalog() {
        return forbidden();
    }

    let repo = CategoryRepository::new((*state.db).clone());
    let input = UpdateCategoryInput {
        name: payload.name,
        description: payload.description,
    };

    match repo.update(category_id, input).await {
        Ok(category) => (StatusCode::OK, Json(category_response(category))).into_response(),
        Err(e) => repo_error(&e),
    }
}

/// DELETE `/categories/{category_id}` - Delete a category.
async fn delete_category(
    State(state): State<AppState>,
    acting: ActingUser,
    Path(category_id): Path<Uuid>,
) -> impl IntoResponse {
    if !acting.role.can_manage_catalog() {
        return forbidden();
    }

    let repo = CategoryRepository::new((*state.db).clone());

    match repo.delete(category_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => repo_error(&e),
    }
}
