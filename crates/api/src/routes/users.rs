//! User administration routes (read-only; credentials live elsewhere).

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, error::error_response, extract::ActingUser};
use duka_db::repositories::user::{UserError, UserRepository, domain_role};
use duka_shared::AppError;

/// Creates the user routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users))
}

/// Response for a user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Full name.
    pub full_name: String,
    /// Role.
    pub role: String,
    /// Employee ID.
    pub employee_id: Option<String>,
    /// Active flag.
    pub is_active: bool,
    /// Created at timestamp.
    pub created_at: String,
}

/// GET `/users` - List users. Boss only.
async fn list_users(State(state): State<AppState>, acting: ActingUser) -> impl IntoResponse {
    if !acting.role.can_manage_users() {
        return error_response(&AppError::Forbidden("Only BOSS can view users".into()));
    }

    let repo = UserRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(users) => {
            let items: Vec<UserResponse> = users
                .into_iter()
                .map(|u| UserResponse {
                    id: u.id,
                    username: u.username,
                    full_name: u.full_name,
                    role: domain_role(&u.role).to_string(),
                    employee_id: u.employee_id,
                    is_active: u.is_active,
                    created_at: u.created_at.to_rfc3339(),
                })
                .collect();
            (StatusCode::OK, Json(json!({ "users": items }))).into_response()
        }
        Err(UserError::NotFound(id)) => error_response(&AppError::NotFound(format!("User {id}"))),
        Err(UserError::Database(e)) => error_response(&AppError::Database(e.to_string())),
    }
}
