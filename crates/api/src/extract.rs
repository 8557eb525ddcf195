//! Request extractors.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::Response,
};
use uuid::Uuid;

use crate::{AppState, error::error_response};
use duka_core::access::Role;
use duka_db::repositories::user::{UserError, UserRepository, domain_role};
use duka_shared::AppError;

/// Header naming the acting user. Authentication itself happens upstream
/// (gateway/session layer); this API only resolves identity to a role.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user acting on this request.
///
/// Use this in handlers to get the acting user's identity and role:
///
/// ```ignore
/// async fn handler(acting: ActingUser) -> impl IntoResponse {
///     if !acting.role.can_view_reports() { /* 403 */ }
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ActingUser {
    /// User ID.
    pub id: Uuid,
    /// Username, for display and scoping.
    pub username: String,
    /// Resolved role.
    pub role: Role,
}

impl FromRequestParts<AppState> for ActingUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok());

        let Some(raw_id) = header else {
            return Err(error_response(&AppError::Unauthorized(
                "X-User-Id header is required".into(),
            )));
        };

        let Ok(user_id) = Uuid::parse_str(raw_id) else {
            return Err(error_response(&AppError::Unauthorized(
                "X-User-Id must be a UUID".into(),
            )));
        };

        let repo = UserRepository::new((*state.db).clone());
        match repo.find_active_by_id(user_id).await {
            Ok(user) => Ok(Self {
                id: user.id,
                username: user.username,
                role: domain_role(&user.role),
            }),
            Err(UserError::NotFound(_)) => Err(error_response(&AppError::Unauthorized(
                "No active user with that ID".into(),
            ))),
            Err(UserError::Database(e)) => {
                Err(error_response(&AppError::Database(e.to_string())))
            }
        }
    }
}
