/// User endpoints
///
/// # Endpoints
///
/// - `GET /v1/users` - List users (assignee/participant pickers)
/// - `GET /v1/users/me` - The acting user

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use planora_shared::{auth::middleware::AuthContext, models::user::User, store::UserStore};
use serde::Serialize;
use uuid::Uuid;

/// Public user representation (no credential material)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub initials: String,
    pub avatar_url: Option<String>,
    pub handle: Option<String>,
    pub wallet_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            initials: user.initials,
            avatar_url: user.avatar_url,
            handle: user.handle,
            wallet_address: user.wallet_address,
            created_at: user.created_at,
        }
    }
}

/// Lists all users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state.store.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Returns the acting user
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .store
        .get_user(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}
