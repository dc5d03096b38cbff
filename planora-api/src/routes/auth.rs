/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /v1/auth/register` - Create an account and issue tokens
/// - `POST /v1/auth/login` - Verify credentials and issue tokens
/// - `POST /v1/auth/refresh` - Exchange a refresh token for a new
///   access token
///
/// Registering with the email of a provisional user (created by
/// template expansion) claims that user: the existing id keeps all its
/// project/area relations and gains credentials.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use planora_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User},
    store::UserStore,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (also checked for strength)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Optional display name; falls back to the email local part
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// User ID
    pub user_id: String,

    /// Access token (24h)
    pub access_token: String,

    /// Refresh token (30d)
    pub refresh_token: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// User ID
    pub user_id: String,

    /// Access token (24h)
    pub access_token: String,

    /// Refresh token (30d)
    pub refresh_token: String,
}

/// Refresh token request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token
    pub refresh_token: String,
}

/// Refresh token response
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// New access token (24h)
    pub access_token: String,
}

fn validation_message(e: validator::ValidationErrors) -> ApiError {
    let message = e
        .field_errors()
        .values()
        .flat_map(|errors| errors.iter())
        .filter_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Validation failed".to_string());
    ApiError::BadRequest(message)
}

/// Register a new user
///
/// # Errors
///
/// - `400 Bad Request`: validation or password strength failure
/// - `409 Conflict`: email already registered
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    req.validate().map_err(validation_message)?;

    password::validate_password_strength(&req.password).map_err(ApiError::BadRequest)?;

    let password_hash = password::hash_password(&req.password)?;

    let name = req
        .name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| {
            req.email
                .split('@')
                .next()
                .unwrap_or("User")
                .to_string()
        });

    let user = match state.store.find_user_by_email(&req.email).await? {
        Some(existing) if existing.is_registered() => {
            return Err(ApiError::Conflict(format!(
                "Email {} is already registered",
                req.email
            )));
        }
        // claim a provisional user created by template expansion
        Some(provisional) => state
            .store
            .set_user_credentials(provisional.id, &password_hash)
            .await?
            .ok_or_else(|| ApiError::Internal("User vanished during registration".to_string()))?,
        None => {
            state
                .store
                .create_user(CreateUser {
                    email: req.email.clone(),
                    initials: User::initials_for(&name),
                    name,
                    password_hash: Some(password_hash),
                    avatar_url: None,
                    handle: None,
                    wallet_address: None,
                })
                .await?
        }
    };

    let access_claims = jwt::Claims::new(user.id, jwt::TokenType::Access);
    let refresh_claims = jwt::Claims::new(user.id, jwt::TokenType::Refresh);

    let access_token = jwt::create_token(&access_claims, state.jwt_secret())?;
    let refresh_token = jwt::create_token(&refresh_claims, state.jwt_secret())?;

    Ok(Json(RegisterResponse {
        user_id: user.id.to_string(),
        access_token,
        refresh_token,
    }))
}

/// Login
///
/// # Errors
///
/// - `400 Bad Request`: validation failure
/// - `401 Unauthorized`: unknown email, wrong password, or a
///   provisional user that has not registered yet
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate().map_err(validation_message)?;

    let user = state
        .store
        .find_user_by_email(&req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let Some(password_hash) = &user.password_hash else {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    };

    let valid = password::verify_password(&req.password, password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    state.store.record_login(user.id).await?;

    let access_claims = jwt::Claims::new(user.id, jwt::TokenType::Access);
    let refresh_claims = jwt::Claims::new(user.id, jwt::TokenType::Refresh);

    let access_token = jwt::create_token(&access_claims, state.jwt_secret())?;
    let refresh_token = jwt::create_token(&refresh_claims, state.jwt_secret())?;

    Ok(Json(LoginResponse {
        user_id: user.id.to_string(),
        access_token,
        refresh_token,
    }))
}

/// Token refresh
///
/// # Errors
///
/// - `401 Unauthorized`: invalid or expired refresh token
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let access_token = jwt::refresh_access_token(&req.refresh_token, state.jwt_secret())?;

    Ok(Json(RefreshResponse { access_token }))
}
