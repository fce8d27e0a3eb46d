use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{token, Claims};
use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::user_service::{RegisterUser, UserService};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/login - verify credentials and issue a claims token.
///
/// Inactive accounts are turned away before the password is checked, so
/// the answer for them does not depend on credential correctness.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let users = UserService::new(state.pool.clone());

    let user = users
        .find_by_email(&body.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("invalid credentials"))?;

    if !user.active {
        return Err(ApiError::forbidden("account is inactive"));
    }

    if !crate::auth::password::verify(&body.password, &user.password_hash)? {
        return Err(ApiError::unauthorized("invalid credentials"));
    }

    users.touch_last_access(user.id).await?;

    let claims = Claims::new(user.id, user.name.clone(), user.role, user.establishment_id);
    let token = token::sign(&claims)?;

    Ok(Json(json!({ "token": token, "user": user })))
}

/// POST /auth/register - open self-registration. The account stays
/// inactive until an administrator enables it.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    if body.password.len() < 8 {
        return Err(ApiError::bad_request("password must be at least 8 characters"));
    }

    let user = UserService::new(state.pool.clone()).register(body).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/auth/whoami - echo the verified claims context.
pub async fn whoami(Extension(auth): Extension<AuthUser>) -> Json<AuthUser> {
    Json(auth)
}
