//! User administration. All routes here are admin-only and skip the
//! tenant guard (administrators manage accounts across establishments).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::database::models::User;
use crate::error::ApiError;
use crate::services::user_service::{UpdateUser, UserService};
use crate::state::AppState;

use super::ListQuery;

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    let rows = UserService::new(state.pool.clone())
        .list(query.establishment_id)
        .await?;
    Ok(Json(rows))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    let row = UserService::new(state.pool.clone()).get(id).await?;
    Ok(Json(row))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateUser>,
) -> Result<Json<User>, ApiError> {
    let row = UserService::new(state.pool.clone()).update(id, body).await?;
    Ok(Json(row))
}

/// DELETE deactivates; accounts are never hard-deleted.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    UserService::new(state.pool.clone()).deactivate(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
