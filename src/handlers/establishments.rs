//! Establishment administration. Admin-only; establishments are the
//! tenants, so no tenant scope applies.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::database::models::Establishment;
use crate::error::ApiError;
use crate::services::establishment_service::{
    EstablishmentService, NewEstablishment, UpdateEstablishment,
};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Establishment>>, ApiError> {
    let rows = EstablishmentService::new(state.pool.clone()).list().await?;
    Ok(Json(rows))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Establishment>, ApiError> {
    let row = EstablishmentService::new(state.pool.clone()).get(id).await?;
    Ok(Json(row))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewEstablishment>,
) -> Result<(StatusCode, Json<Establishment>), ApiError> {
    let row = EstablishmentService::new(state.pool.clone()).create(body).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateEstablishment>,
) -> Result<Json<Establishment>, ApiError> {
    let row = EstablishmentService::new(state.pool.clone())
        .update(id, body)
        .await?;
    Ok(Json(row))
}

/// DELETE deactivates rather than removes.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    EstablishmentService::new(state.pool.clone()).deactivate(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
