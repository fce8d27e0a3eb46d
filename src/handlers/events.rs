use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use crate::auth::TenantScope;
use crate::database::models::Event;
use crate::error::ApiError;
use crate::services::event_service::{EventService, NewEvent, UpdateEvent};
use crate::state::AppState;

use super::ListQuery;

pub async fn list(
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let rows = EventService::new(state.pool.clone())
        .list(&scope, query.establishment_id)
        .await?;
    Ok(Json(rows))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Path(id): Path<i64>,
) -> Result<Json<Event>, ApiError> {
    let row = EventService::new(state.pool.clone()).get(&scope, id).await?;
    Ok(Json(row))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Json(body): Json<NewEvent>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let row = EventService::new(state.pool.clone()).create(&scope, body).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateEvent>,
) -> Result<Json<Event>, ApiError> {
    let row = EventService::new(state.pool.clone())
        .update(&scope, id, body)
        .await?;
    Ok(Json(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    EventService::new(state.pool.clone()).delete(&scope, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
