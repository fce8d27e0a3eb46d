use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::TenantScope;
use crate::database::models::Event;
use crate::error::ApiError;
use crate::services::scoped_calf_establishment;

#[derive(Debug, Deserialize)]
pub struct NewEvent {
    pub kind: String,
    pub event_date: NaiveDate,
    pub description: Option<String>,
    pub calf_id: Option<i64>,
    /// Only honored for unrestricted administrators, and only when the
    /// event is not tied to a calf.
    #[serde(rename = "id_establecimiento")]
    pub establishment_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEvent {
    pub kind: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub description: Option<String>,
}

pub struct EventService {
    pool: PgPool,
}

impl EventService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        scope: &TenantScope,
        requested: Option<i64>,
    ) -> Result<Vec<Event>, ApiError> {
        let rows = match scope.list_filter(requested) {
            Some(est) => {
                sqlx::query_as::<_, Event>(
                    "SELECT * FROM events WHERE establishment_id = $1 ORDER BY event_date DESC, id DESC",
                )
                .bind(est)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY event_date DESC, id DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    pub async fn get(&self, scope: &TenantScope, id: i64) -> Result<Event, ApiError> {
        let row = match scope.restriction() {
            Some(est) => {
                sqlx::query_as::<_, Event>(
                    "SELECT * FROM events WHERE id = $1 AND establishment_id = $2",
                )
                .bind(id)
                .bind(est)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };
        row.ok_or_else(|| ApiError::not_found("event not found"))
    }

    pub async fn create(&self, scope: &TenantScope, new: NewEvent) -> Result<Event, ApiError> {
        // A calf-linked event lives wherever the calf lives; a free
        // event follows the usual stamping rules.
        let est = match new.calf_id {
            Some(calf_id) => scoped_calf_establishment(&self.pool, scope, calf_id).await?,
            None => scope.create_establishment(new.establishment_id)?,
        };

        let row = sqlx::query_as::<_, Event>(
            "INSERT INTO events (kind, event_date, description, calf_id, establishment_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&new.kind)
        .bind(new.event_date)
        .bind(&new.description)
        .bind(new.calf_id)
        .bind(est)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        scope: &TenantScope,
        id: i64,
        upd: UpdateEvent,
    ) -> Result<Event, ApiError> {
        let row = match scope.restriction() {
            Some(est) => {
                sqlx::query_as::<_, Event>(
                    "UPDATE events SET \
                        kind = COALESCE($1, kind), \
                        event_date = COALESCE($2, event_date), \
                        description = COALESCE($3, description) \
                     WHERE id = $4 AND establishment_id = $5 RETURNING *",
                )
                .bind(&upd.kind)
                .bind(upd.event_date)
                .bind(&upd.description)
                .bind(id)
                .bind(est)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Event>(
                    "UPDATE events SET \
                        kind = COALESCE($1, kind), \
                        event_date = COALESCE($2, event_date), \
                        description = COALESCE($3, description) \
                     WHERE id = $4 RETURNING *",
                )
                .bind(&upd.kind)
                .bind(upd.event_date)
                .bind(&upd.description)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            }
        };
        row.ok_or_else(|| ApiError::not_found("event not found"))
    }

    pub async fn delete(&self, scope: &TenantScope, id: i64) -> Result<(), ApiError> {
        let result = match scope.restriction() {
            Some(est) => {
                sqlx::query("DELETE FROM events WHERE id = $1 AND establishment_id = $2")
                    .bind(id)
                    .bind(est)
                    .execute(&self.pool)
                    .await?
            }
            None => {
                sqlx::query("DELETE FROM events WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool)
                    .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("event not found"));
        }
        Ok(())
    }
}
