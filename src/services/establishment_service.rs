use serde::Deserialize;
use sqlx::PgPool;

use crate::database::models::Establishment;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct NewEstablishment {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEstablishment {
    pub name: Option<String>,
    pub active: Option<bool>,
}

/// Establishment administration. Routes are admin-only; no tenant scope
/// applies because establishments are the tenants themselves.
pub struct EstablishmentService {
    pool: PgPool,
}

impl EstablishmentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Establishment>, ApiError> {
        let rows = sqlx::query_as::<_, Establishment>("SELECT * FROM establishments ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i64) -> Result<Establishment, ApiError> {
        sqlx::query_as::<_, Establishment>("SELECT * FROM establishments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::not_found("establishment not found"))
    }

    pub async fn create(&self, new: NewEstablishment) -> Result<Establishment, ApiError> {
        let row = sqlx::query_as::<_, Establishment>(
            "INSERT INTO establishments (name) VALUES ($1) RETURNING *",
        )
        .bind(&new.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: i64,
        upd: UpdateEstablishment,
    ) -> Result<Establishment, ApiError> {
        let row = sqlx::query_as::<_, Establishment>(
            "UPDATE establishments SET \
                name = COALESCE($1, name), \
                active = COALESCE($2, active) \
             WHERE id = $3 RETURNING *",
        )
        .bind(&upd.name)
        .bind(upd.active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or_else(|| ApiError::not_found("establishment not found"))
    }

    /// Sites with history are switched off rather than removed.
    pub async fn deactivate(&self, id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("UPDATE establishments SET active = false WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("establishment not found"));
        }
        Ok(())
    }
}
