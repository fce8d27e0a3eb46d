use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::TenantScope;
use crate::database::models::Mother;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct NewMother {
    pub ear_tag: String,
    pub breed: String,
    pub notes: Option<String>,
    /// Only honored for unrestricted administrators.
    #[serde(rename = "id_establecimiento")]
    pub establishment_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMother {
    pub ear_tag: Option<String>,
    pub breed: Option<String>,
    pub notes: Option<String>,
}

pub struct MotherService {
    pool: PgPool,
}

impl MotherService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        scope: &TenantScope,
        requested: Option<i64>,
    ) -> Result<Vec<Mother>, ApiError> {
        let rows = match scope.list_filter(requested) {
            Some(est) => {
                sqlx::query_as::<_, Mother>(
                    "SELECT * FROM mothers WHERE establishment_id = $1 ORDER BY id",
                )
                .bind(est)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Mother>("SELECT * FROM mothers ORDER BY id")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    pub async fn get(&self, scope: &TenantScope, id: i64) -> Result<Mother, ApiError> {
        let row = match scope.restriction() {
            Some(est) => {
                sqlx::query_as::<_, Mother>(
                    "SELECT * FROM mothers WHERE id = $1 AND establishment_id = $2",
                )
                .bind(id)
                .bind(est)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Mother>("SELECT * FROM mothers WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };
        row.ok_or_else(|| ApiError::not_found("mother not found"))
    }

    pub async fn create(&self, scope: &TenantScope, new: NewMother) -> Result<Mother, ApiError> {
        let est = scope.create_establishment(new.establishment_id)?;

        let row = sqlx::query_as::<_, Mother>(
            "INSERT INTO mothers (ear_tag, breed, notes, establishment_id) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&new.ear_tag)
        .bind(&new.breed)
        .bind(&new.notes)
        .bind(est)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        scope: &TenantScope,
        id: i64,
        upd: UpdateMother,
    ) -> Result<Mother, ApiError> {
        let row = match scope.restriction() {
            Some(est) => {
                sqlx::query_as::<_, Mother>(
                    "UPDATE mothers SET \
                        ear_tag = COALESCE($1, ear_tag), \
                        breed = COALESCE($2, breed), \
                        notes = COALESCE($3, notes) \
                     WHERE id = $4 AND establishment_id = $5 RETURNING *",
                )
                .bind(&upd.ear_tag)
                .bind(&upd.breed)
                .bind(&upd.notes)
                .bind(id)
                .bind(est)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Mother>(
                    "UPDATE mothers SET \
                        ear_tag = COALESCE($1, ear_tag), \
                        breed = COALESCE($2, breed), \
                        notes = COALESCE($3, notes) \
                     WHERE id = $4 RETURNING *",
                )
                .bind(&upd.ear_tag)
                .bind(&upd.breed)
                .bind(&upd.notes)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            }
        };
        row.ok_or_else(|| ApiError::not_found("mother not found"))
    }

    pub async fn delete(&self, scope: &TenantScope, id: i64) -> Result<(), ApiError> {
        let result = match scope.restriction() {
            Some(est) => {
                sqlx::query("DELETE FROM mothers WHERE id = $1 AND establishment_id = $2")
                    .bind(id)
                    .bind(est)
                    .execute(&self.pool)
                    .await?
            }
            None => {
                sqlx::query("DELETE FROM mothers WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool)
                    .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("mother not found"));
        }
        Ok(())
    }
}
