use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::TenantScope;
use crate::database::models::Herd;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct NewHerd {
    pub name: String,
    pub description: Option<String>,
    /// Only honored for unrestricted administrators.
    #[serde(rename = "id_establecimiento")]
    pub establishment_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateHerd {
    pub name: Option<String>,
    pub description: Option<String>,
}

pub struct HerdService {
    pool: PgPool,
}

impl HerdService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        scope: &TenantScope,
        requested: Option<i64>,
    ) -> Result<Vec<Herd>, ApiError> {
        let rows = match scope.list_filter(requested) {
            Some(est) => {
                sqlx::query_as::<_, Herd>(
                    "SELECT * FROM herds WHERE establishment_id = $1 ORDER BY id",
                )
                .bind(est)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Herd>("SELECT * FROM herds ORDER BY id")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    pub async fn get(&self, scope: &TenantScope, id: i64) -> Result<Herd, ApiError> {
        let row = match scope.restriction() {
            Some(est) => {
                sqlx::query_as::<_, Herd>(
                    "SELECT * FROM herds WHERE id = $1 AND establishment_id = $2",
                )
                .bind(id)
                .bind(est)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Herd>("SELECT * FROM herds WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };
        row.ok_or_else(|| ApiError::not_found("herd not found"))
    }

    pub async fn create(&self, scope: &TenantScope, new: NewHerd) -> Result<Herd, ApiError> {
        let est = scope.create_establishment(new.establishment_id)?;

        let row = sqlx::query_as::<_, Herd>(
            "INSERT INTO herds (name, description, establishment_id) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(est)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        scope: &TenantScope,
        id: i64,
        upd: UpdateHerd,
    ) -> Result<Herd, ApiError> {
        let row = match scope.restriction() {
            Some(est) => {
                sqlx::query_as::<_, Herd>(
                    "UPDATE herds SET \
                        name = COALESCE($1, name), \
                        description = COALESCE($2, description) \
                     WHERE id = $3 AND establishment_id = $4 RETURNING *",
                )
                .bind(&upd.name)
                .bind(&upd.description)
                .bind(id)
                .bind(est)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Herd>(
                    "UPDATE herds SET \
                        name = COALESCE($1, name), \
                        description = COALESCE($2, description) \
                     WHERE id = $3 RETURNING *",
                )
                .bind(&upd.name)
                .bind(&upd.description)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            }
        };
        row.ok_or_else(|| ApiError::not_found("herd not found"))
    }

    pub async fn delete(&self, scope: &TenantScope, id: i64) -> Result<(), ApiError> {
        let result = match scope.restriction() {
            Some(est) => {
                sqlx::query("DELETE FROM herds WHERE id = $1 AND establishment_id = $2")
                    .bind(id)
                    .bind(est)
                    .execute(&self.pool)
                    .await?
            }
            None => {
                sqlx::query("DELETE FROM herds WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool)
                    .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("herd not found"));
        }
        Ok(())
    }
}
