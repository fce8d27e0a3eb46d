use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::TenantScope;
use crate::database::models::Calf;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct NewCalf {
    pub ear_tag: String,
    pub sex: String,
    pub birth_date: NaiveDate,
    pub birth_weight_kg: Option<Decimal>,
    pub mother_id: Option<i64>,
    /// Only honored for unrestricted administrators.
    #[serde(rename = "id_establecimiento")]
    pub establishment_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCalf {
    pub ear_tag: Option<String>,
    pub sex: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub birth_weight_kg: Option<Decimal>,
}

pub struct CalfService {
    pool: PgPool,
}

impl CalfService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        scope: &TenantScope,
        requested: Option<i64>,
    ) -> Result<Vec<Calf>, ApiError> {
        let rows = match scope.list_filter(requested) {
            Some(est) => {
                sqlx::query_as::<_, Calf>(
                    "SELECT * FROM calves WHERE establishment_id = $1 ORDER BY id",
                )
                .bind(est)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Calf>("SELECT * FROM calves ORDER BY id")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    pub async fn get(&self, scope: &TenantScope, id: i64) -> Result<Calf, ApiError> {
        let row = match scope.restriction() {
            Some(est) => {
                sqlx::query_as::<_, Calf>(
                    "SELECT * FROM calves WHERE id = $1 AND establishment_id = $2",
                )
                .bind(id)
                .bind(est)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Calf>("SELECT * FROM calves WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };
        row.ok_or_else(|| ApiError::not_found("calf not found"))
    }

    pub async fn create(&self, scope: &TenantScope, new: NewCalf) -> Result<Calf, ApiError> {
        let est = scope.create_establishment(new.establishment_id)?;

        // The mother must live on the same establishment the calf is
        // stamped with; a foreign mother reads as missing.
        if let Some(mother_id) = new.mother_id {
            let owned: Option<(i64,)> =
                sqlx::query_as("SELECT id FROM mothers WHERE id = $1 AND establishment_id = $2")
                    .bind(mother_id)
                    .bind(est)
                    .fetch_optional(&self.pool)
                    .await?;
            if owned.is_none() {
                return Err(ApiError::not_found("mother not found"));
            }
        }

        let row = sqlx::query_as::<_, Calf>(
            "INSERT INTO calves (ear_tag, sex, birth_date, birth_weight_kg, mother_id, establishment_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&new.ear_tag)
        .bind(&new.sex)
        .bind(new.birth_date)
        .bind(new.birth_weight_kg)
        .bind(new.mother_id)
        .bind(est)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        scope: &TenantScope,
        id: i64,
        upd: UpdateCalf,
    ) -> Result<Calf, ApiError> {
        let row = match scope.restriction() {
            Some(est) => {
                sqlx::query_as::<_, Calf>(
                    "UPDATE calves SET \
                        ear_tag = COALESCE($1, ear_tag), \
                        sex = COALESCE($2, sex), \
                        birth_date = COALESCE($3, birth_date), \
                        birth_weight_kg = COALESCE($4, birth_weight_kg) \
                     WHERE id = $5 AND establishment_id = $6 RETURNING *",
                )
                .bind(&upd.ear_tag)
                .bind(&upd.sex)
                .bind(upd.birth_date)
                .bind(upd.birth_weight_kg)
                .bind(id)
                .bind(est)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Calf>(
                    "UPDATE calves SET \
                        ear_tag = COALESCE($1, ear_tag), \
                        sex = COALESCE($2, sex), \
                        birth_date = COALESCE($3, birth_date), \
                        birth_weight_kg = COALESCE($4, birth_weight_kg) \
                     WHERE id = $5 RETURNING *",
                )
                .bind(&upd.ear_tag)
                .bind(&upd.sex)
                .bind(upd.birth_date)
                .bind(upd.birth_weight_kg)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            }
        };
        row.ok_or_else(|| ApiError::not_found("calf not found"))
    }

    pub async fn delete(&self, scope: &TenantScope, id: i64) -> Result<(), ApiError> {
        let result = match scope.restriction() {
            Some(est) => {
                sqlx::query("DELETE FROM calves WHERE id = $1 AND establishment_id = $2")
                    .bind(id)
                    .bind(est)
                    .execute(&self.pool)
                    .await?
            }
            None => {
                sqlx::query("DELETE FROM calves WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool)
                    .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("calf not found"));
        }
        Ok(())
    }
}
