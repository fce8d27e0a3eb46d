use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::TenantScope;
use crate::database::models::Treatment;
use crate::error::ApiError;
use crate::services::scoped_calf_establishment;

#[derive(Debug, Deserialize)]
pub struct NewTreatment {
    pub medicine: String,
    pub dose_ml: Option<Decimal>,
    pub treatment_date: NaiveDate,
    pub calf_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTreatment {
    pub medicine: Option<String>,
    pub dose_ml: Option<Decimal>,
    pub treatment_date: Option<NaiveDate>,
}

pub struct TreatmentService {
    pool: PgPool,
}

impl TreatmentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        scope: &TenantScope,
        requested: Option<i64>,
    ) -> Result<Vec<Treatment>, ApiError> {
        let rows = match scope.list_filter(requested) {
            Some(est) => {
                sqlx::query_as::<_, Treatment>(
                    "SELECT * FROM treatments WHERE establishment_id = $1 \
                     ORDER BY treatment_date DESC, id DESC",
                )
                .bind(est)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Treatment>(
                    "SELECT * FROM treatments ORDER BY treatment_date DESC, id DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    pub async fn get(&self, scope: &TenantScope, id: i64) -> Result<Treatment, ApiError> {
        let row = match scope.restriction() {
            Some(est) => {
                sqlx::query_as::<_, Treatment>(
                    "SELECT * FROM treatments WHERE id = $1 AND establishment_id = $2",
                )
                .bind(id)
                .bind(est)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Treatment>("SELECT * FROM treatments WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };
        row.ok_or_else(|| ApiError::not_found("treatment not found"))
    }

    /// Treatments always hang off a calf; the record is stamped with the
    /// calf's establishment after resolving it through the scope.
    pub async fn create(&self, scope: &TenantScope, new: NewTreatment) -> Result<Treatment, ApiError> {
        let est = scoped_calf_establishment(&self.pool, scope, new.calf_id).await?;

        let row = sqlx::query_as::<_, Treatment>(
            "INSERT INTO treatments (medicine, dose_ml, treatment_date, calf_id, establishment_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&new.medicine)
        .bind(new.dose_ml)
        .bind(new.treatment_date)
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
        upd: UpdateTreatment,
    ) -> Result<Treatment, ApiError> {
        let row = match scope.restriction() {
            Some(est) => {
                sqlx::query_as::<_, Treatment>(
                    "UPDATE treatments SET \
                        medicine = COALESCE($1, medicine), \
                        dose_ml = COALESCE($2, dose_ml), \
                        treatment_date = COALESCE($3, treatment_date) \
                     WHERE id = $4 AND establishment_id = $5 RETURNING *",
                )
                .bind(&upd.medicine)
                .bind(upd.dose_ml)
                .bind(upd.treatment_date)
                .bind(id)
                .bind(est)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Treatment>(
                    "UPDATE treatments SET \
                        medicine = COALESCE($1, medicine), \
                        dose_ml = COALESCE($2, dose_ml), \
                        treatment_date = COALESCE($3, treatment_date) \
                     WHERE id = $4 RETURNING *",
                )
                .bind(&upd.medicine)
                .bind(upd.dose_ml)
                .bind(upd.treatment_date)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            }
        };
        row.ok_or_else(|| ApiError::not_found("treatment not found"))
    }

    pub async fn delete(&self, scope: &TenantScope, id: i64) -> Result<(), ApiError> {
        let result = match scope.restriction() {
            Some(est) => {
                sqlx::query("DELETE FROM treatments WHERE id = $1 AND establishment_id = $2")
                    .bind(id)
                    .bind(est)
                    .execute(&self.pool)
                    .await?
            }
            None => {
                sqlx::query("DELETE FROM treatments WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool)
                    .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("treatment not found"));
        }
        Ok(())
    }
}
