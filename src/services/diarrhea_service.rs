use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::TenantScope;
use crate::database::models::DiarrheaEpisode;
use crate::error::ApiError;
use crate::services::scoped_calf_establishment;

#[derive(Debug, Deserialize)]
pub struct NewDiarrheaEpisode {
    pub calf_id: i64,
    pub started_on: NaiveDate,
    pub ended_on: Option<NaiveDate>,
    pub severity: i16,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDiarrheaEpisode {
    pub ended_on: Option<NaiveDate>,
    pub severity: Option<i16>,
}

pub struct DiarrheaService {
    pool: PgPool,
}

impl DiarrheaService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        scope: &TenantScope,
        requested: Option<i64>,
    ) -> Result<Vec<DiarrheaEpisode>, ApiError> {
        let rows = match scope.list_filter(requested) {
            Some(est) => {
                sqlx::query_as::<_, DiarrheaEpisode>(
                    "SELECT * FROM diarrhea_episodes WHERE establishment_id = $1 \
                     ORDER BY started_on DESC, id DESC",
                )
                .bind(est)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DiarrheaEpisode>(
                    "SELECT * FROM diarrhea_episodes ORDER BY started_on DESC, id DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    pub async fn get(&self, scope: &TenantScope, id: i64) -> Result<DiarrheaEpisode, ApiError> {
        let row = match scope.restriction() {
            Some(est) => {
                sqlx::query_as::<_, DiarrheaEpisode>(
                    "SELECT * FROM diarrhea_episodes WHERE id = $1 AND establishment_id = $2",
                )
                .bind(id)
                .bind(est)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DiarrheaEpisode>("SELECT * FROM diarrhea_episodes WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };
        row.ok_or_else(|| ApiError::not_found("diarrhea episode not found"))
    }

    /// Records the episode against the calf and bumps the calf's
    /// running episode counter.
    pub async fn create(
        &self,
        scope: &TenantScope,
        new: NewDiarrheaEpisode,
    ) -> Result<DiarrheaEpisode, ApiError> {
        validate_severity(new.severity)?;
        let est = scoped_calf_establishment(&self.pool, scope, new.calf_id).await?;

        let row = sqlx::query_as::<_, DiarrheaEpisode>(
            "INSERT INTO diarrhea_episodes (calf_id, started_on, ended_on, severity, establishment_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(new.calf_id)
        .bind(new.started_on)
        .bind(new.ended_on)
        .bind(new.severity)
        .bind(est)
        .fetch_one(&self.pool)
        .await?;

        sqlx::query("UPDATE calves SET diarrhea_episodes = diarrhea_episodes + 1 WHERE id = $1")
            .bind(new.calf_id)
            .execute(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn update(
        &self,
        scope: &TenantScope,
        id: i64,
        upd: UpdateDiarrheaEpisode,
    ) -> Result<DiarrheaEpisode, ApiError> {
        if let Some(severity) = upd.severity {
            validate_severity(severity)?;
        }

        let row = match scope.restriction() {
            Some(est) => {
                sqlx::query_as::<_, DiarrheaEpisode>(
                    "UPDATE diarrhea_episodes SET \
                        ended_on = COALESCE($1, ended_on), \
                        severity = COALESCE($2, severity) \
                     WHERE id = $3 AND establishment_id = $4 RETURNING *",
                )
                .bind(upd.ended_on)
                .bind(upd.severity)
                .bind(id)
                .bind(est)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DiarrheaEpisode>(
                    "UPDATE diarrhea_episodes SET \
                        ended_on = COALESCE($1, ended_on), \
                        severity = COALESCE($2, severity) \
                     WHERE id = $3 RETURNING *",
                )
                .bind(upd.ended_on)
                .bind(upd.severity)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            }
        };
        row.ok_or_else(|| ApiError::not_found("diarrhea episode not found"))
    }

    /// Removing an episode also walks the calf's counter back.
    pub async fn delete(&self, scope: &TenantScope, id: i64) -> Result<(), ApiError> {
        let removed: Option<(i64,)> = match scope.restriction() {
            Some(est) => {
                sqlx::query_as(
                    "DELETE FROM diarrhea_episodes WHERE id = $1 AND establishment_id = $2 \
                     RETURNING calf_id",
                )
                .bind(id)
                .bind(est)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as("DELETE FROM diarrhea_episodes WHERE id = $1 RETURNING calf_id")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };

        let (calf_id,) = removed.ok_or_else(|| ApiError::not_found("diarrhea episode not found"))?;

        sqlx::query(
            "UPDATE calves SET diarrhea_episodes = GREATEST(diarrhea_episodes - 1, 0) WHERE id = $1",
        )
        .bind(calf_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn validate_severity(severity: i16) -> Result<(), ApiError> {
    if (1..=3).contains(&severity) {
        Ok(())
    } else {
        Err(ApiError::bad_request("severity must be between 1 and 3"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_bounds() {
        assert!(validate_severity(1).is_ok());
        assert!(validate_severity(3).is_ok());
        assert!(validate_severity(0).is_err());
        assert!(validate_severity(4).is_err());
    }
}
