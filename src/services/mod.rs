pub mod calf_service;
pub mod diarrhea_service;
pub mod establishment_service;
pub mod event_service;
pub mod herd_service;
pub mod mother_service;
pub mod treatment_service;
pub mod user_service;

use sqlx::PgPool;

use crate::auth::TenantScope;
use crate::error::ApiError;

/// Resolve the establishment of a calf through the caller's scope.
///
/// A calf owned by another establishment is indistinguishable from a
/// missing one. Used by every service that creates calf-linked records
/// so children are always stamped with the calf's establishment.
pub(crate) async fn scoped_calf_establishment(
    pool: &PgPool,
    scope: &TenantScope,
    calf_id: i64,
) -> Result<i64, ApiError> {
    let row: Option<(i64,)> = match scope.restriction() {
        Some(est) => {
            sqlx::query_as("SELECT establishment_id FROM calves WHERE id = $1 AND establishment_id = $2")
                .bind(calf_id)
                .bind(est)
                .fetch_optional(pool)
                .await?
        }
        None => {
            sqlx::query_as("SELECT establishment_id FROM calves WHERE id = $1")
                .bind(calf_id)
                .fetch_optional(pool)
                .await?
        }
    };

    row.map(|(est,)| est)
        .ok_or_else(|| ApiError::not_found("calf not found"))
}
