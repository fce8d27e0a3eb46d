use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::auth::Role;

/// A principal. Accounts are never hard-deleted; `active` is toggled
/// instead so historical records keep a valid author.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(rename = "id_establecimiento")]
    pub establishment_id: Option<i64>,
    pub active: bool,
    pub last_access: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
