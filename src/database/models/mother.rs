use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Mother {
    pub id: i64,
    pub ear_tag: String,
    pub breed: String,
    pub notes: Option<String>,
    #[serde(rename = "id_establecimiento")]
    pub establishment_id: i64,
    pub created_at: DateTime<Utc>,
}
