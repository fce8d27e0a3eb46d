use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Herd {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "id_establecimiento")]
    pub establishment_id: i64,
    pub created_at: DateTime<Utc>,
}
