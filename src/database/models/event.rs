use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A husbandry event (weaning, vaccination round, pen move, ...),
/// optionally tied to one calf.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub kind: String,
    pub event_date: NaiveDate,
    pub description: Option<String>,
    pub calf_id: Option<i64>,
    #[serde(rename = "id_establecimiento")]
    pub establishment_id: i64,
    pub created_at: DateTime<Utc>,
}
