use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A calf under rearing. `diarrhea_episodes` is a running counter kept
/// in step with the diarrhea episode records.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Calf {
    pub id: i64,
    pub ear_tag: String,
    pub sex: String,
    pub birth_date: NaiveDate,
    pub birth_weight_kg: Option<Decimal>,
    pub mother_id: Option<i64>,
    pub diarrhea_episodes: i32,
    #[serde(rename = "id_establecimiento")]
    pub establishment_id: i64,
    pub created_at: DateTime<Utc>,
}
