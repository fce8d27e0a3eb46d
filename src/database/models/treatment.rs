use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Treatment {
    pub id: i64,
    pub medicine: String,
    pub dose_ml: Option<Decimal>,
    pub treatment_date: NaiveDate,
    pub calf_id: i64,
    #[serde(rename = "id_establecimiento")]
    pub establishment_id: i64,
    pub created_at: DateTime<Utc>,
}
