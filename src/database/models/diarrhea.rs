use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// One diarrhea episode for a calf. An open episode has no `ended_on`;
/// creating an episode bumps the calf's `diarrhea_episodes` counter.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DiarrheaEpisode {
    pub id: i64,
    pub calf_id: i64,
    pub started_on: NaiveDate,
    pub ended_on: Option<NaiveDate>,
    pub severity: i16,
    #[serde(rename = "id_establecimiento")]
    pub establishment_id: i64,
    pub created_at: DateTime<Utc>,
}
