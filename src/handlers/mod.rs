pub mod auth;
pub mod calves;
pub mod diarrheas;
pub mod establishments;
pub mod events;
pub mod herds;
pub mod mothers;
pub mod treatments;
pub mod users;

use serde::Deserialize;

/// Optional establishment narrowing for list endpoints. Only honored
/// for unrestricted administrators; everyone else is pinned to their
/// own establishment by the tenant guard.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "id_establecimiento")]
    pub establishment_id: Option<i64>,
}
