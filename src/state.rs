use sqlx::PgPool;

/// Shared application state handed to every handler.
///
/// Holds stateless configuration-derived resources only; per-request
/// context (claims, tenant scope) travels as request extensions instead.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}
