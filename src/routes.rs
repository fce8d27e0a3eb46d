use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::middleware::{guard_middleware, jwt_auth_middleware};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        // Guarded API
        .merge(protected_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
}

/// Everything under /api runs through claims extraction, then the
/// policy guard (tenant scope + roles). Layer order matters: the last
/// `route_layer` added runs first.
fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/whoami", get(handlers::auth::whoami))
        .merge(user_routes())
        .merge(establishment_routes())
        .merge(mother_routes())
        .merge(calf_routes())
        .merge(herd_routes())
        .merge(event_routes())
        .merge(treatment_routes())
        .merge(diarrhea_routes())
        .route_layer(axum_middleware::from_fn(guard_middleware))
        .route_layer(axum_middleware::from_fn(jwt_auth_middleware))
}

fn user_routes() -> Router<AppState> {
    use handlers::users;

    Router::new()
        .route("/api/users", get(users::list))
        .route(
            "/api/users/:id",
            get(users::get).put(users::update).delete(users::delete),
        )
}

fn establishment_routes() -> Router<AppState> {
    use handlers::establishments;

    Router::new()
        .route(
            "/api/establishments",
            get(establishments::list).post(establishments::create),
        )
        .route(
            "/api/establishments/:id",
            get(establishments::get)
                .put(establishments::update)
                .delete(establishments::delete),
        )
}

fn mother_routes() -> Router<AppState> {
    use handlers::mothers;

    Router::new()
        .route("/api/mothers", get(mothers::list).post(mothers::create))
        .route(
            "/api/mothers/:id",
            get(mothers::get).put(mothers::update).delete(mothers::delete),
        )
}

fn calf_routes() -> Router<AppState> {
    use handlers::calves;

    Router::new()
        .route("/api/calves", get(calves::list).post(calves::create))
        .route(
            "/api/calves/:id",
            get(calves::get).put(calves::update).delete(calves::delete),
        )
}

fn herd_routes() -> Router<AppState> {
    use handlers::herds;

    Router::new()
        .route("/api/herds", get(herds::list).post(herds::create))
        .route(
            "/api/herds/:id",
            get(herds::get).put(herds::update).delete(herds::delete),
        )
}

fn event_routes() -> Router<AppState> {
    use handlers::events;

    Router::new()
        .route("/api/events", get(events::list).post(events::create))
        .route(
            "/api/events/:id",
            get(events::get).put(events::update).delete(events::delete),
        )
}

fn treatment_routes() -> Router<AppState> {
    use handlers::treatments;

    Router::new()
        .route(
            "/api/treatments",
            get(treatments::list).post(treatments::create),
        )
        .route(
            "/api/treatments/:id",
            get(treatments::get)
                .put(treatments::update)
                .delete(treatments::delete),
        )
}

fn diarrhea_routes() -> Router<AppState> {
    use handlers::diarrheas;

    Router::new()
        .route(
            "/api/diarrheas",
            get(diarrheas::list).post(diarrheas::create),
        )
        .route(
            "/api/diarrheas/:id",
            get(diarrheas::get)
                .put(diarrheas::update)
                .delete(diarrheas::delete),
        )
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Guachera API",
        "version": version,
        "description": "Livestock management backend for calf rearing operations",
        "endpoints": {
            "home": "/ (public)",
            "auth": "/auth/login, /auth/register (public - token acquisition)",
            "session": "/api/auth/whoami (protected)",
            "admin": "/api/users, /api/establishments (admin only)",
            "domain": "/api/{mothers,calves,herds,events,treatments,diarrheas} (protected, establishment-scoped)",
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
