//! Unauthenticated service routes.

use crate::client::language::Language;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Serialize)]
struct Status {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

async fn health() -> Json<Status> {
    Json(Status {
        status: "ok",
        database: None,
    })
}

/// Ready once the database answers and the account table exists.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Status>) {
    let migrated: Result<bool, _> = sqlx::query_scalar("SELECT to_regclass('account') IS NOT NULL")
        .fetch_one(&state.pool)
        .await;
    let database = match migrated {
        Ok(true) => return (StatusCode::OK, Json(Status { status: "ok", database: Some("ok") })),
        Ok(false) => "not_migrated",
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            "unavailable"
        }
    };
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(Status {
            status: "degraded",
            database: Some(database),
        }),
    )
}

async fn version() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn info() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "api_prefix": "/api",
        "languages": [Language::En.code(), Language::Fr.code()],
    }))
}

/// GET /health, /ready, /version, /info.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .route("/info", get(info))
        .with_state(state)
}
