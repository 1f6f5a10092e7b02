use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    version: &'static str,
}

pub async fn root() -> &'static str {
    "Travel journal API is running"
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_status = match state.content_repo.ping().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::error!("Health check failed: store unreachable: {}", e);
            "down"
        }
    };

    let (status, code) = if db_status == "up" {
        ("healthy", StatusCode::OK)
    } else {
        ("unhealthy", StatusCode::SERVICE_UNAVAILABLE)
    };

    let response = HealthResponse {
        status,
        database: db_status,
        version: env!("CARGO_PKG_VERSION"),
    };

    (code, Json(response))
}
