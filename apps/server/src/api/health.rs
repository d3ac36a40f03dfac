use std::sync::Arc;

use crate::{main_lib::AppState, models::HealthResponse};
use axum::{extract::State, routing::get, Json, Router};

async fn healthz() -> &'static str {
    "ok"
}

/// Reports which collections failed to load at startup. The server keeps
/// serving the ones that did load.
async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let status = if state.load_report.is_complete() {
        "ok"
    } else {
        "degraded"
    };
    Json(HealthResponse {
        status,
        load_failures: state.load_report.failures.clone(),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/health", get(get_health))
}
