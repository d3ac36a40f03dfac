use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use finboard_core::settings::{Settings, SettingsUpdate};

async fn get_settings(State(state): State<Arc<AppState>>) -> Json<Settings> {
    Json(state.finance.settings().await)
}

async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SettingsUpdate>,
) -> ApiResult<Json<Settings>> {
    let settings = state.finance.update_settings(payload).await?;
    Ok(Json(settings))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/settings", get(get_settings).put(update_settings))
}
