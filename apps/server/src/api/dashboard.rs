use std::sync::Arc;

use crate::{main_lib::AppState, models::DashboardQuery};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Local;
use finboard_core::portfolio::DashboardMetrics;

/// Net worth, liquidity, per-class valuation, lifetime earnings and goal
/// progress as of `asOf` (today by default).
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Json<DashboardMetrics> {
    let as_of = query.as_of.unwrap_or_else(|| Local::now().date_naive());
    Json(state.finance.dashboard(as_of).await)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard", get(get_dashboard))
}
