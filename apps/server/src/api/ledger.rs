use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState, models::LedgerQuery};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use finboard_core::ledger::{LedgerEntry, NewLedgerEntry};

async fn list_entries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LedgerQuery>,
) -> Json<Vec<LedgerEntry>> {
    Json(state.finance.ledger(query.account_id).await)
}

async fn create_entry(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewLedgerEntry>,
) -> ApiResult<(StatusCode, Json<LedgerEntry>)> {
    let entry = state.finance.record_ledger_entry(payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn delete_entry(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.finance.delete_ledger_entry(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ledger", get(list_entries).post(create_entry))
        .route("/ledger/{id}", delete(delete_entry))
}
