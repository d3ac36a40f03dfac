use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState, models::TransferResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use finboard_core::transfers::{FamilyTransfer, NewFamilyTransfer};

async fn list_transfers(State(state): State<Arc<AppState>>) -> Json<Vec<FamilyTransfer>> {
    Json(state.finance.transfers().await)
}

async fn create_transfer(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewFamilyTransfer>,
) -> ApiResult<(StatusCode, Json<TransferResponse>)> {
    let (transfer, ledger_entry) = state.finance.create_transfer(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(TransferResponse {
            transfer,
            ledger_entry,
        }),
    ))
}

async fn delete_transfer(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.finance.delete_transfer(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/transfers", get(list_transfers).post(create_transfer))
        .route("/transfers/{id}", delete(delete_transfer))
}
