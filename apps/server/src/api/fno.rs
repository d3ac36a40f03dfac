use std::sync::Arc;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{ClosedTradeResponse, MarkPriceBody},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use finboard_core::fno::{CloseFnoTrade, FnoTrade, NewFnoTrade};

async fn list_trades(State(state): State<Arc<AppState>>) -> Json<Vec<FnoTrade>> {
    Json(state.finance.fno_trades().await)
}

async fn open_trade(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewFnoTrade>,
) -> ApiResult<(StatusCode, Json<FnoTrade>)> {
    let trade = state.finance.open_fno_trade(payload).await?;
    Ok((StatusCode::CREATED, Json(trade)))
}

async fn mark_trade(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MarkPriceBody>,
) -> ApiResult<Json<FnoTrade>> {
    let trade = state.finance.mark_fno_trade(&id, payload.price).await?;
    Ok(Json(trade))
}

async fn close_trade(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CloseFnoTrade>,
) -> ApiResult<Json<ClosedTradeResponse>> {
    let (trade, ledger_entry) = state.finance.close_fno_trade(&id, payload).await?;
    Ok(Json(ClosedTradeResponse {
        trade,
        ledger_entry,
    }))
}

async fn delete_trade(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.finance.delete_fno_trade(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/fno", get(list_trades).post(open_trade))
        .route("/fno/{id}", delete(delete_trade))
        .route("/fno/{id}/price", put(mark_trade))
        .route("/fno/{id}/close", post(close_trade))
}
