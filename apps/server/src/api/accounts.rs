use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState, models::AccountUpdateBody};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use finboard_core::{
    accounts::{Account, AddFunds, NewAccount, SetBalance},
    ledger::{LedgerEntry, Reconciliation},
};

async fn list_accounts(State(state): State<Arc<AppState>>) -> Json<Vec<Account>> {
    Json(state.finance.accounts().await)
}

async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewAccount>,
) -> ApiResult<(StatusCode, Json<Account>)> {
    let account = state.finance.create_account(payload).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

async fn update_account(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AccountUpdateBody>,
) -> ApiResult<Json<Account>> {
    let account = state.finance.update_account(payload.into_update(id)).await?;
    Ok(Json(account))
}

async fn delete_account(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.finance.delete_account(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_funds(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddFunds>,
) -> ApiResult<Json<LedgerEntry>> {
    let entry = state.finance.add_funds(id, payload).await?;
    Ok(Json(entry))
}

/// Responds with the adjustment entry, or `null` when the balance was
/// already at the requested value.
async fn set_balance(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SetBalance>,
) -> ApiResult<Json<Option<LedgerEntry>>> {
    let entry = state.finance.set_balance(id, payload).await?;
    Ok(Json(entry))
}

async fn reconcile_account(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Reconciliation>> {
    let reconciliation = state.finance.reconcile(id).await?;
    Ok(Json(reconciliation))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/{id}", put(update_account).delete(delete_account))
        .route("/accounts/{id}/funds", post(add_funds))
        .route("/accounts/{id}/balance", put(set_balance))
        .route("/accounts/{id}/reconciliation", get(reconcile_account))
}
