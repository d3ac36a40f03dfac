use std::sync::Arc;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{AssetClassQuery, LotsQuery, RefreshResponse, TransactionsQuery},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use finboard_core::{
    investments::{
        BuyRequest, IncomeRequest, InvestmentTransaction, Lot, LotPriceUpdate, SellRequest,
        TradeOutcome,
    },
    portfolio::{summarize_positions, AssetClassSummary, Position},
};

async fn list_lots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LotsQuery>,
) -> Json<Vec<Lot>> {
    Json(
        state
            .finance
            .lots(query.asset_class, query.include_closed)
            .await,
    )
}

async fn list_positions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AssetClassQuery>,
) -> Json<Vec<Position>> {
    Json(state.finance.positions(query.asset_class).await)
}

async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AssetClassQuery>,
) -> Json<AssetClassSummary> {
    let positions = state.finance.positions(query.asset_class).await;
    Json(summarize_positions(query.asset_class, &positions))
}

async fn buy(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BuyRequest>,
) -> ApiResult<(StatusCode, Json<TradeOutcome>)> {
    let outcome = state.finance.buy(payload).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

async fn sell(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SellRequest>,
) -> ApiResult<(StatusCode, Json<TradeOutcome>)> {
    let outcome = state.finance.sell(payload).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

async fn record_income(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<IncomeRequest>,
) -> ApiResult<(StatusCode, Json<TradeOutcome>)> {
    let outcome = state.finance.record_income(payload).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

async fn delete_lot(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.finance.delete_lot(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TransactionsQuery>,
) -> Json<Vec<InvestmentTransaction>> {
    Json(state.finance.transactions(query.asset_class).await)
}

async fn delete_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.finance.delete_transaction(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn update_prices(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Vec<LotPriceUpdate>>,
) -> ApiResult<Json<Vec<Lot>>> {
    let lots = state.finance.update_lot_prices(payload).await?;
    Ok(Json(lots))
}

async fn refresh_fund_prices(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<RefreshResponse>> {
    let updated_lots = state.finance.refresh_fund_prices().await?;
    Ok(Json(RefreshResponse { updated_lots }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/investments/lots", get(list_lots))
        .route("/investments/lots/{id}", delete(delete_lot))
        .route("/investments/positions", get(list_positions))
        .route("/investments/summary", get(get_summary))
        .route("/investments/buy", post(buy))
        .route("/investments/sell", post(sell))
        .route("/investments/income", post(record_income))
        .route("/investments/transactions", get(list_transactions))
        .route("/investments/transactions/{id}", delete(delete_transaction))
        .route("/investments/prices", put(update_prices))
        .route("/investments/prices/refresh", post(refresh_fund_prices))
}
