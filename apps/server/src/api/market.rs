use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::SearchQuery,
};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use finboard_core::market_data::{
    search_bonds, BondListing, FundQuote, FundSearchResult, MutualFundProvider,
};

fn fund_provider(state: &AppState) -> ApiResult<Arc<dyn MutualFundProvider>> {
    state
        .finance
        .fund_provider()
        .ok_or_else(|| ApiError::NotImplemented("Mutual fund quotes are not configured".into()))
}

async fn search_bond_catalog(Query(query): Query<SearchQuery>) -> Json<Vec<BondListing>> {
    Json(search_bonds(&query.q))
}

async fn search_funds(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<FundSearchResult>>> {
    let results = fund_provider(&state)?.search(&query.q).await?;
    Ok(Json(results))
}

async fn get_fund_quote(
    Path(scheme_code): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<FundQuote>> {
    let quote = fund_provider(&state)?.latest_quote(&scheme_code).await?;
    Ok(Json(quote))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/market/bonds", get(search_bond_catalog))
        .route("/market/mutual-funds", get(search_funds))
        .route("/market/mutual-funds/{scheme_code}/quote", get(get_fund_quote))
}
