use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use finboard_core::{
    export::{to_csv, ExportCollection},
    investments::{AssetClass, Lot},
    Result,
};

fn lots_of(lots: &[Lot], asset_class: AssetClass) -> Vec<Lot> {
    lots.iter()
        .filter(|l| l.asset_class == asset_class)
        .cloned()
        .collect()
}

/// Renders one cached collection as CSV.
pub async fn export_collection(state: &AppState, collection: ExportCollection) -> Result<String> {
    let data = state.finance.snapshot().await;
    match collection {
        ExportCollection::Accounts => to_csv(&data.accounts, None),
        ExportCollection::Ledger => to_csv(&data.ledger, None),
        ExportCollection::Stocks => to_csv(&lots_of(&data.lots, AssetClass::Stock), None),
        ExportCollection::MutualFunds => {
            to_csv(&lots_of(&data.lots, AssetClass::MutualFund), None)
        }
        ExportCollection::Bonds => to_csv(&lots_of(&data.lots, AssetClass::Bond), None),
        ExportCollection::Transactions => to_csv(&data.transactions, None),
        ExportCollection::Fno => to_csv(&data.fno_trades, None),
        ExportCollection::Goals => to_csv(&data.goals, None),
        ExportCollection::Transfers => to_csv(&data.transfers, None),
    }
}

async fn download_csv(
    Path(collection): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<impl IntoResponse> {
    let collection: ExportCollection = collection.parse()?;
    let csv = export_collection(&state, collection).await?;
    let disposition = format!("attachment; filename=\"{}\"", collection.file_name());
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/export/{collection}", get(download_csv))
}
