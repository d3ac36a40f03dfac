//! Request and response shapes that only exist at the HTTP boundary.

use chrono::NaiveDate;
use finboard_core::{
    accounts::AccountUpdate, fno::FnoTrade, goals::Goal, goals::GoalUpdate,
    investments::AssetClass, ledger::LedgerEntry, state::LoadFailure, transfers::FamilyTransfer,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account fields editable over HTTP; the id comes from the path.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdateBody {
    pub name: String,
    pub account_type: String,
    pub bank_name: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl AccountUpdateBody {
    pub fn into_update(self, id: i64) -> AccountUpdate {
        AccountUpdate {
            id,
            name: self.name,
            account_type: self.account_type,
            bank_name: self.bank_name,
            is_active: self.is_active,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdateBody {
    pub name: String,
    pub category: String,
    pub target_amount: Decimal,
    pub target_date: Option<NaiveDate>,
    pub account_id: Option<i64>,
}

impl GoalUpdateBody {
    pub fn into_update(self, id: String) -> GoalUpdate {
        GoalUpdate {
            id,
            name: self.name,
            category: self.category,
            target_amount: self.target_amount,
            target_date: self.target_date,
            account_id: self.account_id,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct MarkPriceBody {
    pub price: Decimal,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct LedgerQuery {
    pub account_id: Option<i64>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LotsQuery {
    pub asset_class: AssetClass,
    #[serde(default)]
    pub include_closed: bool,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AssetClassQuery {
    pub asset_class: AssetClass,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsQuery {
    pub asset_class: Option<AssetClass>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub as_of: Option<NaiveDate>,
}

#[derive(Deserialize, Debug, Default)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ClosedTradeResponse {
    pub trade: FnoTrade,
    pub ledger_entry: Option<LedgerEntry>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ContributionResponse {
    pub goal: Goal,
    pub ledger_entry: Option<LedgerEntry>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    pub transfer: FamilyTransfer,
    pub ledger_entry: LedgerEntry,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub updated_lots: usize,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub load_failures: Vec<LoadFailure>,
}
