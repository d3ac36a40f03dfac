//! Net worth and dashboard models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::Currency;
use crate::portfolio::lifetime::LifetimeEarnings;
use crate::portfolio::valuation::{AssetClassSummary, FnoSummary};

/// One slice of the allocation breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    /// Category key (`CASH` or an asset class)
    pub category: String,
    /// Display name
    pub name: String,
    /// Value in base currency
    pub value: Decimal,
    /// Share of the allocation total, 0-100
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetWorth {
    /// Sum of base-currency account balances
    pub liquidity: Decimal,
    /// Current value of enabled asset classes
    pub investments: Decimal,
    pub net_worth: Decimal,
    pub currency: Currency,
    pub allocation: Vec<AllocationSlice>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressSummary {
    pub goal_count: usize,
    pub achieved_count: usize,
    pub total_target: Decimal,
    pub total_saved: Decimal,
    /// Saved over target across all goals, capped at 100.
    pub overall_progress: Decimal,
}

/// Everything the dashboard shows, derived in one pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub as_of: NaiveDate,
    pub currency: Currency,
    pub net_worth: Decimal,
    pub liquidity: Decimal,
    pub investments: Decimal,
    pub total_investment: Decimal,
    /// Held classes plus open F&O mark-to-market.
    pub total_unrealized_pnl: Decimal,
    pub total_day_change: Decimal,
    pub summaries: Vec<AssetClassSummary>,
    pub fno: Option<FnoSummary>,
    pub lifetime: LifetimeEarnings,
    pub goals: GoalProgressSummary,
    pub allocation: Vec<AllocationSlice>,
}
