//! Valuation summaries over aggregated positions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::investments::AssetClass;

/// Totals for one asset class, computed over active positions only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetClassSummary {
    pub asset_class: AssetClass,
    pub total_investment: Decimal,
    pub total_current_value: Decimal,
    pub total_unrealized_pnl: Decimal,
    pub total_day_change: Decimal,
    pub pnl_percentage: Decimal,
    pub position_count: usize,
}

impl AssetClassSummary {
    pub fn empty(asset_class: AssetClass) -> Self {
        Self {
            asset_class,
            total_investment: Decimal::ZERO,
            total_current_value: Decimal::ZERO,
            total_unrealized_pnl: Decimal::ZERO,
            total_day_change: Decimal::ZERO,
            pnl_percentage: Decimal::ZERO,
            position_count: 0,
        }
    }
}

/// Portfolio-wide totals across the included asset classes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValuation {
    pub summaries: Vec<AssetClassSummary>,
    pub total_investment: Decimal,
    pub total_current_value: Decimal,
    pub total_unrealized_pnl: Decimal,
    pub total_day_change: Decimal,
    pub pnl_percentage: Decimal,
}

impl PortfolioValuation {
    pub fn summary(&self, asset_class: AssetClass) -> Option<&AssetClassSummary> {
        self.summaries.iter().find(|s| s.asset_class == asset_class)
    }

    /// Current value held in `asset_class`, zero when it is not included.
    pub fn current_value_of(&self, asset_class: AssetClass) -> Decimal {
        self.summary(asset_class)
            .map(|s| s.total_current_value)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Open and closed F&O exposure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FnoSummary {
    pub open_trades: usize,
    pub closed_trades: usize,
    /// Mark-to-market P&L of open trades.
    pub unrealized_pnl: Decimal,
    /// Settled P&L of closed trades.
    pub realized_pnl: Decimal,
}
