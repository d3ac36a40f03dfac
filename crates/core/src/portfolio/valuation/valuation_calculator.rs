use rust_decimal::Decimal;

use super::valuation_model::{AssetClassSummary, FnoSummary, PortfolioValuation};
use crate::fno::FnoTrade;
use crate::investments::AssetClass;
use crate::portfolio::aggregation::{pnl_percentage, Position};

/// Mark-to-market move since the previous price; zero when there is none.
pub fn day_change(position: &Position) -> Decimal {
    let previous = position.previous_price.unwrap_or(position.current_price);
    (position.current_price - previous) * position.quantity
}

/// Summarizes the active positions of one asset class.
///
/// Classes that do not store per-lot P&L (mutual funds) have their
/// unrealized P&L recomputed as current value minus investment.
pub fn summarize_positions(asset_class: AssetClass, positions: &[Position]) -> AssetClassSummary {
    let mut summary = AssetClassSummary::empty(asset_class);
    for position in positions
        .iter()
        .filter(|p| p.asset_class == asset_class && p.is_active())
    {
        summary.total_investment += position.cost_basis;
        summary.total_current_value += position.current_value;
        summary.total_unrealized_pnl += position.unrealized_pnl;
        summary.total_day_change += day_change(position);
        summary.position_count += 1;
    }

    if !asset_class.stores_lot_pnl() {
        summary.total_unrealized_pnl = summary.total_current_value - summary.total_investment;
    }
    summary.pnl_percentage = pnl_percentage(summary.total_unrealized_pnl, summary.total_investment);
    summary
}

impl PortfolioValuation {
    pub fn from_summaries(summaries: Vec<AssetClassSummary>) -> Self {
        let total_investment: Decimal = summaries.iter().map(|s| s.total_investment).sum();
        let total_current_value: Decimal = summaries.iter().map(|s| s.total_current_value).sum();
        let total_unrealized_pnl: Decimal =
            summaries.iter().map(|s| s.total_unrealized_pnl).sum();
        let total_day_change: Decimal = summaries.iter().map(|s| s.total_day_change).sum();

        Self {
            summaries,
            total_investment,
            total_current_value,
            total_unrealized_pnl,
            total_day_change,
            pnl_percentage: pnl_percentage(total_unrealized_pnl, total_investment),
        }
    }
}

impl FnoSummary {
    pub fn from_trades(trades: &[FnoTrade]) -> Self {
        trades.iter().fold(FnoSummary::default(), |mut acc, trade| {
            if trade.is_closed() {
                acc.closed_trades += 1;
                acc.realized_pnl += trade.pnl;
            } else {
                acc.open_trades += 1;
                acc.unrealized_pnl += trade.pnl;
            }
            acc
        })
    }
}
