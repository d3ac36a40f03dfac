use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::net_worth_model::{AllocationSlice, DashboardMetrics, GoalProgressSummary, NetWorth};
use crate::accounts::{Account, Currency};
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::fno::FnoTrade;
use crate::goals::{goal_progress, Goal};
use crate::investments::{AssetClass, InvestmentTransaction, Lot};
use crate::portfolio::aggregation::aggregate_lots;
use crate::portfolio::lifetime::{fno_lifetime, lifetime_breakdown, LifetimeEarnings};
use crate::portfolio::valuation::{summarize_positions, FnoSummary, PortfolioValuation};
use crate::settings::Settings;

const CASH_CATEGORY: &str = "CASH";

/// Sum of balances of accounts held in `base_currency`. Other currencies
/// are left out entirely; there is no conversion.
pub fn liquidity(accounts: &[Account], base_currency: Currency) -> Decimal {
    accounts
        .iter()
        .filter(|a| a.currency == base_currency)
        .map(|a| a.balance)
        .sum()
}

/// Liquidity plus the current value of every enabled held asset class.
///
/// `valuation` is expected to cover enabled classes only; disabled ones are
/// skipped again here so they can never leak in. F&O holds no value.
pub fn compose_net_worth(
    accounts: &[Account],
    settings: &Settings,
    valuation: &PortfolioValuation,
) -> NetWorth {
    let liquidity = liquidity(accounts, settings.base_currency);

    let mut slices: Vec<(String, String, Decimal)> = vec![(
        CASH_CATEGORY.to_string(),
        "Cash".to_string(),
        liquidity,
    )];
    let mut investments = Decimal::ZERO;
    for asset_class in AssetClass::HELD {
        if !settings.is_enabled(asset_class) {
            continue;
        }
        let value = valuation.current_value_of(asset_class);
        investments += value;
        slices.push((
            asset_class.as_str().to_string(),
            asset_class.label().to_string(),
            value,
        ));
    }

    NetWorth {
        liquidity,
        investments,
        net_worth: liquidity + investments,
        currency: settings.base_currency,
        allocation: allocation(slices),
    }
}

fn allocation(slices: Vec<(String, String, Decimal)>) -> Vec<AllocationSlice> {
    let positive: Vec<_> = slices
        .into_iter()
        .filter(|(_, _, value)| *value > Decimal::ZERO)
        .collect();
    let total: Decimal = positive.iter().map(|(_, _, value)| *value).sum();
    positive
        .into_iter()
        .map(|(category, name, value)| AllocationSlice {
            category,
            name,
            value,
            percentage: (value / total * dec!(100)).round_dp(DISPLAY_DECIMAL_PRECISION),
        })
        .collect()
}

impl GoalProgressSummary {
    pub fn from_goals(goals: &[Goal]) -> Self {
        let total_target: Decimal = goals.iter().map(|g| g.target_amount).sum();
        let total_saved: Decimal = goals.iter().map(|g| g.current_amount).sum();
        Self {
            goal_count: goals.len(),
            achieved_count: goals.iter().filter(|g| g.is_achieved()).count(),
            total_target,
            total_saved,
            overall_progress: goal_progress(total_saved, total_target),
        }
    }
}

/// Source collections for the dashboard.
pub struct DashboardInputs<'a> {
    pub accounts: &'a [Account],
    pub lots: &'a [Lot],
    pub transactions: &'a [InvestmentTransaction],
    pub fno_trades: &'a [FnoTrade],
    pub goals: &'a [Goal],
    pub settings: &'a Settings,
}

/// Runs aggregation, valuation, lifetime and net worth over `inputs`.
/// Disabled asset classes contribute nothing anywhere.
pub fn build_dashboard(inputs: DashboardInputs<'_>, as_of: NaiveDate) -> DashboardMetrics {
    let settings = inputs.settings;
    let positions = aggregate_lots(inputs.lots);

    let summaries: Vec<_> = AssetClass::HELD
        .into_iter()
        .filter(|c| settings.is_enabled(*c))
        .map(|c| summarize_positions(c, &positions))
        .collect();
    let valuation = PortfolioValuation::from_summaries(summaries);

    let mut breakdowns: Vec<_> = valuation
        .summaries
        .iter()
        .map(|s| lifetime_breakdown(s.asset_class, inputs.transactions, s.total_current_value))
        .collect();
    let fno = settings.is_enabled(AssetClass::Fno).then(|| {
        breakdowns.push(fno_lifetime(inputs.fno_trades));
        FnoSummary::from_trades(inputs.fno_trades)
    });
    let lifetime = LifetimeEarnings::from_breakdowns(breakdowns);

    let net_worth = compose_net_worth(inputs.accounts, settings, &valuation);
    let fno_unrealized = fno.as_ref().map(|f| f.unrealized_pnl).unwrap_or_default();
    debug!(
        "Dashboard: net worth {} over {} positions",
        net_worth.net_worth,
        positions.len()
    );

    DashboardMetrics {
        as_of,
        currency: settings.base_currency,
        net_worth: net_worth.net_worth,
        liquidity: net_worth.liquidity,
        investments: net_worth.investments,
        total_investment: valuation.total_investment,
        total_unrealized_pnl: valuation.total_unrealized_pnl + fno_unrealized,
        total_day_change: valuation.total_day_change,
        summaries: valuation.summaries,
        fno,
        lifetime,
        goals: GoalProgressSummary::from_goals(inputs.goals),
        allocation: net_worth.allocation,
    }
}
