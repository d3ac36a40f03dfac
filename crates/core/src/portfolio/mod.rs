//! Portfolio engines: aggregation, valuation, lifetime earnings and net worth.

pub mod aggregation;
pub mod lifetime;
pub mod net_worth;
pub mod valuation;

pub use aggregation::{aggregate_lots, Position};
pub use lifetime::{calc_lifetime_earned, LifetimeEarnings};
pub use net_worth::{build_dashboard, DashboardInputs, DashboardMetrics, NetWorth};
pub use valuation::{day_change, summarize_positions, AssetClassSummary, PortfolioValuation};
