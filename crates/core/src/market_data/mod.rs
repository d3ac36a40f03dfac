//! Market data: bond catalog, mutual fund quotes and the price refresh
//! scheduler.

mod bond_catalog;
mod market_data_errors;
mod market_data_model;
mod mutual_fund_provider;
mod refresh_scheduler;

pub use bond_catalog::search_bonds;
pub use market_data_errors::MarketDataError;
pub use market_data_model::{BondListing, FundQuote, FundSearchResult};
pub use mutual_fund_provider::{MfApiProvider, MutualFundProvider, DEFAULT_MFAPI_BASE_URL};
pub use refresh_scheduler::{RefreshHandler, RefreshScheduler};
