use std::sync::Arc;
use std::time::Duration;

use crate::{config::Config, rate_limit::FixedWindowRateLimiter};
use finboard_core::{
    market_data::{MfApiProvider, MutualFundProvider},
    state::{FinanceServices, FinanceState, LoadReport},
};
use finboard_storage_sqlite as storage;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(15);

pub struct AppState {
    pub finance: Arc<FinanceState>,
    /// Outcome of the startup load; reported by the health endpoint.
    pub load_report: LoadReport,
    pub rate_limiter: FixedWindowRateLimiter,
    pub rate_limit_max: u32,
    pub rate_limit_window: Duration,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("FB_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // `try_init` also bridges `log` records from the core and storage crates.
    let result = if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init()
    };
    if let Err(e) = result {
        eprintln!("Tracing already initialized: {}", e);
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let (pool, writer) = storage::open(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);

    let services = FinanceServices::new(storage::repositories(pool, writer));
    let fund_provider: Option<Arc<dyn MutualFundProvider>> =
        match MfApiProvider::new(config.mfapi_base_url.clone(), PROVIDER_TIMEOUT) {
            Ok(provider) => Some(Arc::new(provider)),
            Err(e) => {
                tracing::warn!("Mutual fund quotes disabled: {}", e);
                None
            }
        };

    let finance = Arc::new(FinanceState::new(services, fund_provider));
    let load_report = finance.load_all().await;
    if !load_report.is_complete() {
        tracing::warn!(
            "Started with {} collection(s) that failed to load",
            load_report.failures.len()
        );
    }

    Ok(Arc::new(AppState {
        finance,
        load_report,
        rate_limiter: FixedWindowRateLimiter::new(),
        rate_limit_max: config.rate_limit_max,
        rate_limit_window: config.rate_limit_window,
        db_path: config.db_path.clone(),
    }))
}
