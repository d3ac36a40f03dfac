//! Background mutual fund price refresh.

use std::sync::Arc;
use std::time::Duration;

use finboard_core::market_data::{RefreshHandler, RefreshScheduler};
use tracing::info;

use crate::main_lib::AppState;

/// Starts refreshing fund prices every `configured` period, or every
/// interval saved in the user's settings when none is configured.
pub async fn start_price_refresh_scheduler(
    state: &Arc<AppState>,
    configured: Option<Duration>,
) -> RefreshScheduler {
    let period = match configured {
        Some(period) => period,
        None => Duration::from_secs(
            state
                .finance
                .settings()
                .await
                .price_refresh_interval_secs
                .max(1),
        ),
    };
    let handler: Arc<dyn RefreshHandler> = state.finance.clone();
    let scheduler = RefreshScheduler::new(period, handler);
    scheduler.start();
    info!("Price refresh scheduled every {}s", period.as_secs());
    scheduler
}
