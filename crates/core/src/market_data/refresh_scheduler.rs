//! Fixed-cadence background refresh with a swappable handler.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, info};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::errors::Result;

#[async_trait]
pub trait RefreshHandler: Send + Sync {
    async fn refresh(&self) -> Result<()>;
}

type HandlerSlot = Arc<RwLock<Arc<dyn RefreshHandler>>>;

/// Runs the current handler every `period`. Replacing the handler takes
/// effect on the next tick and leaves the schedule's phase alone.
pub struct RefreshScheduler {
    period: Duration,
    handler: HandlerSlot,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl RefreshScheduler {
    pub fn new(period: Duration, handler: Arc<dyn RefreshHandler>) -> Self {
        Self {
            period,
            handler: Arc::new(RwLock::new(handler)),
            task: Mutex::new(None),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub async fn set_handler(&self, handler: Arc<dyn RefreshHandler>) {
        *self.handler.write().await = handler;
        debug!("Refresh handler replaced");
    }

    /// Starts ticking. The first run happens one period from now. Calling
    /// `start` on a running scheduler does nothing.
    pub fn start(&self) {
        let Ok(mut task) = self.task.lock() else {
            error!("Refresh scheduler state is poisoned; not starting");
            return;
        };
        if task.as_ref().is_some_and(|t| !t.is_finished()) {
            return;
        }

        let period = self.period;
        let slot = Arc::clone(&self.handler);
        info!("Starting refresh every {:?}", period);
        *task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let handler = Arc::clone(&*slot.read().await);
                if let Err(e) = handler.refresh().await {
                    error!("Scheduled refresh failed: {}", e);
                }
            }
        }));
    }

    pub fn stop(&self) {
        if let Ok(mut task) = self.task.lock() {
            if let Some(handle) = task.take() {
                handle.abort();
                info!("Refresh scheduler stopped");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .map(|t| t.as_ref().is_some_and(|h| !h.is_finished()))
            .unwrap_or(false)
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
