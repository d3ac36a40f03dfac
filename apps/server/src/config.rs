use std::{net::SocketAddr, time::Duration};

use finboard_core::market_data::DEFAULT_MFAPI_BASE_URL;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub rate_limit_max: u32,
    pub rate_limit_window: Duration,
    /// Overrides the interval stored in the user's settings when set.
    pub price_refresh: Option<Duration>,
    pub mfapi_base_url: String,
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("FB_LISTEN_ADDR")
            .ok()
            .and_then(|v| match v.parse() {
                Ok(addr) => Some(addr),
                Err(e) => {
                    tracing::warn!("Ignoring invalid FB_LISTEN_ADDR '{}': {}", v, e);
                    None
                }
            })
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)));
        let db_path = std::env::var("FB_DB_PATH").unwrap_or_else(|_| "./db/finboard.db".into());
        let cors_allow = std::env::var("FB_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let price_refresh = std::env::var("FB_PRICE_REFRESH_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        let mfapi_base_url = std::env::var("FB_MFAPI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_MFAPI_BASE_URL.to_string());

        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(env_u64("FB_REQUEST_TIMEOUT_MS", 30_000)),
            rate_limit_max: env_u64("FB_RATE_LIMIT_MAX", 120) as u32,
            rate_limit_window: Duration::from_millis(env_u64("FB_RATE_LIMIT_WINDOW_MS", 60_000)),
            price_refresh,
            mfapi_base_url,
        }
    }

    /// Defaults for an instance backed by `db_path`, ignoring the environment.
    pub fn for_database(db_path: impl Into<String>) -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: db_path.into(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_secs(30),
            rate_limit_max: 120,
            rate_limit_window: Duration::from_secs(60),
            price_refresh: None,
            mfapi_base_url: DEFAULT_MFAPI_BASE_URL.to_string(),
        }
    }
}
