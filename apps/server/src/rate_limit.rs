//! Fixed-window request limiting keyed by client.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{error::ApiError, main_lib::AppState};

/// Windows are pruned once this many clients are tracked.
const PRUNE_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitResult {
    pub success: bool,
    pub remaining: u32,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug, Default)]
pub struct FixedWindowRateLimiter {
    windows: Mutex<HashMap<String, Window>>,
}

impl FixedWindowRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&self, identifier: &str, max_requests: u32, window: Duration) -> RateLimitResult {
        self.check_at(identifier, max_requests, window, Instant::now())
    }

    /// Counts one request from `identifier` at `now`. The window opens on
    /// the first request and every request after `window` has elapsed
    /// starts a fresh one.
    pub fn check_at(
        &self,
        identifier: &str,
        max_requests: u32,
        window: Duration,
        now: Instant,
    ) -> RateLimitResult {
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if windows.len() >= PRUNE_THRESHOLD {
            windows.retain(|_, w| now.saturating_duration_since(w.started) < window);
        }

        let entry = windows.entry(identifier.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.saturating_duration_since(entry.started) >= window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }

        if entry.count >= max_requests {
            return RateLimitResult {
                success: false,
                remaining: 0,
            };
        }
        entry.count += 1;
        RateLimitResult {
            success: true,
            remaining: max_requests - entry.count,
        }
    }
}

fn client_identifier(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return forwarded.to_string();
    }
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn limit_requests(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let identifier = client_identifier(&request);
    let result = state.rate_limiter.check(
        &identifier,
        state.rate_limit_max,
        state.rate_limit_window,
    );

    if !result.success {
        tracing::warn!("Rate limit exceeded for {}", identifier);
        let mut response = ApiError::TooManyRequests.into_response();
        response
            .headers_mut()
            .insert("x-ratelimit-remaining", HeaderValue::from(0u32));
        return response;
    }

    let mut response = next.run(request).await;
    response.headers_mut().insert(
        "x-ratelimit-remaining",
        HeaderValue::from(result.remaining),
    );
    response
}
