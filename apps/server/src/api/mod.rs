use std::sync::Arc;

use axum::{middleware, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{config::Config, main_lib::AppState, rate_limit::limit_requests};

pub mod accounts;
pub mod dashboard;
pub mod export;
pub mod fno;
pub mod goals;
pub mod health;
pub mod investments;
pub mod ledger;
pub mod market;
pub mod settings;
pub mod transfers;

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let api = Router::new()
        .merge(accounts::router())
        .merge(ledger::router())
        .merge(investments::router())
        .merge(fno::router())
        .merge(goals::router())
        .merge(transfers::router())
        .merge(dashboard::router())
        .merge(settings::router())
        .merge(market::router())
        .merge(export::router())
        .merge(health::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            limit_requests,
        ));

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors_layer(config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
