use std::net::SocketAddr;

use finboard_server::{
    api::app_router, build_state, config::Config, init_tracing,
    scheduler::start_price_refresh_scheduler,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing();
    let state = build_state(&config).await?;

    let scheduler = start_price_refresh_scheduler(&state, config.price_refresh).await;

    let router = app_router(state, &config);
    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    })
    .await?;

    scheduler.stop();
    tracing::info!("Server stopped");
    Ok(())
}
