use std::sync::Arc;

use tokio::time::Duration;
use tower_http::services::ServeDir;
use tracing_subscriber::EnvFilter;

use travel_progress::api;
use travel_progress::config::Config;
use travel_progress::engine::ticker::run_progress_ticker;
use travel_progress::error::AppError;
use travel_progress::itinerary;
use travel_progress::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let trip = itinerary::load(config.itinerary_path.as_deref())?;

    let (app_state, clock_rx) = AppState::new(
        trip,
        config.trip_utc_offset,
        config.now_override,
        config.event_buffer_size,
    );
    let shared_state = Arc::new(app_state);

    if let Some(now) = config.now_override {
        tracing::warn!(now = %now, "starting with clock override");
    }

    tokio::spawn(run_progress_ticker(
        shared_state.clone(),
        clock_rx,
        Duration::from_secs(config.tick_interval_secs.max(1)),
    ));

    let app = api::rest::router(shared_state.clone())
        .fallback_service(ServeDir::new(&config.static_dir));

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(
        http_port = config.http_port,
        trip_utc_offset = %config.trip_utc_offset,
        "http server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
