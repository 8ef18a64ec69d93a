pub mod activities;
pub mod checkins;
pub mod clock;
pub mod itinerary;
pub mod progress;
pub mod ws;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// API routes. Static PWA assets are mounted by the caller as a fallback.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(itinerary::router())
        .merge(progress::router())
        .merge(clock::router())
        .merge(checkins::router())
        .merge(activities::router())
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/ws", get(ws::ws_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    days: usize,
    activities: usize,
    checkins: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        days: state.itinerary.days.len(),
        activities: state.itinerary.total_activities(),
        checkins: state.checkins.count(),
    })
}

async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err).into_response(),
    }
}
