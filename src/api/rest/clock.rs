use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, put};
use axum::Json;
use axum::Router;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::clock::{Clock, ClockMode};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/clock", get(get_clock))
        .route("/clock/override", put(set_override).delete(clear_override))
}

#[derive(Deserialize)]
pub struct OverrideRequest {
    pub now: NaiveDateTime,
}

#[derive(Serialize)]
pub struct ClockResponse {
    pub mode: ClockMode,
    pub now: NaiveDateTime,
}

impl From<Clock> for ClockResponse {
    fn from(clock: Clock) -> Self {
        Self {
            mode: clock.mode(),
            now: clock.now(),
        }
    }
}

async fn get_clock(State(state): State<Arc<AppState>>) -> Json<ClockResponse> {
    Json(state.clock().into())
}

async fn set_override(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<OverrideRequest>,
) -> Json<ClockResponse> {
    info!(now = %payload.now, "clock override set");
    state.set_clock(Clock::Override(payload.now));
    Json(state.clock().into())
}

async fn clear_override(State(state): State<Arc<AppState>>) -> Json<ClockResponse> {
    info!("clock override cleared");
    state.reset_clock();
    Json(state.clock().into())
}
