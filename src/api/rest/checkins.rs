use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::Serialize;
use tracing::info;

use crate::checkins::STORE_NAME;
use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/checkins", get(list_checkins).delete(clear_checkins))
        .route("/checkins/:activity_id/toggle", post(toggle_checkin))
}

#[derive(Serialize)]
pub struct CheckinsResponse {
    pub count: usize,
    pub activity_ids: Vec<String>,
}

#[derive(Serialize)]
pub struct ToggleResponse {
    pub activity_id: String,
    pub checked_in: bool,
}

fn snapshot(state: &AppState) -> CheckinsResponse {
    let activity_ids = state.checkins.checked_ids();
    CheckinsResponse {
        count: activity_ids.len(),
        activity_ids,
    }
}

async fn list_checkins(State(state): State<Arc<AppState>>) -> Json<CheckinsResponse> {
    Json(snapshot(&state))
}

async fn toggle_checkin(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<String>,
) -> Result<Json<ToggleResponse>, AppError> {
    if state.itinerary.find_activity(&activity_id).is_none() {
        return Err(AppError::NotFound(format!(
            "activity {} not found",
            activity_id
        )));
    }

    let checked_in = state.checkins.toggle(&activity_id);
    state.metrics.checkins_total.set(state.checkins.count() as i64);
    info!(store = STORE_NAME, activity_id = %activity_id, checked_in, "check-in toggled");

    Ok(Json(ToggleResponse {
        activity_id,
        checked_in,
    }))
}

async fn clear_checkins(State(state): State<Arc<AppState>>) -> Json<CheckinsResponse> {
    state.checkins.clear();
    state.metrics.checkins_total.set(0);
    info!(store = STORE_NAME, "check-ins cleared");
    Json(snapshot(&state))
}
