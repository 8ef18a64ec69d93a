use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::Json;
use axum::Router;

use crate::api::rest::itinerary::AtQuery;
use crate::engine::ticker::{evaluate, preview, Trigger};
use crate::models::progress::TravelProgress;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/progress", get(get_progress))
}

async fn get_progress(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AtQuery>,
) -> Json<TravelProgress> {
    let progress = match query.at {
        Some(at) => preview(&state, at),
        None => evaluate(&state, state.now(), Trigger::Request),
    };
    Json(progress)
}
