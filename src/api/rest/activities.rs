use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::Json;
use axum::Router;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::geo::eta::{plan_departure, DeparturePlan, TransportMode, DEFAULT_BUFFER_MINUTES};
use crate::geo::navigation::{all_directions, NavigationLink};
use crate::geo::Position;
use crate::models::itinerary::{Activity, Location, TravelDay};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/activities/:id/eta", get(get_eta))
        .route("/activities/:id/navigation", get(get_navigation))
}

#[derive(Deserialize)]
pub struct EtaQuery {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub mode: TransportMode,
    /// Defaults to the activity's scheduled start.
    pub arrive_by: Option<NaiveDateTime>,
    pub buffer_minutes: Option<u32>,
}

#[derive(Serialize)]
pub struct EtaResponse {
    pub activity_id: String,
    #[serde(flatten)]
    pub plan: DeparturePlan,
}

#[derive(Serialize)]
pub struct NavigationResponse {
    pub activity_id: String,
    pub links: Vec<NavigationLink>,
}

fn located_activity<'a>(
    state: &'a AppState,
    id: &str,
) -> Result<(&'a TravelDay, &'a Activity, &'a Location), AppError> {
    let (day, activity) = state
        .itinerary
        .find_activity(id)
        .ok_or_else(|| AppError::NotFound(format!("activity {} not found", id)))?;
    let location = activity
        .location
        .as_ref()
        .ok_or_else(|| AppError::NotFound(format!("activity {} has no location", id)))?;

    Ok((day, activity, location))
}

async fn get_eta(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<EtaQuery>,
) -> Result<Json<EtaResponse>, AppError> {
    if !(-90.0..=90.0).contains(&query.lat) || !(-180.0..=180.0).contains(&query.lng) {
        return Err(AppError::BadRequest(
            "lat must be within [-90, 90] and lng within [-180, 180]".to_string(),
        ));
    }

    let (day, activity, location) = located_activity(&state, &id)?;
    let from = Position {
        latitude: query.lat,
        longitude: query.lng,
    };
    let to = Position::from(location);
    let now = state.now();
    let arrive_by = query
        .arrive_by
        .unwrap_or_else(|| day.date.and_time(activity.time));

    let plan = plan_departure(
        from,
        to,
        query.mode,
        arrive_by,
        query.buffer_minutes.unwrap_or(DEFAULT_BUFFER_MINUTES),
        now,
    );

    Ok(Json(EtaResponse {
        activity_id: id,
        plan,
    }))
}

async fn get_navigation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<NavigationResponse>, AppError> {
    let (_, activity, location) = located_activity(&state, &id)?;

    Ok(Json(NavigationResponse {
        links: all_directions(location, Some(&activity.title)),
        activity_id: id,
    }))
}
