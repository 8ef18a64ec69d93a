use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::Json;
use axum::Router;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::engine::progress::{activity_status, day_progress};
use crate::error::AppError;
use crate::models::itinerary::{Activity, Meal, TravelData};
use crate::models::progress::ActivityStatus;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/itinerary", get(get_itinerary))
        .route("/itinerary/days/:day", get(get_day))
}

#[derive(Deserialize)]
pub struct AtQuery {
    pub at: Option<NaiveDateTime>,
}

#[derive(Serialize)]
pub struct ActivityView {
    #[serde(flatten)]
    pub activity: Activity,
    pub status: ActivityStatus,
    pub checked_in: bool,
}

#[derive(Serialize)]
pub struct DayView {
    pub day: u32,
    pub date: NaiveDate,
    pub day_of_week: String,
    pub is_today: bool,
    pub progress_percentage: u8,
    pub activities: Vec<ActivityView>,
    pub meals: Vec<Meal>,
}

async fn get_itinerary(State(state): State<Arc<AppState>>) -> Json<TravelData> {
    Json(state.itinerary.as_ref().clone())
}

async fn get_day(
    State(state): State<Arc<AppState>>,
    Path(index): Path<u32>,
    Query(query): Query<AtQuery>,
) -> Result<Json<DayView>, AppError> {
    let day = state
        .itinerary
        .day(index)
        .ok_or_else(|| AppError::NotFound(format!("day {} not found", index)))?;
    let now = query.at.unwrap_or_else(|| state.now());

    let activities = day
        .activities
        .iter()
        .map(|activity| ActivityView {
            status: activity_status(activity, day.date, now),
            checked_in: state.checkins.is_checked_in(&activity.id),
            activity: activity.clone(),
        })
        .collect();

    Ok(Json(DayView {
        day: day.day,
        date: day.date,
        day_of_week: day.day_of_week.clone(),
        is_today: day.date == now.date(),
        progress_percentage: day_progress(day, now),
        activities,
        meals: day.meals.clone(),
    }))
}
