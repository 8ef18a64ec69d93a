use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::geo::{haversine_km, Position};

pub const DEFAULT_BUFFER_MINUTES: u32 = 10;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportMode {
    #[default]
    Walking,
    Driving,
    Transit,
    Bicycling,
}

impl TransportMode {
    /// Average door-to-door speed in km/h, city traffic included.
    pub fn average_speed_kmh(self) -> f64 {
        match self {
            TransportMode::Walking => 4.0,
            TransportMode::Driving => 30.0,
            TransportMode::Transit => 25.0,
            TransportMode::Bicycling => 15.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Eta {
    pub distance_meters: f64,
    pub distance_km: f64,
    pub distance_text: String,
    pub duration_minutes: f64,
    pub duration_text: String,
    pub estimated_arrival: NaiveDateTime,
    pub transport_mode: TransportMode,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeparturePlan {
    pub departure: NaiveDateTime,
    pub eta: Eta,
    pub minutes_until_departure: f64,
    pub should_leave_now: bool,
}

pub fn estimate(from: Position, to: Position, mode: TransportMode, now: NaiveDateTime) -> Eta {
    let distance_km = haversine_km(from, to);
    let distance_meters = distance_km * 1_000.0;
    let duration_minutes = distance_km / mode.average_speed_kmh() * 60.0;

    Eta {
        distance_meters,
        distance_km,
        distance_text: format_distance(distance_meters),
        duration_minutes,
        duration_text: format_duration(duration_minutes),
        estimated_arrival: now + minutes(duration_minutes),
        transport_mode: mode,
    }
}

/// When to set off to reach `to` by `arrive_by` with `buffer_minutes` to spare.
pub fn plan_departure(
    from: Position,
    to: Position,
    mode: TransportMode,
    arrive_by: NaiveDateTime,
    buffer_minutes: u32,
    now: NaiveDateTime,
) -> DeparturePlan {
    let eta = estimate(from, to, mode, now);
    let departure = arrive_by - minutes(eta.duration_minutes + f64::from(buffer_minutes));
    let minutes_until_departure = (departure - now).num_milliseconds() as f64 / 60_000.0;

    DeparturePlan {
        departure,
        eta,
        minutes_until_departure,
        should_leave_now: minutes_until_departure <= 0.0,
    }
}

pub fn format_distance(meters: f64) -> String {
    if meters < 1_000.0 {
        format!("{}m", meters.round())
    } else {
        format!("{:.1}km", meters / 1_000.0)
    }
}

pub fn format_duration(minutes: f64) -> String {
    if minutes < 60.0 {
        return format!("{} min", minutes.round());
    }

    let hours = (minutes / 60.0).floor();
    let rest = (minutes % 60.0).round();
    if rest == 0.0 {
        format!("{hours} h")
    } else {
        format!("{hours} h {rest} min")
    }
}

fn minutes(value: f64) -> Duration {
    Duration::milliseconds((value * 60_000.0).round() as i64)
}
