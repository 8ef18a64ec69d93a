use std::env;
use std::path::PathBuf;

use chrono::{FixedOffset, NaiveDateTime};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub tick_interval_secs: u64,
    pub event_buffer_size: usize,
    /// Offset of the trip-local zone from UTC. Defaults to Asia/Seoul.
    pub trip_utc_offset: FixedOffset,
    pub itinerary_path: Option<PathBuf>,
    pub now_override: Option<NaiveDateTime>,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        let offset_minutes: i32 = parse_or_default("TRIP_UTC_OFFSET_MINUTES", 540)?;
        let trip_utc_offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "invalid TRIP_UTC_OFFSET_MINUTES: {offset_minutes} is out of range"
                ))
            })?;

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            tick_interval_secs: parse_or_default("TICK_INTERVAL_SECS", 60)?,
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 64)?,
            trip_utc_offset,
            itinerary_path: env::var("ITINERARY_PATH").ok().map(PathBuf::from),
            now_override: parse_optional("NOW_OVERRIDE")?,
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),
        })
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_optional(key)?.unwrap_or(default))
}

fn parse_optional<T>(key: &str) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        _ => Ok(None),
    }
}
