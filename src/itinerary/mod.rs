use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::AppError;
use crate::models::itinerary::{ItineraryError, TravelData};

const BUILTIN: &str = include_str!("danang.json");

/// Loads the authored trip from `path`, or the bundled Da Nang trip when no
/// path is configured. The result is validated before it is returned.
pub fn load(path: Option<&Path>) -> Result<TravelData, AppError> {
    let itinerary = match path {
        Some(path) => {
            let raw = fs::read_to_string(path).map_err(|err| {
                AppError::Internal(format!("failed to read {}: {err}", path.display()))
            })?;
            parse(&raw)?
        }
        None => builtin()?,
    };

    itinerary.validate()?;

    info!(
        title = %itinerary.title,
        days = itinerary.days.len(),
        activities = itinerary.total_activities(),
        source = %path.map_or_else(|| "builtin".to_string(), |p| p.display().to_string()),
        "itinerary loaded"
    );

    Ok(itinerary)
}

pub fn builtin() -> Result<TravelData, AppError> {
    parse(BUILTIN)
}

pub fn parse(raw: &str) -> Result<TravelData, AppError> {
    serde_json::from_str(raw).map_err(|err| ItineraryError::Malformed(err.to_string()).into())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{builtin, load, parse};
    use crate::error::AppError;
    use crate::models::itinerary::ItineraryError;

    #[test]
    fn bundled_trip_satisfies_authoring_invariants() {
        let trip = builtin().unwrap();

        assert_eq!(trip.validate(), Ok(()));
        assert_eq!(trip.days.len(), 5);
        assert_eq!(trip.days[0].date, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        assert_eq!(
            trip.start,
            trip.days[0].date.and_time(trip.days[0].activities[0].time)
        );

        let last_day = trip.days.last().unwrap();
        let last = last_day.activities.last().unwrap();
        assert!(trip.end >= last_day.date.and_time(last.time));
    }

    #[test]
    fn load_without_path_uses_bundled_trip() {
        let trip = load(None).unwrap();
        assert_eq!(trip, builtin().unwrap());
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let err = load(Some(std::path::Path::new("/nonexistent/trip.json"))).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn out_of_order_file_fails_validation() {
        let dir = std::env::temp_dir().join("travel-progress-itinerary-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("unordered.json");
        std::fs::write(
            &path,
            r#"{
                "title": "Unordered",
                "start": "2026-01-15T09:00:00",
                "end": "2026-01-15T20:00:00",
                "days": [{
                    "day": 1,
                    "date": "2026-01-15",
                    "day_of_week": "Thu",
                    "activities": [
                        { "id": "b", "time": "14:00", "title": "Later" },
                        { "id": "a", "time": "09:00", "title": "Earlier" }
                    ]
                }]
            }"#,
        )
        .unwrap();

        let err = load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, AppError::InvalidItinerary(_)));
    }

    #[test]
    fn malformed_time_is_rejected() {
        let err = parse(
            r#"{
                "title": "Broken",
                "start": "2026-01-15T09:00:00",
                "end": "2026-01-15T20:00:00",
                "days": [{
                    "day": 1,
                    "date": "2026-01-15",
                    "day_of_week": "Thu",
                    "activities": [{ "id": "a", "time": "9 o'clock", "title": "?" }]
                }]
            }"#,
        )
        .unwrap_err();

        match err {
            AppError::InvalidItinerary(ItineraryError::Malformed(message)) => {
                assert!(message.contains("line"), "got {message}");
            }
            other => panic!("expected malformed itinerary, got {other:?}"),
        }
    }
}
