use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authoring defects found while parsing or by [`TravelData::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ItineraryError {
    /// Unparseable JSON, including times that are not `HH:MM`.
    #[error("malformed itinerary: {0}")]
    Malformed(String),

    #[error("itinerary title cannot be empty")]
    EmptyTitle,

    #[error("trip starts at {start} but ends at {end}")]
    StartAfterEnd {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("day {day} follows day {previous}; days must be in ascending order")]
    DayOutOfOrder { previous: u32, day: u32 },

    #[error("day {day} is dated {date}, not after the previous day's {previous}")]
    DayDateOutOfOrder {
        day: u32,
        date: NaiveDate,
        previous: NaiveDate,
    },

    #[error("activity {id} on day {day} is scheduled before the activity preceding it")]
    ActivityOutOfOrder { day: u32, id: String },

    #[error("activity id {0} is used more than once")]
    DuplicateActivityId(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: String,
    /// Trip-local time of day, written as `HH:MM`.
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MealKind {
    Breakfast,
    Lunch,
    Dinner,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    pub kind: MealKind,
    pub menu: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TravelDay {
    /// 1-based.
    pub day: u32,
    pub date: NaiveDate,
    pub day_of_week: String,
    /// Authored order is chronological order.
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

/// The authored trip. Built once at startup and shared read-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TravelData {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub days: Vec<TravelDay>,
}

impl TravelData {
    pub fn total_activities(&self) -> usize {
        self.activities().count()
    }

    pub fn day(&self, index: u32) -> Option<&TravelDay> {
        self.days.iter().find(|day| day.day == index)
    }

    pub fn day_on(&self, date: NaiveDate) -> Option<&TravelDay> {
        self.days.iter().find(|day| day.date == date)
    }

    /// Looks up an activity together with the day it belongs to.
    pub fn find_activity(&self, id: &str) -> Option<(&TravelDay, &Activity)> {
        self.days.iter().find_map(|day| {
            day.activities
                .iter()
                .find(|activity| activity.id == id)
                .map(|activity| (day, activity))
        })
    }

    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.days.iter().flat_map(|day| day.activities.iter())
    }

    /// Checks the authoring invariants. Nothing is reordered or repaired;
    /// the first violation is reported.
    pub fn validate(&self) -> Result<(), ItineraryError> {
        if self.title.trim().is_empty() {
            return Err(ItineraryError::EmptyTitle);
        }

        if self.start > self.end {
            return Err(ItineraryError::StartAfterEnd {
                start: self.start,
                end: self.end,
            });
        }

        let mut seen_ids = HashSet::new();
        let mut previous_day: Option<&TravelDay> = None;

        for day in &self.days {
            if let Some(previous) = previous_day {
                if day.day <= previous.day {
                    return Err(ItineraryError::DayOutOfOrder {
                        previous: previous.day,
                        day: day.day,
                    });
                }
                if day.date <= previous.date {
                    return Err(ItineraryError::DayDateOutOfOrder {
                        day: day.day,
                        date: day.date,
                        previous: previous.date,
                    });
                }
            }
            previous_day = Some(day);

            let mut previous_time: Option<NaiveTime> = None;
            for activity in &day.activities {
                if !seen_ids.insert(activity.id.as_str()) {
                    return Err(ItineraryError::DuplicateActivityId(activity.id.clone()));
                }

                if previous_time.is_some_and(|time| activity.time < time) {
                    return Err(ItineraryError::ActivityOutOfOrder {
                        day: day.day,
                        id: activity.id.clone(),
                    });
                }
                previous_time = Some(activity.time);
            }
        }

        Ok(())
    }
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use serde_json::json;

    use super::{Activity, ItineraryError, TravelData, TravelDay};

    fn activity(id: &str, hour: u32, minute: u32) -> Activity {
        Activity {
            id: id.to_string(),
            time: NaiveTime::from_hms_opt(hour, minute, 0).unwrap(),
            title: format!("activity {id}"),
            description: None,
            image_url: None,
            duration_minutes: None,
            tip: None,
            location: None,
        }
    }

    fn day(index: u32, date: NaiveDate, activities: Vec<Activity>) -> TravelDay {
        TravelDay {
            day: index,
            date,
            day_of_week: date.format("%a").to_string(),
            activities,
            meals: Vec::new(),
        }
    }

    fn trip(days: Vec<TravelDay>) -> TravelData {
        let first = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        TravelData {
            title: "Test trip".to_string(),
            start: first.and_hms_opt(9, 0, 0).unwrap(),
            end: first.and_hms_opt(23, 0, 0).unwrap(),
            days,
        }
    }

    #[test]
    fn well_formed_itinerary_validates() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let data = trip(vec![day(1, date, vec![activity("a", 9, 0), activity("b", 9, 0)])]);

        assert_eq!(data.validate(), Ok(()));
    }

    #[test]
    fn out_of_order_activity_is_reported_not_corrected() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let data = trip(vec![day(
            1,
            date,
            vec![activity("late", 14, 0), activity("early", 8, 0)],
        )]);

        assert_eq!(
            data.validate(),
            Err(ItineraryError::ActivityOutOfOrder {
                day: 1,
                id: "early".to_string()
            })
        );
        assert_eq!(data.days[0].activities[0].id, "late");
    }

    #[test]
    fn duplicate_ids_across_days_are_rejected() {
        let first = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let second = first.succ_opt().unwrap();
        let data = trip(vec![
            day(1, first, vec![activity("x", 9, 0)]),
            day(2, second, vec![activity("x", 9, 0)]),
        ]);

        assert_eq!(
            data.validate(),
            Err(ItineraryError::DuplicateActivityId("x".to_string()))
        );
    }

    #[test]
    fn descending_days_are_rejected() {
        let first = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let data = trip(vec![day(2, first, Vec::new()), day(1, first, Vec::new())]);

        assert_eq!(
            data.validate(),
            Err(ItineraryError::DayOutOfOrder { previous: 2, day: 1 })
        );
    }

    #[test]
    fn repeated_day_date_is_rejected() {
        let first = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let data = trip(vec![
            day(1, first, vec![activity("a", 9, 0)]),
            day(2, first, vec![activity("b", 8, 0)]),
        ]);

        assert_eq!(
            data.validate(),
            Err(ItineraryError::DayDateOutOfOrder {
                day: 2,
                date: first,
                previous: first
            })
        );
    }

    #[test]
    fn earlier_dated_later_day_is_rejected() {
        let first = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let second = first.succ_opt().unwrap();
        let data = trip(vec![day(1, second, Vec::new()), day(2, first, Vec::new())]);

        assert!(matches!(
            data.validate(),
            Err(ItineraryError::DayDateOutOfOrder { day: 2, .. })
        ));
    }

    #[test]
    fn start_after_end_is_rejected() {
        let mut data = trip(Vec::new());
        std::mem::swap(&mut data.start, &mut data.end);

        assert!(matches!(
            data.validate(),
            Err(ItineraryError::StartAfterEnd { .. })
        ));
    }

    #[test]
    fn activity_time_uses_hour_minute_format() {
        let parsed: Activity = serde_json::from_value(json!({
            "id": "d1-1",
            "time": "07:30",
            "title": "Breakfast",
            "location": { "latitude": 16.04, "longitude": 108.2 }
        }))
        .unwrap();

        assert_eq!(parsed.time, NaiveTime::from_hms_opt(7, 30, 0).unwrap());
        assert!(parsed.location.unwrap().address.is_none());

        let encoded = serde_json::to_value(activity("x", 8, 5)).unwrap();
        assert_eq!(encoded["time"], "08:05");
        assert!(encoded.get("tip").is_none());
    }

    #[test]
    fn lookups_walk_every_day() {
        let first = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let second = first.succ_opt().unwrap();
        let data = trip(vec![
            day(1, first, vec![activity("a", 9, 0)]),
            day(2, second, vec![activity("b", 8, 0), activity("c", 14, 0)]),
        ]);

        assert_eq!(data.total_activities(), 3);
        assert_eq!(data.day_on(second).map(|d| d.day), Some(2));
        assert_eq!(data.day(1).map(|d| d.date), Some(first));
        let (found_day, found) = data.find_activity("c").unwrap();
        assert_eq!(found_day.day, 2);
        assert_eq!(found.title, "activity c");
        assert!(data.find_activity("missing").is_none());
    }
}
