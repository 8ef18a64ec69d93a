use serde::{Deserialize, Serialize};

use crate::models::itinerary::Activity;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelStatus {
    BeforeTrip,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityStatus {
    Completed,
    InProgress,
    Upcoming,
}

/// Remaining time until the trip starts, decomposed greedily from days down.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeUntilStart {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeUntilStart {
    pub fn from_seconds(total: i64) -> Self {
        let total = total.max(0);
        Self {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        }
    }

    pub fn total_seconds(&self) -> i64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

/// Snapshot of where the traveller is in the itinerary at one instant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TravelProgress {
    pub status: TravelStatus,
    pub current_day: Option<u32>,
    pub current_activity: Option<Activity>,
    pub completed_activities: usize,
    pub total_activities: usize,
    pub progress_percentage: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_until_start: Option<TimeUntilStart>,
}
