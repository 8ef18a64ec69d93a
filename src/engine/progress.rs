use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::itinerary::{Activity, TravelData, TravelDay};
use crate::models::progress::{ActivityStatus, TimeUntilStart, TravelProgress, TravelStatus};

const DEFAULT_ACTIVITY_MINUTES: u32 = 60;

/// Derives the traveller's progress through `itinerary` at the trip-local
/// instant `now`. Pure: the same inputs always give the same snapshot.
pub fn compute_progress(itinerary: &TravelData, now: NaiveDateTime) -> TravelProgress {
    let total_activities = itinerary.total_activities();
    let status = trip_status(itinerary, now);

    match status {
        TravelStatus::BeforeTrip => TravelProgress {
            status,
            current_day: None,
            current_activity: None,
            completed_activities: 0,
            total_activities,
            progress_percentage: 0,
            time_until_start: Some(TimeUntilStart::from_seconds(
                (itinerary.start - now).num_seconds(),
            )),
        },
        TravelStatus::Completed => TravelProgress {
            status,
            current_day: None,
            current_activity: None,
            completed_activities: total_activities,
            total_activities,
            progress_percentage: 100,
            time_until_start: None,
        },
        TravelStatus::InProgress => {
            let today = now.date();
            let time = now.time();
            let current = itinerary.day_on(today);

            let completed_activities = completed_by(itinerary, today, time);

            TravelProgress {
                status,
                current_day: current.map(|day| day.day),
                current_activity: current
                    .and_then(|day| current_activity(&day.activities, time))
                    .cloned(),
                completed_activities,
                total_activities,
                progress_percentage: percentage(completed_activities, total_activities),
                time_until_start: None,
            }
        }
    }
}

/// Start is inclusive of `InProgress`, end is inclusive of `Completed`.
pub fn trip_status(itinerary: &TravelData, now: NaiveDateTime) -> TravelStatus {
    if now < itinerary.start {
        TravelStatus::BeforeTrip
    } else if now >= itinerary.end {
        TravelStatus::Completed
    } else {
        TravelStatus::InProgress
    }
}

/// Status of a single activity from its scheduled window. An activity
/// without a duration is assumed to last an hour.
pub fn activity_status(activity: &Activity, date: NaiveDate, now: NaiveDateTime) -> ActivityStatus {
    let start = date.and_time(activity.time);
    let minutes = activity.duration_minutes.unwrap_or(DEFAULT_ACTIVITY_MINUTES);
    let end = start + Duration::minutes(i64::from(minutes));

    if now >= end {
        ActivityStatus::Completed
    } else if now >= start {
        ActivityStatus::InProgress
    } else {
        ActivityStatus::Upcoming
    }
}

pub fn day_progress(day: &TravelDay, now: NaiveDateTime) -> u8 {
    let finished = day
        .activities
        .iter()
        .filter(|activity| activity_status(activity, day.date, now) == ActivityStatus::Completed)
        .count();

    percentage(finished, day.activities.len())
}

/// Most recently started activity in authored order. Before the first
/// activity of the day the first activity is current.
fn current_activity(activities: &[Activity], time: NaiveTime) -> Option<&Activity> {
    activities
        .iter()
        .rev()
        .find(|activity| activity.time <= time)
        .or_else(|| activities.first())
}

// Days dated before today count in full; today counts activities already started.
fn completed_by(itinerary: &TravelData, today: NaiveDate, time: NaiveTime) -> usize {
    itinerary
        .days
        .iter()
        .map(|day| {
            if day.date < today {
                day.activities.len()
            } else if day.date == today {
                day.activities
                    .iter()
                    .filter(|activity| activity.time <= time)
                    .count()
            } else {
                0
            }
        })
        .sum()
}

/// Half-up rounded share of `part` in `whole`, 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }

    let rounded = (200 * part + whole) / (2 * whole);
    rounded.min(100) as u8
}
