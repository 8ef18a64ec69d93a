use chrono::{FixedOffset, NaiveDateTime, Utc};
use serde::Serialize;

/// Where "now" comes from. The calculator never reads a clock itself; the
/// ticker and request handlers ask this for the trip-local instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// Wall-clock time shifted into the trip's fixed UTC offset.
    Real { offset: FixedOffset },
    /// A pinned instant, used to replay a trip day without waiting for it.
    Override(NaiveDateTime),
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClockMode {
    Real,
    Override,
}

impl Clock {
    pub fn real(offset: FixedOffset) -> Self {
        Clock::Real { offset }
    }

    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::Real { offset } => Utc::now().with_timezone(offset).naive_local(),
            Clock::Override(instant) => *instant,
        }
    }

    pub fn mode(&self) -> ClockMode {
        match self {
            Clock::Real { .. } => ClockMode::Real,
            Clock::Override(_) => ClockMode::Override,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, FixedOffset, NaiveDate, Utc};

    use super::{Clock, ClockMode};

    #[test]
    fn override_clock_is_pinned() {
        let pinned = NaiveDate::from_ymd_opt(2026, 1, 16)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        let clock = Clock::Override(pinned);

        assert_eq!(clock.now(), pinned);
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.mode(), ClockMode::Override);
    }

    #[test]
    fn real_clock_applies_trip_offset() {
        let offset = FixedOffset::east_opt(9 * 3_600).unwrap();
        let clock = Clock::real(offset);

        let expected = Utc::now().naive_utc() + Duration::hours(9);
        let drift = (clock.now() - expected).num_seconds().abs();

        assert!(drift <= 2);
        assert_eq!(clock.mode(), ClockMode::Real);
    }
}
