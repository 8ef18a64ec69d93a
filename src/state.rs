use std::sync::Arc;

use chrono::{FixedOffset, NaiveDateTime};
use tokio::sync::{broadcast, watch};

use crate::checkins::CheckinStore;
use crate::engine::clock::Clock;
use crate::models::itinerary::TravelData;
use crate::models::progress::TravelProgress;
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub itinerary: Arc<TravelData>,
    pub trip_utc_offset: FixedOffset,
    pub checkins: CheckinStore,
    pub clock_tx: watch::Sender<Clock>,
    pub progress_events_tx: broadcast::Sender<TravelProgress>,
    pub metrics: Metrics,
}

impl AppState {
    /// Starts on the real clock unless `now_override` pins the instant.
    pub fn new(
        itinerary: TravelData,
        trip_utc_offset: FixedOffset,
        now_override: Option<NaiveDateTime>,
        event_buffer_size: usize,
    ) -> (Self, watch::Receiver<Clock>) {
        let clock = match now_override {
            Some(instant) => Clock::Override(instant),
            None => Clock::real(trip_utc_offset),
        };
        let (clock_tx, clock_rx) = watch::channel(clock);
        let (progress_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        (
            Self {
                itinerary: Arc::new(itinerary),
                trip_utc_offset,
                checkins: CheckinStore::new(),
                clock_tx,
                progress_events_tx,
                metrics: Metrics::new(),
            },
            clock_rx,
        )
    }

    pub fn clock(&self) -> Clock {
        *self.clock_tx.borrow()
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock_tx.borrow().now()
    }

    /// Swaps the time source; the ticker recomputes as soon as it notices.
    pub fn set_clock(&self, clock: Clock) {
        self.clock_tx.send_replace(clock);
    }

    pub fn reset_clock(&self) {
        self.set_clock(Clock::real(self.trip_utc_offset));
    }
}
