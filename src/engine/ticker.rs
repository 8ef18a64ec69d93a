use std::sync::Arc;

use chrono::NaiveDateTime;
use tokio::sync::watch;
use tokio::time::{Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::engine::clock::Clock;
use crate::engine::progress::compute_progress;
use crate::models::progress::{TravelProgress, TravelStatus};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Tick,
    ClockChange,
    Request,
}

impl Trigger {
    pub fn as_str(self) -> &'static str {
        match self {
            Trigger::Tick => "tick",
            Trigger::ClockChange => "clock_change",
            Trigger::Request => "request",
        }
    }
}

/// Computes progress at the clock's current instant `now` and records it as
/// the live trip state.
pub fn evaluate(state: &AppState, now: NaiveDateTime, trigger: Trigger) -> TravelProgress {
    let progress = compute_progress(&state.itinerary, now);
    state.metrics.record_evaluation(trigger.as_str());
    state.metrics.record_progress(&progress);
    progress
}

/// Computes progress at an arbitrary instant without touching the live
/// trip gauges.
pub fn preview(state: &AppState, at: NaiveDateTime) -> TravelProgress {
    state.metrics.record_evaluation(Trigger::Request.as_str());
    compute_progress(&state.itinerary, at)
}

/// Re-samples the clock every `interval` and whenever the clock source is
/// swapped, publishing each snapshot to progress subscribers.
pub async fn run_progress_ticker(
    state: Arc<AppState>,
    mut clock_rx: watch::Receiver<Clock>,
    interval: Duration,
) {
    info!(interval_secs = interval.as_secs(), "progress ticker started");

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last_status: Option<TravelStatus> = None;
    let mut last_activity: Option<String> = None;

    loop {
        let trigger = tokio::select! {
            _ = ticker.tick() => Trigger::Tick,
            changed = clock_rx.changed() => match changed {
                Ok(()) => Trigger::ClockChange,
                Err(_) => break,
            },
        };

        let clock = *clock_rx.borrow_and_update();
        if trigger == Trigger::ClockChange {
            info!(mode = ?clock.mode(), now = %clock.now(), "clock source changed");
        }

        let progress = evaluate(&state, clock.now(), trigger);

        if last_status != Some(progress.status) {
            info!(
                status = ?progress.status,
                current_day = ?progress.current_day,
                progress_percentage = progress.progress_percentage,
                "trip status changed"
            );
            last_status = Some(progress.status);
        }

        let activity_id = progress.current_activity.as_ref().map(|a| a.id.clone());
        if activity_id != last_activity {
            debug!(activity_id = ?activity_id, "current activity changed");
            last_activity = activity_id;
        }

        let _ = state.progress_events_tx.send(progress);
    }

    warn!("progress ticker stopped: clock channel closed");
}
