use prometheus::{Encoder, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

use crate::models::progress::TravelProgress;

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub progress_evaluations_total: IntCounterVec,
    pub trip_progress_percentage: IntGauge,
    pub trip_completed_activities: IntGauge,
    pub checkins_total: IntGauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let progress_evaluations_total = IntCounterVec::new(
            Opts::new(
                "progress_evaluations_total",
                "Progress computations by what triggered them",
            ),
            &["trigger"],
        )
        .expect("valid progress_evaluations_total metric");

        let trip_progress_percentage = IntGauge::new(
            "trip_progress_percentage",
            "Share of scheduled activities already started [0..100]",
        )
        .expect("valid trip_progress_percentage metric");

        let trip_completed_activities = IntGauge::new(
            "trip_completed_activities",
            "Scheduled activities already started",
        )
        .expect("valid trip_completed_activities metric");

        let checkins_total = IntGauge::new("checkins_total", "Activities checked in by hand")
            .expect("valid checkins_total metric");

        registry
            .register(Box::new(progress_evaluations_total.clone()))
            .expect("register progress_evaluations_total");
        registry
            .register(Box::new(trip_progress_percentage.clone()))
            .expect("register trip_progress_percentage");
        registry
            .register(Box::new(trip_completed_activities.clone()))
            .expect("register trip_completed_activities");
        registry
            .register(Box::new(checkins_total.clone()))
            .expect("register checkins_total");

        Self {
            registry,
            progress_evaluations_total,
            trip_progress_percentage,
            trip_completed_activities,
            checkins_total,
        }
    }

    pub fn record_evaluation(&self, trigger: &str) {
        self.progress_evaluations_total
            .with_label_values(&[trigger])
            .inc();
    }

    /// Updates the live trip gauges. Only snapshots taken at the clock's
    /// current instant belong here.
    pub fn record_progress(&self, progress: &TravelProgress) {
        self.trip_progress_percentage
            .set(i64::from(progress.progress_percentage));
        self.trip_completed_activities
            .set(progress.completed_activities as i64);
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
