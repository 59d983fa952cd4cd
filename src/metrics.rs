use prometheus::{
    register_counter_with_registry, Counter, Encoder, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use crate::Result;

/// Metrics collector for the theater schedule
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,

    // Schedule metrics
    pub showings_scheduled: Counter,
    pub schedule_rejections: Counter,

    // Business metrics
    pub reservations_created: Counter,
    pub reservations_successful: Counter,
    pub reservations_failed: Counter,
    pub seats_reserved: Counter,
    pub ticket_revenue: Counter,
}

impl Metrics {
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());

        let showings_scheduled = register_counter_with_registry!(
            Opts::new("showings_scheduled_total", "Total number of showings added to the schedule"),
            registry
        )?;

        let schedule_rejections = register_counter_with_registry!(
            Opts::new("schedule_rejections_total", "Total number of showings rejected for a different day"),
            registry
        )?;

        let reservations_created = register_counter_with_registry!(
            Opts::new("reservations_created_total", "Total number of reservation attempts"),
            registry
        )?;

        let reservations_successful = register_counter_with_registry!(
            Opts::new("reservations_successful_total", "Total number of successful reservations"),
            registry
        )?;

        let reservations_failed = register_counter_with_registry!(
            Opts::new("reservations_failed_total", "Total number of failed reservations"),
            registry
        )?;

        let seats_reserved = register_counter_with_registry!(
            Opts::new("seats_reserved_total", "Total number of seats reserved"),
            registry
        )?;

        let ticket_revenue = register_counter_with_registry!(
            Opts::new("ticket_revenue_total", "Sum of total fees over all reservations"),
            registry
        )?;

        Ok(Self {
            registry,
            showings_scheduled,
            schedule_rejections,
            reservations_created,
            reservations_successful,
            reservations_failed,
            seats_reserved,
            ticket_revenue,
        })
    }

    /// Export metrics in Prometheus format
    pub fn export(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Record a schedule addition
    pub fn record_schedule_attempt(&self, accepted: bool) {
        if accepted {
            self.showings_scheduled.inc();
        } else {
            self.schedule_rejections.inc();
        }
    }

    /// Record a reservation attempt; `booking` carries seats and total fee on success
    pub fn record_reservation_attempt(&self, booking: Option<(u32, f64)>) {
        self.reservations_created.inc();
        match booking {
            Some((seats, total_fee)) => {
                self.reservations_successful.inc();
                self.seats_reserved.inc_by(f64::from(seats));
                self.ticket_revenue.inc_by(total_fee);
            }
            None => self.reservations_failed.inc(),
        }
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("showings_scheduled", &self.showings_scheduled.get())
            .field("reservations_successful", &self.reservations_successful.get())
            .finish_non_exhaustive()
    }
}
