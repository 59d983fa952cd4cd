use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::showing::Showing;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub id: String,
}

impl Customer {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationId(Uuid);

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A confirmed booking of seats for one showing.
///
/// The per-person price is captured when the booking is made and is not
/// recomputed if the schedule changes afterwards.
#[derive(Debug, Clone)]
pub struct Reservation {
    reservation_id: ReservationId,
    customer: Customer,
    showing: Showing,
    audience_count: u32,
    price_per_person: f64,
}

impl Reservation {
    pub(crate) fn new(customer: Customer, showing: Showing, audience_count: u32, price_per_person: f64) -> Self {
        Self {
            reservation_id: ReservationId(Uuid::new_v4()),
            customer,
            showing,
            audience_count,
            price_per_person,
        }
    }

    pub fn reservation_id(&self) -> ReservationId {
        self.reservation_id
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn showing(&self) -> &Showing {
        &self.showing
    }

    pub fn audience_count(&self) -> u32 {
        self.audience_count
    }

    pub fn price_per_person(&self) -> f64 {
        self.price_per_person
    }

    pub fn total_fee(&self) -> f64 {
        self.price_per_person * f64::from(self.audience_count)
    }
}
