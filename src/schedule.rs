use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::clock::DateProvider;
use crate::domain::{remove_seconds, Customer, Movie, Reservation, Showing};
use crate::metrics::Metrics;
use crate::{Result, TheaterError};

/// Maximum number of seats sold for a single showing.
pub const SHOW_CAPACITY: u32 = 100;

/// Schedule manager for a single theater and a single business day.
///
/// Showings are kept per movie, sorted by start time. Adding showings needs
/// `&mut self`; reservations go through `&self` and are serialized by an
/// internal lock, so a `Theater` can be shared between threads once the
/// schedule is set up.
pub struct Theater {
    provider: Box<dyn DateProvider>,
    schedule: HashMap<Arc<Movie>, Arc<[Showing]>>,
    reservations: Mutex<Vec<Reservation>>,
    metrics: Option<Arc<Metrics>>,
}

impl Theater {
    pub fn new(provider: impl DateProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            schedule: HashMap::new(),
            reservations: Mutex::new(Vec::new()),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn current_date(&self) -> NaiveDate {
        self.provider.current_date()
    }

    /// Schedules `movie` at `start_time`.
    ///
    /// Returns `Ok(false)` without touching the schedule when the theater
    /// already has showings on a different day. Fails if the showing itself
    /// is invalid.
    pub fn add_schedule(&mut self, movie: Arc<Movie>, start_time: NaiveDateTime) -> Result<bool> {
        if let Some(existing_day) = self.schedule_day() {
            if start_time.date() != existing_day {
                warn!(
                    "Rejecting showing of '{}' at {}: schedule is for {}",
                    movie.title(),
                    start_time,
                    existing_day
                );
                self.record_schedule_attempt(false);
                return Ok(false);
            }
        }

        let showing = Showing::new(Arc::clone(&movie), start_time)?;
        debug!("Scheduling '{}' at {}", movie.title(), showing.start_time());

        let mut showings = self
            .schedule
            .get(&movie)
            .map(|existing| existing.to_vec())
            .unwrap_or_default();
        showings.push(showing);
        showings.sort_by_key(Showing::start_time);
        self.schedule.insert(movie, showings.into());

        self.record_schedule_attempt(true);
        Ok(true)
    }

    /// Showings of `movie` in start-time order; empty when not scheduled.
    pub fn movie_showings(&self, movie: &Movie) -> Arc<[Showing]> {
        self.schedule
            .get(movie)
            .cloned()
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }

    /// Every showing of the day, ordered by start time and then title.
    pub fn all_showings(&self) -> Vec<Showing> {
        let mut showings: Vec<Showing> = self
            .schedule
            .values()
            .flat_map(|showings| showings.iter().cloned())
            .collect();
        showings.sort_by(|a, b| {
            a.start_time()
                .cmp(&b.start_time())
                .then_with(|| a.movie().title().cmp(b.movie().title()))
        });
        showings
    }

    /// Each scheduled movie with its showings, ordered by the movie's first
    /// showing of the day.
    pub fn movie_schedules(&self) -> Vec<(Arc<Movie>, Arc<[Showing]>)> {
        let mut schedules: Vec<_> = self
            .schedule
            .iter()
            .map(|(movie, showings)| (Arc::clone(movie), Arc::clone(showings)))
            .collect();
        schedules.sort_by(|(a_movie, a), (b_movie, b)| {
            let a_first = a.first().map(Showing::start_time);
            let b_first = b.first().map(Showing::start_time);
            a_first
                .cmp(&b_first)
                .then_with(|| a_movie.title().cmp(b_movie.title()))
        });
        schedules
    }

    /// Drops every showing. Existing reservations are kept.
    pub fn clear_schedules(&mut self) {
        self.schedule.clear();
    }

    pub fn all_reservations(&self) -> Vec<Reservation> {
        self.lock_reservations().clone()
    }

    /// Seats already sold for `showing`.
    pub fn occupancy(&self, showing: &Showing) -> u32 {
        occupancy_in(&self.lock_reservations(), showing)
    }

    /// First showing, in the given order, that can still seat `seats` more people.
    pub fn find_first_showing_with_capacity(&self, showings: &[Showing], seats: u32) -> Option<Showing> {
        first_with_capacity(&self.lock_reservations(), showings, seats).cloned()
    }

    /// Books `seats` for `movie` at `start_time`, returning `None` when the
    /// booking cannot be made. Failures are reported through the log.
    pub fn reserve(
        &self,
        customer: &Customer,
        seats: u32,
        movie: &Movie,
        start_time: NaiveDateTime,
    ) -> Option<Reservation> {
        match self.try_reserve(customer, seats, movie, start_time) {
            Ok(reservation) => Some(reservation),
            Err(e) => {
                warn!("Reservation for customer '{}' not made: {}", customer.id, e);
                None
            }
        }
    }

    /// Like [`Theater::reserve`] but reports why a booking failed.
    pub fn try_reserve(
        &self,
        customer: &Customer,
        seats: u32,
        movie: &Movie,
        start_time: NaiveDateTime,
    ) -> Result<Reservation> {
        let result = self.book(customer, seats, movie, start_time);

        if let Some(metrics) = &self.metrics {
            metrics.record_reservation_attempt(
                result
                    .as_ref()
                    .ok()
                    .map(|reservation| (reservation.audience_count(), reservation.total_fee())),
            );
        }

        result
    }

    fn book(
        &self,
        customer: &Customer,
        seats: u32,
        movie: &Movie,
        start_time: NaiveDateTime,
    ) -> Result<Reservation> {
        if seats == 0 {
            return Err(TheaterError::InvalidArgument(
                "a reservation needs at least one seat".to_string(),
            ));
        }

        let start = remove_seconds(start_time);
        let matches: Vec<Showing> = self
            .movie_showings(movie)
            .iter()
            .filter(|showing| showing.start_time() == start)
            .cloned()
            .collect();

        if matches.is_empty() {
            return Err(TheaterError::NoShowingFound {
                title: movie.title().to_string(),
                start,
            });
        }

        // Capacity check and insert must happen under the same guard.
        let mut reservations = self.lock_reservations();
        let showing = first_with_capacity(&reservations, &matches, seats)
            .cloned()
            .ok_or_else(|| TheaterError::InsufficientSeats {
                title: movie.title().to_string(),
                start,
                requested: seats,
            })?;

        let price_per_person = showing.calculate_ticket_price(&matches);
        let reservation = Reservation::new(customer.clone(), showing, seats, price_per_person);
        reservations.push(reservation.clone());
        drop(reservations);

        info!(
            "Reserved {} seat(s) of '{}' at {} for customer '{}' at ${} each",
            seats,
            movie.title(),
            start,
            customer.id,
            price_per_person
        );
        Ok(reservation)
    }

    /// The calendar day of the earliest scheduled showing.
    fn schedule_day(&self) -> Option<NaiveDate> {
        self.schedule
            .values()
            .flat_map(|showings| showings.iter())
            .map(Showing::start_time)
            .min()
            .map(|start| start.date())
    }

    fn lock_reservations(&self) -> MutexGuard<'_, Vec<Reservation>> {
        // The list is append-only, so a panic elsewhere cannot leave it half-written.
        self.reservations.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_schedule_attempt(&self, accepted: bool) {
        if let Some(metrics) = &self.metrics {
            metrics.record_schedule_attempt(accepted);
        }
    }
}

impl fmt::Debug for Theater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Theater")
            .field("current_date", &self.current_date())
            .field("movies", &self.schedule.len())
            .field("reservations", &self.lock_reservations().len())
            .finish()
    }
}

fn occupancy_in(reservations: &[Reservation], showing: &Showing) -> u32 {
    reservations
        .iter()
        .filter(|reservation| reservation.showing().is_same(showing))
        .map(Reservation::audience_count)
        .sum()
}

fn first_with_capacity<'a>(
    reservations: &[Reservation],
    showings: &'a [Showing],
    seats: u32,
) -> Option<&'a Showing> {
    showings
        .iter()
        .find(|showing| occupancy_in(reservations, showing).saturating_add(seats) <= SHOW_CAPACITY)
}
