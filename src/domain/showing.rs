use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::discount::{best_discount, DiscountRule};
use super::movie::Movie;
use crate::{Result, TheaterError};

/// Unique identity of a scheduled showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShowingId(Uuid);

impl ShowingId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ShowingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A screening of a movie at a minute-precision start time.
///
/// Two showings constructed separately are distinct even when their movie and
/// start time agree; cloning keeps the identity.
#[derive(Debug, Clone)]
pub struct Showing {
    id: ShowingId,
    movie: Arc<Movie>,
    start_time: NaiveDateTime,
}

impl Showing {
    /// Earliest allowed start, as an hour of the day.
    pub const OPENING_HOUR: u32 = 9;
    /// Latest allowed start (inclusive, on the hour).
    pub const CLOSING_HOUR: u32 = 23;

    pub fn new(movie: Arc<Movie>, start_time: NaiveDateTime) -> Result<Self> {
        if !is_within_opening_hours(start_time.time()) {
            return Err(TheaterError::StartTimeOutOfBounds(start_time));
        }

        Ok(Self {
            id: ShowingId::new(),
            movie,
            start_time: remove_seconds(start_time),
        })
    }

    pub fn id(&self) -> ShowingId {
        self.id
    }

    pub fn movie(&self) -> &Arc<Movie> {
        &self.movie
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    /// Returns true when `other` is this very showing.
    pub fn is_same(&self, other: &Showing) -> bool {
        self.id == other.id
    }

    /// 1-based position of this showing within `all_showings_for_movie`,
    /// or 0 when it is not listed. The slice is expected to be sorted by
    /// start time.
    pub fn compute_sequence(&self, all_showings_for_movie: &[Showing]) -> usize {
        all_showings_for_movie
            .iter()
            .position(|showing| showing.movie == self.movie && showing.is_same(self))
            .map_or(0, |index| index + 1)
    }

    /// Ticket price after the single largest applicable discount, never
    /// below zero.
    ///
    /// Discounts only apply when the sibling list holds at least one showing
    /// of this movie; otherwise the base price is charged.
    pub fn calculate_ticket_price(&self, all_showings_for_movie: &[Showing]) -> f64 {
        let discount = if self.has_siblings_in(all_showings_for_movie) {
            best_discount(self, all_showings_for_movie)
        } else {
            0.0
        };

        (self.movie.ticket_price() - discount).max(0.0)
    }

    /// Every discount rule paired with the amount it would take off this
    /// showing's price.
    pub fn applicable_discounts(&self, all_showings_for_movie: &[Showing]) -> Vec<(DiscountRule, f64)> {
        DiscountRule::ALL
            .iter()
            .map(|rule| (*rule, rule.discount(self, all_showings_for_movie)))
            .collect()
    }

    fn has_siblings_in(&self, showings: &[Showing]) -> bool {
        showings.iter().any(|showing| showing.movie == self.movie)
    }
}

impl PartialEq for Showing {
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other)
    }
}

impl Eq for Showing {}

fn is_within_opening_hours(time: NaiveTime) -> bool {
    let secs = time.num_seconds_from_midnight();
    let opening = Showing::OPENING_HOUR * 3600;
    let closing = Showing::CLOSING_HOUR * 3600;

    secs >= opening && (secs < closing || (secs == closing && time.nanosecond() == 0))
}

/// Truncates a timestamp to whole minutes.
pub fn remove_seconds(time: NaiveDateTime) -> NaiveDateTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}
