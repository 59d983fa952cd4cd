use std::hash::{Hash, Hasher};

use chrono::Duration;

use crate::{Result, TheaterError};

/// A film on the theater's lineup.
///
/// Every field is validated in the constructors, so an existing `Movie` is
/// always within bounds. Movies have no identity beyond their value.
#[derive(Debug, Clone)]
pub struct Movie {
    title: String,
    description: String,
    running_time: Duration,
    ticket_price: f64,
    special_code: u8,
}

impl Movie {
    pub const MIN_TITLE_LEN: usize = 10;
    pub const MAX_TITLE_LEN: usize = 128;
    pub const MIN_MINUTES: i64 = 10;
    pub const MAX_MINUTES: i64 = 5 * 60;
    pub const MIN_TICKET_PRICE: f64 = 0.0;
    pub const MAX_TICKET_PRICE: f64 = 100.0;
    pub const MIN_CODE: u8 = 0;
    pub const MAX_CODE: u8 = 1;

    /// Creates a movie whose description is its title.
    pub fn new(
        title: impl Into<String>,
        running_time: Duration,
        ticket_price: f64,
        special_code: u8,
    ) -> Result<Self> {
        let title = title.into();
        let description = title.clone();
        Self::with_description(title, description, running_time, ticket_price, special_code)
    }

    pub fn with_description(
        title: impl Into<String>,
        description: impl Into<String>,
        running_time: Duration,
        ticket_price: f64,
        special_code: u8,
    ) -> Result<Self> {
        let title = title.into();
        let description = description.into();

        if !is_valid_text(&title) {
            return Err(TheaterError::InvalidTitle {
                min: Self::MIN_TITLE_LEN,
                max: Self::MAX_TITLE_LEN,
            });
        }
        if !is_valid_text(&description) {
            return Err(TheaterError::InvalidDescription {
                min: Self::MIN_TITLE_LEN,
                max: Self::MAX_TITLE_LEN,
            });
        }

        let minutes = running_time.num_minutes();
        if !(Self::MIN_MINUTES..=Self::MAX_MINUTES).contains(&minutes) {
            return Err(TheaterError::InvalidRunningTime {
                minutes,
                min: Self::MIN_MINUTES,
                max: Self::MAX_MINUTES,
            });
        }

        // NaN fails the range check as well
        if !(Self::MIN_TICKET_PRICE..=Self::MAX_TICKET_PRICE).contains(&ticket_price) {
            return Err(TheaterError::InvalidTicketPrice {
                price: ticket_price,
                min: Self::MIN_TICKET_PRICE,
                max: Self::MAX_TICKET_PRICE,
            });
        }

        if !(Self::MIN_CODE..=Self::MAX_CODE).contains(&special_code) {
            return Err(TheaterError::InvalidSpecialCode {
                code: special_code,
                min: Self::MIN_CODE,
                max: Self::MAX_CODE,
            });
        }

        Ok(Self {
            title,
            description,
            running_time,
            // -0.0 would otherwise hash differently from 0.0
            ticket_price: ticket_price + 0.0,
            special_code,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn running_time(&self) -> Duration {
        self.running_time
    }

    pub fn ticket_price(&self) -> f64 {
        self.ticket_price
    }

    pub fn special_code(&self) -> u8 {
        self.special_code
    }

    pub fn is_special(&self) -> bool {
        self.special_code != 0
    }
}

fn is_valid_text(text: &str) -> bool {
    let len = text.trim().chars().count();
    (Movie::MIN_TITLE_LEN..=Movie::MAX_TITLE_LEN).contains(&len)
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.description == other.description
            && self.running_time == other.running_time
            && self.ticket_price.to_bits() == other.ticket_price.to_bits()
            && self.special_code == other.special_code
    }
}

// Ticket prices are validated finite, so bitwise comparison is a total equality.
impl Eq for Movie {}

impl Hash for Movie {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
        self.description.hash(state);
        self.running_time.hash(state);
        self.ticket_price.to_bits().hash(state);
        self.special_code.hash(state);
    }
}
