use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TheaterError {
    #[error("Movie title must be between {min} and {max} chars")]
    InvalidTitle { min: usize, max: usize },

    #[error("Movie description must be between {min} and {max} chars")]
    InvalidDescription { min: usize, max: usize },

    #[error("Duration must be within {min} and {max} minutes, got {minutes}")]
    InvalidRunningTime { minutes: i64, min: i64, max: i64 },

    #[error("Ticket price must be within {min} and {max}, got {price}")]
    InvalidTicketPrice { price: f64, min: f64, max: f64 },

    #[error("Special code must be within {min} and {max}, got {code}")]
    InvalidSpecialCode { code: u8, min: u8, max: u8 },

    #[error("Start time must be between 09:00 and 23:00, got {0}")]
    StartTimeOutOfBounds(NaiveDateTime),

    #[error("No showing found for movie '{title}' at {start}")]
    NoShowingFound { title: String, start: NaiveDateTime },

    #[error("Insufficient seats for movie '{title}' at {start}: requested {requested}")]
    InsufficientSeats {
        title: String,
        start: NaiveDateTime,
        requested: u32,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, TheaterError>;
