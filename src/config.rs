use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::{DateProvider, FixedDateProvider, SystemDateProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    #[default]
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieConfig {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub running_minutes: i64,
    pub ticket_price: f64,
    #[serde(default)]
    pub special_code: u8,
}

impl MovieConfig {
    fn new(title: &str, running_minutes: i64, ticket_price: f64, special_code: u8) -> Self {
        Self {
            title: title.to_string(),
            description: None,
            running_minutes,
            ticket_price,
            special_code,
        }
    }
}

/// A showing of a configured movie; `start` is a time of day as `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowingConfig {
    pub title: String,
    pub start: String,
}

impl ShowingConfig {
    fn new(title: &str, start: &str) -> Self {
        Self {
            title: title.to_string(),
            start: start.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TheaterConfig {
    pub log_filter: String,
    pub output: OutputFormat,
    /// Business day to schedule; today when unset.
    pub date: Option<NaiveDate>,
    pub movies: Vec<MovieConfig>,
    pub showings: Vec<ShowingConfig>,
}

impl Default for TheaterConfig {
    fn default() -> Self {
        const TURNING_RED: &str = "Turning Red";
        const THE_BATMAN: &str = "The Batman";
        const SPIDER_MAN: &str = "Spider-Man: No Way Home";

        Self {
            log_filter: "info".to_string(),
            output: OutputFormat::default(),
            date: None,
            movies: vec![
                MovieConfig::new(TURNING_RED, 85, 11.0, 0),
                MovieConfig::new(THE_BATMAN, 95, 9.0, 0),
                MovieConfig::new(SPIDER_MAN, 90, 12.5, 1),
            ],
            showings: vec![
                ShowingConfig::new(TURNING_RED, "09:00"),
                ShowingConfig::new(SPIDER_MAN, "11:00"),
                ShowingConfig::new(THE_BATMAN, "12:50"),
                ShowingConfig::new(TURNING_RED, "14:30"),
                ShowingConfig::new(SPIDER_MAN, "16:10"),
                ShowingConfig::new(THE_BATMAN, "17:50"),
                ShowingConfig::new(TURNING_RED, "19:30"),
                ShowingConfig::new(SPIDER_MAN, "21:10"),
                ShowingConfig::new(THE_BATMAN, "23:00"),
            ],
        }
    }
}

impl TheaterConfig {
    /// The configured date if one is set, otherwise the local clock.
    pub fn date_provider(&self) -> Box<dyn DateProvider> {
        match self.date {
            Some(date) => Box::new(FixedDateProvider(date)),
            None => Box::new(SystemDateProvider),
        }
    }
}
