//! Human- and machine-readable views of the day's schedule.

use std::fmt::Write as _;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::schedule::Theater;
use crate::Result;

const RULER: &str = "===================================================";

/// One showing as it appears in the JSON schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowingEntry {
    pub sequence: usize,
    pub show_time: String,
    pub title: String,
    pub running_time: i64,
    pub ticket_price: f64,
}

/// Schedule entries grouped by movie, each movie's showings in order.
pub fn schedule_entries(theater: &Theater) -> Vec<ShowingEntry> {
    theater
        .movie_schedules()
        .iter()
        .flat_map(|(movie, showings)| {
            showings.iter().map(move |showing| ShowingEntry {
                sequence: showing.compute_sequence(showings),
                show_time: showing.start_time().format("%Y-%m-%dT%H:%M:%S").to_string(),
                title: movie.title().to_string(),
                running_time: movie.running_time().num_minutes(),
                ticket_price: showing.calculate_ticket_price(showings),
            })
        })
        .collect()
}

pub fn schedule_to_string(theater: &Theater) -> String {
    let mut out = String::with_capacity(1024);
    let _ = writeln!(out, "{}", theater.current_date());
    let _ = writeln!(out, "{RULER}");

    for (movie, showings) in theater.movie_schedules() {
        for showing in showings.iter() {
            let _ = writeln!(
                out,
                "{}: {} {} {} ${:?}",
                showing.compute_sequence(&showings),
                showing.start_time().format("%Y-%m-%dT%H:%M"),
                movie.title(),
                human_readable_format(movie.running_time()),
                showing.calculate_ticket_price(&showings)
            );
        }
    }

    let _ = writeln!(out, "{RULER}");
    out
}

pub fn schedule_to_json(theater: &Theater) -> Result<String> {
    Ok(serde_json::to_string_pretty(&schedule_entries(theater))?)
}

/// Formats a running time as `(1 hour 25 minutes)`.
pub fn human_readable_format(duration: Duration) -> String {
    let hours = duration.num_hours();
    let minutes = duration.num_minutes() - hours * 60;

    format!(
        "({} hour{} {} minute{})",
        hours,
        plural_suffix(hours),
        minutes,
        plural_suffix(minutes)
    )
}

fn plural_suffix(value: i64) -> &'static str {
    if value == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_readable_format_handles_plurals() {
        assert_eq!(human_readable_format(Duration::minutes(85)), "(1 hour 25 minutes)");
        assert_eq!(human_readable_format(Duration::minutes(121)), "(2 hours 1 minute)");
        assert_eq!(human_readable_format(Duration::minutes(45)), "(0 hours 45 minutes)");
        assert_eq!(human_readable_format(Duration::minutes(60)), "(1 hour 0 minutes)");
    }
}
