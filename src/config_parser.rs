use crate::{
    DateProvider, Metrics, Movie, Result, TheaterConfig, TheaterError, Theater,
};
use chrono::{Duration, NaiveTime};
use config::{Config, Environment, File};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Environment variable prefix for configuration overrides, e.g. `THEATER_DATE`
pub const ENV_PREFIX: &str = "THEATER";

/// Load the theater configuration.
///
/// Defaults are layered under the optional file at `path` (format picked by
/// extension) and then under `THEATER_*` environment variables.
pub fn load_config(path: Option<&Path>) -> Result<TheaterConfig> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        info!("Loading theater config from: {:?}", path);
        builder = builder.add_source(File::from(path).required(true));
    }

    let config: TheaterConfig = builder
        .add_source(Environment::with_prefix(ENV_PREFIX))
        .build()?
        .try_deserialize()?;

    Ok(config)
}

impl TheaterConfig {
    /// Build the day's schedule described by this configuration.
    ///
    /// Showings are placed on the provider's current date. A showing that
    /// falls on another day is skipped with a warning; unknown titles and
    /// malformed times are errors.
    pub fn build_theater<P: DateProvider + 'static>(
        &self,
        provider: P,
        metrics: Option<Arc<Metrics>>,
    ) -> Result<Theater> {
        let mut theater = Theater::new(provider);
        if let Some(metrics) = metrics {
            theater = theater.with_metrics(metrics);
        }
        let date = theater.current_date();

        let mut movies: HashMap<&str, Arc<Movie>> = HashMap::new();
        for movie in &self.movies {
            let built = Movie::with_description(
                movie.title.as_str(),
                movie.description.as_deref().unwrap_or(&movie.title),
                Duration::minutes(movie.running_minutes),
                movie.ticket_price,
                movie.special_code,
            )?;
            if movies.insert(movie.title.as_str(), Arc::new(built)).is_some() {
                return Err(TheaterError::InvalidArgument(format!(
                    "Duplicate movie title in config: {}",
                    movie.title
                )));
            }
        }

        for showing in &self.showings {
            let movie = movies.get(showing.title.as_str()).ok_or_else(|| {
                TheaterError::InvalidArgument(format!(
                    "Showing references unknown movie: {}",
                    showing.title
                ))
            })?;
            let time = NaiveTime::parse_from_str(&showing.start, "%H:%M").map_err(|e| {
                TheaterError::InvalidArgument(format!(
                    "Invalid start time '{}' for {}: {}",
                    showing.start, showing.title, e
                ))
            })?;

            if !theater.add_schedule(Arc::clone(movie), date.and_time(time))? {
                warn!("Skipped showing of '{}' at {}", showing.title, showing.start);
            }
        }

        info!(
            "Built schedule for {} with {} showing(s)",
            date,
            theater.all_showings().len()
        );
        Ok(theater)
    }
}
