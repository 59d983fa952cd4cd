use std::sync::Arc;
use theater::{
    schedule_to_json, schedule_to_string, Metrics, OutputFormat, Result, Theater, TheaterConfig,
};
use tracing::info;

pub struct ScheduleService {
    theater: Theater,
    output: OutputFormat,
    metrics: Option<Arc<Metrics>>,
}

impl ScheduleService {
    pub fn new(config: &TheaterConfig, with_metrics: bool) -> Result<Self> {
        let metrics = if with_metrics {
            Some(Arc::new(Metrics::new()?))
        } else {
            None
        };

        let theater = config.build_theater(config.date_provider(), metrics.clone())?;
        info!("Schedule ready for {}", theater.current_date());

        Ok(Self {
            theater,
            output: config.output,
            metrics,
        })
    }

    pub fn render(&self) -> Result<String> {
        match self.output {
            OutputFormat::Text => Ok(schedule_to_string(&self.theater)),
            OutputFormat::Json => schedule_to_json(&self.theater),
            OutputFormat::Both => Ok(format!(
                "{}\n{}",
                schedule_to_string(&self.theater),
                schedule_to_json(&self.theater)?
            )),
        }
    }

    pub fn metrics_report(&self) -> Result<Option<String>> {
        self.metrics.as_ref().map(|metrics| metrics.export()).transpose()
    }
}
