use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use theater::{load_config, OutputFormat};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod service;

use service::ScheduleService;

#[derive(Parser, Debug)]
#[command(name = "schedule-service")]
#[command(about = "Prints the theater's schedule for the day")]
struct Args {
    /// Config file path (TOML, JSON or YAML)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Business day to schedule, as YYYY-MM-DD. Defaults to today
    #[arg(short = 'd', long = "date")]
    date: Option<NaiveDate>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum)]
    format: Option<FormatArg>,

    /// Print Prometheus metrics after the schedule
    #[arg(long = "metrics")]
    metrics: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Both,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Both => OutputFormat::Both,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(date) = args.date {
        config.date = Some(date);
    }
    if let Some(format) = args.format {
        config.output = format.into();
    }

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Schedule Service");
    if let Some(path) = &args.config {
        info!("Config file: {:?}", path);
    }

    let service = ScheduleService::new(&config, args.metrics)?;

    println!("{}", service.render()?);

    if let Some(report) = service.metrics_report()? {
        println!("{}", report);
    }

    Ok(())
}
