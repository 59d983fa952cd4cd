use chrono::NaiveDate;
use tempfile::tempdir;
use theater::*;

#[test]
fn test_default_config_reproduces_demo_lineup() {
    let config = load_config(None).unwrap();

    assert_eq!(config.log_filter, "info");
    assert_eq!(config.output, OutputFormat::Both);
    assert_eq!(config.movies.len(), 3);
    assert_eq!(config.showings.len(), 9);

    let date = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();
    let theater = config.build_theater(FixedDateProvider(date), None).unwrap();

    assert_eq!(theater.current_date(), date);
    assert_eq!(theater.all_showings().len(), 9);
    assert!(theater.all_showings().iter().all(|s| s.start_time().date() == date));
}

#[test]
fn test_config_file_parsing() {
    let config_content = r#"
log_filter = "debug"
output = "json"
date = "2024-05-07"

[[movies]]
title = "Spider-Man: No Way Home"
description = "Peter Parker asks Doctor Strange for help"
running_minutes = 90
ticket_price = 12.5
special_code = 1

[[movies]]
title = "The Batman"
running_minutes = 95
ticket_price = 9.0

[[showings]]
title = "Spider-Man: No Way Home"
start = "11:00"

[[showings]]
title = "The Batman"
start = "09:30"
"#;

    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("theater.toml");
    std::fs::write(&config_path, config_content).unwrap();

    let config = load_config(Some(config_path.as_path())).unwrap();

    assert_eq!(config.log_filter, "debug");
    assert_eq!(config.output, OutputFormat::Json);
    assert_eq!(config.date, NaiveDate::from_ymd_opt(2024, 5, 7));
    assert_eq!(config.movies.len(), 2);
    assert_eq!(config.movies[1].special_code, 0);
    assert_eq!(config.movies[1].description, None);

    let theater = config.build_theater(config.date_provider(), None).unwrap();
    let entries = schedule_entries(&theater);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "The Batman");
    assert_eq!(entries[0].show_time, "2024-05-07T09:30:00");
    // first showing (3.0) beats the seventh of the month (1.0)
    assert_eq!(entries[0].ticket_price, 6.0);
    // afternoon (3.125) beats first showing, special code and the 7th
    assert_eq!(entries[1].ticket_price, 9.375);

    let spider = Movie::with_description(
        "Spider-Man: No Way Home",
        "Peter Parker asks Doctor Strange for help",
        chrono::Duration::minutes(90),
        12.5,
        1,
    )
    .unwrap();
    assert_eq!(theater.movie_showings(&spider).len(), 1);
}

#[test]
fn test_json_config_file() {
    let config_content = r#"{
  "output": "text",
  "movies": [
    { "title": "Turning Red", "running_minutes": 85, "ticket_price": 11.0 }
  ],
  "showings": [
    { "title": "Turning Red", "start": "19:30" }
  ]
}"#;

    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("theater.json");
    std::fs::write(&config_path, config_content).unwrap();

    let config = load_config(Some(config_path.as_path())).unwrap();
    assert_eq!(config.output, OutputFormat::Text);
    assert_eq!(config.log_filter, "info");
    assert_eq!(config.date, None);

    let date = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();
    let theater = config.build_theater(FixedDateProvider(date), None).unwrap();
    assert_eq!(theater.all_showings().len(), 1);
}

#[test]
fn test_missing_config_file_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("missing.toml");

    assert!(matches!(
        load_config(Some(config_path.as_path())),
        Err(TheaterError::Config(_))
    ));
}

#[test]
fn test_unknown_movie_in_showings() {
    let mut config = TheaterConfig::default();
    config.showings.push(ShowingConfig {
        title: "Nobody Scheduled This".to_string(),
        start: "10:00".to_string(),
    });

    let date = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();
    let err = config.build_theater(FixedDateProvider(date), None).unwrap_err();

    assert!(matches!(err, TheaterError::InvalidArgument(_)));
    assert!(err.to_string().contains("Nobody Scheduled This"));
}

#[test]
fn test_malformed_and_out_of_hours_start_times() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();

    let mut malformed = TheaterConfig::default();
    malformed.showings[0].start = "half past nine".to_string();
    assert!(matches!(
        malformed.build_theater(FixedDateProvider(date), None),
        Err(TheaterError::InvalidArgument(_))
    ));

    let mut too_early = TheaterConfig::default();
    too_early.showings[0].start = "07:45".to_string();
    assert!(matches!(
        too_early.build_theater(FixedDateProvider(date), None),
        Err(TheaterError::StartTimeOutOfBounds(_))
    ));
}

#[test]
fn test_invalid_and_duplicate_movies() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();

    let mut invalid = TheaterConfig::default();
    invalid.movies[0].ticket_price = 250.0;
    assert!(matches!(
        invalid.build_theater(FixedDateProvider(date), None),
        Err(TheaterError::InvalidTicketPrice { .. })
    ));

    let mut duplicate = TheaterConfig::default();
    let first = duplicate.movies[0].clone();
    duplicate.movies.push(first);
    assert!(matches!(
        duplicate.build_theater(FixedDateProvider(date), None),
        Err(TheaterError::InvalidArgument(_))
    ));
}

#[test]
fn test_build_records_metrics() {
    let metrics = std::sync::Arc::new(Metrics::new().unwrap());
    let date = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();

    TheaterConfig::default()
        .build_theater(FixedDateProvider(date), Some(metrics.clone()))
        .unwrap();

    assert_eq!(metrics.showings_scheduled.get(), 9.0);
    assert_eq!(metrics.schedule_rejections.get(), 0.0);
}
