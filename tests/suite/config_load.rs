//! Config file loading from disk.

use std::fs;

use tempfile::TempDir;

use matter_engine::{App, LabConfig, Station, UiOptions};

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn missing_file_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let loaded = LabConfig::load_from(&dir.path().join("config.toml")).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn full_config_round_trips_into_app() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[app]
tui = "inline"
start_station = "liquid"
ascii_only = true
reduced_motion = true

[timing]
siphon_tick_ms = 50
warning_ms = 1000
"#,
    );

    let config = LabConfig::load_from(&path).unwrap().unwrap();
    assert_eq!(config.start_station(), Some(Station::Liquid));
    assert_eq!(
        config.ui_options(),
        UiOptions {
            ascii_only: true,
            high_contrast: false,
            reduced_motion: true,
        }
    );

    let app = App::new(Some(&config));
    assert_eq!(app.station(), Station::Liquid);
    assert_eq!(app.timings().siphon_tick.as_millis(), 50);
    assert_eq!(app.timings().warning_ttl.as_millis(), 1000);
}

#[test]
fn parse_error_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[app\nstart_station = ");

    let err = LabConfig::load_from(&path).unwrap_err();
    assert_eq!(err.path(), path.as_path());
}

#[test]
fn zero_timings_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[timing]\nsiphon_tick_ms = 0\ncompletion_delay_ms = 0\n");

    let config = LabConfig::load_from(&path).unwrap().unwrap();
    let app = App::new(Some(&config));
    assert_eq!(app.timings().siphon_tick.as_millis(), 30);
    assert_eq!(app.timings().completion_delay.as_millis(), 2000);
}

#[test]
fn unknown_station_name_is_ignored() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[app]\nstart_station = \"plasma\"\n");

    let config = LabConfig::load_from(&path).unwrap().unwrap();
    assert_eq!(config.start_station(), None);
    assert_eq!(App::new(Some(&config)).station(), Station::Intro);
}
