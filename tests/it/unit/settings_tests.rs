//! Unit tests for settings and their effect on the reader stack.

use std::time::Duration;
use tabplot::data::DataError;
use tabplot::settings::AppSettings;
use tempfile::tempdir;

#[test]
fn test_default_paths() {
    let settings = AppSettings::default_path();
    assert!(settings.is_none() || settings.unwrap().ends_with("tabplot/settings.json"));
}

#[test]
fn test_settings_drive_open_options() {
    let settings = AppSettings {
        connect_timeout_secs: Some(3),
        reject_zero_values: false,
        ..AppSettings::default()
    };
    let options = settings.open_options();
    assert!(options.validate);
    assert_eq!(options.connect_timeout, Some(Duration::from_secs(3)));
    assert!(!options.policy.reject_zero);
}

#[test]
fn test_allow_list_narrows_registry() {
    let settings = AppSettings {
        allowed_extensions: vec!["csv".into(), "db".into()],
        ..AppSettings::default()
    };
    let registry = settings.registry();
    assert!(registry.resolve("a.db").is_ok());
    assert!(matches!(
        registry.resolve("a.json"),
        Err(DataError::UnknownExtension { .. })
    ));
}

#[test]
fn test_configured_history_path_wins() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("charts.db");
    let settings = AppSettings {
        history_path: Some(path.clone()),
        ..AppSettings::default()
    };
    assert_eq!(settings.resolved_history_path().unwrap(), path);
}

#[test]
fn test_round_trip_through_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let settings = AppSettings {
        history_path: Some(dir.path().join("h.db")),
        allowed_extensions: vec!["csv".into()],
        ..AppSettings::default()
    };
    settings.save_to(&path).unwrap();
    assert_eq!(AppSettings::load_from(&path).unwrap(), settings);
}
