//! Integration tests for Settings loading from an explicit config file.
//!
//! Note: these tests never set TRELLO_CLI_* variables, so the environment
//! layer is a no-op here (it is covered end-to-end in cli_test.rs).

use std::fs;

use tempfile::TempDir;

use trello_cli::config::{config_template, Settings, DEFAULT_BASE_URL};

#[test]
fn given_config_file_with_timeout_when_load_then_overrides_default_only() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trello-cli.toml");
    fs::write(&path, "timeout_secs = 7\n").unwrap();

    // Act
    let settings = Settings::load(Some(&path)).expect("load settings");

    // Assert
    assert_eq!(settings.timeout_secs, 7);
    assert_eq!(settings.connect_timeout_secs, 10);
    assert_eq!(settings.base_url, DEFAULT_BASE_URL);
}

#[test]
fn given_generated_template_when_load_then_equals_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trello-cli.toml");
    fs::write(&path, config_template()).unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_missing_explicit_config_when_load_then_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(err.to_string().contains("config file not found"));
}

#[test]
fn given_unknown_key_when_load_then_parse_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trello-cli.toml");
    fs::write(&path, "api_token = \"secret\"\n").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(err.to_string().contains("trello-cli.toml"));
}

#[test]
fn given_non_http_base_url_when_load_then_validation_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trello-cli.toml");
    fs::write(&path, "base_url = \"ftp://example.com/1\"\n").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(err.to_string().contains("base_url"));
}
