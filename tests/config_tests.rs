use std::fs;

use tempfile::TempDir;
use tradebell::config::{Config, ELEMENT_TOKEN_PLACEHOLDER, TELEGRAM_TOKEN_PLACEHOLDER};
use tradebell::error::{ConfigError, Error};

#[test]
fn config_load_reads_event_toggles() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[logging]
level = "debug"
format = "json"

[events]
pnl_update = false
profit_threshold = 2.5
"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
    assert!(!config.events.pnl_update);
    assert!(config.events.trade_execution);
    assert!((config.events.profit_threshold - 2.5).abs() < f64::EPSILON);
}

#[test]
fn config_load_rejects_negative_threshold() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[events]\nprofit_threshold = -1.0\n").unwrap();

    match Config::load(&path) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "profit_threshold",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid threshold error, got {err}"),
        Ok(_) => panic!("Expected invalid threshold error, got Ok"),
    }
}

#[test]
fn config_load_missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let result = Config::load(dir.path().join("absent.toml"));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn config_write_default_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("tradebell").join("config.toml");

    Config::write_default(&path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("[events]"));
    assert!(content.contains(ELEMENT_TOKEN_PLACEHOLDER));
    assert!(content.contains(TELEGRAM_TOKEN_PLACEHOLDER));

    let parsed = Config::parse(&content).unwrap();
    assert_eq!(parsed, Config::template());
}

#[test]
fn config_save_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.events.stop_loss = false;
    config.events.profit_threshold = 0.5;
    config.element.enabled = true;
    config.element.room_id = "!ops:matrix.org".into();
    config.telegram.chat_id = "@desk".into();
    config.save(&path).unwrap();

    let parsed = Config::parse(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed, config);
}
