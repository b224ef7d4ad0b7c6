//! Tests for the settings file.

use appmeta_core::config::DEFAULT_PORT;
use appmeta_core::{AppMetaError, Settings};
use tempfile::TempDir;

#[test]
fn test_save_then_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let settings = Settings {
        ip: "192.168.0.42".to_string(),
        port: "2121".to_string(),
    };
    settings.save_to(&path).expect("save");

    assert_eq!(Settings::load_from(&path), settings);
}

#[test]
fn test_save_overwrites_previous_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    Settings {
        ip: "10.0.0.5".to_string(),
        port: "21".to_string(),
    }
    .save_to(&path)
    .unwrap();
    Settings {
        ip: "10.0.0.6".to_string(),
        port: "2121".to_string(),
    }
    .save_to(&path)
    .unwrap();

    let loaded = Settings::load_from(&path);
    assert_eq!(loaded.ip, "10.0.0.6");
    assert_eq!(loaded.port, "2121");
}

#[test]
fn test_save_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("config.json");

    Settings::default().save_to(&path).expect("save");
    assert!(path.exists());
}

#[test]
fn test_file_uses_ip_and_port_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    Settings {
        ip: "10.0.0.5".to_string(),
        port: "2121".to_string(),
    }
    .save_to(&path)
    .unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["ip"], "10.0.0.5");
    assert_eq!(raw["port"], "2121");
}

#[test]
fn test_absent_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = Settings::load_from(&dir.path().join("config.json"));

    assert_eq!(loaded.ip, "");
    assert_eq!(loaded.port, DEFAULT_PORT);
}

#[test]
fn test_malformed_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    assert_eq!(Settings::load_from(&path), Settings::default());
}

#[test]
fn test_wrong_shape_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#""10.0.0.5:2121""#).unwrap();

    assert_eq!(Settings::load_from(&path), Settings::default());
}

#[test]
fn test_unwritable_location_is_config_io_error() {
    let dir = TempDir::new().unwrap();
    // A regular file where a directory is expected
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"x").unwrap();

    let err = Settings::default()
        .save_to(&blocker.join("config.json"))
        .unwrap_err();
    assert!(matches!(err, AppMetaError::ConfigIo { .. }));
    assert_eq!(err.title(), "I/O Error");
}
