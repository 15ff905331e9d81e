//! Unit tests for config module
//!
//! Tests configuration types, defaults, and serialization.
//! No filesystem dependencies - all in-memory.

use std::time::Duration;

use crate::config::{BusKind, Config, LogLevel};

#[test]
fn config_default() {
    let config = Config::default();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert_eq!(config.client.bus, BusKind::Session);
    assert_eq!(config.client.method_timeout(), None);
}

#[test]
fn config_serialize_toml() {
    let config = Config::default();

    let toml_str = toml::to_string(&config).unwrap();
    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[client]"));
    assert!(!toml_str.contains("method_timeout_ms"));
}

#[test]
fn config_deserialize_toml() {
    let toml_str = r#"
        [general]
        log_level = "debug"

        [client]
        bus = "system"
        method_timeout_ms = 10000
    "#;

    let config = Config::from_toml(toml_str).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.client.bus, BusKind::System);
    assert_eq!(
        config.client.method_timeout(),
        Some(Duration::from_secs(10))
    );
}

#[test]
fn config_minimal_toml() {
    let config = Config::from_toml("[general]\n").unwrap();
    assert_eq!(config, Config::default());

    let config = Config::from_toml("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn config_rejects_unknown_bus() {
    let result = Config::from_toml("[client]\nbus = \"tcp\"\n");
    assert!(result.is_err());
}

#[test]
fn config_rejects_zero_timeout() {
    let err = Config::from_toml("[client]\nmethod_timeout_ms = 0\n").unwrap_err();
    assert!(err.to_string().contains("client.method_timeout_ms"));
}

#[test]
fn log_level_display_matches_serde_names() {
    for level in [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ] {
        let toml_str = format!("[general]\nlog_level = \"{level}\"\n");
        let config = Config::from_toml(&toml_str).unwrap();
        assert_eq!(config.general.log_level, level);
    }
}
