//! Unit tests for config module
//!
//! Tests configuration types, defaults, parsing and validation.
//! No filesystem dependencies - all in-memory.

#![allow(clippy::unwrap_used)]

use std::{path::PathBuf, time::Duration};

use crate::BridgeError;
use crate::config::{BusKind, Config, LogLevel};

#[test]
fn config_default_matches_bluez_setup() {
    let config = Config::default();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert_eq!(config.bus.kind, BusKind::System);
    assert_eq!(config.bus.service, "org.bluez");
    assert_eq!(config.bus.root, "/org/bluez");
    assert_eq!(config.bus.interface, "org.bluez.MediaPlayer1");
    assert_eq!(config.bus.poll_interval(), Duration::from_secs(2));
    assert_eq!(config.server.bind_addr(), "0.0.0.0:8080");
    assert!(config.persistence.enabled);
    assert_eq!(
        config.persistence.state_file,
        PathBuf::from("/tmp/btplayer_state.json")
    );
}

#[test]
fn config_empty_toml() {
    let config = Config::parse("").unwrap();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.bus.adapter_pattern, "^hci");
}

#[test]
fn config_partial_sections_keep_other_defaults() {
    let toml_str = r#"
        [general]
        log_level = "debug"

        [server]
        port = 9090

        [bus]
        kind = "session"
        poll_interval_secs = 5
    "#;

    let config = Config::parse(toml_str).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.bus.kind, BusKind::Session);
    assert_eq!(config.bus.poll_interval(), Duration::from_secs(5));
    assert_eq!(config.bus.device_pattern, "^dev_");
}

#[test]
fn config_serialize_roundtrip() {
    let original = Config::default();

    let toml_str = toml::to_string(&original).unwrap();
    assert!(toml_str.contains("[bus]"));
    assert!(toml_str.contains("[server]"));

    let deserialized = Config::parse(&toml_str).unwrap();
    assert_eq!(format!("{original:?}"), format!("{deserialized:?}"));
}

#[test]
fn config_unknown_fields() {
    let toml_with_unknown = r#"
        [general]
        log_level = "info"
        unknown_field = "should be ignored"

        [unknown_section]
        some_field = "ignored"
    "#;

    assert!(Config::parse(toml_with_unknown).is_ok());
}

#[test]
fn config_invalid_toml() {
    let invalid_toml = r#"
        [server
        port =
    "#;

    let result = Config::parse(invalid_toml);
    assert!(matches!(result, Err(BridgeError::Config { .. })));
}

#[test]
fn config_rejects_zero_interval() {
    let result = Config::parse("[bus]\npoll_interval_secs = 0\n");

    let err = result.unwrap_err();
    assert!(err.to_string().contains("poll_interval_secs"));
}

#[test]
fn config_rejects_zero_request_timeout() {
    let result = Config::parse("[server]\nrequest_timeout_secs = 0\n");

    let err = result.unwrap_err();
    assert!(matches!(err, BridgeError::Config { .. }));
    assert!(err.to_string().contains("request_timeout_secs"));

    let config = Config::parse("[server]\nrequest_timeout_secs = 1\n").unwrap();
    assert_eq!(config.server.request_timeout(), Duration::from_secs(1));
}

#[test]
fn config_rejects_bad_pattern() {
    let result = Config::parse("[bus]\ndevice_pattern = \"(dev_\"\n");

    let err = result.unwrap_err();
    assert!(err.to_string().contains("bus.device_pattern"));
}

#[test]
fn call_timeout_zero_disables() {
    let config = Config::parse("[bus]\ncall_timeout_ms = 0\n").unwrap();
    assert_eq!(config.bus.call_timeout(), None);

    let config = Config::default();
    assert_eq!(config.bus.call_timeout(), Some(Duration::from_millis(5000)));
}
