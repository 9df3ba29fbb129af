//! # Configuration Tests
//!
//! Tests for configuration defaults, JSON deserialization, and partial
//! overrides.

use tbsim_core::config::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.general.max_steps, 1_000_000);
    assert_eq!(config.clock.protocol, ClockProtocol::FixedDuty);
    assert_eq!(config.clock.period, 10);
    assert_eq!(config.clock.reset_release, ResetRelease::AtTime);
    assert_eq!(config.clock.reset_threshold, 20);
    assert!(!config.trace.enabled);
}

#[test]
fn test_system_config_defaults() {
    let system = SystemConfig::default();
    assert_eq!(system.uart_base, 0x2000_0000);
    assert_eq!(system.timer_base, 0x3000_0000);
    assert_eq!(system.clock_hz, 50_000_000);
    assert_eq!(system.baud_rate, 115_200);
    assert_eq!(system.tx_fifo_depth, 16);
    assert_eq!(system.rx_fifo_depth, 16);
}

#[test]
fn test_trace_config_defaults() {
    let trace = TraceConfig::default();
    assert!(!trace.enabled);
    assert_eq!(trace.path, "dump.vcd");
    assert_eq!(trace.depth, 99);
}

#[test]
fn test_empty_json_yields_defaults() {
    let config: Config = match serde_json::from_str("{}") {
        Ok(c) => c,
        Err(e) => panic!("{e}"),
    };
    assert_eq!(config.general.max_steps, 1_000_000);
    assert_eq!(config.clock.period, 10);
    assert_eq!(config.system.baud_rate, 115_200);
}

#[test]
fn test_partial_json_overrides() {
    let json = r#"{
        "general": { "max_steps": 200 },
        "clock": {
            "protocol": "TogglePerStep",
            "reset_release": "AfterToggles",
            "reset_threshold": 4
        },
        "system": { "baud_rate": 9600 },
        "trace": { "enabled": true, "path": "run.vcd", "depth": 2 }
    }"#;
    let config: Config = match serde_json::from_str(json) {
        Ok(c) => c,
        Err(e) => panic!("{e}"),
    };
    assert_eq!(config.general.max_steps, 200);
    assert_eq!(config.clock.protocol, ClockProtocol::TogglePerStep);
    assert_eq!(config.clock.reset_release, ResetRelease::AfterToggles);
    assert_eq!(config.clock.reset_threshold, 4);
    assert_eq!(config.clock.period, 10);
    assert_eq!(config.system.baud_rate, 9600);
    assert_eq!(config.system.uart_base, 0x2000_0000);
    assert!(config.trace.enabled);
    assert_eq!(config.trace.path, "run.vcd");
    assert_eq!(config.trace.depth, 2);
}

#[test]
fn test_unknown_protocol_rejected() {
    let json = r#"{ "clock": { "protocol": "Sawtooth" } }"#;
    assert!(serde_json::from_str::<Config>(json).is_err());
}
