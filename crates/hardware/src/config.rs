//! Configuration system for the testbench harness.
//!
//! This module defines all configuration structures and enums used to
//! parameterize a simulation run. It provides:
//! 1. **Defaults:** Baseline constants matching the reference testbench (10 ns clock period, reset release at 20 ns, 1M-step bound).
//! 2. **Structures:** Hierarchical config for general, clock, system, and trace settings.
//! 3. **Enums:** Clock driving protocol and reset-release condition variants.
//!
//! Configuration is supplied as JSON (see the CLI's `--config`) or via
//! `Config::default()`.

use serde::Deserialize;

use crate::common::constants;

/// Default configuration constants for the harness.
///
/// These values define the baseline run parameters when not explicitly
/// overridden in a JSON configuration file.
mod defaults {
    /// Default evaluation-step bound for a run (1 million steps).
    pub const MAX_STEPS: u64 = 1_000_000;

    /// Default clock period in steps for the fixed-duty-cycle protocol.
    ///
    /// Matches the reference testbench's 10 ns period at the 1 ns step
    /// convention: low for steps 0-4 of each period, high for 5-9.
    pub const CLOCK_PERIOD: u64 = 10;

    /// Default reset-release threshold.
    ///
    /// Interpreted in steps for [`super::ResetRelease::AtTime`] and in clock
    /// toggles for [`super::ResetRelease::AfterToggles`].
    pub const RESET_THRESHOLD: u64 = 20;

    /// Default TX FIFO depth of the simulated UART.
    pub const TX_FIFO_DEPTH: usize = 16;

    /// Default RX FIFO depth of the simulated UART.
    pub const RX_FIFO_DEPTH: usize = 16;

    /// Default waveform output path.
    pub const TRACE_PATH: &str = "dump.vcd";

    /// Default trace hierarchy depth passed to the model's trace registration.
    pub const TRACE_DEPTH: u32 = 99;
}

/// Clock driving protocol variants.
///
/// Selects how the driver computes the clock input for each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ClockProtocol {
    /// Fixed-duty-cycle clock.
    ///
    /// The signal is low for the first half of each period and high for the
    /// second half, derived from the current simulation time.
    #[default]
    FixedDuty,
    /// Toggle-every-step clock.
    ///
    /// The signal inverts on every evaluation step regardless of period.
    TogglePerStep,
}

/// Reset-release condition variants.
///
/// The reset line starts asserted (active-low zero) and is released exactly
/// once when the configured condition first holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ResetRelease {
    /// Release when simulation time reaches the threshold.
    #[default]
    AtTime,
    /// Release after the threshold number of clock toggles.
    AfterToggles,
}

/// Root configuration structure containing all harness settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use tbsim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.general.max_steps, 1_000_000);
/// assert_eq!(config.clock.period, 10);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use tbsim_core::config::{ClockProtocol, Config, ResetRelease};
///
/// let json = r#"{
///     "general": { "max_steps": 200 },
///     "clock": {
///         "protocol": "TogglePerStep",
///         "reset_release": "AfterToggles",
///         "reset_threshold": 4
///     },
///     "trace": { "enabled": true, "path": "run.vcd" }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.general.max_steps, 200);
/// assert_eq!(config.clock.protocol, ClockProtocol::TogglePerStep);
/// assert_eq!(config.clock.reset_release, ResetRelease::AfterToggles);
/// assert!(config.trace.enabled);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General run settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Clock and reset driving protocol
    #[serde(default)]
    pub clock: ClockConfig,
    /// System memory map and peripheral parameters
    #[serde(default)]
    pub system: SystemConfig,
    /// Waveform trace settings
    #[serde(default)]
    pub trace: TraceConfig,
}

/// General run settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Evaluation-step bound; the run stops once simulation time reaches it.
    #[serde(default = "GeneralConfig::default_max_steps")]
    pub max_steps: u64,
}

impl GeneralConfig {
    fn default_max_steps() -> u64 {
        defaults::MAX_STEPS
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_steps: defaults::MAX_STEPS,
        }
    }
}

/// Clock and reset driving configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClockConfig {
    /// Clock driving protocol.
    #[serde(default)]
    pub protocol: ClockProtocol,

    /// Clock period in steps (fixed-duty protocol only; must be even and non-zero).
    #[serde(default = "ClockConfig::default_period")]
    pub period: u64,

    /// Reset-release condition.
    #[serde(default)]
    pub reset_release: ResetRelease,

    /// Threshold for the reset-release condition (steps or toggles).
    #[serde(default = "ClockConfig::default_reset_threshold")]
    pub reset_threshold: u64,
}

impl ClockConfig {
    fn default_period() -> u64 {
        defaults::CLOCK_PERIOD
    }

    fn default_reset_threshold() -> u64 {
        defaults::RESET_THRESHOLD
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            protocol: ClockProtocol::default(),
            period: defaults::CLOCK_PERIOD,
            reset_release: ResetRelease::default(),
            reset_threshold: defaults::RESET_THRESHOLD,
        }
    }
}

/// System memory map and peripheral parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Base physical address of the UART register block.
    #[serde(default = "SystemConfig::default_uart_base")]
    pub uart_base: u32,

    /// Base physical address of the timer register block.
    #[serde(default = "SystemConfig::default_timer_base")]
    pub timer_base: u32,

    /// Reference clock frequency in Hz used to derive the baud divisor.
    #[serde(default = "SystemConfig::default_clock_hz")]
    pub clock_hz: u32,

    /// Serial line rate in baud.
    #[serde(default = "SystemConfig::default_baud_rate")]
    pub baud_rate: u32,

    /// TX FIFO depth of the simulated UART.
    #[serde(default = "SystemConfig::default_tx_fifo_depth")]
    pub tx_fifo_depth: usize,

    /// RX FIFO depth of the simulated UART.
    #[serde(default = "SystemConfig::default_rx_fifo_depth")]
    pub rx_fifo_depth: usize,
}

impl SystemConfig {
    fn default_uart_base() -> u32 {
        constants::UART_BASE.val()
    }

    fn default_timer_base() -> u32 {
        constants::TIMER_BASE.val()
    }

    fn default_clock_hz() -> u32 {
        constants::CPU_CLK_HZ
    }

    fn default_baud_rate() -> u32 {
        constants::BAUD_RATE
    }

    fn default_tx_fifo_depth() -> usize {
        defaults::TX_FIFO_DEPTH
    }

    fn default_rx_fifo_depth() -> usize {
        defaults::RX_FIFO_DEPTH
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            uart_base: Self::default_uart_base(),
            timer_base: Self::default_timer_base(),
            clock_hz: Self::default_clock_hz(),
            baud_rate: Self::default_baud_rate(),
            tx_fifo_depth: defaults::TX_FIFO_DEPTH,
            rx_fifo_depth: defaults::RX_FIFO_DEPTH,
        }
    }
}

/// Waveform trace settings.
///
/// Tracing is selected at runtime; when disabled the recorder is never
/// constructed and each step pays no trace cost.
#[derive(Debug, Clone, Deserialize)]
pub struct TraceConfig {
    /// Enable waveform recording for the run.
    #[serde(default)]
    pub enabled: bool,

    /// Output path of the waveform file.
    #[serde(default = "TraceConfig::default_path")]
    pub path: String,

    /// Hierarchy depth passed to the model's trace registration.
    #[serde(default = "TraceConfig::default_depth")]
    pub depth: u32,
}

impl TraceConfig {
    fn default_path() -> String {
        defaults::TRACE_PATH.to_string()
    }

    fn default_depth() -> u32 {
        defaults::TRACE_DEPTH
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: defaults::TRACE_PATH.to_string(),
            depth: defaults::TRACE_DEPTH,
        }
    }
}
