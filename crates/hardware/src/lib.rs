//! Cycle-driven testbench harness library.
//!
//! This crate drives a simulated hardware model one evaluation step at a
//! time and gives baremetal firmware a typed view of the model's
//! memory-mapped peripherals. It provides the following:
//! 1. **Driver:** Clock/reset sequencing, step bound, and voluntary-termination handling.
//! 2. **Registers:** Bit-exact UART control/status layouts shared by firmware and hardware.
//! 3. **SoC:** Bus interconnect with UART and timer devices behind fixed physical addresses.
//! 4. **Tracing:** Runtime-selected VCD waveform recording, one event per step.
//! 5. **Configuration:** Hierarchical JSON-deserializable run settings.

/// Common types (addresses, constants, errors, register layouts).
pub mod common;
/// Harness configuration (defaults, enums, hierarchical structures).
pub mod config;
/// Simulation driver, model seam, tracing, and peripheral init.
pub mod sim;
/// System-on-chip (bus, devices, builder).
pub mod soc;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Simulation error taxonomy.
pub use crate::common::{SimError, SimResult};
/// Step-by-step simulation driver; construct with a boxed model.
pub use crate::sim::{RunReport, Simulator, StopReason};
/// Top-level system model; construct with `System::new`.
pub use crate::soc::System;
