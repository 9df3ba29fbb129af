//! System-on-Chip components.
//!
//! This module organizes the simulated system: the bus interconnect, the
//! memory-mapped devices, and the builder that assembles them into the
//! hardware model the driver runs.

/// System construction and the top-level `System` type.
pub mod builder;

/// Memory-mapped I/O device implementations.
pub mod devices;

/// System bus interconnect and routing.
pub mod interconnect;

/// Device trait definitions for MMIO access.
pub mod traits;

pub use builder::System;
