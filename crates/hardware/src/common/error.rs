//! Simulation error definitions.
//!
//! This module defines the error taxonomy for the testbench harness. It provides:
//! 1. **Instantiation Failures:** Fatal errors raised while constructing the model; these abort the run before any stepping.
//! 2. **Configuration Errors:** Derived values that do not fit their register field, reported instead of silently truncated.
//! 3. **Trace Errors:** I/O failures while opening, writing, or closing the waveform output.
//!
//! There is no retry path anywhere in the harness: every operation either
//! succeeds or the run is aborted with one of these errors.

use thiserror::Error;

/// Errors produced while constructing or driving a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// The hardware model could not be instantiated.
    ///
    /// Raised for invalid configuration (e.g. a zero clock period) or an
    /// inconsistent device memory map. Fatal: no evaluation step runs.
    #[error("model instantiation failed: {0}")]
    ModelInit(String),

    /// A derived configuration value exceeds the bit-width of its register field.
    ///
    /// The reference firmware silently truncated oversized baud divisors to
    /// 16 bits; the harness reports the overflow instead.
    #[error("{field} value {value} exceeds {width}-bit field (max {max})")]
    ConfigRange {
        /// Name of the register field that would overflow.
        field: &'static str,
        /// The computed value that does not fit.
        value: u64,
        /// Width of the field in bits.
        width: u32,
        /// Largest value the field can hold.
        max: u64,
    },

    /// The waveform trace resource failed to open, write, or close.
    #[error("waveform trace I/O: {0}")]
    Trace(#[from] std::io::Error),
}

/// Convenience alias for results carrying a [`SimError`].
pub type SimResult<T> = Result<T, SimError>;
