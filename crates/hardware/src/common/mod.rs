//! Common utilities and types used throughout the testbench harness.
//!
//! This module provides fundamental building blocks shared across all
//! components of the harness. It includes:
//! 1. **Address Types:** A strong type for physical bus addresses.
//! 2. **Constants:** The fixed memory map and timing constants.
//! 3. **Error Handling:** The simulation error taxonomy.
//! 4. **Register Layouts:** Bit-exact UART control/status register views.

/// Physical address type definitions.
pub mod addr;

/// Memory map and timing constants.
pub mod constants;

/// Error types for model construction, configuration, and tracing.
pub mod error;

/// UART register bit layouts.
pub mod reg;

pub use addr::PhysAddr;
pub use error::{SimError, SimResult};
pub use reg::{BaudDivisor, UartCtrl, UartStatus};
