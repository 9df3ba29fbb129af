//! Memory-mapped I/O devices.
//!
//! This module contains implementations of the peripherals found in the
//! simulated SoC: the UART serial port and the free-running cycle timer.

/// Free-running cycle timer (low/high 32-bit halves).
pub mod timer;

/// UART serial port with bit-exact control/status registers.
pub mod uart;

pub use timer::Timer;
pub use uart::Uart;

pub use crate::soc::traits::Device;
