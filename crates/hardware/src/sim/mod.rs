//! Simulation driving and run setup.
//!
//! Provides the step-by-step driver, the hardware model seam, the waveform
//! recorder, and the firmware-side peripheral initialization that runs
//! before stepping begins.

/// Firmware-side UART programming.
pub mod init;

/// The hardware model trait driven by the simulator.
pub mod model;

/// The clock/reset driving loop.
pub mod simulator;

/// VCD waveform recording.
pub mod trace;

pub use init::init_uart;
pub use model::HardwareModel;
pub use simulator::{RunReport, Simulator, StopReason};
pub use trace::TraceWriter;
