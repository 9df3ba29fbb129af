//! Hardware model seam.
//!
//! The simulation driver is written against this trait rather than a concrete
//! system, mirroring how a generated hardware model exposes input setters, an
//! evaluation function, and a voluntary-termination query to its testbench.

use crate::common::SimResult;
use crate::sim::trace::TraceWriter;

/// A simulated hardware model driven one evaluation step at a time.
///
/// The driver sets input levels, then calls [`eval`](Self::eval) to let the
/// model react to them. Sequential state updates on clock edges; the reset
/// line is active-low. If tracing is enabled, the driver invokes
/// [`register_trace`](Self::register_trace) exactly once before the first
/// evaluation.
pub trait HardwareModel: Send {
    /// Drives the clock input to the given level.
    fn set_clock(&mut self, level: bool);

    /// Drives the reset input; `false` is asserted, `true` is released (active-low).
    fn set_reset(&mut self, level: bool);

    /// Drives the UART receive line; idles high.
    fn set_uart_rx(&mut self, level: bool);

    /// Drives the programming-mode line; idles high.
    fn set_prog_mode(&mut self, level: bool);

    /// Evaluates the model for the current input values.
    fn eval(&mut self);

    /// Returns the exit code if the model has requested termination.
    ///
    /// A `Some` value is the model's voluntary stop: the simulated program
    /// under test has finished. This is a clean outcome, distinct from the
    /// driver exhausting its step bound.
    fn exit_code(&self) -> Option<u32>;

    /// Declares the model's traced signals on the waveform writer.
    ///
    /// Called once, before the first evaluation, when tracing is enabled.
    /// `depth` bounds how many hierarchy levels the model registers.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::Trace`] if declaring signals fails.
    fn register_trace(&mut self, tracer: &mut TraceWriter, depth: u32) -> SimResult<()> {
        let _ = (tracer, depth);
        Ok(())
    }

    /// Writes the current values of the model's traced signals.
    ///
    /// Called within the timestamped dump of each step.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::Trace`] if a value change fails to write.
    fn trace_dump(&mut self, tracer: &mut TraceWriter) -> SimResult<()> {
        let _ = tracer;
        Ok(())
    }
}
