//! Waveform recorder.
//!
//! Writes a VCD event stream with one timestamped entry per evaluation step.
//! The recorder is selected at runtime: when tracing is disabled it is never
//! constructed and the stepping loop pays no trace cost. The handle is
//! exclusively owned by the driver; consuming [`TraceWriter::finish`] (or
//! dropping the writer on an early exit) flushes and releases the output
//! file exactly once.

use std::fs::File;
use std::io::BufWriter;

use vcd::{IdCode, TimescaleUnit, Value};

use crate::config::TraceConfig;
use crate::common::SimResult;
use crate::sim::model::HardwareModel;

/// Converts a logic level to a VCD scalar value.
const fn scalar(level: bool) -> Value {
    if level { Value::V1 } else { Value::V0 }
}

/// Open waveform output with the driver's input wires declared.
///
/// The driver owns the four testbench-level inputs; the model registers its
/// own signals underneath via [`HardwareModel::register_trace`].
pub struct TraceWriter {
    vcd: vcd::Writer<BufWriter<File>>,
    clk: IdCode,
    rst_n: IdCode,
    uart_rx: IdCode,
    prog: IdCode,
}

impl core::fmt::Debug for TraceWriter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TraceWriter").finish_non_exhaustive()
    }
}

impl TraceWriter {
    /// Opens the waveform file and writes the declaration header.
    ///
    /// Declares the testbench scope and input wires, lets the model register
    /// its signals, and closes the definitions section. One simulation step
    /// later corresponds to one nanosecond of VCD time.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::Trace`] if the file cannot be
    /// created or the header cannot be written.
    pub fn create(config: &TraceConfig, model: &mut dyn HardwareModel) -> SimResult<Self> {
        let file = File::create(&config.path)?;
        let mut writer = vcd::Writer::new(BufWriter::new(file));
        writer.timescale(1, TimescaleUnit::NS)?;
        writer.add_module("tb")?;
        let clk = writer.add_wire(1, "clk_i")?;
        let rst_n = writer.add_wire(1, "rst_ni")?;
        let uart_rx = writer.add_wire(1, "uart_rx_i")?;
        let prog = writer.add_wire(1, "prog_i")?;

        let mut tracer = Self {
            vcd: writer,
            clk,
            rst_n,
            uart_rx,
            prog,
        };
        model.register_trace(&mut tracer, config.depth)?;
        tracer.vcd.upscope()?;
        tracer.vcd.enddefinitions()?;
        Ok(tracer)
    }

    /// Opens a child scope for model signals.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::Trace`] on a write failure.
    pub fn add_module(&mut self, name: &str) -> SimResult<()> {
        self.vcd.add_module(name)?;
        Ok(())
    }

    /// Declares a wire in the current scope and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::Trace`] on a write failure.
    pub fn add_wire(&mut self, width: u32, name: &str) -> SimResult<IdCode> {
        let id = self.vcd.add_wire(width, name)?;
        Ok(id)
    }

    /// Closes the current scope.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::Trace`] on a write failure.
    pub fn upscope(&mut self) -> SimResult<()> {
        self.vcd.upscope()?;
        Ok(())
    }

    /// Writes a scalar value change for the given wire.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::Trace`] on a write failure.
    pub fn change_bit(&mut self, id: IdCode, level: bool) -> SimResult<()> {
        self.vcd.change_scalar(id, scalar(level))?;
        Ok(())
    }

    /// Records one evaluation step: the timestamp, the driver's input levels,
    /// and the model's traced signals.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::Trace`] on a write failure.
    pub fn dump_step(
        &mut self,
        time: u64,
        clk: bool,
        rst_n: bool,
        uart_rx: bool,
        prog: bool,
        model: &mut dyn HardwareModel,
    ) -> SimResult<()> {
        self.vcd.timestamp(time)?;
        self.vcd.change_scalar(self.clk, scalar(clk))?;
        self.vcd.change_scalar(self.rst_n, scalar(rst_n))?;
        self.vcd.change_scalar(self.uart_rx, scalar(uart_rx))?;
        self.vcd.change_scalar(self.prog, scalar(prog))?;
        model.trace_dump(self)?;
        Ok(())
    }

    /// Releases the trace handle, flushing buffered output to disk.
    ///
    /// # Errors
    ///
    /// Currently infallible; the signature reserves the error path for the
    /// close-time flush.
    pub fn finish(self) -> SimResult<()> {
        // Dropping the buffered writer flushes it and closes the file.
        drop(self);
        Ok(())
    }
}
