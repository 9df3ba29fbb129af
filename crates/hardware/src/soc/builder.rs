//! SoC construction and top-level `System` type.
//!
//! This module builds the simulated system from configuration and implements
//! the [`HardwareModel`] seam the driver runs against. It performs:
//! 1. **Bus setup:** Creates the interconnect and registers the UART and timer.
//! 2. **Input latching:** Clock, reset, serial receive, and programming-mode levels.
//! 3. **Edge-triggered evaluation:** Devices advance on rising clock edges while reset is released.
//! 4. **Termination:** Exposes the shared exit value the UART raises on pass/fail markers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use vcd::IdCode;

use crate::common::constants::UART_CTRL_OFFSET;
use crate::common::{PhysAddr, SimResult};
use crate::config::SystemConfig;
use crate::sim::model::HardwareModel;
use crate::sim::trace::TraceWriter;
use crate::soc::devices::{Timer, Uart};
use crate::soc::interconnect::Bus;

/// Wire identifiers registered by [`HardwareModel::register_trace`].
#[derive(Clone, Copy, Debug)]
struct SocTrace {
    tx_busy: IdCode,
    rx_ready: IdCode,
}

/// Top-level system instance containing the bus and input latches.
///
/// Inputs are latched by the setter calls and take effect at the next
/// evaluation, the way a generated hardware model samples its ports.
pub struct System {
    /// System interconnect; routes accesses to the MMIO devices.
    pub bus: Bus,
    uart_base: PhysAddr,
    /// Shared exit value; `u64::MAX` means no termination requested.
    exit_request: Arc<AtomicU64>,
    clk: bool,
    prev_clk: bool,
    rst_n: bool,
    uart_rx: bool,
    prog_mode: bool,
    trace: Option<SocTrace>,
}

impl core::fmt::Debug for System {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("System")
            .field("bus", &self.bus)
            .field("clk", &self.clk)
            .field("rst_n", &self.rst_n)
            .finish_non_exhaustive()
    }
}

impl System {
    /// Builds a new system from configuration.
    ///
    /// Registers the UART and timer on the bus at their configured base
    /// addresses. All inputs start at their power-on levels: clock low,
    /// reset asserted, serial lines idle high.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::ModelInit`] if the configured
    /// device regions overlap.
    pub fn new(config: &SystemConfig) -> SimResult<Self> {
        let mut bus = Bus::new();
        let exit_request = Arc::new(AtomicU64::new(u64::MAX));

        let uart_base = PhysAddr::new(config.uart_base);
        let uart = Uart::new(
            uart_base,
            config.tx_fifo_depth,
            config.rx_fifo_depth,
            exit_request.clone(),
        );
        let timer = Timer::new(PhysAddr::new(config.timer_base));

        bus.add_device(Box::new(uart))?;
        bus.add_device(Box::new(timer))?;

        Ok(Self {
            bus,
            uart_base,
            exit_request,
            clk: false,
            prev_clk: false,
            rst_n: false,
            uart_rx: true,
            prog_mode: true,
            trace: None,
        })
    }

    /// Physical address of the UART control register.
    pub const fn uart_ctrl_addr(&self) -> PhysAddr {
        PhysAddr::new(self.uart_base.val() + UART_CTRL_OFFSET)
    }

    /// Reads a 32-bit word at the given physical address.
    pub fn read_u32(&mut self, addr: PhysAddr) -> u32 {
        self.bus.read_u32(addr)
    }

    /// Writes a 32-bit word at the given physical address.
    pub fn write_u32(&mut self, addr: PhysAddr, val: u32) {
        self.bus.write_u32(addr, val);
    }

    /// Returns a mutable reference to the UART device.
    pub fn uart_mut(&mut self) -> Option<&mut Uart> {
        self.bus.uart_mut()
    }

    /// Returns the requested exit value if a device has raised termination.
    pub fn check_exit(&self) -> Option<u64> {
        let val = self.exit_request.load(Ordering::Relaxed);
        if val == u64::MAX { None } else { Some(val) }
    }
}

impl HardwareModel for System {
    fn set_clock(&mut self, level: bool) {
        self.clk = level;
    }

    fn set_reset(&mut self, level: bool) {
        self.rst_n = level;
    }

    fn set_uart_rx(&mut self, level: bool) {
        self.uart_rx = level;
    }

    fn set_prog_mode(&mut self, level: bool) {
        self.prog_mode = level;
    }

    /// Evaluates one step: while reset is asserted the devices are held in
    /// their power-on state; otherwise sequential state advances on each
    /// rising clock edge.
    fn eval(&mut self) {
        if !self.rst_n {
            self.bus.reset();
        } else if self.clk && !self.prev_clk {
            self.bus.tick();
        }
        self.prev_clk = self.clk;
    }

    fn exit_code(&self) -> Option<u32> {
        self.check_exit().map(|code| code as u32)
    }

    fn register_trace(&mut self, tracer: &mut TraceWriter, depth: u32) -> SimResult<()> {
        if depth == 0 {
            return Ok(());
        }
        tracer.add_module("u_top")?;
        let tx_busy = tracer.add_wire(1, "uart_tx_busy")?;
        let rx_ready = tracer.add_wire(1, "uart_rx_ready")?;
        tracer.upscope()?;
        self.trace = Some(SocTrace { tx_busy, rx_ready });
        Ok(())
    }

    fn trace_dump(&mut self, tracer: &mut TraceWriter) -> SimResult<()> {
        if let Some(ids) = self.trace {
            let status = self.bus.uart_mut().map(|uart| uart.status()).unwrap_or_default();
            tracer.change_bit(ids.tx_busy, !status.tx_empty)?;
            tracer.change_bit(ids.rx_ready, !status.rx_empty)?;
        }
        Ok(())
    }
}
