//! A scriptable hardware model for exercising the driver.
//!
//! The mock latches its inputs like a generated model and counts what it
//! observes through shared atomics, so tests can assert on the driver's
//! sequencing after the simulator has consumed the model.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tbsim_core::common::SimResult;
use tbsim_core::sim::{HardwareModel, TraceWriter};

/// Sentinel for "never happened" probe values.
pub const NEVER: u64 = u64::MAX;

/// Shared observation counters, cloned out of the mock before it is boxed.
#[derive(Clone, Debug, Default)]
pub struct MockProbes {
    /// Total number of `eval` calls.
    pub evals: Arc<AtomicU64>,
    /// Number of `eval` calls observed with reset asserted.
    pub evals_in_reset: Arc<AtomicU64>,
    /// Eval index at which reset was first seen released (`NEVER` if never).
    pub first_release: Arc<AtomicU64>,
    /// Number of released-to-asserted reset transitions (must stay 0).
    pub reasserts: Arc<AtomicU64>,
    /// Eval count at the moment `register_trace` ran (`NEVER` if never).
    pub trace_registered_at: Arc<AtomicU64>,
    /// Level of the UART receive line at the first eval (1 high, 0 low, `NEVER` if no eval).
    pub rx_at_first_eval: Arc<AtomicU64>,
    /// Level of the programming-mode line at the first eval (1 high, 0 low, `NEVER` if no eval).
    pub prog_at_first_eval: Arc<AtomicU64>,
}

impl MockProbes {
    fn new() -> Self {
        let probes = Self::default();
        probes.first_release.store(NEVER, Ordering::Relaxed);
        probes.trace_registered_at.store(NEVER, Ordering::Relaxed);
        probes.rx_at_first_eval.store(NEVER, Ordering::Relaxed);
        probes.prog_at_first_eval.store(NEVER, Ordering::Relaxed);
        probes
    }
}

/// Mock hardware model with scriptable voluntary termination.
#[derive(Debug)]
pub struct MockModel {
    probes: MockProbes,
    clk: bool,
    rst_n: bool,
    uart_rx: bool,
    prog: bool,
    was_released: bool,
    exit_after_evals: Option<u64>,
    exit_code: u32,
    exit: Option<u32>,
}

impl MockModel {
    /// Creates a mock model and hands back its probes.
    pub fn new() -> (Self, MockProbes) {
        let probes = MockProbes::new();
        let model = Self {
            probes: probes.clone(),
            clk: false,
            rst_n: true,
            uart_rx: false,
            prog: false,
            was_released: false,
            exit_after_evals: None,
            exit_code: 0,
            exit: None,
        };
        (model, probes)
    }

    /// Scripts a voluntary exit with `code` once `evals` evaluations have run.
    pub fn exit_after(mut self, evals: u64, code: u32) -> Self {
        self.exit_after_evals = Some(evals);
        self.exit_code = code;
        self
    }
}

impl HardwareModel for MockModel {
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
        self.prog = level;
    }

    fn eval(&mut self) {
        let n = self.probes.evals.fetch_add(1, Ordering::Relaxed);
        if n == 0 {
            self.probes
                .rx_at_first_eval
                .store(u64::from(self.uart_rx), Ordering::Relaxed);
            self.probes
                .prog_at_first_eval
                .store(u64::from(self.prog), Ordering::Relaxed);
        }
        if self.rst_n {
            let _ = self.probes.first_release.compare_exchange(
                NEVER,
                n,
                Ordering::Relaxed,
                Ordering::Relaxed,
            );
            self.was_released = true;
        } else {
            let _ = self.probes.evals_in_reset.fetch_add(1, Ordering::Relaxed);
            if self.was_released {
                let _ = self.probes.reasserts.fetch_add(1, Ordering::Relaxed);
            }
        }
        if self.exit_after_evals == Some(n + 1) {
            self.exit = Some(self.exit_code);
        }
    }

    fn exit_code(&self) -> Option<u32> {
        self.exit
    }

    fn register_trace(&mut self, _tracer: &mut TraceWriter, _depth: u32) -> SimResult<()> {
        self.probes
            .trace_registered_at
            .store(self.probes.evals.load(Ordering::Relaxed), Ordering::Relaxed);
        Ok(())
    }
}
