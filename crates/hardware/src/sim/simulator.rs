//! Simulation driver: owns the model, the time counter, and the clock/reset
//! state machine.
//!
//! Each evaluation step performs, in order: clock update, reset-release
//! check, model evaluation, trace dump, time increment. The driver stops when
//! simulation time reaches the configured bound or the model requests
//! termination; both outcomes are clean and reported distinctly.

use crate::common::{SimError, SimResult};
use crate::config::{ClockConfig, ClockProtocol, Config, ResetRelease};
use crate::sim::model::HardwareModel;
use crate::sim::trace::TraceWriter;

/// Why a run stopped.
///
/// Both variants are normal terminations; neither is an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Simulation time reached the configured step bound.
    StepLimit,
    /// The model signaled voluntary termination with the given exit code.
    ModelExit(u32),
}

impl core::fmt::Display for StopReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::StepLimit => write!(f, "step limit reached"),
            Self::ModelExit(code) => write!(f, "model exit (code {code})"),
        }
    }
}

/// Outcome of a completed run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Number of evaluation steps executed; equals simulation time at stop.
    pub steps: u64,
    /// The condition that ended the run.
    pub stop: StopReason,
}

/// Top-level simulation driver.
///
/// Owns the hardware model, the monotonically increasing simulation time
/// (one unit per evaluation step, a nanosecond by convention), and the
/// optional waveform recorder. Reset starts asserted and is released exactly
/// once; it is never re-asserted within a run.
pub struct Simulator {
    model: Box<dyn HardwareModel>,
    clock_cfg: ClockConfig,
    max_steps: u64,
    time: u64,
    clock: bool,
    toggles: u64,
    reset_released: bool,
    uart_rx: bool,
    prog_mode: bool,
    tracer: Option<TraceWriter>,
}

impl core::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Simulator")
            .field("time", &self.time)
            .field("clock", &self.clock)
            .field("reset_released", &self.reset_released)
            .finish_non_exhaustive()
    }
}

impl Simulator {
    /// Creates a driver around a constructed model and sets all inputs to
    /// their idle values: clock low, reset asserted, serial receive and
    /// programming-mode lines high.
    ///
    /// When tracing is enabled the recorder is opened here and the model's
    /// signals are registered before any evaluation runs.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ModelInit`] for an unusable clock configuration
    /// and [`SimError::Trace`] if the waveform output cannot be opened.
    pub fn new(mut model: Box<dyn HardwareModel>, config: &Config) -> SimResult<Self> {
        if config.clock.protocol == ClockProtocol::FixedDuty
            && (config.clock.period == 0 || config.clock.period % 2 != 0)
        {
            return Err(SimError::ModelInit(format!(
                "fixed-duty clock period must be even and non-zero, got {}",
                config.clock.period
            )));
        }

        model.set_clock(false);
        model.set_reset(false);
        model.set_uart_rx(true);
        model.set_prog_mode(true);

        let tracer = if config.trace.enabled {
            Some(TraceWriter::create(&config.trace, model.as_mut())?)
        } else {
            None
        };

        Ok(Self {
            model,
            clock_cfg: config.clock.clone(),
            max_steps: config.general.max_steps,
            time: 0,
            clock: false,
            toggles: 0,
            reset_released: false,
            uart_rx: true,
            prog_mode: true,
            tracer,
        })
    }

    /// Current simulation time in steps.
    pub const fn time(&self) -> u64 {
        self.time
    }

    /// Current clock input level.
    pub const fn clock_level(&self) -> bool {
        self.clock
    }

    /// Whether the reset line has been released.
    pub const fn reset_released(&self) -> bool {
        self.reset_released
    }

    /// Number of clock toggles observed so far.
    pub const fn toggles(&self) -> u64 {
        self.toggles
    }

    /// Runs to completion and shuts down, releasing the trace handle.
    ///
    /// Stop conditions are checked once per step boundary. The trace handle
    /// is flushed and closed on every exit path, including a trace I/O
    /// failure mid-run.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Trace`] if a waveform write or the final flush
    /// fails; the step error takes precedence over a shutdown error.
    pub fn run(mut self) -> SimResult<RunReport> {
        let outcome = self.drive();
        let shutdown = self.shutdown();
        let report = outcome?;
        shutdown?;
        tracing::info!(steps = report.steps, stop = %report.stop, "simulation stopped");
        Ok(report)
    }

    fn drive(&mut self) -> SimResult<RunReport> {
        loop {
            if let Some(code) = self.model.exit_code() {
                return Ok(RunReport {
                    steps: self.time,
                    stop: StopReason::ModelExit(code),
                });
            }
            if self.time >= self.max_steps {
                return Ok(RunReport {
                    steps: self.time,
                    stop: StopReason::StepLimit,
                });
            }
            self.step()?;
        }
    }

    /// Executes one evaluation step.
    ///
    /// Order within the step is fixed: clock update, reset-release check,
    /// model evaluation, trace dump, time increment.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Trace`] if the step's waveform dump fails.
    pub fn step(&mut self) -> SimResult<()> {
        let level = match self.clock_cfg.protocol {
            ClockProtocol::FixedDuty => {
                // Low for the first half of each period, high for the second.
                (self.time % self.clock_cfg.period) >= self.clock_cfg.period / 2
            }
            ClockProtocol::TogglePerStep => !self.clock,
        };
        if level != self.clock {
            self.toggles += 1;
        }
        self.clock = level;
        self.model.set_clock(level);

        if !self.reset_released && self.release_due() {
            self.model.set_reset(true);
            self.reset_released = true;
            tracing::info!(time = self.time, "reset released");
        }

        self.model.eval();

        if let Some(tracer) = &mut self.tracer {
            tracer.dump_step(
                self.time,
                self.clock,
                self.reset_released,
                self.uart_rx,
                self.prog_mode,
                self.model.as_mut(),
            )?;
        }

        self.time += 1;
        Ok(())
    }

    fn release_due(&self) -> bool {
        match self.clock_cfg.reset_release {
            ResetRelease::AtTime => self.time >= self.clock_cfg.reset_threshold,
            ResetRelease::AfterToggles => self.toggles >= self.clock_cfg.reset_threshold,
        }
    }

    /// Releases the trace handle; invoked on every exit path of [`Self::run`].
    fn shutdown(&mut self) -> SimResult<()> {
        if let Some(tracer) = self.tracer.take() {
            tracer.finish()?;
        }
        Ok(())
    }
}
