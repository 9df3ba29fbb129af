//! Testbench harness CLI.
//!
//! This binary is the single entry point for a simulation run. It performs:
//! 1. **Configuration:** Built-in defaults, optionally overridden by a JSON file.
//! 2. **Setup:** Model construction and firmware-side UART programming.
//! 3. **Run:** Steps the model to its bound or the model's own exit, then reports which.

use clap::Parser;
use std::{fs, process};

use tbsim_core::config::Config;
use tbsim_core::sim::init_uart;
use tbsim_core::{Simulator, StopReason, System};

#[derive(Parser, Debug)]
#[command(
    name = "tbsim",
    version,
    about = "Cycle-driven testbench harness",
    long_about = "Drive the simulated SoC for a bounded number of evaluation steps.\n\n\
        The run stops early if the test firmware prints its pass/fail marker over\n\
        the UART; the exit code is then the firmware's verdict (0 pass, 1 fail).\n\n\
        Examples:\n  tbsim\n  tbsim 200\n  tbsim 200 --trace run.vcd\n  tbsim --config sweep.json"
)]
struct Cli {
    /// Evaluation-step bound for the run.
    #[arg(value_name = "MAX_STEPS")]
    max_steps: Option<u64>,

    /// JSON configuration file (CLI arguments override it).
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Write a VCD waveform to PATH.
    #[arg(long, value_name = "PATH")]
    trace: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => load_config(&path),
        None => Config::default(),
    };
    if let Some(steps) = cli.max_steps {
        config.general.max_steps = steps;
    }
    if let Some(path) = cli.trace {
        config.trace.enabled = true;
        config.trace.path = path;
    }

    println!(
        "[*] tbsim: {} steps max, clock period {}, reset release at {}",
        config.general.max_steps, config.clock.period, config.clock.reset_threshold
    );
    if config.trace.enabled {
        println!("    trace={}", config.trace.path);
    }

    let mut system = match System::new(&config.system) {
        Ok(system) => system,
        Err(e) => {
            eprintln!("[!] {e}");
            process::exit(1);
        }
    };

    if let Err(e) = init_uart(&mut system, config.system.clock_hz, config.system.baud_rate) {
        eprintln!("[!] {e}");
        process::exit(1);
    }

    let sim = match Simulator::new(Box::new(system), &config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("[!] {e}");
            process::exit(1);
        }
    };

    match sim.run() {
        Ok(report) => {
            println!("\n[*] {} after {} steps", report.stop, report.steps);
            let code = match report.stop {
                StopReason::StepLimit => 0,
                StopReason::ModelExit(code) => code as i32,
            };
            process::exit(code);
        }
        Err(e) => {
            eprintln!("[!] {e}");
            process::exit(1);
        }
    }
}

/// Reads and parses a JSON configuration file; exits non-zero on failure.
fn load_config(path: &str) -> Config {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("[!] reading config {path}: {e}");
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("[!] parsing config {path}: {e}");
        process::exit(1);
    })
}
