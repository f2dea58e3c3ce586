//! rlcsim - transient response of series and parallel RLC circuits.

mod config;
mod output;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use rlcsim_core::units::{format_value, parse_value};
use rlcsim_solver::simulate;

use config::RunSettings;
use output::{OutputFormat, write_result};

#[derive(Parser)]
#[command(name = "rlcsim")]
#[command(about = "Step response of R, RC, RL and RLC circuits in series or parallel")]
#[command(version)]
struct Cli {
    /// Circuit file (JSON) providing defaults for any flag below
    #[arg(long)]
    circuit: Option<PathBuf>,

    /// Topology: series or parallel
    #[arg(long)]
    topology: Option<String>,

    /// Resistance in ohms (SI suffixes allowed, e.g. 4.7k)
    #[arg(short = 'r', long, value_parser = parse_quantity)]
    resistance: Option<f64>,

    /// Inductance in henries (e.g. 10m)
    #[arg(short = 'l', long, value_parser = parse_quantity)]
    inductance: Option<f64>,

    /// Capacitance in farads (e.g. 100u)
    #[arg(short = 'c', long, value_parser = parse_quantity)]
    capacitance: Option<f64>,

    /// Source voltage in volts [default: 10]
    #[arg(short = 'v', long, value_parser = parse_quantity, allow_negative_numbers = true)]
    voltage: Option<f64>,

    /// Simulated duration in seconds [default: 1]
    #[arg(long, value_parser = parse_quantity)]
    duration: Option<f64>,

    /// Number of output samples [default: 500]
    #[arg(long)]
    samples: Option<usize>,

    /// Time of the first sample in seconds [default: 0]
    #[arg(long, value_parser = parse_quantity)]
    start: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Integrator relative tolerance
    #[arg(long)]
    rtol: Option<f64>,

    /// Integrator absolute tolerance
    #[arg(long)]
    atol: Option<f64>,

    /// Parallel RLC switch-on ramp in seconds [default: 1m]
    #[arg(long, value_parser = parse_quantity)]
    ramp_window: Option<f64>,

    /// Parallel RLC internal source resistance in ohms [default: 1]
    #[arg(long, value_parser = parse_quantity)]
    source_resistance: Option<f64>,
}

impl Cli {
    fn settings(&self) -> RunSettings {
        RunSettings {
            topology: self.topology.clone(),
            resistance: self.resistance,
            inductance: self.inductance,
            capacitance: self.capacitance,
            voltage: self.voltage,
            duration: self.duration,
            samples: self.samples,
            start: self.start,
            rtol: self.rtol,
            atol: self.atol,
            ramp_window: self.ramp_window,
            source_resistance: self.source_resistance,
        }
    }
}

fn parse_quantity(s: &str) -> std::result::Result<f64, String> {
    parse_value(s).ok_or_else(|| format!("'{}' is not a number", s))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let file_settings = match &cli.circuit {
        Some(path) => RunSettings::from_file(path)?,
        None => RunSettings::default(),
    };
    let plan = cli.settings().or(file_settings).resolve()?;

    let result = simulate(&plan.circuit, &plan.times, &plan.options).context("Simulation failed")?;

    if cli.format == OutputFormat::Table {
        let circuit = &plan.circuit;
        eprintln!(
            "Transient Response ({} {}, V = {}V, {} samples)",
            circuit.topology,
            circuit.components.describe(),
            format_value(circuit.source.voltage()),
            result.len()
        );
        if let Some(stats) = &result.stats {
            eprintln!(
                "Integrator: {} accepted / {} rejected steps",
                stats.accepted_steps, stats.rejected_steps
            );
        }
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_result(&mut out, &result, cli.format)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags_with_suffixes() {
        let cli = Cli::try_parse_from([
            "rlcsim",
            "--topology",
            "series",
            "-r",
            "4.7k",
            "-c",
            "100u",
            "-v",
            "-5",
            "--duration",
            "20m",
            "--format",
            "csv",
        ])
        .unwrap();
        let settings = cli.settings();
        assert_eq!(settings.resistance, Some(4700.0));
        assert!((settings.capacitance.unwrap() - 100e-6).abs() < 1e-18);
        assert_eq!(settings.voltage, Some(-5.0));
        assert!((settings.duration.unwrap() - 20e-3).abs() < 1e-15);
        assert_eq!(settings.inductance, None);
        assert_eq!(cli.format, OutputFormat::Csv);
    }

    #[test]
    fn test_parse_rejects_garbage_value() {
        assert!(Cli::try_parse_from(["rlcsim", "-r", "ten"]).is_err());
    }
}
