//! Run configuration from command-line flags and circuit files.
//!
//! A circuit file is a JSON object whose fields mirror the flags. Fields that
//! are present override the built-in defaults; explicit flags override the
//! file.

use std::path::Path;

use anyhow::{Context, Result, bail};
use rlcsim_core::{Circuit, TimeVector};
use rlcsim_solver::{IntegratorParams, RampParams, SimulationOptions};
use serde::Deserialize;

/// Default source voltage in volts.
pub const DEFAULT_VOLTAGE: f64 = 10.0;

/// Default simulated duration in seconds.
pub const DEFAULT_DURATION: f64 = 1.0;

/// Default number of output samples.
pub const DEFAULT_SAMPLES: usize = 500;

/// Circuit and run settings, every field optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunSettings {
    pub topology: Option<String>,
    pub resistance: Option<f64>,
    pub inductance: Option<f64>,
    pub capacitance: Option<f64>,
    pub voltage: Option<f64>,
    pub duration: Option<f64>,
    pub samples: Option<usize>,
    pub start: Option<f64>,
    pub rtol: Option<f64>,
    pub atol: Option<f64>,
    pub ramp_window: Option<f64>,
    pub source_resistance: Option<f64>,
}

impl RunSettings {
    /// Read settings from a JSON circuit file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read circuit file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid circuit file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Fill every field that `self` leaves unset from `base`.
    pub fn or(self, base: RunSettings) -> RunSettings {
        RunSettings {
            topology: self.topology.or(base.topology),
            resistance: self.resistance.or(base.resistance),
            inductance: self.inductance.or(base.inductance),
            capacitance: self.capacitance.or(base.capacitance),
            voltage: self.voltage.or(base.voltage),
            duration: self.duration.or(base.duration),
            samples: self.samples.or(base.samples),
            start: self.start.or(base.start),
            rtol: self.rtol.or(base.rtol),
            atol: self.atol.or(base.atol),
            ramp_window: self.ramp_window.or(base.ramp_window),
            source_resistance: self.source_resistance.or(base.source_resistance),
        }
    }

    /// Validate the merged settings and build the engine inputs.
    pub fn resolve(&self) -> Result<RunPlan> {
        let Some(topology) = self.topology.as_deref() else {
            bail!("No topology given (use --topology series|parallel)");
        };
        let voltage = self.voltage.unwrap_or(DEFAULT_VOLTAGE);
        let duration = self.duration.unwrap_or(DEFAULT_DURATION);

        let circuit = Circuit::from_values(
            self.resistance,
            self.inductance,
            self.capacitance,
            voltage,
            topology,
        )?;

        let start = self.start.unwrap_or(0.0);
        let samples = self.samples.unwrap_or(DEFAULT_SAMPLES);
        let times = TimeVector::linspace(start, start + duration, samples)
            .context("Invalid time span")?;

        let mut integrator = IntegratorParams::default();
        integrator.rtol = self.rtol.unwrap_or(integrator.rtol);
        integrator.atol = self.atol.unwrap_or(integrator.atol);

        let mut ramp = RampParams::default();
        if let Some(window) = self.ramp_window {
            ramp = ramp.with_window(window);
        }
        if let Some(rs) = self.source_resistance {
            ramp = ramp.with_source_resistance(rs);
        }

        Ok(RunPlan {
            circuit,
            times,
            options: SimulationOptions::new()
                .with_integrator(integrator)
                .with_ramp(ramp),
        })
    }
}

/// Everything needed for one engine call.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub circuit: Circuit,
    pub times: TimeVector,
    pub options: SimulationOptions,
}
