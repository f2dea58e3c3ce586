//! Simulation configuration types.

use rlcsim_core::{Error, Result};

/// Default ramp window for the parallel RLC switch-on (s).
pub const DEFAULT_RAMP_WINDOW: f64 = 1e-3;

/// Default internal source resistance for the parallel RLC case (ohms).
pub const DEFAULT_SOURCE_RESISTANCE: f64 = 1.0;

/// Error-control parameters for the adaptive integrator.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegratorParams {
    /// Relative tolerance on each state component.
    pub rtol: f64,
    /// Absolute tolerance on each state component.
    pub atol: f64,
    /// Initial step (s). Chosen automatically when `None`.
    pub h_init: Option<f64>,
    /// Maximum step (s). Unbounded apart from the span when `None`.
    pub h_max: Option<f64>,
    /// Accepted-plus-rejected step budget for one run. Unbounded when `None`.
    pub max_steps: Option<usize>,
}

impl Default for IntegratorParams {
    fn default() -> Self {
        Self {
            rtol: 1e-6,
            atol: 1e-9,
            h_init: None,
            h_max: None,
            max_steps: None,
        }
    }
}

impl IntegratorParams {
    /// Set both tolerances.
    pub fn with_tolerances(mut self, rtol: f64, atol: f64) -> Self {
        self.rtol = rtol;
        self.atol = atol;
        self
    }

    /// Set the initial step.
    pub fn with_initial_step(mut self, h: f64) -> Self {
        self.h_init = Some(h);
        self
    }

    /// Set the maximum step.
    pub fn with_max_step(mut self, h: f64) -> Self {
        self.h_max = Some(h);
        self
    }

    /// Set the step budget.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn validate(&self) -> Result<()> {
        positive("rtol", self.rtol)?;
        positive("atol", self.atol)?;
        if let Some(h) = self.h_init {
            positive("h_init", h)?;
        }
        if let Some(h) = self.h_max {
            positive("h_max", h)?;
        }
        if self.max_steps == Some(0) {
            return Err(Error::InvalidParameter {
                name: "max_steps",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Numerical aids for the parallel RLC formulation.
///
/// An ideal voltage source directly across a capacitor has no state-variable
/// form, so the source is given a small internal resistance and switched on
/// with a linear ramp instead of a step. Both should be small relative to the
/// circuit's natural timescales and resistances.
#[derive(Debug, Clone, PartialEq)]
pub struct RampParams {
    /// Ramp duration from 0 V to the source voltage (s). Zero gives a true step.
    pub window: f64,
    /// Internal source resistance (ohms).
    pub source_resistance: f64,
}

impl Default for RampParams {
    fn default() -> Self {
        Self {
            window: DEFAULT_RAMP_WINDOW,
            source_resistance: DEFAULT_SOURCE_RESISTANCE,
        }
    }
}

impl RampParams {
    pub fn with_window(mut self, window: f64) -> Self {
        self.window = window;
        self
    }

    pub fn with_source_resistance(mut self, resistance: f64) -> Self {
        self.source_resistance = resistance;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.window.is_finite() || self.window < 0.0 {
            return Err(Error::InvalidParameter {
                name: "ramp_window",
                value: self.window,
            });
        }
        positive("source_resistance", self.source_resistance)
    }
}

/// Everything a run needs besides the circuit and the time vector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationOptions {
    pub integrator: IntegratorParams,
    pub ramp: RampParams,
}

impl SimulationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the integrator parameters.
    pub fn with_integrator(mut self, integrator: IntegratorParams) -> Self {
        self.integrator = integrator;
        self
    }

    /// Set the parallel RLC ramp parameters.
    pub fn with_ramp(mut self, ramp: RampParams) -> Self {
        self.ramp = ramp;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.integrator.validate()?;
        self.ramp.validate()
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let opts = SimulationOptions::default();
        assert!(opts.validate().is_ok());
        assert_eq!(opts.ramp.window, 1e-3);
        assert_eq!(opts.ramp.source_resistance, 1.0);
        assert_eq!(opts.integrator.max_steps, None);
    }

    #[test]
    fn test_invalid_parameters() {
        let bad = IntegratorParams::default().with_tolerances(0.0, 1e-9);
        assert!(matches!(
            bad.validate(),
            Err(Error::InvalidParameter { name: "rtol", .. })
        ));
        let bad = IntegratorParams::default().with_max_steps(0);
        assert!(bad.validate().is_err());
        let bad = RampParams::default().with_window(-1e-3);
        assert!(matches!(
            bad.validate(),
            Err(Error::InvalidParameter {
                name: "ramp_window",
                ..
            })
        ));
        let bad = RampParams::default().with_source_resistance(0.0);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_zero_window_allowed() {
        assert!(RampParams::default().with_window(0.0).validate().is_ok());
    }
}
