//! DC voltage source and its ramped switch-on approximation.

use serde::Serialize;

use crate::error::{Error, Result};

/// An ideal DC voltage source switched on from rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DcSource {
    voltage: f64,
}

impl DcSource {
    /// Create a source of `voltage` volts. Any finite value (including
    /// negative or zero) is accepted.
    pub fn new(voltage: f64) -> Result<Self> {
        if !voltage.is_finite() {
            return Err(Error::InvalidSourceVoltage(voltage));
        }
        Ok(Self { voltage })
    }

    /// Source voltage in volts.
    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    /// Sample the ideal step over `times`: every element equals the source
    /// voltage.
    pub fn sample(&self, times: &[f64]) -> Vec<f64> {
        vec![self.voltage; times.len()]
    }

    /// A linear ramp from 0 V at `t_on` to the source voltage at
    /// `t_on + window`, holding afterwards.
    pub fn ramped(&self, t_on: f64, window: f64) -> RampedSource {
        RampedSource {
            target: self.voltage,
            t_on,
            window,
        }
    }
}

/// Continuous stand-in for an instantaneous step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampedSource {
    target: f64,
    t_on: f64,
    window: f64,
}

impl RampedSource {
    /// Voltage at time `t`.
    pub fn voltage_at(&self, t: f64) -> f64 {
        let elapsed = t - self.t_on;
        if elapsed < 0.0 {
            0.0
        } else if self.window > 0.0 && elapsed < self.window {
            self.target * elapsed / self.window
        } else {
            self.target
        }
    }

    /// Time at which the ramp reaches the target voltage.
    pub fn ramp_end(&self) -> f64 {
        self.t_on + self.window.max(0.0)
    }

    pub fn target(&self) -> f64 {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sample_broadcasts_voltage() {
        let src = DcSource::new(-3.5).unwrap();
        let samples = src.sample(&[0.0, 0.1, 0.2, 0.7]);
        assert_eq!(samples, vec![-3.5; 4]);
        assert!(src.sample(&[]).is_empty());
    }

    #[test]
    fn test_non_finite_voltage_rejected() {
        assert!(matches!(
            DcSource::new(f64::NAN),
            Err(Error::InvalidSourceVoltage(_))
        ));
        assert!(DcSource::new(f64::INFINITY).is_err());
        assert!(DcSource::new(0.0).is_ok());
    }

    #[test]
    fn test_ramp_profile() {
        let ramp = DcSource::new(10.0).unwrap().ramped(0.0, 1e-3);
        assert_eq!(ramp.voltage_at(0.0), 0.0);
        assert_relative_eq!(ramp.voltage_at(0.25e-3), 2.5, epsilon = 1e-12);
        assert_relative_eq!(ramp.voltage_at(0.5e-3), 5.0, epsilon = 1e-12);
        assert_eq!(ramp.voltage_at(1e-3), 10.0);
        assert_eq!(ramp.voltage_at(5.0), 10.0);
        assert_eq!(ramp.ramp_end(), 1e-3);
    }

    #[test]
    fn test_zero_window_is_a_step() {
        let ramp = DcSource::new(4.0).unwrap().ramped(0.5, 0.0);
        assert_eq!(ramp.voltage_at(0.4), 0.0);
        assert_eq!(ramp.voltage_at(0.5), 4.0);
        assert_eq!(ramp.ramp_end(), 0.5);
    }
}
