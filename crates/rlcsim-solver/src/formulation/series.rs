//! Series topology: one current path through the source and every component.
//!
//! State variables are the loop current `I` (when an inductor is present)
//! and the capacitor voltage `Vc` (when a capacitor is present), both zero at
//! switch-on.

use nalgebra::{Vector1, Vector2};
use rlcsim_core::{DcSource, Result, Topology};

use crate::ode::{StateEquation, integrate};
use crate::options::IntegratorParams;
use crate::postprocess::{difference, gradient, scale};
use crate::result::{Quantity, SimulationResult};

/// Resistor only: `I = V / R`, no dynamics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesR {
    pub resistance: f64,
    pub source: DcSource,
}

impl SeriesR {
    pub fn solve(&self, times: &[f64]) -> SimulationResult {
        let v = self.source.voltage();
        let mut result = SimulationResult::zeroed(Topology::Series, times);
        result.set(Quantity::SourceVoltage, self.source.sample(times));
        result.set(Quantity::Current, vec![v / self.resistance; times.len()]);
        result.set(Quantity::ResistorVoltage, self.source.sample(times));
        result
    }
}

/// Resistor and capacitor: `dVc/dt = (V - Vc) / (R C)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesRc {
    pub resistance: f64,
    pub capacitance: f64,
    pub source: DcSource,
}

impl StateEquation<1> for SeriesRc {
    fn derivative(&self, _t: f64, y: &Vector1<f64>) -> Vector1<f64> {
        let vc = y[0];
        Vector1::new((self.source.voltage() - vc) / (self.resistance * self.capacitance))
    }
}

impl SeriesRc {
    pub fn solve(&self, times: &[f64], params: &IntegratorParams) -> Result<SimulationResult> {
        let trajectory = integrate(self, Vector1::zeros(), times, params)?;
        let vc = trajectory.component(0);
        let vs = self.source.sample(times);

        let mut result = SimulationResult::zeroed(Topology::Series, times);
        // Loop current is the capacitor current C dVc/dt
        result.set(
            Quantity::Current,
            scale(&gradient(&vc, times), self.capacitance),
        );
        result.set(Quantity::ResistorVoltage, difference(&vs, &vc));
        result.set(Quantity::CapacitorVoltage, vc);
        result.set(Quantity::SourceVoltage, vs);
        result.stats = Some(trajectory.stats);
        Ok(result)
    }
}

/// Resistor and inductor: `dI/dt = (V - R I) / L`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesRl {
    pub resistance: f64,
    pub inductance: f64,
    pub source: DcSource,
}

impl StateEquation<1> for SeriesRl {
    fn derivative(&self, _t: f64, y: &Vector1<f64>) -> Vector1<f64> {
        let i = y[0];
        Vector1::new((self.source.voltage() - self.resistance * i) / self.inductance)
    }
}

impl SeriesRl {
    pub fn solve(&self, times: &[f64], params: &IntegratorParams) -> Result<SimulationResult> {
        let trajectory = integrate(self, Vector1::zeros(), times, params)?;
        let current = trajectory.component(0);
        let vs = self.source.sample(times);
        let vr = scale(&current, self.resistance);

        let mut result = SimulationResult::zeroed(Topology::Series, times);
        result.set(Quantity::InductorVoltage, difference(&vs, &vr));
        result.set(Quantity::ResistorVoltage, vr);
        result.set(Quantity::Current, current);
        result.set(Quantity::SourceVoltage, vs);
        result.stats = Some(trajectory.stats);
        Ok(result)
    }
}

/// Resistor, inductor and capacitor, state `[I, Vc]`:
///
/// ```text
/// dI/dt  = (V - R I - Vc) / L
/// dVc/dt = I / C
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesRlc {
    pub resistance: f64,
    pub inductance: f64,
    pub capacitance: f64,
    pub source: DcSource,
}

impl StateEquation<2> for SeriesRlc {
    fn derivative(&self, _t: f64, y: &Vector2<f64>) -> Vector2<f64> {
        let (i, vc) = (y[0], y[1]);
        Vector2::new(
            (self.source.voltage() - self.resistance * i - vc) / self.inductance,
            i / self.capacitance,
        )
    }
}

impl SeriesRlc {
    pub fn solve(&self, times: &[f64], params: &IntegratorParams) -> Result<SimulationResult> {
        let trajectory = integrate(self, Vector2::zeros(), times, params)?;
        let current = trajectory.component(0);
        let vc = trajectory.component(1);
        let vs = self.source.sample(times);
        let vr = scale(&current, self.resistance);
        let vl = difference(&difference(&vs, &vr), &vc);

        let mut result = SimulationResult::zeroed(Topology::Series, times);
        result.set(Quantity::SourceVoltage, vs);
        result.set(Quantity::Current, current);
        result.set(Quantity::ResistorVoltage, vr);
        result.set(Quantity::InductorVoltage, vl);
        result.set(Quantity::CapacitorVoltage, vc);
        result.stats = Some(trajectory.stats);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn times(end: f64, n: usize) -> Vec<f64> {
        (0..n).map(|i| end * i as f64 / (n - 1) as f64).collect()
    }

    #[test]
    fn test_series_r_is_ohms_law() {
        let f = SeriesR {
            resistance: 100.0,
            source: DcSource::new(10.0).unwrap(),
        };
        let result = f.solve(&times(1.0, 11));
        for &i in result.get(Quantity::Current).unwrap() {
            assert_eq!(i, 0.1);
        }
        assert_eq!(result.get(Quantity::ResistorVoltage).unwrap(), &[10.0; 11]);
        assert_eq!(result.get(Quantity::InductorVoltage).unwrap(), &[0.0; 11]);
        assert!(result.stats.is_none());
    }

    #[test]
    fn test_series_rc_tracks_analytic_charge() {
        // tau = 1k * 1uF = 1 ms
        let f = SeriesRc {
            resistance: 1000.0,
            capacitance: 1e-6,
            source: DcSource::new(5.0).unwrap(),
        };
        let t = times(5e-3, 501);
        let result = f.solve(&t, &IntegratorParams::default()).unwrap();
        let vc = result.get(Quantity::CapacitorVoltage).unwrap();
        for (ti, v) in t.iter().zip(vc) {
            let expected = 5.0 * (1.0 - (-ti / 1e-3).exp());
            assert!(
                (v - expected).abs() < 1e-4,
                "Vc({}) = {} (expected {})",
                ti,
                v,
                expected
            );
        }

        // KVL holds exactly sample by sample
        let vr = result.get(Quantity::ResistorVoltage).unwrap();
        for (a, b) in vr.iter().zip(vc) {
            assert!((a + b - 5.0).abs() < 1e-12);
        }

        // Interior current from the centered derivative is close to V/R e^(-t/tau)
        let current = result.get(Quantity::Current).unwrap();
        let expected = 5e-3 * (-t[100] / 1e-3).exp();
        assert!(
            (current[100] - expected).abs() < 1e-5,
            "I(tau) = {} (expected {})",
            current[100],
            expected
        );
    }

    #[test]
    fn test_series_rl_kvl() {
        let f = SeriesRl {
            resistance: 10.0,
            inductance: 1.0,
            source: DcSource::new(5.0).unwrap(),
        };
        let t = times(2.0, 201);
        let result = f.solve(&t, &IntegratorParams::default()).unwrap();
        let vr = result.get(Quantity::ResistorVoltage).unwrap();
        let vl = result.get(Quantity::InductorVoltage).unwrap();
        assert!((vl[0] - 5.0).abs() < 1e-12, "inductor takes the full step at t=0");
        for (a, b) in vr.iter().zip(vl) {
            assert!((a + b - 5.0).abs() < 1e-12);
        }
        assert_eq!(result.get(Quantity::CapacitorVoltage).unwrap(), &[0.0; 201][..]);
    }

    #[test]
    fn test_series_rlc_underdamped_overshoot() {
        // R = 10, L = 10 mH, C = 10 uF: zeta = R/2 * sqrt(C/L) ≈ 0.158
        let f = SeriesRlc {
            resistance: 10.0,
            inductance: 10e-3,
            capacitance: 10e-6,
            source: DcSource::new(1.0).unwrap(),
        };
        let t = times(20e-3, 2001);
        let result = f.solve(&t, &IntegratorParams::default()).unwrap();
        let vc = result.get(Quantity::CapacitorVoltage).unwrap();

        let peak = vc.iter().cloned().fold(f64::MIN, f64::max);
        let zeta: f64 = 5.0 * (10e-6_f64 / 10e-3).sqrt();
        let expected_peak = 1.0 + (-zeta * std::f64::consts::PI / (1.0 - zeta * zeta).sqrt()).exp();
        assert!(
            (peak - expected_peak).abs() < 1e-3,
            "peak Vc = {} (expected {})",
            peak,
            expected_peak
        );

        // Settles to the source voltage with no current
        assert!((vc[2000] - 1.0).abs() < 1e-3);
        assert!(result.final_value(Quantity::Current).unwrap().abs() < 1e-3);
    }
}
