//! Parallel topology: the source and every branch share one node voltage `Vn`.

use nalgebra::{Vector1, Vector2};
use rlcsim_core::{DcSource, RampedSource, Result, Topology};

use crate::ode::{StateEquation, integrate};
use crate::options::{IntegratorParams, RampParams};
use crate::postprocess::{gradient, scale, sum};
use crate::result::{Quantity, SimulationResult};

/// Resistor only: node held at `V`, `I = V / R`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallelR {
    pub resistance: f64,
    pub source: DcSource,
}

impl ParallelR {
    pub fn solve(&self, times: &[f64]) -> SimulationResult {
        let current = vec![self.source.voltage() / self.resistance; times.len()];
        let mut result = SimulationResult::zeroed(Topology::Parallel, times);
        result.set(Quantity::NodeVoltage, self.source.sample(times));
        result.set(Quantity::ResistorCurrent, current.clone());
        result.set(Quantity::TotalCurrent, current);
        result
    }
}

/// Resistor and capacitor: `dVn/dt = (V - Vn) / (R C)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallelRc {
    pub resistance: f64,
    pub capacitance: f64,
    pub source: DcSource,
}

impl StateEquation<1> for ParallelRc {
    fn derivative(&self, _t: f64, y: &Vector1<f64>) -> Vector1<f64> {
        let vn = y[0];
        Vector1::new((self.source.voltage() - vn) / (self.resistance * self.capacitance))
    }
}

impl ParallelRc {
    pub fn solve(&self, times: &[f64], params: &IntegratorParams) -> Result<SimulationResult> {
        let trajectory = integrate(self, Vector1::zeros(), times, params)?;
        let vn = trajectory.component(0);
        let i_r = scale(&vn, 1.0 / self.resistance);
        let i_c = scale(&gradient(&vn, times), self.capacitance);

        let mut result = SimulationResult::zeroed(Topology::Parallel, times);
        result.set(Quantity::TotalCurrent, sum(&[&i_r, &i_c]));
        result.set(Quantity::ResistorCurrent, i_r);
        result.set(Quantity::CapacitorCurrent, i_c);
        result.set(Quantity::NodeVoltage, vn);
        result.stats = Some(trajectory.stats);
        Ok(result)
    }
}

/// Resistor and inductor, closed form with `tau = L / R`:
///
/// ```text
/// I_L(t) = V/R (1 - e^(-t/tau))
/// I_R(t) = V/R e^(-t/tau)
/// ```
///
/// `t` is measured from the first sample. The node is held at `V`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallelRl {
    pub resistance: f64,
    pub inductance: f64,
    pub source: DcSource,
}

impl ParallelRl {
    /// Time constant L/R (s).
    pub fn tau(&self) -> f64 {
        self.inductance / self.resistance
    }

    pub fn solve(&self, times: &[f64]) -> SimulationResult {
        let i_final = self.source.voltage() / self.resistance;
        let tau = self.tau();
        let t0 = times.first().copied().unwrap_or(0.0);
        let decay: Vec<f64> = times.iter().map(|t| (-(t - t0) / tau).exp()).collect();

        let i_r: Vec<f64> = decay.iter().map(|d| i_final * d).collect();
        let i_l: Vec<f64> = decay.iter().map(|d| i_final * (1.0 - d)).collect();

        let mut result = SimulationResult::zeroed(Topology::Parallel, times);
        result.set(Quantity::NodeVoltage, self.source.sample(times));
        result.set(Quantity::TotalCurrent, sum(&[&i_r, &i_l]));
        result.set(Quantity::ResistorCurrent, i_r);
        result.set(Quantity::InductorCurrent, i_l);
        result
    }
}

/// Resistor, inductor and capacitor behind a small source resistance `Rs`,
/// driven by a ramp, state `[Vn, I_L]`:
///
/// ```text
/// dVn/dt  = ((V_ramp(t) - Vn) / Rs - Vn / R - I_L) / C
/// dI_L/dt = Vn / L
/// ```
///
/// This approximates the ideal-source circuit: after the ramp window the
/// response follows the step response closely as long as the window and
/// `Rs` are small against the circuit's own timescales and resistance.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelRlc {
    pub resistance: f64,
    pub inductance: f64,
    pub capacitance: f64,
    pub source: DcSource,
    pub ramp: RampParams,
}

/// [`ParallelRlc`] bound to a switch-on time.
struct RampedNode<'a> {
    circuit: &'a ParallelRlc,
    drive: RampedSource,
}

impl StateEquation<2> for RampedNode<'_> {
    fn derivative(&self, t: f64, y: &Vector2<f64>) -> Vector2<f64> {
        let c = self.circuit;
        let (vn, i_l) = (y[0], y[1]);
        let i_source = (self.drive.voltage_at(t) - vn) / c.ramp.source_resistance;
        Vector2::new(
            (i_source - vn / c.resistance - i_l) / c.capacitance,
            vn / c.inductance,
        )
    }

    fn breakpoints(&self) -> Vec<f64> {
        vec![self.drive.ramp_end()]
    }
}

impl ParallelRlc {
    /// Parallel combination of the source and load resistances.
    pub fn node_resistance(&self) -> f64 {
        let (rs, r) = (self.ramp.source_resistance, self.resistance);
        rs * r / (rs + r)
    }

    pub fn solve(&self, times: &[f64], params: &IntegratorParams) -> Result<SimulationResult> {
        let t_on = times.first().copied().unwrap_or(0.0);
        let system = RampedNode {
            circuit: self,
            drive: self.source.ramped(t_on, self.ramp.window),
        };
        let trajectory = integrate(&system, Vector2::zeros(), times, params)?;
        let vn = trajectory.component(0);
        let i_l = trajectory.component(1);
        let i_r = scale(&vn, 1.0 / self.resistance);
        let i_c = scale(&gradient(&vn, times), self.capacitance);

        let mut result = SimulationResult::zeroed(Topology::Parallel, times);
        result.set(Quantity::TotalCurrent, sum(&[&i_r, &i_c, &i_l]));
        result.set(Quantity::ResistorCurrent, i_r);
        result.set(Quantity::CapacitorCurrent, i_c);
        result.set(Quantity::InductorCurrent, i_l);
        result.set(Quantity::NodeVoltage, vn);
        result.stats = Some(trajectory.stats);
        Ok(result)
    }
}
