//! Adaptive ODE integration for first-order state equations.
//!
//! # Module Structure
//!
//! - [`dopri`] - Dormand–Prince 5(4) integrator with dense output

pub mod dopri;

use nalgebra::SVector;

pub use dopri::integrate;

/// Right-hand side of a first-order system `dy/dt = f(t, y)` with `N` states.
pub trait StateEquation<const N: usize> {
    /// Evaluate the state derivative at time `t`.
    fn derivative(&self, t: f64, y: &SVector<f64, N>) -> SVector<f64, N>;

    /// Times where the right-hand side has a kink or jump. The integrator
    /// restarts at each one instead of stepping across it.
    fn breakpoints(&self) -> Vec<f64> {
        Vec::new()
    }
}

/// Step statistics from one integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationStats {
    /// Number of accepted steps.
    pub accepted_steps: usize,
    /// Number of rejected steps.
    pub rejected_steps: usize,
    /// Number of right-hand-side evaluations.
    pub evaluations: usize,
    /// Smallest accepted step (s).
    pub min_step_used: f64,
    /// Largest accepted step (s).
    pub max_step_used: f64,
}

impl Default for IntegrationStats {
    fn default() -> Self {
        Self {
            accepted_steps: 0,
            rejected_steps: 0,
            evaluations: 0,
            min_step_used: f64::INFINITY,
            max_step_used: 0.0,
        }
    }
}

impl IntegrationStats {
    /// Total steps attempted.
    pub fn total_steps(&self) -> usize {
        self.accepted_steps + self.rejected_steps
    }
}

/// States sampled at the caller's output times.
#[derive(Debug, Clone)]
pub struct Trajectory<const N: usize> {
    /// One state vector per output time.
    pub states: Vec<SVector<f64, N>>,
    pub stats: IntegrationStats,
}

impl<const N: usize> Trajectory<N> {
    /// Extract a single state component across all output times.
    pub fn component(&self, index: usize) -> Vec<f64> {
        self.states.iter().map(|y| y[index]).collect()
    }
}
