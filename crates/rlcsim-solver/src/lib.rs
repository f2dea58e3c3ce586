//! Transient solver for series and parallel RLC circuits.
//!
//! This crate provides:
//! - Adaptive Dormand–Prince integration with dense output
//! - State-equation formulations for R, RC, RL and RLC in series or parallel
//! - Finite-difference post-processing of sampled trajectories
//! - Result mappings keyed by physical quantity
//! - Batch runs over independent circuits (optionally parallel)
//!
//! # Example
//!
//! ```
//! use rlcsim_core::{Circuit, TimeVector};
//! use rlcsim_solver::{Quantity, SimulationOptions, simulate};
//!
//! let circuit = Circuit::from_values(Some(100.0), None, Some(1e-3), 10.0, "series")?;
//! let times = TimeVector::uniform(1.0, 500)?;
//! let result = simulate(&circuit, &times, &SimulationOptions::default())?;
//! let vc = result.final_value(Quantity::CapacitorVoltage).unwrap_or_default();
//! assert!((vc - 10.0).abs() < 0.1);
//! # Ok::<(), rlcsim_core::Error>(())
//! ```

pub mod formulation;
pub mod ode;
pub mod options;
pub mod postprocess;
pub mod result;
pub mod simulate;

pub use formulation::Formulation;
pub use ode::{IntegrationStats, StateEquation, Trajectory, integrate};
pub use options::{IntegratorParams, RampParams, SimulationOptions};
pub use result::{Quantity, SimulationResult};
pub use rlcsim_core::{Error, Result};
pub use simulate::{simulate, simulate_batch};
