//! The closed set of state-equation formulations.
//!
//! A circuit maps to exactly one [`Formulation`] by which components are
//! present and how they are connected. Every case needs a resistor.

pub mod parallel;
pub mod series;

pub use parallel::{ParallelR, ParallelRc, ParallelRl, ParallelRlc};
pub use series::{SeriesR, SeriesRc, SeriesRl, SeriesRlc};

use rlcsim_core::{Circuit, Error, Result, Topology};

use crate::options::{IntegratorParams, RampParams};
use crate::result::SimulationResult;

/// One supported (components, topology) case with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Formulation {
    SeriesR(SeriesR),
    SeriesRc(SeriesRc),
    SeriesRl(SeriesRl),
    SeriesRlc(SeriesRlc),
    ParallelR(ParallelR),
    ParallelRc(ParallelRc),
    ParallelRl(ParallelRl),
    ParallelRlc(ParallelRlc),
}

impl Formulation {
    /// Select the formulation for a circuit.
    ///
    /// Fails with [`Error::UnsupportedCombination`] when no resistor is
    /// present. `ramp` only affects the parallel RLC case.
    pub fn select(circuit: &Circuit, ramp: &RampParams) -> Result<Self> {
        let set = &circuit.components;
        let source = circuit.source;
        let Some(resistor) = set.resistor else {
            return Err(Error::UnsupportedCombination {
                present: set.describe(),
            });
        };
        let resistance = resistor.resistance();
        let inductance = set.inductor.map(|l| l.inductance());
        let capacitance = set.capacitor.map(|c| c.capacitance());

        let formulation = match (circuit.topology, inductance, capacitance) {
            (Topology::Series, None, None) => Self::SeriesR(SeriesR { resistance, source }),
            (Topology::Series, None, Some(capacitance)) => Self::SeriesRc(SeriesRc {
                resistance,
                capacitance,
                source,
            }),
            (Topology::Series, Some(inductance), None) => Self::SeriesRl(SeriesRl {
                resistance,
                inductance,
                source,
            }),
            (Topology::Series, Some(inductance), Some(capacitance)) => {
                Self::SeriesRlc(SeriesRlc {
                    resistance,
                    inductance,
                    capacitance,
                    source,
                })
            }
            (Topology::Parallel, None, None) => Self::ParallelR(ParallelR { resistance, source }),
            (Topology::Parallel, None, Some(capacitance)) => Self::ParallelRc(ParallelRc {
                resistance,
                capacitance,
                source,
            }),
            (Topology::Parallel, Some(inductance), None) => Self::ParallelRl(ParallelRl {
                resistance,
                inductance,
                source,
            }),
            (Topology::Parallel, Some(inductance), Some(capacitance)) => {
                Self::ParallelRlc(ParallelRlc {
                    resistance,
                    inductance,
                    capacitance,
                    source,
                    ramp: ramp.clone(),
                })
            }
        };
        Ok(formulation)
    }

    /// Short name such as `series RC`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SeriesR(_) => "series R",
            Self::SeriesRc(_) => "series RC",
            Self::SeriesRl(_) => "series RL",
            Self::SeriesRlc(_) => "series RLC",
            Self::ParallelR(_) => "parallel R",
            Self::ParallelRc(_) => "parallel RC",
            Self::ParallelRl(_) => "parallel RL",
            Self::ParallelRlc(_) => "parallel RLC",
        }
    }

    pub fn topology(&self) -> Topology {
        match self {
            Self::SeriesR(_) | Self::SeriesRc(_) | Self::SeriesRl(_) | Self::SeriesRlc(_) => {
                Topology::Series
            }
            Self::ParallelR(_) | Self::ParallelRc(_) | Self::ParallelRl(_) | Self::ParallelRlc(_) => {
                Topology::Parallel
            }
        }
    }

    /// Whether solving this case runs the adaptive integrator.
    pub fn is_integrated(&self) -> bool {
        !matches!(
            self,
            Self::SeriesR(_) | Self::ParallelR(_) | Self::ParallelRl(_)
        )
    }

    /// Characteristic times of the response (s), empty for resistor-only
    /// cases.
    ///
    /// RC cases report `R C`, RL cases `L / R`. Series RLC reports the
    /// envelope decay time `2L / R` and the undamped period scale `sqrt(L C)`.
    /// Parallel RLC reports `(Rs || R) C` and `sqrt(L C)`.
    pub fn timescales(&self) -> Vec<f64> {
        match self {
            Self::SeriesR(_) | Self::ParallelR(_) => Vec::new(),
            Self::SeriesRc(f) => vec![f.resistance * f.capacitance],
            Self::ParallelRc(f) => vec![f.resistance * f.capacitance],
            Self::SeriesRl(f) => vec![f.inductance / f.resistance],
            Self::ParallelRl(f) => vec![f.tau()],
            Self::SeriesRlc(f) => vec![
                2.0 * f.inductance / f.resistance,
                (f.inductance * f.capacitance).sqrt(),
            ],
            Self::ParallelRlc(f) => vec![
                f.node_resistance() * f.capacitance,
                (f.inductance * f.capacitance).sqrt(),
            ],
        }
    }

    /// Shortest characteristic time, if any.
    pub fn fastest_timescale(&self) -> Option<f64> {
        self.timescales().into_iter().reduce(f64::min)
    }

    /// Solve over `times`, which must already be a valid time vector.
    pub fn solve(&self, times: &[f64], params: &IntegratorParams) -> Result<SimulationResult> {
        match self {
            Self::SeriesR(f) => Ok(f.solve(times)),
            Self::SeriesRc(f) => f.solve(times, params),
            Self::SeriesRl(f) => f.solve(times, params),
            Self::SeriesRlc(f) => f.solve(times, params),
            Self::ParallelR(f) => Ok(f.solve(times)),
            Self::ParallelRc(f) => f.solve(times, params),
            Self::ParallelRl(f) => Ok(f.solve(times)),
            Self::ParallelRlc(f) => f.solve(times, params),
        }
    }
}
