//! Error types for rlcsim.

use std::fmt;

use thiserror::Error;

use crate::component::ComponentKind;

/// Why the integrator gave up on a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationFailureKind {
    /// A derivative or state became NaN or infinite.
    NonFiniteState,
    /// The step size shrank below the floating-point resolution of `t`.
    StepSizeTooSmall,
    /// The step budget ran out before reaching the end of the span.
    MaxStepsExceeded,
}

impl fmt::Display for IntegrationFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteState => write!(f, "state became non-finite"),
            Self::StepSizeTooSmall => write!(f, "step size too small"),
            Self::MaxStepsExceeded => write!(f, "maximum number of steps exceeded"),
        }
    }
}

/// Errors raised while building or simulating a circuit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Component value is non-positive or non-finite.
    #[error("invalid {kind} value {value}: must be finite and greater than zero")]
    InvalidComponentValue { kind: ComponentKind, value: f64 },

    /// Source voltage is NaN or infinite.
    #[error("invalid source voltage {0}: must be finite")]
    InvalidSourceVoltage(f64),

    /// Time vector is too short, contains bad samples or is not increasing.
    #[error("invalid time vector: {0}")]
    InvalidTimeVector(String),

    /// Topology tag is neither series nor parallel.
    #[error("unsupported topology '{0}' (expected 'series' or 'parallel')")]
    UnsupportedTopology(String),

    /// No formulation exists for the components present.
    #[error("unsupported component combination: {present} (a resistor is required)")]
    UnsupportedCombination { present: String },

    /// Simulation option out of range.
    #[error("invalid parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// Integrator could not produce a finite trajectory.
    #[error("integration failed at t = {time:e}: {reason}")]
    IntegrationFailure {
        time: f64,
        reason: IntegrationFailureKind,
    },
}

/// Result type for rlcsim operations.
pub type Result<T> = std::result::Result<T, Error>;
