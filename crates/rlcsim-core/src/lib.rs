//! Circuit representation for the rlcsim transient engine.
//!
//! This crate provides the validated inputs of a simulation run:
//! - Passive components: R, L, C (strictly positive values)
//! - The DC source and its ramped switch-on approximation
//! - Component sets, topology tags and the circuit record
//! - Time vectors
//!
//! Numerical integration lives in `rlcsim-solver`.

pub mod circuit;
pub mod component;
pub mod error;
pub mod source;
pub mod time;
pub mod units;

pub use circuit::{Circuit, ComponentSet, Topology};
pub use component::{Capacitor, ComponentKind, Inductor, Resistor};
pub use error::{Error, IntegrationFailureKind, Result};
pub use source::{DcSource, RampedSource};
pub use time::TimeVector;
