//! Passive component entities: Resistor, Inductor, Capacitor.
//!
//! Each entity holds a single strictly positive value and is immutable once
//! built. Construction is the only place values are checked.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// The three passive component kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Resistor,
    Inductor,
    Capacitor,
}

impl ComponentKind {
    /// Single-letter circuit symbol ("R", "L", "C").
    pub fn symbol(&self) -> &'static str {
        match self {
            ComponentKind::Resistor => "R",
            ComponentKind::Inductor => "L",
            ComponentKind::Capacitor => "C",
        }
    }

    /// SI unit of the component value.
    pub fn unit(&self) -> &'static str {
        match self {
            ComponentKind::Resistor => "ohm",
            ComponentKind::Inductor => "H",
            ComponentKind::Capacitor => "F",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentKind::Resistor => "resistor",
            ComponentKind::Inductor => "inductor",
            ComponentKind::Capacitor => "capacitor",
        };
        f.write_str(name)
    }
}

fn checked(kind: ComponentKind, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidComponentValue { kind, value })
    }
}

/// A resistor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Resistor {
    resistance: f64,
}

impl Resistor {
    /// Create a resistor of `resistance` ohms.
    pub fn new(resistance: f64) -> Result<Self> {
        Ok(Self {
            resistance: checked(ComponentKind::Resistor, resistance)?,
        })
    }

    /// Resistance in ohms.
    pub fn resistance(&self) -> f64 {
        self.resistance
    }

    /// Get the conductance (1/R).
    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance
    }
}

/// An inductor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Inductor {
    inductance: f64,
}

impl Inductor {
    /// Create an inductor of `inductance` henries.
    pub fn new(inductance: f64) -> Result<Self> {
        Ok(Self {
            inductance: checked(ComponentKind::Inductor, inductance)?,
        })
    }

    /// Inductance in henries.
    pub fn inductance(&self) -> f64 {
        self.inductance
    }
}

/// A capacitor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Capacitor {
    capacitance: f64,
}

impl Capacitor {
    /// Create a capacitor of `capacitance` farads.
    pub fn new(capacitance: f64) -> Result<Self> {
        Ok(Self {
            capacitance: checked(ComponentKind::Capacitor, capacitance)?,
        })
    }

    /// Capacitance in farads.
    pub fn capacitance(&self) -> f64 {
        self.capacitance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resistor_rejects_non_positive() {
        for value in [0.0, -0.0, -1.0, -1e-12, f64::NEG_INFINITY] {
            let err = Resistor::new(value).unwrap_err();
            assert!(
                matches!(
                    err,
                    Error::InvalidComponentValue {
                        kind: ComponentKind::Resistor,
                        ..
                    }
                ),
                "R = {} should fail with InvalidComponentValue, got {:?}",
                value,
                err
            );
        }
    }

    #[test]
    fn test_non_finite_values_rejected() {
        assert!(Resistor::new(f64::NAN).is_err());
        assert!(Inductor::new(f64::INFINITY).is_err());
        assert!(Capacitor::new(f64::NAN).is_err());
    }

    #[test]
    fn test_inductor_and_capacitor_validation() {
        assert!(matches!(
            Inductor::new(0.0),
            Err(Error::InvalidComponentValue {
                kind: ComponentKind::Inductor,
                ..
            })
        ));
        assert!(matches!(
            Capacitor::new(-1e-6),
            Err(Error::InvalidComponentValue {
                kind: ComponentKind::Capacitor,
                ..
            })
        ));
    }

    #[test]
    fn test_values_are_preserved() {
        let r = Resistor::new(100.0).unwrap();
        assert_eq!(r.resistance(), 100.0);
        assert!((r.conductance() - 0.01).abs() < 1e-15);
        assert_eq!(Inductor::new(0.5).unwrap().inductance(), 0.5);
        assert_eq!(Capacitor::new(1e-9).unwrap().capacitance(), 1e-9);
        // Tiny but positive values are physical
        assert!(Capacitor::new(f64::MIN_POSITIVE).is_ok());
    }

    #[test]
    fn test_error_message_names_kind() {
        let msg = Inductor::new(-2.0).unwrap_err().to_string();
        assert!(msg.contains("inductor"), "message was: {}", msg);
        assert!(msg.contains("-2"), "message was: {}", msg);
    }
}
