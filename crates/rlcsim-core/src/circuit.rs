//! Circuit description: which components are present, how they are wired,
//! and the source driving them.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::component::{Capacitor, ComponentKind, Inductor, Resistor};
use crate::error::{Error, Result};
use crate::source::DcSource;

/// How the components are wired to the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Source and components share a single current path.
    Series,
    /// Source and components share a single voltage node.
    Parallel,
}

impl FromStr for Topology {
    type Err = Error;

    /// Parse a topology tag, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim();
        if tag.eq_ignore_ascii_case("series") {
            Ok(Topology::Series)
        } else if tag.eq_ignore_ascii_case("parallel") {
            Ok(Topology::Parallel)
        } else {
            Err(Error::UnsupportedTopology(s.to_string()))
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Series => f.write_str("series"),
            Topology::Parallel => f.write_str("parallel"),
        }
    }
}

/// At most one of each component kind.
///
/// Absent kinds are `None`; zero is never used as an "absent" marker because
/// zero is not a valid value for any kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ComponentSet {
    pub resistor: Option<Resistor>,
    pub inductor: Option<Inductor>,
    pub capacitor: Option<Capacitor>,
}

impl ComponentSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from optional raw values, validating each present one.
    pub fn from_values(
        resistance: Option<f64>,
        inductance: Option<f64>,
        capacitance: Option<f64>,
    ) -> Result<Self> {
        Ok(Self {
            resistor: resistance.map(Resistor::new).transpose()?,
            inductor: inductance.map(Inductor::new).transpose()?,
            capacitor: capacitance.map(Capacitor::new).transpose()?,
        })
    }

    pub fn with_resistor(mut self, resistor: Resistor) -> Self {
        self.resistor = Some(resistor);
        self
    }

    pub fn with_inductor(mut self, inductor: Inductor) -> Self {
        self.inductor = Some(inductor);
        self
    }

    pub fn with_capacitor(mut self, capacitor: Capacitor) -> Self {
        self.capacitor = Some(capacitor);
        self
    }

    /// Check if no component is present.
    pub fn is_empty(&self) -> bool {
        self.resistor.is_none() && self.inductor.is_none() && self.capacitor.is_none()
    }

    /// Kinds present, in R, L, C order.
    pub fn kinds(&self) -> Vec<ComponentKind> {
        let mut kinds = Vec::with_capacity(3);
        if self.resistor.is_some() {
            kinds.push(ComponentKind::Resistor);
        }
        if self.inductor.is_some() {
            kinds.push(ComponentKind::Inductor);
        }
        if self.capacitor.is_some() {
            kinds.push(ComponentKind::Capacitor);
        }
        kinds
    }

    /// Short description of the mix, e.g. "R+L+C", "L+C" or "none".
    pub fn describe(&self) -> String {
        let kinds = self.kinds();
        if kinds.is_empty() {
            return "none".to_string();
        }
        kinds
            .iter()
            .map(ComponentKind::symbol)
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// A complete simulation input apart from the time vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circuit {
    pub components: ComponentSet,
    pub topology: Topology,
    pub source: DcSource,
}

impl Circuit {
    pub fn new(components: ComponentSet, topology: Topology, source: DcSource) -> Self {
        Self {
            components,
            topology,
            source,
        }
    }

    /// Build a circuit from raw caller input: optional component values, a
    /// source voltage and a topology tag.
    pub fn from_values(
        resistance: Option<f64>,
        inductance: Option<f64>,
        capacitance: Option<f64>,
        voltage: f64,
        topology: &str,
    ) -> Result<Self> {
        let topology = topology.parse()?;
        let components = ComponentSet::from_values(resistance, inductance, capacitance)?;
        let source = DcSource::new(voltage)?;
        Ok(Self::new(components, topology, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topology_parse_case_insensitive() {
        assert_eq!("series".parse::<Topology>().unwrap(), Topology::Series);
        assert_eq!("SERIES".parse::<Topology>().unwrap(), Topology::Series);
        assert_eq!(" Parallel ".parse::<Topology>().unwrap(), Topology::Parallel);
    }

    #[test]
    fn test_topology_parse_rejects_unknown() {
        for tag in ["", "serie", "bridge", "parallel-ish"] {
            let err = tag.parse::<Topology>().unwrap_err();
            assert!(
                matches!(err, Error::UnsupportedTopology(ref t) if t == tag),
                "tag {:?} gave {:?}",
                tag,
                err
            );
        }
    }

    #[test]
    fn test_component_set_describe() {
        assert_eq!(ComponentSet::new().describe(), "none");
        let set = ComponentSet::from_values(Some(1.0), None, Some(1e-6)).unwrap();
        assert_eq!(set.describe(), "R+C");
        let set = ComponentSet::from_values(None, Some(1.0), Some(1e-6)).unwrap();
        assert_eq!(set.describe(), "L+C");
        let set = ComponentSet::from_values(Some(1.0), Some(1.0), Some(1.0)).unwrap();
        assert_eq!(set.describe(), "R+L+C");
    }

    #[test]
    fn test_from_values_validates_each_component() {
        let err = ComponentSet::from_values(Some(10.0), Some(0.0), None).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidComponentValue {
                kind: ComponentKind::Inductor,
                ..
            }
        ));
    }

    #[test]
    fn test_builder_and_is_empty() {
        assert!(ComponentSet::new().is_empty());
        let set = ComponentSet::new().with_resistor(Resistor::new(5.0).unwrap());
        assert!(!set.is_empty());
        assert_eq!(set.kinds(), vec![ComponentKind::Resistor]);
    }

    #[test]
    fn test_circuit_from_values() {
        let circuit = Circuit::from_values(Some(100.0), None, Some(1e-3), 10.0, "Series").unwrap();
        assert_eq!(circuit.topology, Topology::Series);
        assert_eq!(circuit.source.voltage(), 10.0);
        assert!(circuit.components.inductor.is_none());

        assert!(matches!(
            Circuit::from_values(Some(100.0), None, None, 10.0, "delta"),
            Err(Error::UnsupportedTopology(_))
        ));
    }
}
