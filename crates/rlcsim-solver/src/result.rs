//! Simulation result mapping.

use std::fmt;

use indexmap::IndexMap;
use rlcsim_core::Topology;
use serde::Serialize;

use crate::ode::IntegrationStats;

/// A named physical quantity in a result mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    // Series topology
    SourceVoltage,
    Current,
    ResistorVoltage,
    InductorVoltage,
    CapacitorVoltage,
    // Parallel topology
    NodeVoltage,
    TotalCurrent,
    ResistorCurrent,
    InductorCurrent,
    CapacitorCurrent,
}

const SERIES_QUANTITIES: [Quantity; 5] = [
    Quantity::SourceVoltage,
    Quantity::Current,
    Quantity::ResistorVoltage,
    Quantity::InductorVoltage,
    Quantity::CapacitorVoltage,
];

const PARALLEL_QUANTITIES: [Quantity; 5] = [
    Quantity::NodeVoltage,
    Quantity::TotalCurrent,
    Quantity::ResistorCurrent,
    Quantity::InductorCurrent,
    Quantity::CapacitorCurrent,
];

impl Quantity {
    /// The fixed key set reported for a topology, in output order.
    pub fn for_topology(topology: Topology) -> &'static [Quantity] {
        match topology {
            Topology::Series => &SERIES_QUANTITIES,
            Topology::Parallel => &PARALLEL_QUANTITIES,
        }
    }

    /// Stable snake_case key.
    pub fn name(&self) -> &'static str {
        match self {
            Quantity::SourceVoltage => "source_voltage",
            Quantity::Current => "current",
            Quantity::ResistorVoltage => "resistor_voltage",
            Quantity::InductorVoltage => "inductor_voltage",
            Quantity::CapacitorVoltage => "capacitor_voltage",
            Quantity::NodeVoltage => "node_voltage",
            Quantity::TotalCurrent => "total_current",
            Quantity::ResistorCurrent => "resistor_current",
            Quantity::InductorCurrent => "inductor_current",
            Quantity::CapacitorCurrent => "capacitor_current",
        }
    }

    /// SI unit symbol.
    pub fn unit(&self) -> &'static str {
        if self.is_voltage() { "V" } else { "A" }
    }

    pub fn is_voltage(&self) -> bool {
        matches!(
            self,
            Quantity::SourceVoltage
                | Quantity::ResistorVoltage
                | Quantity::InductorVoltage
                | Quantity::CapacitorVoltage
                | Quantity::NodeVoltage
        )
    }

    /// Short column label such as `V(R)` or `I(total)`.
    pub fn label(&self) -> &'static str {
        match self {
            Quantity::SourceVoltage => "V(src)",
            Quantity::Current => "I",
            Quantity::ResistorVoltage => "V(R)",
            Quantity::InductorVoltage => "V(L)",
            Quantity::CapacitorVoltage => "V(C)",
            Quantity::NodeVoltage => "V(node)",
            Quantity::TotalCurrent => "I(total)",
            Quantity::ResistorCurrent => "I(R)",
            Quantity::InductorCurrent => "I(L)",
            Quantity::CapacitorCurrent => "I(C)",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Waveforms of every quantity for one topology, sampled at the run's times.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    pub topology: Topology,
    /// Sample times (s).
    pub time: Vec<f64>,
    /// Quantity waveforms in the topology's key order.
    pub quantities: IndexMap<Quantity, Vec<f64>>,
    /// Integrator statistics; `None` for closed-form cases.
    #[serde(skip)]
    pub stats: Option<IntegrationStats>,
}

impl SimulationResult {
    /// Start a result with every key of `topology` zero-filled.
    pub(crate) fn zeroed(topology: Topology, time: &[f64]) -> Self {
        let quantities = Quantity::for_topology(topology)
            .iter()
            .map(|&q| (q, vec![0.0; time.len()]))
            .collect();
        Self {
            topology,
            time: time.to_vec(),
            quantities,
            stats: None,
        }
    }

    /// Replace the waveform of a quantity that belongs to this topology.
    pub(crate) fn set(&mut self, quantity: Quantity, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.time.len());
        if let Some(slot) = self.quantities.get_mut(&quantity) {
            *slot = values;
        }
    }

    /// Full waveform of a quantity, if it belongs to this topology.
    pub fn get(&self, quantity: Quantity) -> Option<&[f64]> {
        self.quantities.get(&quantity).map(Vec::as_slice)
    }

    /// (time, value) pairs for a quantity.
    pub fn waveform(&self, quantity: Quantity) -> Vec<(f64, f64)> {
        self.get(quantity)
            .map(|values| self.time.iter().copied().zip(values.iter().copied()).collect())
            .unwrap_or_default()
    }

    /// Value at the last sample.
    pub fn final_value(&self, quantity: Quantity) -> Option<f64> {
        self.get(quantity).and_then(|values| values.last().copied())
    }

    /// Linearly interpolated value at time `t`, clamped to the sampled span.
    ///
    /// Returns `None` for a NaN `t`.
    pub fn value_at(&self, quantity: Quantity, t: f64) -> Option<f64> {
        if t.is_nan() {
            return None;
        }
        let values = self.get(quantity)?;
        let first = *self.time.first()?;
        let last = *self.time.last()?;
        if t <= first {
            return values.first().copied();
        }
        if t >= last {
            return values.last().copied();
        }

        let i = self.time.partition_point(|&s| s <= t);
        let (t0, t1) = (self.time[i - 1], self.time[i]);
        let alpha = (t - t0) / (t1 - t0);
        Some(values[i - 1] * (1.0 - alpha) + values[i] * alpha)
    }

    /// Number of samples per waveform.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Check that every sample of every waveform is finite.
    pub fn is_finite(&self) -> bool {
        self.quantities
            .values()
            .all(|values| values.iter().all(|v| v.is_finite()))
    }
}
