//! Simulation result types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::circuit::{ComponentId, NodeId};
use crate::components::ComponentKind;

/// Outcome class of a [`simulate`](super::CircuitGraph::simulate) call.
///
/// Every variant is an expected, recoverable outcome; none of them is an
/// error. The numeric codes match the presentation layer's historical
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationStatus {
    /// No battery present; nothing can drive a current.
    NoBattery,
    /// At least one switch is open.
    SwitchOpen,
    /// No closed conducting loop exists, or the numerical solve failed.
    OpenCircuit,
    /// The circuit was solved.
    Solved,
}

impl SimulationStatus {
    /// Stable integer code: NoBattery=-1, SwitchOpen=-2, OpenCircuit=0,
    /// Solved=1.
    pub fn code(self) -> i32 {
        match self {
            SimulationStatus::NoBattery => -1,
            SimulationStatus::SwitchOpen => -2,
            SimulationStatus::OpenCircuit => 0,
            SimulationStatus::Solved => 1,
        }
    }
}

/// Solved terminal voltages of one component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoltageDrop {
    /// Voltage at the `start` terminal.
    pub start: f64,
    /// Voltage at the `end` terminal.
    pub end: f64,
    /// `end - start`.
    pub diff: f64,
}

/// Per-component summary row, in component insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDetail {
    pub id: ComponentId,
    pub kind: ComponentKind,
    pub name: String,
    /// Signed current in the start-to-end convention, amps.
    pub current: f64,
    /// Voltage across the component (`end - start`), volts.
    pub voltage: f64,
    pub start_voltage: f64,
    pub end_voltage: f64,
}

/// The full outcome of one `simulate()` call.
///
/// On failure statuses the maps are empty, `current` is zero and
/// `total_voltage` is `None`; nothing is ever partially filled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub status: SimulationStatus,
    /// Human-readable outcome description.
    pub message: String,
    /// Whether a closed conducting loop was found.
    pub closed: bool,
    /// The open switch that blocked the simulation, if any.
    pub open_switch: Option<ComponentId>,
    /// Aggregate battery current magnitude, amps.
    pub current: f64,
    /// Source voltage; defined only when exactly one battery is present.
    pub total_voltage: Option<f64>,
    /// Solved voltage per electrical node, ground at 0 V.
    pub node_voltages: HashMap<NodeId, f64>,
    /// Signed branch current per component (start-to-end convention).
    pub component_currents: HashMap<ComponentId, f64>,
    /// Terminal voltages per component.
    pub component_voltages: HashMap<ComponentId, VoltageDrop>,
    /// Ordered per-component summary mirroring insertion order.
    pub component_details: Vec<ComponentDetail>,
}

impl SimulationResult {
    /// Build a non-success result with empty maps.
    pub(crate) fn failure(status: SimulationStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            closed: false,
            open_switch: None,
            current: 0.0,
            total_voltage: None,
            node_voltages: HashMap::new(),
            component_currents: HashMap::new(),
            component_voltages: HashMap::new(),
            component_details: Vec::new(),
        }
    }

    /// Whether the circuit was solved.
    pub fn is_solved(&self) -> bool {
        self.status == SimulationStatus::Solved
    }
}
