//! Component models for the circuit sandbox.
//!
//! The catalogue is small and closed: two-terminal devices only, matched
//! exhaustively everywhere they are consumed.
//!
//! - Passive: [`Wire`], [`Resistor`]
//! - Loads: [`Bulb`] (brightness, burnout)
//! - Controls: [`Switch`]
//! - Sources: [`Battery`]
//! - Instruments: [`Ammeter`], [`Voltmeter`]
//!
//! Every device reports whether it currently conducts and what resistance it
//! presents to the solver; an open device reports `f64::INFINITY` and is
//! skipped during matrix assembly.

mod bulb;
mod controls;
mod linear;
mod meters;
mod sources;

pub use bulb::Bulb;
pub use controls::Switch;
pub use linear::{Resistor, Wire};
pub use meters::{Ammeter, Voltmeter};
pub use sources::Battery;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::circuit::NodeId;

/// Variant tag for a component, used in results and display output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Wire,
    Resistor,
    Bulb,
    Switch,
    Battery,
    Ammeter,
    Voltmeter,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComponentKind::Wire => "wire",
            ComponentKind::Resistor => "resistor",
            ComponentKind::Bulb => "bulb",
            ComponentKind::Switch => "switch",
            ComponentKind::Battery => "battery",
            ComponentKind::Ammeter => "ammeter",
            ComponentKind::Voltmeter => "voltmeter",
        };
        f.write_str(s)
    }
}

/// A two-terminal circuit component.
#[derive(Debug, Clone)]
pub enum Component {
    Wire(Wire),
    Resistor(Resistor),
    Bulb(Bulb),
    Switch(Switch),
    Battery(Battery),
    Ammeter(Ammeter),
    Voltmeter(Voltmeter),
}

impl Component {
    /// Convenience constructor for a wire with the default 1 ohm resistance.
    pub fn wire(name: impl Into<String>, start: NodeId, end: NodeId) -> Self {
        Component::Wire(Wire::new(name.into(), [start, end]))
    }

    /// Convenience constructor for a resistor.
    pub fn resistor(name: impl Into<String>, start: NodeId, end: NodeId, ohms: f64) -> Self {
        Component::Resistor(Resistor::new(name.into(), [start, end], ohms))
    }

    /// Convenience constructor for a bulb with the default 100 ohm filament.
    pub fn bulb(name: impl Into<String>, start: NodeId, end: NodeId) -> Self {
        Component::Bulb(Bulb::new(name.into(), [start, end], Bulb::DEFAULT_RESISTANCE))
    }

    /// Convenience constructor for a switch.
    pub fn switch(name: impl Into<String>, start: NodeId, end: NodeId, closed: bool) -> Self {
        Component::Switch(Switch::new(name.into(), [start, end], closed))
    }

    /// Convenience constructor for a battery with no internal resistance.
    /// The `end` node is the positive terminal.
    pub fn battery(name: impl Into<String>, start: NodeId, end: NodeId, voltage: f64) -> Self {
        Component::Battery(Battery::new(name.into(), [start, end], voltage, 0.0))
    }

    /// Convenience constructor for an ammeter.
    pub fn ammeter(name: impl Into<String>, start: NodeId, end: NodeId) -> Self {
        Component::Ammeter(Ammeter::new(name.into(), [start, end]))
    }

    /// Convenience constructor for a voltmeter.
    pub fn voltmeter(name: impl Into<String>, start: NodeId, end: NodeId) -> Self {
        Component::Voltmeter(Voltmeter::new(name.into(), [start, end]))
    }

    /// Get the component name.
    pub fn name(&self) -> &str {
        match self {
            Component::Wire(w) => &w.name,
            Component::Resistor(r) => &r.name,
            Component::Bulb(b) => &b.name,
            Component::Switch(s) => &s.name,
            Component::Battery(b) => &b.name,
            Component::Ammeter(a) => &a.name,
            Component::Voltmeter(v) => &v.name,
        }
    }

    /// Get the variant tag.
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Wire(_) => ComponentKind::Wire,
            Component::Resistor(_) => ComponentKind::Resistor,
            Component::Bulb(_) => ComponentKind::Bulb,
            Component::Switch(_) => ComponentKind::Switch,
            Component::Battery(_) => ComponentKind::Battery,
            Component::Ammeter(_) => ComponentKind::Ammeter,
            Component::Voltmeter(_) => ComponentKind::Voltmeter,
        }
    }

    /// Get both terminal nodes as `[start, end]`.
    pub fn nodes(&self) -> [NodeId; 2] {
        match self {
            Component::Wire(w) => w.nodes,
            Component::Resistor(r) => r.nodes,
            Component::Bulb(b) => b.nodes,
            Component::Switch(s) => s.nodes,
            Component::Battery(b) => b.nodes,
            Component::Ammeter(a) => a.nodes,
            Component::Voltmeter(v) => v.nodes,
        }
    }

    /// The `start` terminal (negative terminal for batteries).
    pub fn start(&self) -> NodeId {
        self.nodes()[0]
    }

    /// The `end` terminal (positive terminal for batteries).
    pub fn end(&self) -> NodeId {
        self.nodes()[1]
    }

    /// Given one terminal, return the other.
    pub fn other_node(&self, node: NodeId) -> NodeId {
        let [start, end] = self.nodes();
        if start == node {
            end
        } else {
            start
        }
    }

    /// Whether this component currently provides a closed current path.
    ///
    /// Open switches and burned-out bulbs do not conduct. Voltmeters never
    /// conduct: they present infinite resistance and measure across their
    /// terminals without drawing current. Ammeters conduct like a wire.
    pub fn conducts(&self) -> bool {
        match self {
            Component::Switch(s) => s.closed,
            Component::Bulb(b) => !b.burned_out,
            Component::Voltmeter(_) => false,
            Component::Wire(_)
            | Component::Resistor(_)
            | Component::Battery(_)
            | Component::Ammeter(_) => true,
        }
    }

    /// The resistance this component presents to the solver, in ohms.
    ///
    /// Returns `f64::INFINITY` for any device whose current path is open;
    /// callers must skip infinite (and zero) resistances during stamping.
    pub fn resistance(&self) -> f64 {
        match self {
            Component::Switch(s) => s.resistance(),
            Component::Bulb(b) => b.resistance(),
            Component::Wire(w) => w.resistance,
            Component::Resistor(r) => r.ohms,
            Component::Battery(b) => b.internal_resistance,
            Component::Ammeter(a) => a.resistance(),
            Component::Voltmeter(_) => f64::INFINITY,
        }
    }

    /// Feed a solved measurement into the device state.
    ///
    /// Bulbs take the magnitude of their branch current and recompute
    /// brightness (possibly burning out); meters latch a rounded reading.
    /// Passive devices ignore the value.
    pub fn update(&mut self, measurement: f64) {
        match self {
            Component::Bulb(b) => b.update(measurement),
            Component::Ammeter(a) => {
                a.update(measurement);
            }
            Component::Voltmeter(v) => {
                v.update(measurement);
            }
            Component::Wire(_)
            | Component::Resistor(_)
            | Component::Switch(_)
            | Component::Battery(_) => {}
        }
    }

    /// Short human-readable value for on-screen labels.
    pub fn display_value(&self) -> String {
        match self {
            Component::Wire(w) => w.display_value(),
            Component::Resistor(r) => r.display_value(),
            Component::Bulb(b) => b.display_value(),
            Component::Switch(s) => s.display_value(),
            Component::Battery(b) => b.display_value(),
            Component::Ammeter(a) => a.display_value(),
            Component::Voltmeter(v) => v.display_value(),
        }
    }

    /// Multi-line hover text for the presentation layer.
    pub fn tooltip(&self) -> String {
        match self {
            Component::Wire(w) => w.tooltip(),
            Component::Resistor(r) => r.tooltip(),
            Component::Bulb(b) => b.tooltip(),
            Component::Switch(s) => s.tooltip(),
            Component::Battery(b) => b.tooltip(),
            Component::Ammeter(a) => a.tooltip(),
            Component::Voltmeter(v) => v.tooltip(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes() -> [NodeId; 2] {
        [NodeId(0), NodeId(1)]
    }

    #[test]
    fn conduction_rules() {
        let [a, b] = nodes();
        assert!(Component::wire("w", a, b).conducts());
        assert!(Component::resistor("r", a, b, 220.0).conducts());
        assert!(Component::battery("bat", a, b, 9.0).conducts());
        assert!(Component::ammeter("am", a, b).conducts());
        assert!(!Component::voltmeter("vm", a, b).conducts());
        assert!(Component::switch("s", a, b, true).conducts());
        assert!(!Component::switch("s", a, b, false).conducts());
    }

    #[test]
    fn open_devices_report_infinite_resistance() {
        let [a, b] = nodes();
        let open = Component::switch("s", a, b, false);
        assert!(open.resistance().is_infinite());

        let mut bulb = Bulb::new("b".into(), [a, b], Bulb::DEFAULT_RESISTANCE);
        bulb.burn_out();
        let burned = Component::Bulb(bulb);
        assert!(!burned.conducts());
        assert!(burned.resistance().is_infinite());
    }

    #[test]
    fn default_resistances() {
        let [a, b] = nodes();
        assert_eq!(Component::wire("w", a, b).resistance(), 1.0);
        assert_eq!(Component::bulb("b", a, b).resistance(), 100.0);
        assert_eq!(Component::switch("s", a, b, true).resistance(), 0.5);
        assert_eq!(Component::battery("bat", a, b, 9.0).resistance(), 0.0);
    }

    #[test]
    fn other_node_flips_terminals() {
        let [a, b] = nodes();
        let w = Component::wire("w", a, b);
        assert_eq!(w.other_node(a), b);
        assert_eq!(w.other_node(b), a);
    }
}
