//! Passive conductors: Wire and Resistor.

use crate::circuit::NodeId;

/// A plain connecting wire.
///
/// Real wire is not a perfect conductor; a small default resistance keeps the
/// numbers honest for teaching and keeps the conductance stamp finite.
#[derive(Debug, Clone)]
pub struct Wire {
    pub name: String,
    pub nodes: [NodeId; 2],
    pub resistance: f64,
}

impl Wire {
    /// Default wire resistance in ohms.
    pub const DEFAULT_RESISTANCE: f64 = 1.0;

    /// Create a new wire with the default resistance.
    pub fn new(name: String, nodes: [NodeId; 2]) -> Self {
        Self {
            name,
            nodes,
            resistance: Self::DEFAULT_RESISTANCE,
        }
    }

    pub fn display_value(&self) -> String {
        format!("{} \u{3a9}", self.resistance)
    }

    pub fn tooltip(&self) -> String {
        format!("Wire:\nConnects two points\nResistance: {} \u{3a9}", self.resistance)
    }
}

/// A fixed resistor.
#[derive(Debug, Clone)]
pub struct Resistor {
    pub name: String,
    pub nodes: [NodeId; 2],
    pub ohms: f64,
}

impl Resistor {
    /// Default resistance in ohms.
    pub const DEFAULT_OHMS: f64 = 220.0;

    /// Create a new resistor. Non-positive values fall back to the default.
    pub fn new(name: String, nodes: [NodeId; 2], ohms: f64) -> Self {
        let ohms = if ohms > 0.0 { ohms } else { Self::DEFAULT_OHMS };
        Self { name, nodes, ohms }
    }

    pub fn display_value(&self) -> String {
        format!("{} \u{3a9}", self.ohms)
    }

    pub fn tooltip(&self) -> String {
        format!("Resistor:\nLimits current flow\nResistance: {} \u{3a9}", self.ohms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resistor_rejects_nonpositive_values() {
        let r = Resistor::new("R1".to_string(), [NodeId(0), NodeId(1)], 0.0);
        assert_eq!(r.ohms, Resistor::DEFAULT_OHMS);
        let r = Resistor::new("R2".to_string(), [NodeId(0), NodeId(1)], -5.0);
        assert_eq!(r.ohms, Resistor::DEFAULT_OHMS);
    }

    #[test]
    fn wire_default() {
        let w = Wire::new("W1".to_string(), [NodeId(0), NodeId(1)]);
        assert_eq!(w.resistance, 1.0);
    }
}
