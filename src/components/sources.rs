//! Voltage sources: the Battery.

use crate::circuit::NodeId;

/// An ideal battery with optional internal resistance.
///
/// By convention the `end` node (`nodes[1]`) is the positive terminal and
/// `start` (`nodes[0]`) the negative one. Each battery contributes one branch
/// current unknown to the MNA system, enforcing `V_pos - V_neg = voltage`.
#[derive(Debug, Clone)]
pub struct Battery {
    pub name: String,
    pub nodes: [NodeId; 2], // [negative, positive]
    /// Source voltage in volts.
    pub voltage: f64,
    /// Internal resistance in ohms (0 = ideal source).
    pub internal_resistance: f64,
}

impl Battery {
    /// Create a new battery.
    pub fn new(name: String, nodes: [NodeId; 2], voltage: f64, internal_resistance: f64) -> Self {
        Self {
            name,
            nodes,
            voltage,
            internal_resistance: internal_resistance.max(0.0),
        }
    }

    /// The negative terminal.
    pub fn negative(&self) -> NodeId {
        self.nodes[0]
    }

    /// The positive terminal.
    pub fn positive(&self) -> NodeId {
        self.nodes[1]
    }

    pub fn display_value(&self) -> String {
        format!("{} V", self.voltage)
    }

    pub fn tooltip(&self) -> String {
        format!("Battery:\nDrives current through the circuit\nVoltage: {} V", self.voltage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminals_follow_convention() {
        let b = Battery::new("B1".to_string(), [NodeId(3), NodeId(5)], 9.0, 0.0);
        assert_eq!(b.negative(), NodeId(3));
        assert_eq!(b.positive(), NodeId(5));
    }

    #[test]
    fn internal_resistance_clamped_to_zero() {
        let b = Battery::new("B1".to_string(), [NodeId(0), NodeId(1)], 9.0, -1.0);
        assert_eq!(b.internal_resistance, 0.0);
    }
}
