//! Control components: the Switch.

use tracing::debug;

use crate::circuit::NodeId;

/// A simple on/off switch.
///
/// Closed, it behaves as a very small series resistance; open, it breaks the
/// circuit entirely (infinite resistance, never stamped).
#[derive(Debug, Clone)]
pub struct Switch {
    pub name: String,
    pub nodes: [NodeId; 2],
    pub closed: bool,
    /// Contact resistance when closed, in ohms.
    pub closed_resistance: f64,
}

impl Switch {
    /// Default contact resistance when closed.
    pub const DEFAULT_CLOSED_RESISTANCE: f64 = 0.5;

    /// Create a new switch.
    pub fn new(name: String, nodes: [NodeId; 2], closed: bool) -> Self {
        Self {
            name,
            nodes,
            closed,
            closed_resistance: Self::DEFAULT_CLOSED_RESISTANCE,
        }
    }

    /// Current resistance: contact resistance when closed, infinite when open.
    pub fn resistance(&self) -> f64 {
        if self.closed {
            self.closed_resistance
        } else {
            f64::INFINITY
        }
    }

    /// Set the switch state.
    pub fn set_state(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Toggle the switch state.
    pub fn toggle(&mut self) {
        self.closed = !self.closed;
        debug!(switch = %self.name, closed = self.closed, "switch toggled");
    }

    pub fn display_value(&self) -> String {
        let state = if self.closed { "ON" } else { "OFF" };
        state.to_string()
    }

    pub fn tooltip(&self) -> String {
        format!(
            "Switch:\nOpens and closes the circuit\nState: {}",
            self.display_value()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_state_and_resistance() {
        let mut s = Switch::new("S1".to_string(), [NodeId(0), NodeId(1)], false);
        assert!(s.resistance().is_infinite());

        s.toggle();
        assert!(s.closed);
        assert_eq!(s.resistance(), Switch::DEFAULT_CLOSED_RESISTANCE);

        s.set_state(false);
        assert!(!s.closed);
    }
}
