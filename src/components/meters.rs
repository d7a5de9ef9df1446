//! Measurement instruments: Ammeter and Voltmeter.
//!
//! Both follow the textbook model. The ammeter sits in series and conducts
//! like a wire through a near-zero shunt resistance, so it is stamped into
//! the conductance network and carries real current. The voltmeter presents
//! an effectively infinite resistance: it is never stamped and draws no
//! current; its reading is taken from the solved node-voltage difference
//! across its terminals.

use crate::circuit::NodeId;

/// Round to three decimal places.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// A series current meter.
#[derive(Debug, Clone)]
pub struct Ammeter {
    pub name: String,
    pub nodes: [NodeId; 2],
    /// Latest reading. Values at or above 1 mA are in amps; smaller readings
    /// are rescaled to milliamps so the display keeps meaningful digits.
    pub measurement: f64,
    pub is_connected: bool,
}

impl Ammeter {
    /// Shunt resistance in ohms.
    pub const RESISTANCE: f64 = 0.01;

    /// Create a new ammeter.
    pub fn new(name: String, nodes: [NodeId; 2]) -> Self {
        Self {
            name,
            nodes,
            measurement: 0.0,
            is_connected: false,
        }
    }

    pub fn resistance(&self) -> f64 {
        Self::RESISTANCE
    }

    /// Latch a new current reading (sign is discarded).
    pub fn update(&mut self, current: f64) -> f64 {
        let magnitude = current.abs();
        self.measurement = if magnitude < 0.001 {
            // Sub-milliamp readings are kept in milliamps
            round3(magnitude * 1000.0)
        } else {
            round3(magnitude)
        };
        self.measurement
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.is_connected = connected;
        if !connected {
            self.measurement = 0.0;
        }
    }

    pub fn display_value(&self) -> String {
        if !self.is_connected {
            return "-- A".to_string();
        }
        if self.measurement < 0.001 {
            format!("{:.2} mA", self.measurement * 1000.0)
        } else {
            format!("{:.3} A", self.measurement)
        }
    }

    pub fn tooltip(&self) -> String {
        format!(
            "Ammeter:\nMeasures current in series\nShunt resistance: {} \u{3a9}\nReading: {}",
            Self::RESISTANCE,
            self.display_value()
        )
    }
}

/// A parallel voltage meter.
#[derive(Debug, Clone)]
pub struct Voltmeter {
    pub name: String,
    pub nodes: [NodeId; 2],
    /// Nominal input resistance in ohms, shown in tooltips. The solver
    /// treats the meter as a true open branch regardless.
    pub input_resistance: f64,
    /// Latest reading in volts, rounded to three decimals.
    pub measurement: f64,
    pub is_connected: bool,
}

impl Voltmeter {
    /// Nominal input resistance: 1 megaohm.
    pub const INPUT_RESISTANCE: f64 = 1e6;

    /// Create a new voltmeter.
    pub fn new(name: String, nodes: [NodeId; 2]) -> Self {
        Self {
            name,
            nodes,
            input_resistance: Self::INPUT_RESISTANCE,
            measurement: 0.0,
            is_connected: false,
        }
    }

    /// Latch a new voltage reading (sign is discarded).
    pub fn update(&mut self, voltage: f64) -> f64 {
        self.measurement = round3(voltage.abs());
        self.measurement
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.is_connected = connected;
        if !connected {
            self.measurement = 0.0;
        }
    }

    pub fn display_value(&self) -> String {
        if self.is_connected {
            format!("{:.2} V", self.measurement)
        } else {
            "-- V".to_string()
        }
    }

    pub fn tooltip(&self) -> String {
        format!(
            "Voltmeter:\nMeasures voltage between two points\nInput resistance: {} \u{3a9}\nReading: {}",
            self.input_resistance,
            self.display_value()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ammeter_rounds_and_rescales() {
        let mut a = Ammeter::new("A1".to_string(), [NodeId(0), NodeId(1)]);

        // 89.1 mA reads in amps, three decimals
        assert_eq!(a.update(0.0891234), 0.089);

        // 0.5 mA is rescaled to milliamps
        assert_eq!(a.update(0.0005), 0.5);

        // Sign is discarded
        assert_eq!(a.update(-0.05), 0.05);
    }

    #[test]
    fn voltmeter_rounds_to_millivolts() {
        let mut v = Voltmeter::new("V1".to_string(), [NodeId(0), NodeId(1)]);
        assert_eq!(v.update(8.91089), 8.911);
        assert_eq!(v.update(-2.0), 2.0);
    }

    #[test]
    fn disconnecting_clears_reading() {
        let mut v = Voltmeter::new("V1".to_string(), [NodeId(0), NodeId(1)]);
        v.set_connected(true);
        v.update(5.0);
        assert_eq!(v.display_value(), "5.00 V");

        v.set_connected(false);
        assert_eq!(v.measurement, 0.0);
        assert_eq!(v.display_value(), "-- V");
    }
}
