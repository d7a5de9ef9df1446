//! Incandescent bulb with brightness and burnout behavior.

use tracing::info;

use crate::circuit::NodeId;

/// A small incandescent bulb.
///
/// Brightness scales linearly with current up to the burnout threshold.
/// Burnout is terminal: a burned-out bulb stops conducting and stays dark
/// until [`Bulb::reset`] is called explicitly.
#[derive(Debug, Clone)]
pub struct Bulb {
    pub name: String,
    pub nodes: [NodeId; 2],
    /// Filament resistance in ohms.
    pub resistance: f64,
    pub is_on: bool,
    /// Perceived brightness, 0-100.
    pub brightness: f64,
    /// Below this current the filament does not visibly glow (amps).
    pub min_current: f64,
    /// Above this current the filament burns out (amps).
    pub max_current: f64,
    pub burned_out: bool,
}

impl Bulb {
    /// Typical small-bulb filament resistance in ohms.
    pub const DEFAULT_RESISTANCE: f64 = 100.0;
    /// Default glow threshold: 1 mA.
    pub const DEFAULT_MIN_CURRENT: f64 = 0.001;
    /// Default burnout threshold: 200 mA.
    pub const DEFAULT_MAX_CURRENT: f64 = 0.2;

    /// Create a new bulb. Non-positive resistances fall back to the default.
    pub fn new(name: String, nodes: [NodeId; 2], resistance: f64) -> Self {
        let resistance = if resistance > 0.0 {
            resistance
        } else {
            Self::DEFAULT_RESISTANCE
        };
        Self {
            name,
            nodes,
            resistance,
            is_on: false,
            brightness: 0.0,
            min_current: Self::DEFAULT_MIN_CURRENT,
            max_current: Self::DEFAULT_MAX_CURRENT,
            burned_out: false,
        }
    }

    /// Resistance presented to the solver: infinite once burned out.
    pub fn resistance(&self) -> f64 {
        if self.burned_out {
            f64::INFINITY
        } else {
            self.resistance
        }
    }

    /// Recompute glow state from the magnitude of the branch current.
    ///
    /// Exceeding `max_current` burns the bulb out; below `min_current` the
    /// bulb is off; otherwise brightness is `current / max_current`, capped
    /// at 100.
    pub fn update(&mut self, current: f64) {
        if self.burned_out {
            self.is_on = false;
            self.brightness = 0.0;
            return;
        }

        if current > self.max_current {
            self.burn_out();
        } else if current < self.min_current {
            self.is_on = false;
            self.brightness = 0.0;
        } else {
            self.is_on = true;
            self.brightness = (current / self.max_current * 100.0).min(100.0);
        }
    }

    /// Burn the filament out. Irreversible until [`Bulb::reset`].
    pub fn burn_out(&mut self) {
        self.burned_out = true;
        self.is_on = false;
        self.brightness = 0.0;
        info!(bulb = %self.name, "bulb burned out");
    }

    /// Replace the filament: clears burnout and turns the bulb off.
    pub fn reset(&mut self) {
        self.burned_out = false;
        self.is_on = false;
        self.brightness = 0.0;
    }

    pub fn turn_on(&mut self) {
        if !self.burned_out {
            self.is_on = true;
        }
    }

    pub fn turn_off(&mut self) {
        self.is_on = false;
        self.brightness = 0.0;
    }

    pub fn display_value(&self) -> String {
        if self.burned_out {
            "burned out".to_string()
        } else if self.is_on {
            format!("{:.0}%", self.brightness)
        } else {
            "off".to_string()
        }
    }

    pub fn tooltip(&self) -> String {
        format!(
            "Bulb:\nGlows when current flows\nResistance: {} \u{3a9}\nState: {}",
            self.resistance,
            self.display_value()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulb() -> Bulb {
        Bulb::new("L1".to_string(), [NodeId(0), NodeId(1)], 100.0)
    }

    #[test]
    fn brightness_scales_with_current() {
        let mut b = bulb();
        b.update(0.1);
        assert!(b.is_on);
        assert!((b.brightness - 50.0).abs() < 1e-9);

        b.update(0.2);
        assert!((b.brightness - 100.0).abs() < 1e-9);
    }

    #[test]
    fn below_min_current_stays_dark() {
        let mut b = bulb();
        b.update(0.0005);
        assert!(!b.is_on);
        assert_eq!(b.brightness, 0.0);
    }

    #[test]
    fn overcurrent_burns_out_until_reset() {
        let mut b = bulb();
        b.update(0.25);
        assert!(b.burned_out);
        assert!(!b.is_on);
        assert!(b.resistance().is_infinite());

        // Burnout sticks even at a safe current
        b.update(0.05);
        assert!(b.burned_out);
        assert!(!b.is_on);

        b.reset();
        assert!(!b.burned_out);
        b.update(0.05);
        assert!(b.is_on);
    }
}
