//! Engine configuration.
//!
//! A value-type bundle passed into an [`crate::engine::Engine`] at
//! construction. There is no process-wide mutable configuration object:
//! every engine carries its own `Config`, and two engines built from
//! different configs never interfere with each other.

use ballistics_core::units::{Quantity, Unit};

/// The configuration knobs enumerated in the engine's external interface.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Scales the integrator's base step size. `cStepMultiplier`.
    pub step_multiplier: f64,
    /// Terminate the solve once speed drops below this. `cMinimumVelocity`.
    pub minimum_velocity: Quantity,
    /// Terminate once height drops below this (relative to the sight
    /// line). `cMaximumDrop`.
    pub maximum_drop: Quantity,
    /// Terminate once altitude drops below this. `cMinimumAltitude`.
    pub minimum_altitude: Quantity,
    /// Zero solver iteration cap. `cMaxIterations`.
    pub max_iterations: usize,
    /// Zero solver residual convergence tolerance. `cZeroFindingAccuracy`.
    pub zero_finding_accuracy: Quantity,
    /// Gravitational acceleration used by the force model. `cGravityConstant`.
    pub gravity: Quantity,
    /// Hard cap on emitted samples per solve, independent of the
    /// termination conditions above.
    pub max_samples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_multiplier: 1.0,
            minimum_velocity: Quantity::new(50.0, Unit::FeetPerSecond),
            maximum_drop: Quantity::new(-15_000.0, Unit::Foot),
            minimum_altitude: Quantity::new(-1_500.0, Unit::Foot),
            max_iterations: 20,
            zero_finding_accuracy: Quantity::new(0.000_005, Unit::Foot),
            gravity: Quantity::new(32.174_05, Unit::FeetPerSecondSquared),
            max_samples: 1_000_000,
        }
    }
}

impl Config {
    pub fn gravity_mps2(&self) -> f64 {
        self.gravity.canonical()
    }

    pub fn minimum_velocity_mps(&self) -> f64 {
        self.minimum_velocity.canonical()
    }

    pub fn maximum_drop_m(&self) -> f64 {
        self.maximum_drop.canonical()
    }

    pub fn minimum_altitude_m(&self) -> f64 {
        self.minimum_altitude.canonical()
    }

    pub fn zero_finding_accuracy_m(&self) -> f64 {
        self.zero_finding_accuracy.canonical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_gravity_matches_standard_gravity() {
        let config = Config::default();
        assert!((config.gravity_mps2() - 9.806_65).abs() < 1e-3);
    }

    #[test]
    fn default_minimum_velocity_is_about_15_mps() {
        let config = Config::default();
        assert!((config.minimum_velocity_mps() - 15.24).abs() < 0.1);
    }
}
