//! Solves for the barrel elevation that puts the trajectory back on the
//! sight line at the weapon's zero range.
//!
//! Brackets outward from an initial 30 mrad guess (doubling up to 60
//! degrees), then narrows with a secant step per iteration, falling back to
//! bisection whenever the secant step would leave the current bracket.

use crate::config::Config;
use crate::engine::{Engine, SolveRequest};
use crate::error::BallisticsError;
use crate::shot::Shot;

const INITIAL_BRACKET_RAD: f64 = 0.030;
const MAX_BRACKET_RAD: f64 = 60.0 * std::f64::consts::PI / 180.0;
const ANGLE_CONVERGENCE_RAD: f64 = 1e-6;

pub struct ZeroSolver;

impl ZeroSolver {
    /// Solve for the barrel elevation, in radians above the sight line, that
    /// zeroes `shot` at its weapon's configured zero range. Caches the
    /// result on `shot.weapon()` on success.
    pub fn solve(engine: &Engine, shot: &Shot, config: &Config) -> Result<f64, BallisticsError> {
        let zero_range_m = shot.weapon().zero_range().canonical();

        let mut lo = 0.0_f64;
        let mut hi = INITIAL_BRACKET_RAD;
        let mut f_lo = height_at_zero_range(engine, shot, lo, zero_range_m)?;
        let mut f_hi = height_at_zero_range(engine, shot, hi, zero_range_m)?;

        let mut expansions = 0usize;
        while same_sign(f_lo, f_hi) && hi < MAX_BRACKET_RAD && expansions < config.max_iterations {
            hi = (hi * 2.0).min(MAX_BRACKET_RAD);
            f_hi = height_at_zero_range(engine, shot, hi, zero_range_m)?;
            expansions += 1;
        }
        if same_sign(f_lo, f_hi) {
            return Err(BallisticsError::ZeroFinding {
                last_alpha_rad: hi,
                residual_m: f_hi,
                iterations: expansions,
            });
        }

        let mut alpha = hi;
        for iteration in 0..config.max_iterations {
            let denom = f_hi - f_lo;
            let secant_alpha = if denom.abs() > 1e-12 {
                hi - f_hi * (hi - lo) / denom
            } else {
                0.5 * (lo + hi)
            };
            let previous_alpha = alpha;
            alpha = if secant_alpha > lo && secant_alpha < hi {
                secant_alpha
            } else {
                0.5 * (lo + hi)
            };

            let f_alpha = height_at_zero_range(engine, shot, alpha, zero_range_m)?;
            let converged_on_height = f_alpha.abs() <= config.zero_finding_accuracy_m();
            let converged_on_angle = (alpha - previous_alpha).abs() <= ANGLE_CONVERGENCE_RAD;
            if converged_on_height || converged_on_angle {
                shot.weapon().cache_zero_elevation_rad(alpha);
                return Ok(alpha);
            }
            if same_sign(f_alpha, f_lo) {
                lo = alpha;
                f_lo = f_alpha;
            } else {
                hi = alpha;
                f_hi = f_alpha;
            }
            let _ = iteration;
        }

        Err(BallisticsError::ZeroFinding {
            last_alpha_rad: alpha,
            residual_m: f_hi,
            iterations: config.max_iterations,
        })
    }
}

fn same_sign(a: f64, b: f64) -> bool {
    a == 0.0 || b == 0.0 || a.signum() == b.signum()
}

fn height_at_zero_range(engine: &Engine, shot: &Shot, alpha_rad: f64, zero_range_m: f64) -> Result<f64, BallisticsError> {
    let spacing = (zero_range_m / 100.0).max(0.1);
    let request = SolveRequest::new(alpha_rad, zero_range_m * 1.01, spacing);
    let trajectory = engine.solve(shot, request)?;
    trajectory
        .at_range(zero_range_m)
        .map(|s| s.height_m)
        .ok_or_else(|| BallisticsError::solver_input("zero range was not reached during bracketing"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projectile::Projectile;
    use crate::shot::{Ammunition, Weapon};
    use crate::stepper::Rk4Stepper;
    use ballistics_core::units::{Quantity, Unit};
    use ballistics_core::{Atmosphere, Wind};
    use ballistics_models::StandardTable;
    use std::sync::Arc;

    fn flat_shot() -> Shot {
        let projectile = Projectile::new(
            Quantity::new(168.0, Unit::Grain),
            Quantity::new(0.308, Unit::Inch),
            0.243,
            Arc::new(StandardTable::G1.curve()),
            None,
        )
        .unwrap();
        let ammo = Arc::new(Ammunition::new(projectile, Quantity::new(2600.0, Unit::FeetPerSecond)).unwrap());
        let weapon = Arc::new(Weapon::new(
            Quantity::new(1.5, Unit::Inch),
            Quantity::new(0.0, Unit::Inch),
            Quantity::new(100.0, Unit::Yard),
        ));
        Shot::new(weapon, ammo, Atmosphere::icao_standard(), Wind::calm(), 0.0, 0.0, 0.0, 0.0).unwrap()
    }

    #[test]
    fn converges_within_the_configured_iteration_budget() {
        let engine = Engine::new(Box::new(Rk4Stepper), Config::default());
        let shot = flat_shot();
        let alpha = ZeroSolver::solve(&engine, &shot, engine.config()).unwrap();
        assert!(alpha > 0.0);
        assert!(alpha < INITIAL_BRACKET_RAD * 4.0);
        assert!(shot.weapon().cached_zero_elevation_rad().is_some());
    }

    #[test]
    fn converges_on_angle_even_when_the_height_residual_never_tightens() {
        // An unreachable height tolerance forces every iteration to miss the
        // height criterion, so only the `|delta alpha| <= 1e-6` fallback can
        // terminate the search before the iteration budget is exhausted.
        let mut config = Config::default();
        config.zero_finding_accuracy = Quantity::new(0.0, Unit::Foot);
        let engine = Engine::new(Box::new(Rk4Stepper), config);
        let shot = flat_shot();
        let alpha = ZeroSolver::solve(&engine, &shot, engine.config()).unwrap();
        assert!(alpha > 0.0);
    }
}
