//! Point-mass exterior-ballistics solver.
//!
//! A [`Shot`] (weapon, ammunition, atmosphere, wind, geometry) is advanced by
//! an [`Engine`] picking one [`Stepper`] for the whole solve, producing a
//! [`Trajectory`] of event-flagged [`TrajectorySample`]s. [`ZeroSolver`]
//! finds the barrel elevation that zeroes a shot at its weapon's configured
//! range.

#![forbid(unsafe_code)]

mod config;
mod engine;
mod error;
mod geometry;
mod projectile;
mod registry;
mod sample;
mod shot;
mod stepper;
mod trajectory;
mod zero;

pub use config::Config;
pub use engine::{Engine, SolveRequest};
pub use error::BallisticsError;
pub use geometry::BodyFrame;
pub use projectile::{Projectile, SpinParameters};
pub use registry::EngineRegistry;
pub use sample::{SampleFlags, TrajectorySample};
pub use shot::{Ammunition, Shot, Weapon};
pub use stepper::{Derivative, EulerStepper, Rk4Stepper, State, Stepper, VerletStepper};
pub use trajectory::{DangerSpace, Trajectory, TrajectorySummary};
pub use zero::ZeroSolver;

#[cfg(test)]
mod tests {
    use super::*;
    use ballistics_core::units::{Quantity, Unit};
    use ballistics_core::{Atmosphere, Wind};
    use ballistics_models::StandardTable;
    use std::sync::Arc;

    fn g1_shot() -> Shot {
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
    fn a_zeroed_g1_rifle_crosses_the_sight_line_again_near_its_zero_range() {
        let config = Config::default();
        let engine = Engine::new(Box::new(Rk4Stepper), config);
        let shot = g1_shot();
        let alpha = ZeroSolver::solve(&engine, &shot, engine.config()).unwrap();

        let zero_range_m = shot.weapon().zero_range().canonical();
        let request = SolveRequest::new(alpha, zero_range_m * 1.5, zero_range_m / 100.0);
        let trajectory = engine.solve(&shot, request).unwrap();

        let at_zero = trajectory.at_range(zero_range_m).unwrap();
        assert!(at_zero.height_m.abs() < 0.01, "height at zero = {}", at_zero.height_m);
        assert!(!trajectory.zero_ranges_m().is_empty());
    }

    #[test]
    fn euler_and_rk4_produce_broadly_similar_drop_at_a_fixed_elevation() {
        let config = Config::default();
        let shot = g1_shot();

        let euler_engine = Engine::new(Box::new(EulerStepper), config);
        let rk4_engine = Engine::new(Box::new(Rk4Stepper), config);

        let euler = euler_engine.solve(&shot, SolveRequest::new(0.01, 300.0, 1.0)).unwrap();
        let rk4 = rk4_engine.solve(&shot, SolveRequest::new(0.01, 300.0, 1.0)).unwrap();

        let e = euler.at_range(300.0).unwrap();
        let r = rk4.at_range(300.0).unwrap();
        assert!((e.height_m - r.height_m).abs() < 1.0, "euler={} rk4={}", e.height_m, r.height_m);
    }

    #[test]
    fn cancellation_stops_the_solve_and_returns_the_partial_trajectory() {
        let config = Config::default();
        let engine = Engine::new(Box::new(Rk4Stepper), config);
        let shot = g1_shot();

        let mut count = 0;
        let mut cancel = |_: &Trajectory| {
            count += 1;
            count < 10
        };
        let request = SolveRequest::new(0.01, 2000.0, 1.0).with_cancellation(&mut cancel);
        let err = engine.solve(&shot, request).unwrap_err();
        match err {
            BallisticsError::Cancelled { partial } => assert_eq!(partial.len(), 10),
            other => panic!("expected Cancelled, got {other:?}"),
        }
    }
}
