//! Projectile and its optional spin-stability parameters.

use crate::error::BallisticsError;
use ballistics_core::units::{Quantity, Unit};
use ballistics_core::BracketCursor;
use ballistics_models::DragCurve;
use std::sync::Arc;

/// Reference sectional density, lb/in^2, that a ballistic coefficient is
/// defined relative to: BC = SD_actual / form_factor, with a form factor of
/// 1.0 corresponding to SD = 1 lb/in^2 by the convention the G1/G7 tables
/// were fit under.
const STANDARD_SECTIONAL_DENSITY_LB_PER_IN2: f64 = 1.0;

/// Spin-stability parameters; optional, only meaningful when a caller wants
/// gyroscopic-stability diagnostics alongside the trajectory.
#[derive(Debug, Clone, Copy)]
pub struct SpinParameters {
    /// Barrel twist expressed as distance per turn (e.g. "1 turn in 10 in").
    pub twist_rate: Quantity,
    pub bullet_length: Quantity,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    mass: Quantity,
    diameter: Quantity,
    ballistic_coefficient: f64,
    drag_curve: Arc<DragCurve>,
    spin: Option<SpinParameters>,
}

impl Projectile {
    pub fn new(
        mass: Quantity,
        diameter: Quantity,
        ballistic_coefficient: f64,
        drag_curve: Arc<DragCurve>,
        spin: Option<SpinParameters>,
    ) -> Result<Self, BallisticsError> {
        if mass.canonical() <= 0.0 {
            return Err(BallisticsError::solver_input("projectile mass must be positive"));
        }
        if diameter.canonical() <= 0.0 {
            return Err(BallisticsError::solver_input("projectile diameter must be positive"));
        }
        if ballistic_coefficient <= 0.0 {
            return Err(BallisticsError::solver_input("ballistic coefficient must be positive"));
        }
        Ok(Self {
            mass,
            diameter,
            ballistic_coefficient,
            drag_curve,
            spin,
        })
    }

    pub fn mass(&self) -> Quantity {
        self.mass
    }

    pub fn diameter(&self) -> Quantity {
        self.diameter
    }

    pub fn ballistic_coefficient(&self) -> f64 {
        self.ballistic_coefficient
    }

    pub fn drag_curve(&self) -> &Arc<DragCurve> {
        &self.drag_curve
    }

    pub fn spin(&self) -> Option<SpinParameters> {
        self.spin
    }

    /// Frontal (reference) area, m^2.
    pub fn frontal_area_m2(&self) -> f64 {
        let d = self.diameter.canonical();
        std::f64::consts::PI * 0.25 * d * d
    }

    /// Sectional density of the actual projectile, lb/in^2 (the unit the
    /// ballistic coefficient is conventionally expressed against).
    pub fn actual_sectional_density(&self) -> f64 {
        let mass_lb = self.mass.in_unit(Unit::Pound).unwrap();
        let diameter_in = self.diameter.in_unit(Unit::Inch).unwrap();
        mass_lb / (diameter_in * diameter_in)
    }

    /// `BC * standard_sectional_density / actual_sectional_density`. Scales
    /// the raw reference drag curve to this specific projectile's shape; the
    /// resulting effective Cd already carries the ballistic coefficient, so
    /// the force model applies it against true mass and frontal area rather
    /// than dividing by BC a second time.
    pub fn form_factor(&self) -> f64 {
        self.ballistic_coefficient * STANDARD_SECTIONAL_DENSITY_LB_PER_IN2
            / self.actual_sectional_density()
    }

    /// Effective Cd at the given Mach number: `form_factor * curve(Mach)`.
    pub fn cd_at(&self, mach: f64, cursor: &mut BracketCursor) -> f64 {
        self.form_factor() * self.drag_curve.cd_at(mach, cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballistics_models::StandardTable;

    fn sample_projectile() -> Projectile {
        Projectile::new(
            Quantity::new(168.0, Unit::Grain),
            Quantity::new(0.308, Unit::Inch),
            0.243,
            Arc::new(StandardTable::G1.curve()),
            None,
        )
        .unwrap()
    }

    #[test]
    fn rejects_non_positive_mass() {
        let result = Projectile::new(
            Quantity::new(0.0, Unit::Grain),
            Quantity::new(0.308, Unit::Inch),
            0.243,
            Arc::new(StandardTable::G1.curve()),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn sectional_density_matches_hand_calculation() {
        let proj = sample_projectile();
        let sd = proj.actual_sectional_density();
        // 168 gr / 7000 gr/lb = 0.024 lb; / 0.308in^2 = ~0.253
        assert!((sd - 0.253).abs() < 0.005, "sd = {sd}");
    }

    #[test]
    fn form_factor_is_near_one_for_a_near_standard_bullet() {
        let proj = sample_projectile();
        let ff = proj.form_factor();
        assert!(ff > 0.5 && ff < 2.0, "form_factor = {ff}");
    }

    #[test]
    fn cd_at_scales_raw_curve_by_form_factor() {
        let proj = sample_projectile();
        let mut cursor = BracketCursor::new();
        let raw = proj.drag_curve().cd_at(0.5, &mut cursor);
        let effective = proj.cd_at(0.5, &mut cursor);
        assert!((effective - raw * proj.form_factor()).abs() < 1e-9);
    }
}
