//! The aggregate describing a single shot to be solved: weapon, ammunition,
//! and the atmospheric/geometric conditions it is fired under.

use std::cell::Cell;
use std::f64::consts::FRAC_PI_2;
use std::sync::Arc;

use ballistics_core::units::Quantity;
#[cfg(test)]
use ballistics_core::units::Unit;
use ballistics_core::{Atmosphere, Wind};

use crate::error::BallisticsError;
use crate::projectile::Projectile;

/// The ammunition half of a shot: the projectile plus its muzzle velocity.
#[derive(Debug, Clone)]
pub struct Ammunition {
    projectile: Projectile,
    muzzle_velocity: Quantity,
}

impl Ammunition {
    pub fn new(projectile: Projectile, muzzle_velocity: Quantity) -> Result<Self, BallisticsError> {
        if muzzle_velocity.canonical() <= 0.0 {
            return Err(BallisticsError::solver_input("muzzle velocity must be positive"));
        }
        Ok(Self {
            projectile,
            muzzle_velocity,
        })
    }

    pub fn projectile(&self) -> &Projectile {
        &self.projectile
    }

    pub fn muzzle_velocity(&self) -> Quantity {
        self.muzzle_velocity
    }

    pub fn muzzle_velocity_mps(&self) -> f64 {
        self.muzzle_velocity.canonical()
    }
}

/// The weapon half of a shot: sight height above bore and the elevation it
/// is zeroed for. `zero_elevation` is cached lazily and per-weapon, since a
/// zero solve is only ever a function of the weapon/ammunition/atmosphere
/// triple, not of any individual shot.
#[derive(Debug)]
pub struct Weapon {
    sight_height: Quantity,
    sight_offset: Quantity,
    zero_range: Quantity,
    zero_elevation_rad: Cell<Option<f64>>,
}

impl Weapon {
    pub fn new(sight_height: Quantity, sight_offset: Quantity, zero_range: Quantity) -> Self {
        Self {
            sight_height,
            sight_offset,
            zero_range,
            zero_elevation_rad: Cell::new(None),
        }
    }

    pub fn sight_height(&self) -> Quantity {
        self.sight_height
    }

    pub fn sight_offset(&self) -> Quantity {
        self.sight_offset
    }

    pub fn zero_range(&self) -> Quantity {
        self.zero_range
    }

    pub fn cached_zero_elevation_rad(&self) -> Option<f64> {
        self.zero_elevation_rad.get()
    }

    pub fn cache_zero_elevation_rad(&self, alpha_rad: f64) {
        self.zero_elevation_rad.set(Some(alpha_rad));
    }

    pub fn invalidate_zero_cache(&self) {
        self.zero_elevation_rad.set(None);
    }
}

/// A fully specified shot: what's fired, from what, into what conditions,
/// and along what line of sight.
#[derive(Debug, Clone)]
pub struct Shot {
    weapon: Arc<Weapon>,
    ammunition: Arc<Ammunition>,
    atmosphere: Atmosphere,
    wind: Wind,
    /// Barrel elevation above the sight line, radians. Set by the caller for
    /// a direct solve, or overwritten with the zero solver's result.
    look_angle_rad: f64,
    cant_rad: f64,
    azimuth_rad: f64,
    latitude_rad: f64,
}

impl Shot {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        weapon: Arc<Weapon>,
        ammunition: Arc<Ammunition>,
        atmosphere: Atmosphere,
        wind: Wind,
        look_angle_rad: f64,
        cant_rad: f64,
        azimuth_rad: f64,
        latitude_rad: f64,
    ) -> Result<Self, BallisticsError> {
        if !(-FRAC_PI_2..FRAC_PI_2).contains(&look_angle_rad) {
            return Err(BallisticsError::solver_input(
                "look angle must lie strictly between -90 and 90 degrees",
            ));
        }
        Ok(Self {
            weapon,
            ammunition,
            atmosphere,
            wind,
            look_angle_rad,
            cant_rad,
            azimuth_rad,
            latitude_rad,
        })
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn ammunition(&self) -> &Ammunition {
        &self.ammunition
    }

    pub fn atmosphere(&self) -> &Atmosphere {
        &self.atmosphere
    }

    pub fn wind(&self) -> &Wind {
        &self.wind
    }

    pub fn look_angle_rad(&self) -> f64 {
        self.look_angle_rad
    }

    pub fn cant_rad(&self) -> f64 {
        self.cant_rad
    }

    pub fn azimuth_rad(&self) -> f64 {
        self.azimuth_rad
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_rad
    }

    /// A copy of this shot fired at a different barrel elevation; used by
    /// the zero solver to try successive brackets without rebuilding the
    /// rest of the shot.
    pub fn with_look_angle_rad(&self, look_angle_rad: f64) -> Result<Shot, BallisticsError> {
        let mut shot = self.clone();
        if !(-FRAC_PI_2..FRAC_PI_2).contains(&look_angle_rad) {
            return Err(BallisticsError::solver_input(
                "look angle must lie strictly between -90 and 90 degrees",
            ));
        }
        shot.look_angle_rad = look_angle_rad;
        Ok(shot)
    }

    pub fn sight_height_m(&self) -> f64 {
        self.weapon.sight_height.canonical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballistics_core::BracketCursor;
    use ballistics_models::StandardTable;

    fn ammo() -> Arc<Ammunition> {
        let proj = Projectile::new(
            Quantity::new(168.0, Unit::Grain),
            Quantity::new(0.308, Unit::Inch),
            0.243,
            Arc::new(StandardTable::G1.curve()),
            None,
        )
        .unwrap();
        Arc::new(Ammunition::new(proj, Quantity::new(2600.0, Unit::FeetPerSecond)).unwrap())
    }

    fn weapon() -> Arc<Weapon> {
        Arc::new(Weapon::new(
            Quantity::new(1.5, Unit::Inch),
            Quantity::new(0.0, Unit::Inch),
            Quantity::new(100.0, Unit::Yard),
        ))
    }

    #[test]
    fn rejects_zero_muzzle_velocity() {
        let proj = Projectile::new(
            Quantity::new(168.0, Unit::Grain),
            Quantity::new(0.308, Unit::Inch),
            0.243,
            Arc::new(StandardTable::G1.curve()),
            None,
        )
        .unwrap();
        let result = Ammunition::new(proj, Quantity::new(0.0, Unit::FeetPerSecond));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_look_angle_at_or_past_vertical() {
        let result = Shot::new(
            weapon(),
            ammo(),
            Atmosphere::icao_standard(),
            Wind::calm(),
            FRAC_PI_2,
            0.0,
            0.0,
            0.0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn zero_cache_round_trips() {
        let w = weapon();
        assert!(w.cached_zero_elevation_rad().is_none());
        w.cache_zero_elevation_rad(0.001);
        assert_eq!(w.cached_zero_elevation_rad(), Some(0.001));
        w.invalidate_zero_cache();
        assert!(w.cached_zero_elevation_rad().is_none());
    }

    #[test]
    fn with_look_angle_rad_produces_an_independent_shot() {
        let shot = Shot::new(weapon(), ammo(), Atmosphere::icao_standard(), Wind::calm(), 0.0, 0.0, 0.0, 0.0).unwrap();
        let steeper = shot.with_look_angle_rad(0.01).unwrap();
        assert!((shot.look_angle_rad() - 0.0).abs() < 1e-12);
        assert!((steeper.look_angle_rad() - 0.01).abs() < 1e-12);
        let mut cursor = BracketCursor::new();
        let _ = shot.ammunition().projectile().cd_at(1.0, &mut cursor);
    }
}
