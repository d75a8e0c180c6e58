//! Coriolis deflection helper.
//!
//! Expresses the Earth's angular velocity in the integrator's local frame
//! (x forward along the shot's azimuth, y up, z right) and returns the
//! resulting apparent acceleration `-2 * Omega x v`.

use crate::vec3::Vec3;

/// Earth's angular rotation rate, rad/s.
const EARTH_OMEGA: f64 = 7.292_115e-5;

/// Coriolis acceleration for a projectile moving with velocity `v` (in the
/// local forward/up/right frame) fired on a bearing of `azimuth_rad`
/// (clockwise from north) at `latitude_rad` (positive north).
pub fn coriolis_acceleration(latitude_rad: f64, azimuth_rad: f64, v: Vec3) -> Vec3 {
    let omega = Vec3::new(
        EARTH_OMEGA * latitude_rad.cos() * azimuth_rad.cos(),
        EARTH_OMEGA * latitude_rad.sin(),
        -EARTH_OMEGA * latitude_rad.cos() * azimuth_rad.sin(),
    );
    omega.cross(&v) * -2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_latitude_and_azimuth_still_deflects_crossrange() {
        let v = Vec3::new(800.0, 0.0, 0.0);
        let a = coriolis_acceleration(0.0, 0.0, v);
        // At the equator firing due north, Coriolis still acts on a moving
        // projectile via the vertical component of Earth's rotation.
        assert!(a.norm() > 0.0);
    }

    #[test]
    fn stationary_projectile_has_no_coriolis_acceleration() {
        let a = coriolis_acceleration(45f64.to_radians(), 30f64.to_radians(), Vec3::ZERO);
        assert_eq!(a, Vec3::ZERO);
    }

    #[test]
    fn scales_linearly_with_speed() {
        let v1 = Vec3::new(100.0, 0.0, 0.0);
        let v2 = Vec3::new(300.0, 0.0, 0.0);
        let a1 = coriolis_acceleration(40f64.to_radians(), 90f64.to_radians(), v1);
        let a2 = coriolis_acceleration(40f64.to_radians(), 90f64.to_radians(), v2);
        assert!((a2.norm() - 3.0 * a1.norm()).abs() < 1e-12);
    }
}
