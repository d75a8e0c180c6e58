//! Shot geometry: resolves cant, look angle, and azimuth into the
//! integrator's body frame, with a single fixed rotation order: **cant,
//! then look angle, then azimuth**.
//!
//! The integrator's own x-axis is defined *along the sight line*: a shot
//! fired at zero additional barrel elevation travels along +x forever, so
//! "height above sight line" is just the body-frame y coordinate and the
//! ZERO_UP/ZERO_DOWN monitor is a sign change of y, not a comparison against
//! a separately tracked sight-line height. Azimuth does not bend this frame
//! (it only matters to the Coriolis term, which is evaluated directly
//! against the shot's compass bearing); cant rolls the y/z axes about the
//! sight line, which is what lets a canted rifle turn part of its gravity
//! drop into windage.

use ballistics_core::Vec3;

#[derive(Debug, Clone, Copy)]
pub struct BodyFrame {
    cant_rad: f64,
    look_rad: f64,
}

impl BodyFrame {
    pub fn new(cant_rad: f64, look_rad: f64) -> Self {
        Self { cant_rad, look_rad }
    }

    pub fn cant_rad(&self) -> f64 {
        self.cant_rad
    }

    pub fn look_rad(&self) -> f64 {
        self.look_rad
    }

    /// True gravity (magnitude `g`), rotated into the body frame.
    pub fn gravity_body(&self, g: f64) -> Vec3 {
        let (sl, cl) = self.look_rad.sin_cos();
        let (sc, cc) = self.cant_rad.sin_cos();
        Vec3::new(-g * sl, -g * cl * cc, g * cl * sc)
    }

    /// Initial muzzle velocity in the body frame, given the speed and the
    /// barrel's elevation `alpha_rad` *above the sight line* (i.e. the
    /// angle the zero solver searches over).
    pub fn muzzle_velocity_body(&self, speed_mps: f64, alpha_rad: f64) -> Vec3 {
        Vec3::new(speed_mps * alpha_rad.cos(), speed_mps * alpha_rad.sin(), 0.0)
    }

    /// The sight line's height above itself is identically zero by
    /// construction of this frame; kept as an explicit query so a monitor
    /// function reads the same regardless of which frame convention is in
    /// use.
    pub fn sight_line_height_at(&self, _range_along_sight_line_m: f64) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_cant_has_no_cross_component_from_gravity() {
        let frame = BodyFrame::new(0.0, 5f64.to_radians());
        let g = frame.gravity_body(9.80665);
        assert!(g.z().abs() < 1e-12);
    }

    #[test]
    fn full_cant_turns_gravity_into_pure_windage() {
        let frame = BodyFrame::new(90f64.to_radians(), 0.0);
        let g = frame.gravity_body(9.80665);
        assert!(g.y().abs() < 1e-9);
        assert!(g.z().abs() > 9.0);
    }

    #[test]
    fn uphill_shot_has_forward_deceleration_component() {
        let frame = BodyFrame::new(0.0, 30f64.to_radians());
        let g = frame.gravity_body(9.80665);
        assert!(g.x() < 0.0);
    }
}
