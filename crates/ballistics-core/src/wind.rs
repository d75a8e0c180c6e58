//! Wind field: ordered segments of constant wind indexed by down-range
//! distance.

use crate::cursor::BracketCursor;
use crate::units::{Quantity, Unit};
use crate::vec3::Vec3;

/// One constant-wind segment, valid for down-range distances up to
/// `upper_bound_m`.
#[derive(Debug, Clone, Copy)]
pub struct WindSegment {
    pub upper_bound_m: f64,
    pub speed: Quantity,
    /// Compass bearing the wind is blowing *from*, in the clock convention
    /// used on a range (12 o'clock = headwind, 3 o'clock = right-to-left... )
    /// expressed here directly in degrees, 0 = headwind, 90 = full value
    /// from the left pushing the bullet right.
    pub direction_from_deg: f64,
}

/// An ordered list of wind segments. The last segment's `upper_bound_m` is
/// always `+inf`, enforced at construction.
#[derive(Debug, Clone)]
pub struct Wind {
    segments: Vec<WindSegment>,
}

impl Wind {
    /// Build a wind field from segments ordered by increasing
    /// `upper_bound_m`. The last segment's bound is forced to `+inf`
    /// regardless of what was supplied, so callers can simply describe "and
    /// beyond" with any sentinel value.
    pub fn new(mut segments: Vec<WindSegment>) -> Self {
        if segments.is_empty() {
            segments.push(WindSegment {
                upper_bound_m: f64::INFINITY,
                speed: Quantity::new(0.0, Unit::MetersPerSecond),
                direction_from_deg: 0.0,
            });
        }
        segments.sort_by(|a, b| a.upper_bound_m.partial_cmp(&b.upper_bound_m).unwrap());
        if let Some(last) = segments.last_mut() {
            last.upper_bound_m = f64::INFINITY;
        }
        Self { segments }
    }

    /// A single constant wind for the whole range, the common case.
    pub fn constant(speed: Quantity, direction_from_deg: f64) -> Self {
        Self::new(vec![WindSegment {
            upper_bound_m: f64::INFINITY,
            speed,
            direction_from_deg,
        }])
    }

    pub fn calm() -> Self {
        Self::constant(Quantity::new(0.0, Unit::MetersPerSecond), 0.0)
    }

    fn bounds(&self) -> Vec<f64> {
        self.segments.iter().map(|s| s.upper_bound_m).collect()
    }

    /// Resolve the wind vector at `range_m` into the body frame, given the
    /// shot's azimuth. `direction_from_deg = 0` is a headwind (blows
    /// straight back along -x in body frame), `90` blows from the left
    /// (pushes the bullet toward +z).
    pub fn wind_at(&self, range_m: f64, cursor: &mut BracketCursor) -> Vec3 {
        let bounds = self.bounds();
        let idx = cursor.ceiling(&bounds, range_m);
        let seg = &self.segments[idx];
        let speed = seg.speed.canonical();
        let rad = seg.direction_from_deg.to_radians();
        // A headwind (0 deg) opposes +x (downrange); a wind "from the left"
        // (90 deg) pushes the bullet toward +z.
        Vec3::new(-speed * rad.cos(), 0.0, speed * rad.sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_segment_bound_is_forced_to_infinity() {
        let wind = Wind::new(vec![WindSegment {
            upper_bound_m: 500.0,
            speed: Quantity::new(5.0, Unit::MetersPerSecond),
            direction_from_deg: 90.0,
        }]);
        assert_eq!(wind.segments.last().unwrap().upper_bound_m, f64::INFINITY);
    }

    #[test]
    fn picks_segment_by_range() {
        let wind = Wind::new(vec![
            WindSegment {
                upper_bound_m: 300.0,
                speed: Quantity::new(2.0, Unit::MetersPerSecond),
                direction_from_deg: 90.0,
            },
            WindSegment {
                upper_bound_m: 1000.0,
                speed: Quantity::new(8.0, Unit::MetersPerSecond),
                direction_from_deg: 90.0,
            },
        ]);
        let mut cursor = BracketCursor::new();
        let near = wind.wind_at(100.0, &mut cursor);
        let far = wind.wind_at(600.0, &mut cursor);
        assert!((near.z() - 2.0).abs() < 1e-9);
        assert!((far.z() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn calm_wind_is_zero_vector() {
        let wind = Wind::calm();
        let mut cursor = BracketCursor::new();
        let v = wind.wind_at(100.0, &mut cursor);
        assert_eq!(v, Vec3::ZERO);
    }

    #[test]
    fn crosswind_from_left_pushes_bullet_right() {
        let wind = Wind::constant(Quantity::new(10.0, Unit::MetersPerSecond), 90.0);
        let mut cursor = BracketCursor::new();
        let v = wind.wind_at(100.0, &mut cursor);
        assert!(v.z() > 0.0);
        assert!(v.x().abs() < 1e-9);
    }
}
