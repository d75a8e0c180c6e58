//! A single emitted trajectory sample and its event-flag bitmask.

use ballistics_core::Vec3;

/// Bitmask of event categories a sample can be flagged with. Hand-rolled
/// rather than pulled from the `bitflags` crate: an 8-entry set fits
/// comfortably in a `u16` with a handful of `const`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SampleFlags(u16);

impl SampleFlags {
    pub const NONE: SampleFlags = SampleFlags(0);
    pub const ZERO_UP: SampleFlags = SampleFlags(1 << 0);
    pub const ZERO_DOWN: SampleFlags = SampleFlags(1 << 1);
    pub const MACH: SampleFlags = SampleFlags(1 << 2);
    pub const APEX: SampleFlags = SampleFlags(1 << 3);
    pub const RANGE: SampleFlags = SampleFlags(1 << 4);
    pub const MRT: SampleFlags = SampleFlags(1 << 5);
    pub const MAX: SampleFlags = SampleFlags(1 << 6);

    pub fn contains(self, other: SampleFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for SampleFlags {
    type Output = SampleFlags;
    fn bitor(self, rhs: SampleFlags) -> SampleFlags {
        SampleFlags(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for SampleFlags {
    fn bitor_assign(&mut self, rhs: SampleFlags) {
        self.0 |= rhs.0;
    }
}

/// One point on the trajectory, with every derived quantity a caller needs.
#[derive(Debug, Clone, Copy)]
pub struct TrajectorySample {
    pub time_s: f64,
    /// Horizontal downrange distance, m.
    pub range_m: f64,
    /// Straight-line distance from the muzzle, m.
    pub slant_distance_m: f64,
    /// Height above (positive) or below (negative) the sight line, m.
    pub height_m: f64,
    /// Lateral deflection from the vertical plane containing the sight
    /// line, m. Positive = right.
    pub windage_m: f64,
    pub velocity: Vec3,
    pub speed_mps: f64,
    pub mach: f64,
    pub energy_j: f64,
    /// Angle subtended by `height_m` as seen from the muzzle, rad.
    pub drop_angle_rad: f64,
    /// Angle subtended by `windage_m` as seen from the muzzle, rad.
    pub windage_angle_rad: f64,
    /// Distance traveled along the sight line, m.
    pub look_distance_m: f64,
    /// Local air density divided by the ICAO sea-level reference density.
    pub density_ratio: f64,
    /// Drag deceleration magnitude, m/s^2.
    pub drag_mps2: f64,
    pub flags: SampleFlags,
}

impl TrajectorySample {
    /// Linearly interpolate between two samples at parameter `t` in [0, 1].
    pub(crate) fn lerp(a: &TrajectorySample, b: &TrajectorySample, t: f64) -> TrajectorySample {
        let lerp = |x: f64, y: f64| x + t * (y - x);
        TrajectorySample {
            time_s: lerp(a.time_s, b.time_s),
            range_m: lerp(a.range_m, b.range_m),
            slant_distance_m: lerp(a.slant_distance_m, b.slant_distance_m),
            height_m: lerp(a.height_m, b.height_m),
            windage_m: lerp(a.windage_m, b.windage_m),
            velocity: Vec3::new(
                lerp(a.velocity.x(), b.velocity.x()),
                lerp(a.velocity.y(), b.velocity.y()),
                lerp(a.velocity.z(), b.velocity.z()),
            ),
            speed_mps: lerp(a.speed_mps, b.speed_mps),
            mach: lerp(a.mach, b.mach),
            energy_j: lerp(a.energy_j, b.energy_j),
            drop_angle_rad: lerp(a.drop_angle_rad, b.drop_angle_rad),
            windage_angle_rad: lerp(a.windage_angle_rad, b.windage_angle_rad),
            look_distance_m: lerp(a.look_distance_m, b.look_distance_m),
            density_ratio: lerp(a.density_ratio, b.density_ratio),
            drag_mps2: lerp(a.drag_mps2, b.drag_mps2),
            flags: SampleFlags::NONE,
        }
    }
}
