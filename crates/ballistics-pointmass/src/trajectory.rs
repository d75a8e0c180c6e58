//! The ordered sample sequence an [`crate::engine::Engine`] solve produces,
//! plus its query operations.

use crate::error::BallisticsError;
use crate::sample::{SampleFlags, TrajectorySample};

/// A range interval over which the trajectory stays within a target's
/// vertical extent, centred on a reference range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DangerSpace {
    pub near_m: f64,
    pub far_m: f64,
}

impl DangerSpace {
    pub fn length_m(&self) -> f64 {
        self.far_m - self.near_m
    }
}

/// Headline numbers a consumer usually wants without walking every sample.
#[derive(Debug, Clone, Copy)]
pub struct TrajectorySummary {
    pub time_of_flight_s: f64,
    pub max_range_m: f64,
    pub apex_height_m: f64,
    pub terminal_velocity_mps: f64,
}

/// The immutable record of one engine solve.
#[derive(Debug, Clone)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
}

impl Trajectory {
    pub(crate) fn new(samples: Vec<TrajectorySample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn flagged(&self, flag: SampleFlags) -> impl Iterator<Item = &TrajectorySample> {
        self.samples.iter().filter(move |s| s.flags.contains(flag))
    }

    /// Down-range distances, in ascending order, at which the trajectory
    /// crosses the sight line (ZERO_UP or ZERO_DOWN flagged samples).
    pub fn zero_ranges_m(&self) -> Vec<f64> {
        self.samples
            .iter()
            .filter(|s| s.flags.contains(SampleFlags::ZERO_UP) || s.flags.contains(SampleFlags::ZERO_DOWN))
            .map(|s| s.range_m)
            .collect()
    }

    /// Interpolate the sample at exact time `t`, by bracketing on the two
    /// nearest samples. Returns `None` outside the recorded time range.
    pub fn at_time(&self, t: f64) -> Option<TrajectorySample> {
        self.interpolate_by(t, |s| s.time_s)
    }

    /// Interpolate the sample at exact (horizontal) range `r`. Returns
    /// `None` outside the recorded range.
    pub fn at_range(&self, r: f64) -> Option<TrajectorySample> {
        self.interpolate_by(r, |s| s.range_m)
    }

    fn interpolate_by(&self, key: f64, project: impl Fn(&TrajectorySample) -> f64) -> Option<TrajectorySample> {
        if self.samples.is_empty() {
            return None;
        }
        if key < project(&self.samples[0]) || key > project(self.samples.last().unwrap()) {
            return None;
        }
        let idx = self
            .samples
            .binary_search_by(|s| project(s).partial_cmp(&key).unwrap())
            .unwrap_or_else(|i| i);

        if idx == 0 {
            return Some(self.samples[0]);
        }
        if idx >= self.samples.len() {
            return Some(*self.samples.last().unwrap());
        }
        let a = &self.samples[idx - 1];
        let b = &self.samples[idx];
        let (ka, kb) = (project(a), project(b));
        if (kb - ka).abs() < 1e-12 {
            return Some(*b);
        }
        let t = (key - ka) / (kb - ka);
        Some(TrajectorySample::lerp(a, b, t))
    }

    /// The range interval over which the trajectory stays within
    /// `target_height_m` (centred on the sight line) of `reference_range_m`.
    pub fn danger_space(
        &self,
        target_height_m: f64,
        reference_range_m: f64,
    ) -> Result<DangerSpace, BallisticsError> {
        let half_height = target_height_m / 2.0;
        self.at_range(reference_range_m)
            .ok_or_else(|| BallisticsError::solver_input("reference range is outside the trajectory"))?;

        // The endpoints are where the trajectory itself crosses ±half the
        // target height above the sight line, not where it departs from its
        // own height at the reference range; walk outward from the
        // reference range in both directions until |height above sight
        // line| exceeds half the target height.
        let near = self.walk_to_bound(reference_range_m, 0.0, half_height, -1.0);
        let far = self.walk_to_bound(reference_range_m, 0.0, half_height, 1.0);
        Ok(DangerSpace {
            near_m: near,
            far_m: far,
        })
    }

    fn walk_to_bound(&self, start_range: f64, reference_height: f64, half_height: f64, dir: f64) -> f64 {
        let step = 0.01_f64.copysign(dir);
        let mut range = start_range;
        let min_range = self.samples[0].range_m;
        let max_range = self.samples.last().unwrap().range_m;
        loop {
            let next = range + step;
            if next < min_range || next > max_range {
                return range.clamp(min_range, max_range);
            }
            let Some(s) = self.at_range(next) else {
                return range.clamp(min_range, max_range);
            };
            if (s.height_m - reference_height).abs() > half_height {
                return next;
            }
            range = next;
        }
    }

    pub fn summary(&self) -> TrajectorySummary {
        let last = self.samples.last();
        let apex = self
            .samples
            .iter()
            .map(|s| s.height_m)
            .fold(f64::NEG_INFINITY, f64::max);
        TrajectorySummary {
            time_of_flight_s: last.map(|s| s.time_s).unwrap_or(0.0),
            max_range_m: last.map(|s| s.range_m).unwrap_or(0.0),
            apex_height_m: apex,
            terminal_velocity_mps: last.map(|s| s.speed_mps).unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballistics_core::Vec3;

    fn sample(range_m: f64, time_s: f64, height_m: f64) -> TrajectorySample {
        TrajectorySample {
            time_s,
            range_m,
            slant_distance_m: range_m,
            height_m,
            windage_m: 0.0,
            velocity: Vec3::new(800.0, 0.0, 0.0),
            speed_mps: 800.0,
            mach: 2.3,
            energy_j: 3000.0,
            drop_angle_rad: 0.0,
            windage_angle_rad: 0.0,
            look_distance_m: range_m,
            density_ratio: 1.0,
            drag_mps2: 10.0,
            flags: SampleFlags::NONE,
        }
    }

    #[test]
    fn at_range_interpolates_between_bracketing_samples() {
        let traj = Trajectory::new(vec![sample(0.0, 0.0, 0.0), sample(100.0, 0.1, -1.0)]);
        let s = traj.at_range(50.0).unwrap();
        assert!((s.height_m - (-0.5)).abs() < 1e-9);
        assert!((s.time_s - 0.05).abs() < 1e-9);
    }

    #[test]
    fn at_range_outside_recorded_span_is_none() {
        let traj = Trajectory::new(vec![sample(0.0, 0.0, 0.0), sample(100.0, 0.1, -1.0)]);
        assert!(traj.at_range(200.0).is_none());
    }

    #[test]
    fn danger_space_brackets_the_reference_range() {
        // A trajectory that rises 0.5 m above the sight line and falls 0.5 m
        // below it over a 2000 m span, so the +-9 in (0.2286 m) band around
        // the sight line (not around the trajectory's own height at the
        // reference) is crossed once on either side of the 1000 m reference.
        let samples: Vec<_> = (0..4000)
            .map(|i| {
                let r = i as f64 * 0.5;
                let h = 0.5 * (2.0 * std::f64::consts::PI * r / 2000.0).sin();
                sample(r, r / 800.0, h)
            })
            .collect();
        let traj = Trajectory::new(samples);
        let ds = traj.danger_space(18.0 * 0.0254, 1000.0).unwrap();

        assert!(ds.near_m < 1000.0);
        assert!(ds.far_m > 1000.0);
        assert!(ds.length_m() > 0.0);

        let half_height = 0.2286;
        let near_height = traj.at_range(ds.near_m).unwrap().height_m;
        let far_height = traj.at_range(ds.far_m).unwrap().height_m;
        assert!((near_height.abs() - half_height).abs() < 0.01, "near_height = {near_height}");
        assert!((far_height.abs() - half_height).abs() < 0.01, "far_height = {far_height}");
    }
}
