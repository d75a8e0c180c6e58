//! [`DragCurve`]: an ordered Mach -> Cd table with cached-bracket lookup.

use ballistics_core::BracketCursor;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Errors raised building or using a [`DragCurve`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DragCurveError {
    #[error("drag curve must have at least one (Mach, Cd) sample")]
    Empty,
    #[error("drag curve's first Mach sample must be 0.0, got {0}")]
    DoesNotStartAtZero(f64),
    #[error("drag curve Mach samples must be strictly increasing; {0} is not less than {1}")]
    NotStrictlyIncreasing(f64, f64),
    #[error("drag curve Mach samples must be non-negative, got {0}")]
    NegativeMach(f64),
}

/// What to do when a queried Mach number falls outside the curve's domain.
/// Chosen once at `Engine` construction and applied uniformly for the
/// lifetime of a solve, rather than guessed per-query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
pub enum CdClampPolicy {
    /// Silently clamp to the boundary sample's Cd.
    Clamp,
    /// Clamp, but the caller can inspect [`DragCurve::cd_at_checked`]'s
    /// return to decide whether to log a warning.
    WarnAndClamp,
}

/// An immutable, ordered sequence of (Mach, Cd) samples. Mach is strictly
/// increasing and starts at zero; lookups outside the table extrapolate as
/// the boundary value rather than failing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
pub struct DragCurve {
    samples: Vec<(f64, f64)>,
}

impl DragCurve {
    /// Build a curve from an ordered sequence of (Mach, Cd) pairs.
    pub fn new(samples: Vec<(f64, f64)>) -> Result<Self, DragCurveError> {
        let first = samples.first().ok_or(DragCurveError::Empty)?;
        if first.0 != 0.0 {
            return Err(DragCurveError::DoesNotStartAtZero(first.0));
        }
        for pair in samples.windows(2) {
            let (m0, _) = pair[0];
            let (m1, _) = pair[1];
            if m1 < 0.0 {
                return Err(DragCurveError::NegativeMach(m1));
            }
            if m1 <= m0 {
                return Err(DragCurveError::NotStrictlyIncreasing(m1, m0));
            }
        }
        Ok(Self { samples })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn max_mach(&self) -> f64 {
        self.samples.last().map(|(m, _)| *m).unwrap_or(0.0)
    }

    pub fn min_cd(&self) -> f64 {
        self.samples
            .iter()
            .map(|(_, cd)| *cd)
            .fold(f64::INFINITY, f64::min)
    }

    pub fn max_cd(&self) -> f64 {
        self.samples
            .iter()
            .map(|(_, cd)| *cd)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    fn machs(&self) -> Vec<f64> {
        self.samples.iter().map(|(m, _)| *m).collect()
    }

    /// Look up Cd at `mach`, using and updating `cursor` to exploit the
    /// monotonic Mach descent typical of a single shot. Returns
    /// `(cd, extrapolated)`, where `extrapolated` is true if `mach` fell
    /// outside `[0, max_mach]`.
    pub fn cd_at_checked(&self, mach: f64, cursor: &mut BracketCursor) -> (f64, bool) {
        let machs = self.machs();
        let mach = mach.max(0.0);

        if mach >= self.max_mach() {
            return (self.samples.last().unwrap().1, mach > self.max_mach());
        }

        let idx = cursor.bracket(&machs, mach);
        let (m0, cd0) = self.samples[idx];
        if idx + 1 >= self.samples.len() {
            return (cd0, false);
        }
        let (m1, cd1) = self.samples[idx + 1];
        let t = (mach - m0) / (m1 - m0);
        (cd0 + t * (cd1 - cd0), false)
    }

    /// Convenience wrapper around [`DragCurve::cd_at_checked`] that discards
    /// the extrapolation flag.
    pub fn cd_at(&self, mach: f64, cursor: &mut BracketCursor) -> f64 {
        self.cd_at_checked(mach, cursor).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_curve() {
        assert_eq!(DragCurve::new(vec![]), Err(DragCurveError::Empty));
    }

    #[test]
    fn rejects_curve_not_starting_at_zero() {
        let err = DragCurve::new(vec![(0.1, 0.3), (1.0, 0.5)]).unwrap_err();
        assert_eq!(err, DragCurveError::DoesNotStartAtZero(0.1));
    }

    #[test]
    fn rejects_non_monotonic_curve() {
        let err = DragCurve::new(vec![(0.0, 0.3), (1.0, 0.5), (0.5, 0.4)]).unwrap_err();
        assert_eq!(err, DragCurveError::NotStrictlyIncreasing(0.5, 1.0));
    }

    #[test]
    fn interpolates_linearly_inside_a_bracket() {
        let curve = DragCurve::new(vec![(0.0, 0.2), (1.0, 0.4), (2.0, 0.3)]).unwrap();
        let mut cursor = BracketCursor::new();
        let cd = curve.cd_at(0.5, &mut cursor);
        assert!((cd - 0.3).abs() < 1e-12);
    }

    #[test]
    fn extrapolates_as_boundary_value_above_max_mach() {
        let curve = DragCurve::new(vec![(0.0, 0.2), (1.0, 0.4)]).unwrap();
        let mut cursor = BracketCursor::new();
        let (cd, extrapolated) = curve.cd_at_checked(5.0, &mut cursor);
        assert_eq!(cd, 0.4);
        assert!(extrapolated);
    }

    #[test]
    fn cd_stays_within_curve_bounds_across_domain() {
        let curve = DragCurve::new(vec![(0.0, 0.2), (0.8, 0.25), (1.0, 0.5), (2.0, 0.3)]).unwrap();
        let mut cursor = BracketCursor::new();
        for i in 0..=40 {
            let mach = i as f64 * 0.1;
            let cd = curve.cd_at(mach, &mut cursor);
            assert!(cd >= curve.min_cd() - 1e-12 && cd <= curve.max_cd() + 1e-12);
        }
    }

    #[test]
    fn cursor_amortizes_during_monotonic_descent() {
        let curve = DragCurve::new(vec![(0.0, 0.2), (0.5, 0.3), (1.0, 0.5), (2.0, 0.3), (3.0, 0.25)])
            .unwrap();
        let mut cursor = BracketCursor::new();
        let mut mach = 2.9;
        while mach > 0.0 {
            curve.cd_at(mach, &mut cursor);
            mach -= 0.1;
        }
    }
}
