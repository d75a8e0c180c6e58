//! The integrator core: advances a [`Shot`] along its trajectory, detecting
//! zero crossings, apex, Mach transitions, and range/termination events
//! along the way.

use std::cell::RefCell;

use ballistics_core::{coriolis_acceleration, AtmosphereModel, BracketCursor, Vec3};

use crate::config::Config;
use crate::error::BallisticsError;
use crate::geometry::BodyFrame;
use crate::sample::{SampleFlags, TrajectorySample};
use crate::shot::Shot;
use crate::stepper::{Derivative, State, Stepper};
use crate::trajectory::Trajectory;

/// ICAO sea-level reference density, kg/m^3; `density_ratio_at` is already
/// expressed against it, so the force model multiplies back by it once.
const RHO0: f64 = 1.225;

/// How precisely a refined event (zero crossing, apex, Mach transition) is
/// localized in time, as a fraction of the triggering step's `dt`. Fixed
/// rather than driven by `Config::zero_finding_accuracy`, which bounds the
/// *zero solver*'s angle search, not the integrator's own event timing.
const EVENT_BISECTION_ITERATIONS: u32 = 30;

/// What a single `solve` was asked to do.
pub struct SolveRequest<'a> {
    /// Barrel elevation above the sight line, radians. A direct solve fixes
    /// this; the zero solver varies it across repeated solves.
    pub barrel_elevation_rad: f64,
    pub target_range_m: f64,
    /// Spacing, in meters of downrange travel, at which the base step size
    /// is chosen. Finer spacing costs more samples for smoother output.
    pub sample_spacing_m: f64,
    /// Consulted once per emitted sample; returning `false` cancels the
    /// solve cooperatively, returning the partial trajectory so far.
    pub should_continue: Option<&'a mut dyn FnMut(&Trajectory) -> bool>,
}

impl<'a> SolveRequest<'a> {
    pub fn new(barrel_elevation_rad: f64, target_range_m: f64, sample_spacing_m: f64) -> Self {
        Self {
            barrel_elevation_rad,
            target_range_m,
            sample_spacing_m,
            should_continue: None,
        }
    }

    pub fn with_cancellation(mut self, cb: &'a mut dyn FnMut(&Trajectory) -> bool) -> Self {
        self.should_continue = Some(cb);
        self
    }
}

/// Couples one [`Stepper`] with a [`Config`]; the stepper is chosen once per
/// solve rather than switched mid-flight.
#[derive(Debug)]
pub struct Engine {
    stepper: Box<dyn Stepper>,
    config: Config,
}

impl Engine {
    pub fn new(stepper: Box<dyn Stepper>, config: Config) -> Self {
        Self { stepper, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stepper_name(&self) -> &'static str {
        self.stepper.name()
    }

    pub fn solve(&self, shot: &Shot, mut request: SolveRequest<'_>) -> Result<Trajectory, BallisticsError> {
        let frame = BodyFrame::new(shot.cant_rad(), shot.look_angle_rad());
        let projectile = shot.ammunition().projectile();
        let mass_kg = projectile.mass().in_unit(ballistics_core::units::Unit::Kilogram).unwrap();
        let frontal_area_m2 = projectile.frontal_area_m2();
        let gravity_body = frame.gravity_body(self.config.gravity_mps2());

        // Shared via `RefCell` rather than threaded as `&mut` parameters: the
        // derivative function, the Mach observer, and the sample emitter all
        // need to advance the same cursors, but are invoked from inside each
        // other (stepper stages, bisection probes) in ways the borrow
        // checker can't statically prove are non-overlapping. The cursors
        // are a lookup-speed cache, not part of any public state, so
        // interior mutability here carries no aliasing hazard.
        let drag_cursor = RefCell::new(BracketCursor::new());
        let wind_cursor = RefCell::new(BracketCursor::new());

        let muzzle_mps = shot.ammunition().muzzle_velocity_mps();
        let sight_height_m = shot.sight_height_m();

        let derivative_fn = |s: &State| -> Derivative {
            let altitude_offset = s.position.y();
            let density_ratio = shot.atmosphere().density_ratio_at(altitude_offset);
            let speed_of_sound = shot.atmosphere().speed_of_sound_at(altitude_offset);
            let wind = shot.wind().wind_at(s.position.x(), &mut wind_cursor.borrow_mut());
            let relative = s.velocity - wind;
            let speed_rel = relative.norm();
            let mach = if speed_of_sound > 0.0 { speed_rel / speed_of_sound } else { 0.0 };
            let cd = projectile.cd_at(mach, &mut drag_cursor.borrow_mut());

            let drag_scale = density_ratio * RHO0 * cd * frontal_area_m2 / (2.0 * mass_kg);
            let drag_accel = relative * (-drag_scale * speed_rel);

            let coriolis_accel = coriolis_acceleration(shot.latitude_rad(), shot.azimuth_rad(), s.velocity);

            Derivative {
                velocity: s.velocity,
                acceleration: drag_accel + coriolis_accel + gravity_body,
            }
        };

        let local_mach = |s: &State| -> f64 {
            let altitude_offset = s.position.y();
            let speed_of_sound = shot.atmosphere().speed_of_sound_at(altitude_offset);
            let wind = shot.wind().wind_at(s.position.x(), &mut wind_cursor.borrow_mut());
            let speed_rel = (s.velocity - wind).norm();
            if speed_of_sound > 0.0 { speed_rel / speed_of_sound } else { 0.0 }
        };

        let mut state = State {
            position: Vec3::new(0.0, -sight_height_m, 0.0),
            velocity: frame.muzzle_velocity_body(muzzle_mps, request.barrel_elevation_rad),
            time_s: 0.0,
        };

        let base_dt = (self.config.step_multiplier * (request.sample_spacing_m.max(1e-3) / muzzle_mps)).max(1e-6);

        let mut samples = Vec::new();
        let emit = |s: &State, flags: SampleFlags| -> TrajectorySample {
            let altitude_offset = s.position.y();
            let density_ratio = shot.atmosphere().density_ratio_at(altitude_offset);
            let speed_of_sound = shot.atmosphere().speed_of_sound_at(altitude_offset);
            let wind = shot.wind().wind_at(s.position.x(), &mut wind_cursor.borrow_mut());
            let relative = s.velocity - wind;
            let speed_rel = relative.norm();
            let mach = if speed_of_sound > 0.0 { speed_rel / speed_of_sound } else { 0.0 };
            let cd = projectile.cd_at(mach, &mut drag_cursor.borrow_mut());
            let drag_scale = density_ratio * RHO0 * cd * frontal_area_m2 / (2.0 * mass_kg);
            let drag_mps2 = drag_scale * speed_rel * speed_rel;

            let speed_mps = s.velocity.norm();
            let slant = Vec3::new(s.position.x(), s.position.y() + sight_height_m, s.position.z()).norm();
            let look_distance_m = s.position.x();
            let drop_angle_rad = if look_distance_m.abs() > 1e-9 {
                (s.position.y() / look_distance_m).atan()
            } else {
                0.0
            };
            let windage_angle_rad = if look_distance_m.abs() > 1e-9 {
                (s.position.z() / look_distance_m).atan()
            } else {
                0.0
            };
            let energy_j = 0.5 * mass_kg * speed_mps * speed_mps;

            TrajectorySample {
                time_s: s.time_s,
                range_m: s.position.x(),
                slant_distance_m: slant,
                height_m: s.position.y(),
                windage_m: s.position.z(),
                velocity: s.velocity,
                speed_mps,
                mach,
                energy_j,
                drop_angle_rad,
                windage_angle_rad,
                look_distance_m,
                density_ratio,
                drag_mps2,
                flags,
            }
        };

        samples.push(emit(&state, SampleFlags::NONE));

        loop {
            if !state.position.x().is_finite() || !state.velocity.x().is_finite() {
                return Err(BallisticsError::Instability {
                    message: "non-finite state".into(),
                    time_s: state.time_s,
                });
            }
            if state.position.x() >= request.target_range_m {
                break;
            }
            if state.velocity.norm() < self.config.minimum_velocity_mps() {
                return Err(BallisticsError::Range {
                    reached_m: state.position.x(),
                    requested_m: request.target_range_m,
                });
            }
            if state.position.y() < -self.config.maximum_drop_m().abs() {
                return Err(BallisticsError::Range {
                    reached_m: state.position.x(),
                    requested_m: request.target_range_m,
                });
            }
            let local_altitude = shot.atmosphere().altitude().canonical() + state.position.y();
            if local_altitude < self.config.minimum_altitude_m() {
                return Err(BallisticsError::Range {
                    reached_m: state.position.x(),
                    requested_m: request.target_range_m,
                });
            }
            if samples.len() >= self.config.max_samples {
                return Err(BallisticsError::Range {
                    reached_m: state.position.x(),
                    requested_m: request.target_range_m,
                });
            }

            let prev = state;
            let prev_mach = local_mach(&prev);

            let mut step_with = |dt: f64| -> State { self.stepper.step(&prev, dt, &mut |s| derivative_fn(s)) };

            let full = step_with(base_dt);
            let full_mach = local_mach(&full);

            let mut flags = SampleFlags::NONE;
            let mut next = full;

            let height_crossed = prev.position.y() * full.position.y() < 0.0;
            let apex_crossed = prev.velocity.y() * full.velocity.y() < 0.0 && prev.velocity.y() > 0.0;
            let mach_crossed = (prev_mach - 1.0) * (full_mach - 1.0) < 0.0;

            if height_crossed {
                next = bisect_event(&prev, base_dt, &mut step_with, |s| s.position.y());
                flags |= if full.position.y() > prev.position.y() {
                    SampleFlags::ZERO_UP
                } else {
                    SampleFlags::ZERO_DOWN
                };
            } else if apex_crossed {
                next = bisect_event(&prev, base_dt, &mut step_with, |s| s.velocity.y());
                flags |= SampleFlags::APEX;
            } else if mach_crossed {
                next = bisect_event(&prev, base_dt, &mut step_with, |s| local_mach(s) - 1.0);
                flags |= SampleFlags::MACH;
            }

            if next.position.x() >= request.target_range_m {
                flags |= SampleFlags::RANGE;
            }

            state = next;
            samples.push(emit(&state, flags));

            if let Some(cb) = request.should_continue.as_mut() {
                let partial = Trajectory::new(samples.clone());
                if !cb(&partial) {
                    return Err(BallisticsError::Cancelled { partial });
                }
            }
        }

        Ok(Trajectory::new(samples))
    }
}

/// Bisect `dt` in `[0, dt_full]` for the root of `observe`, given that
/// `observe(prev)` and `observe(step(prev, dt_full))` have opposite signs.
fn bisect_event(
    prev: &State,
    dt_full: f64,
    step_with: &mut impl FnMut(f64) -> State,
    mut observe: impl FnMut(&State) -> f64,
) -> State {
    let mut lo = 0.0;
    let mut hi = dt_full;
    let sign_at_lo = observe(prev).signum();

    let mut mid_state = step_with(hi);
    for _ in 0..EVENT_BISECTION_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        mid_state = step_with(mid);
        let value = observe(&mid_state);
        if value == 0.0 {
            return mid_state;
        }
        if value.signum() == sign_at_lo {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    mid_state
}
