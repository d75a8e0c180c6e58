//! Fixed-timestep ODE steppers. Each advances a [`State`] by `dt` given a
//! derivative closure; the [`crate::engine::Engine`] picks one stepper for
//! the whole solve rather than switching per-step.

use ballistics_core::Vec3;

/// Position and velocity in the shot's body frame (x along the sight line,
/// y up, z to the right), plus elapsed time.
#[derive(Debug, Clone, Copy)]
pub struct State {
    pub position: Vec3,
    pub velocity: Vec3,
    pub time_s: f64,
}

/// `d(State)/dt` at a point: velocity restates `State::velocity` so a
/// stepper can treat it uniformly with acceleration.
#[derive(Debug, Clone, Copy)]
pub struct Derivative {
    pub velocity: Vec3,
    pub acceleration: Vec3,
}

pub trait Stepper: std::fmt::Debug {
    /// Advance `state` by `dt`, calling `derivative` once or several times
    /// as the method requires.
    fn step(&self, state: &State, dt: f64, derivative: &mut dyn FnMut(&State) -> Derivative) -> State;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EulerStepper;

impl Stepper for EulerStepper {
    fn step(&self, state: &State, dt: f64, derivative: &mut dyn FnMut(&State) -> Derivative) -> State {
        let d = derivative(state);
        State {
            position: state.position + d.velocity * dt,
            velocity: state.velocity + d.acceleration * dt,
            time_s: state.time_s + dt,
        }
    }

    fn name(&self) -> &'static str {
        "euler"
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Rk4Stepper;

impl Stepper for Rk4Stepper {
    fn step(&self, state: &State, dt: f64, derivative: &mut dyn FnMut(&State) -> Derivative) -> State {
        let advance = |s: &State, d: &Derivative, h: f64| State {
            position: s.position + d.velocity * h,
            velocity: s.velocity + d.acceleration * h,
            time_s: s.time_s + h,
        };

        let k1 = derivative(state);
        let s2 = advance(state, &k1, dt * 0.5);
        let k2 = derivative(&s2);
        let s3 = advance(state, &k2, dt * 0.5);
        let k3 = derivative(&s3);
        let s4 = advance(state, &k3, dt);
        let k4 = derivative(&s4);

        let sum_v = (k1.velocity + k2.velocity * 2.0 + k3.velocity * 2.0 + k4.velocity) * (dt / 6.0);
        let sum_a = (k1.acceleration + k2.acceleration * 2.0 + k3.acceleration * 2.0 + k4.acceleration) * (dt / 6.0);

        State {
            position: state.position + sum_v,
            velocity: state.velocity + sum_a,
            time_s: state.time_s + dt,
        }
    }

    fn name(&self) -> &'static str {
        "rk4"
    }
}

/// Velocity Verlet, approximated: true velocity Verlet assumes acceleration
/// depends only on position, which drag violates (it depends on velocity
/// too). This uses the start-of-step acceleration for both half-kicks
/// rather than iterating to a self-consistent end-of-step acceleration,
/// trading a little accuracy at the chosen step size for a single
/// derivative evaluation per step.
#[derive(Debug, Default, Clone, Copy)]
pub struct VerletStepper;

impl Stepper for VerletStepper {
    fn step(&self, state: &State, dt: f64, derivative: &mut dyn FnMut(&State) -> Derivative) -> State {
        let d0 = derivative(state);
        let half_velocity = state.velocity + d0.acceleration * (dt * 0.5);
        let position = state.position + half_velocity * dt;
        let velocity = half_velocity + d0.acceleration * (dt * 0.5);
        State {
            position,
            velocity,
            time_s: state.time_s + dt,
        }
    }

    fn name(&self) -> &'static str {
        "verlet"
    }
}
