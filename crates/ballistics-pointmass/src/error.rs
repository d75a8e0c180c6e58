//! The engine's error taxonomy. `ballistics-core` owns
//! [`ballistics_core::DimensionError`]; every other kind is a concept that
//! only makes sense once a `Shot`/`Trajectory` exists, so it lives here.

use crate::trajectory::Trajectory;
use ballistics_core::DimensionError;

#[derive(thiserror::Error, Debug)]
pub enum BallisticsError {
    /// A unit-quantity arithmetic or domain error.
    #[error(transparent)]
    Dimension(#[from] DimensionError),

    /// A structurally invalid `Shot` (negative muzzle velocity, empty drag
    /// curve, zero projectile mass, ...).
    #[error("invalid shot input: {message}")]
    SolverInput { message: String },

    /// The trajectory could not reach a requested range before terminating.
    #[error("could not reach {requested_m:.1} m; terminated at {reached_m:.1} m")]
    Range { reached_m: f64, requested_m: f64 },

    /// Numerical breakdown: non-finite state or step collapse.
    #[error("integration became unstable at t={time_s:.4}s: {message}")]
    Instability { message: String, time_s: f64 },

    /// The zero solver did not converge.
    #[error(
        "zero solver did not converge after {iterations} iterations; last elevation \
         {last_alpha_rad:.6} rad, residual {residual_m:.6} m"
    )]
    ZeroFinding {
        last_alpha_rad: f64,
        residual_m: f64,
        iterations: usize,
    },

    /// An `EngineRegistry` lookup missed.
    #[error("no engine registered under the name \"{name}\"")]
    UnknownEngine { name: String },

    /// Cooperative cancellation; carries the partial trajectory accumulated
    /// before `should_continue` returned `false`.
    #[error("solve cancelled after {} samples", partial.len())]
    Cancelled { partial: Trajectory },
}

impl BallisticsError {
    pub fn solver_input(message: impl Into<String>) -> Self {
        BallisticsError::SolverInput {
            message: message.into(),
        }
    }
}
