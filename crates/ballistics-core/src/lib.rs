//! Core math utilities shared across the ballistics workspace.
//!
//! Includes:
//! - The unit-quantity system (typed scalars carrying a dimension and a
//!   preferred display unit).
//! - The standard atmosphere model (density, speed of sound, pressure lapse).
//! - The wind field (ordered constant-wind segments by down-range distance).
//! - A minimal 3-vector for the integrator.
//! - The Coriolis deflection helper.
//! - The bracket cursor used by both the drag curve and the wind field for
//!   amortized O(1) lookups without mutable state on the shared object.

pub mod atmosphere;
pub mod coriolis;
pub mod cursor;
pub mod error;
pub mod units;
pub mod vec3;
pub mod wind;

pub use atmosphere::{Atmosphere, AtmosphereModel};
pub use coriolis::coriolis_acceleration;
pub use cursor::BracketCursor;
pub use error::DimensionError;
pub use units::{Dimension, Quantity, Unit};
pub use vec3::Vec3;
pub use wind::{Wind, WindSegment};
