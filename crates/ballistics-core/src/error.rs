use crate::units::Dimension;

/// Error returned by unit-quantity construction and arithmetic.
///
/// This is the one error kind that belongs to `ballistics-core` itself;
/// every other kind in the engine's taxonomy (solver input, range,
/// instability, zero-finding, unknown-engine, cancellation) is owned by
/// `ballistics-pointmass`, which is where the concepts they describe live.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DimensionError {
    /// Arithmetic attempted between quantities of different physical dimensions.
    #[error("cannot combine {lhs:?} with {rhs:?}: incompatible dimensions")]
    Mismatch { lhs: Dimension, rhs: Dimension },

    /// A magnitude fell outside the physical domain of its dimension
    /// (e.g. a negative absolute temperature, a negative pressure).
    #[error("{value} is outside the physical domain of {dimension:?}")]
    OutOfDomain { dimension: Dimension, value: f64 },
}
