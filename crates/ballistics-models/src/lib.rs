//! Drag curves: Mach -> Cd tables with cached-bracket lookup, plus the
//! built-in G1/G2/G5/G6/G7/G8/GI/GS standard reference-projectile curves.
//!
//! A solver depends on this crate only for [`DragCurve`] and
//! [`StandardTable`]; custom curves are just another `DragCurve::new` call
//! over the same abstract (Mach, Cd) sequence.

#![forbid(unsafe_code)]

mod curve;
mod tables;

pub use curve::{CdClampPolicy, DragCurve, DragCurveError};
pub use tables::StandardTable;
