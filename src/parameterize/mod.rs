//! Arc-length reparameterization of closed curves.
//!
//! A [`HermiteCurve`](crate::geometry::HermiteCurve) is not naturally
//! parameterized by distance: equal slices of `u` cover segments of very
//! different lengths. [`ArcLengthTable`] inverts the distance function once
//! so that carts and track pieces can be placed at even spacing.

mod build_table;
mod table;

pub use build_table::{
    parameter_step_for, BuildArcLengthTable, MAX_TABLE_ENTRIES, MIN_PARAMETER_STEP,
    MIN_STEPS_PER_SEGMENT,
};
pub use table::ArcLengthTable;
