//! Roller coaster kinematics on closed Hermite splines.
//!
//! Layers, leaves first:
//!
//! - **geometry**: closed curves ([`HermiteCurve`], [`Circle`])
//! - **parameterize**: arc length to curve parameter ([`ArcLengthTable`])
//! - **motion**: speed model, banked frames, [`RollerCoaster`], [`Ride`]
//! - **layout**: evenly spaced transforms for pieces, supports and props
//!
//! Rendering, input and file parsing belong to the caller. Warnings about
//! poor sampling or unstable frames are emitted through `tracing`.

pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod math;
pub mod motion;
pub mod parameterize;

#[cfg(test)]
mod test_curves;

pub use config::{CoasterConfig, MotionParams, SamplingParams, SceneryParams};
pub use error::{CoasterError, Diagnostic, Result};
pub use geometry::{Circle, ControlPoint, Curve, HermiteCurve, TangentRule};
pub use layout::PieceLayout;
pub use motion::{CartFrame, Ride, RollerCoaster, Track};
pub use parameterize::ArcLengthTable;
