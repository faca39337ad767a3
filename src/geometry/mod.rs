pub mod curve;

pub use curve::{Circle, ControlPoint, Curve, HermiteCurve, SeparationBounds, TangentRule};
