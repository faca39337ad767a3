//! Curves shared by unit tests across modules.

#![allow(clippy::unwrap_used)]

use crate::geometry::curve::{HermiteCurve, TangentRule};
use crate::math::Point3;

/// Flat square of side 20 with rounded Catmull-Rom corners.
pub(crate) fn square() -> HermiteCurve {
    HermiteCurve::new(
        &[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(20.0, 0.0, 0.0),
            Point3::new(20.0, 0.0, 20.0),
            Point3::new(0.0, 0.0, 20.0),
        ],
        TangentRule::CatmullRom,
    )
    .unwrap()
}

/// Climbs from y = 0 to an apex of y = 10 halfway round, then descends.
pub(crate) fn hill() -> HermiteCurve {
    HermiteCurve::new(
        &[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(20.0, 5.0, 0.0),
            Point3::new(20.0, 10.0, 20.0),
            Point3::new(0.0, 5.0, 20.0),
        ],
        TangentRule::CatmullRom,
    )
    .unwrap()
}
