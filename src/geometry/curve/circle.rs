use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::Curve;

/// A full circle in 3D space, parameterized over the unit interval.
///
/// `P(u) = center + radius * cos(2*pi*u) * ref_dir + radius * sin(2*pi*u) * binormal`
/// where `binormal = normal x ref_dir`.
#[derive(Debug, Clone)]
pub struct Circle {
    center: Point3,
    radius: f64,
    normal: Vector3,
    ref_dir: Vector3,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the circle
    /// * `radius` - Radius (must be positive)
    /// * `normal` - Normal vector defining the circle plane
    /// * `ref_dir` - Reference direction for `u = 0` (must be perpendicular to normal)
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, either direction is
    /// zero-length, or the reference direction is not perpendicular to the
    /// normal.
    pub fn new(center: Point3, radius: f64, normal: Vector3, ref_dir: Vector3) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::InvalidCurve("circle radius must be positive".into()).into());
        }

        let normal = normal
            .try_normalize(TOLERANCE)
            .ok_or(GeometryError::ZeroVector)?;
        let ref_dir = ref_dir
            .try_normalize(TOLERANCE)
            .ok_or(GeometryError::ZeroVector)?;

        if normal.dot(&ref_dir).abs() > TOLERANCE {
            return Err(GeometryError::InvalidCurve(
                "reference direction must be perpendicular to normal".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            radius,
            normal,
            ref_dir,
        })
    }

    /// Returns the center of the circle.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Exact circumference.
    #[must_use]
    pub fn circumference(&self) -> f64 {
        TAU * self.radius
    }

    /// Returns `count` evenly spaced points on the circle, suitable as
    /// control points for a spline approximation.
    #[must_use]
    pub fn control_positions(&self, count: usize) -> Vec<Point3> {
        self.sample(count)
    }
}

impl Curve for Circle {
    fn position(&self, u: f64) -> Point3 {
        let angle = TAU * u;
        let binormal = self.normal.cross(&self.ref_dir);
        self.center
            + self.ref_dir * (self.radius * angle.cos())
            + binormal * (self.radius * angle.sin())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vertical_loop(radius: f64) -> Circle {
        Circle::new(
            Point3::new(0.0, radius, 0.0),
            radius,
            Vector3::z(),
            Vector3::x(),
        )
        .unwrap()
    }

    #[test]
    fn quarter_turn() {
        let c = vertical_loop(3.0);
        assert_relative_eq!(c.position(0.25), Point3::new(0.0, 6.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn closes_at_one() {
        let c = vertical_loop(2.0);
        assert_relative_eq!(c.position(1.0), c.position(0.0), epsilon = 1e-9);
    }

    #[test]
    fn chord_sum_converges_to_circumference() {
        let c = vertical_loop(5.0);
        let coarse = (c.arc_length(1e-2) - c.circumference()).abs();
        let fine = (c.arc_length(1e-4) - c.circumference()).abs();
        assert!(fine < coarse);
        assert!(fine < 1e-5);
    }

    #[test]
    fn invalid_radius() {
        let r = Circle::new(Point3::origin(), 0.0, Vector3::z(), Vector3::x());
        assert!(r.is_err());
    }

    #[test]
    fn non_perpendicular_ref_dir() {
        let r = Circle::new(
            Point3::origin(),
            1.0,
            Vector3::z(),
            Vector3::new(1.0, 0.0, 1.0),
        );
        assert!(r.is_err());
    }
}
