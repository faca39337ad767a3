/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Gravitational acceleration in m/s^2.
pub const G: f64 = 9.81;

/// Wraps `value` into `[0, period)`.
///
/// Negative values wrap around rather than clamp. A non-positive period
/// yields `0.0`.
#[must_use]
pub fn wrap_periodic(value: f64, period: f64) -> f64 {
    if period <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(period);
    // rem_euclid can round up to `period` for tiny negative inputs
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

/// Removes the component of `v` along the unit vector `axis`.
#[must_use]
pub fn reject(v: &Vector3, axis: &Vector3) -> Vector3 {
    v - axis * v.dot(axis)
}

/// Normalizes `v`, returning `None` for vectors shorter than [`TOLERANCE`].
#[must_use]
pub fn try_normalize(v: &Vector3) -> Option<Vector3> {
    v.try_normalize(TOLERANCE)
}

/// Returns some unit vector perpendicular to the unit vector `v`.
#[must_use]
pub fn any_orthogonal(v: &Vector3) -> Vector3 {
    // Pick the world axis least aligned with v
    let helper = if v.x.abs() <= v.y.abs() && v.x.abs() <= v.z.abs() {
        Vector3::x()
    } else if v.y.abs() <= v.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };
    try_normalize(&v.cross(&helper)).unwrap_or_else(Vector3::y)
}

/// Builds a rigid transform whose columns are `x_axis`, `y_axis`, `z_axis`
/// and `origin`.
#[must_use]
pub fn rigid_transform(
    x_axis: &Vector3,
    y_axis: &Vector3,
    z_axis: &Vector3,
    origin: &Point3,
) -> Matrix4 {
    Matrix4::new(
        x_axis.x, y_axis.x, z_axis.x, origin.x, //
        x_axis.y, y_axis.y, z_axis.y, origin.y, //
        x_axis.z, y_axis.z, z_axis.z, origin.z, //
        0.0, 0.0, 0.0, 1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn wrap_positive_and_negative() {
        assert_relative_eq!(wrap_periodic(12.5, 10.0), 2.5, epsilon = 1e-12);
        assert_relative_eq!(wrap_periodic(-2.5, 10.0), 7.5, epsilon = 1e-12);
        assert_relative_eq!(wrap_periodic(-22.5, 10.0), 7.5, epsilon = 1e-12);
    }

    #[test]
    fn wrap_tiny_negative_stays_in_range() {
        let w = wrap_periodic(-1e-18, 10.0);
        assert!((0.0..10.0).contains(&w));
    }

    #[test]
    fn wrap_degenerate_period() {
        assert!(wrap_periodic(3.0, 0.0).abs() < TOLERANCE);
        assert!(wrap_periodic(f64::NAN, 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn orthogonal_is_unit_and_perpendicular() {
        for v in [Vector3::x(), Vector3::y(), Vector3::new(1.0, 2.0, 3.0).normalize()] {
            let o = any_orthogonal(&v);
            assert_relative_eq!(o.norm(), 1.0, epsilon = 1e-12);
            assert!(o.dot(&v).abs() < 1e-12);
        }
    }

    #[test]
    fn rigid_transform_places_columns() {
        let m = rigid_transform(
            &Vector3::x(),
            &Vector3::y(),
            &Vector3::z(),
            &Point3::new(1.0, 2.0, 3.0),
        );
        let p = m.transform_point(&Point3::origin());
        assert_relative_eq!(p.coords, Vector3::new(1.0, 2.0, 3.0), epsilon = 1e-12);
        assert_relative_eq!(m[(1, 1)], 1.0);
    }
}
