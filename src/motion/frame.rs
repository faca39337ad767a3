use crate::error::Diagnostic;
use crate::math::{
    any_orthogonal, reject, rigid_transform, try_normalize, Matrix4, Point3, Vector3, G,
};

/// Orientation and position of a cart on the track.
///
/// `tangent` points along the direction of travel, `up` away from the
/// track floor and `side` completes a right-handed basis
/// (`side = up x tangent`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartFrame {
    pub position: Point3,
    pub tangent: Vector3,
    pub up: Vector3,
    pub side: Vector3,
}

impl CartFrame {
    /// Rigid transform with columns `(side, up, tangent, position)`.
    ///
    /// Model space x maps to `side`, y to `up` and z to `tangent`.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix4 {
        rigid_transform(&self.side, &self.up, &self.tangent, &self.position)
    }
}

/// Result of [`estimate_frame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameEstimate {
    /// Unit direction of travel.
    pub tangent: Vector3,
    /// Unit "up" axis, tilted by the net lateral acceleration.
    pub up: Vector3,
    /// Unit sideways axis.
    pub side: Vector3,
    /// Discrete curvature through the three samples.
    pub curvature: f64,
    /// Length of the chord from the first to the middle sample.
    pub chord_before: f64,
    /// Length of the chord from the middle to the last sample.
    pub chord_after: f64,
}

impl FrameEstimate {
    /// `true` when one half chord is more than twice the other, which means
    /// the look-ahead is too long for the local curvature.
    #[must_use]
    pub fn is_unstable(&self) -> bool {
        self.chord_before > 2.0 * self.chord_after || self.chord_after > 2.0 * self.chord_before
    }

    /// The diagnostic for an unstable estimate, if any.
    #[must_use]
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        self.is_unstable().then_some(Diagnostic::UnstableFrameEstimate {
            before: self.chord_before,
            after: self.chord_after,
        })
    }
}

/// Estimates a banked frame from three consecutive track samples.
///
/// The samples should be close together (a look-ahead short relative to
/// the radius of curvature) and ordered along the direction of travel.
/// `speed` is the cart speed at `at`.
///
/// The "up" axis follows the apparent weight a rider would feel: the
/// centripetal acceleration `kappa * v^2` toward the centre of curvature
/// minus the part of gravity not absorbed along the track. When that net
/// acceleration vanishes the result falls back to opposing gravity, and
/// when gravity is parallel to the track to any axis perpendicular to the
/// tangent. The output is always finite for finite input.
#[must_use]
pub fn estimate_frame(before: &Point3, at: &Point3, after: &Point3, speed: f64) -> FrameEstimate {
    let back = at - before;
    let ahead = after - at;
    let chord = after - before;

    let back_dir = try_normalize(&back);
    let ahead_dir = try_normalize(&ahead);
    let tangent = try_normalize(&chord)
        .or(ahead_dir)
        .or(back_dir)
        .unwrap_or_else(Vector3::z);

    let (normal, curvature) = match (back_dir, ahead_dir) {
        (Some(b), Some(a)) => {
            let normal = try_normalize(&reject(&(a - b), &tangent)).unwrap_or_else(Vector3::zeros);
            let chord_len = chord.norm();
            let curvature = if chord_len > 0.0 {
                2.0 * b.cross(&a).norm() / chord_len
            } else {
                0.0
            };
            (normal, curvature)
        }
        _ => (Vector3::zeros(), 0.0),
    };

    let centripetal = normal * (curvature * speed * speed);
    let gravity_lateral = reject(&Vector3::new(0.0, -G, 0.0), &tangent);
    let lateral = reject(&(centripetal - gravity_lateral), &tangent);

    let up = try_normalize(&lateral)
        .or_else(|| try_normalize(&-gravity_lateral))
        .unwrap_or_else(|| any_orthogonal(&tangent));
    let side = try_normalize(&up.cross(&tangent)).unwrap_or_else(|| any_orthogonal(&tangent));

    FrameEstimate {
        tangent,
        up,
        side,
        curvature,
        chord_before: back.norm(),
        chord_after: ahead.norm(),
    }
}
