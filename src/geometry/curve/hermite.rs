use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, SeparationBounds};

/// A curve vertex with its outgoing Hermite tangent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    pub position: Point3,
    pub tangent: Vector3,
}

/// Rule used to derive tangents from neighbouring control points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TangentRule {
    /// `tangent[i] = (p[i+1] - p[i-1]) / 2`.
    #[default]
    CatmullRom,
    /// Cardinal spline: `tangent[i] = (1 - tension) * (p[i+1] - p[i-1]) / 2`.
    ///
    /// A tension of `0` reproduces Catmull-Rom, `1` flattens every tangent
    /// to zero.
    Cardinal { tension: f64 },
}

impl TangentRule {
    fn scale(self) -> f64 {
        match self {
            Self::CatmullRom => 0.5,
            Self::Cardinal { tension } => 0.5 * (1.0 - tension),
        }
    }
}

/// A closed piecewise cubic Hermite spline.
///
/// Segment `i` joins control point `i` to control point `(i + 1) % n`, and
/// the native parameter `u` in `[0, 1)` splits evenly across segments
/// regardless of their length: segment index is `floor(u * n)` and the
/// local parameter is the fractional remainder.
#[derive(Debug, Clone)]
pub struct HermiteCurve {
    control_points: Vec<ControlPoint>,
}

impl HermiteCurve {
    /// Builds a closed curve through `positions`, deriving tangents with
    /// `rule`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidCurve`] if fewer than two points are
    /// given or every point coincides, and
    /// [`GeometryError::ParameterOutOfRange`] for a cardinal tension outside
    /// `[0, 1]`.
    pub fn new(positions: &[Point3], rule: TangentRule) -> Result<Self> {
        if let TangentRule::Cardinal { tension } = rule {
            GeometryError::check_range("tension", tension, 0.0, 1.0)?;
        }
        let mut control_points: Vec<ControlPoint> = positions
            .iter()
            .map(|&position| ControlPoint {
                position,
                tangent: Vector3::zeros(),
            })
            .collect();
        apply_tangent_rule(&mut control_points, rule);
        Self::from_control_points(control_points)
    }

    /// Builds a closed curve from control points with explicit tangents.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidCurve`] if fewer than two points are
    /// given or every point coincides.
    pub fn from_control_points(control_points: Vec<ControlPoint>) -> Result<Self> {
        if control_points.len() < 2 {
            return Err(GeometryError::InvalidCurve(format!(
                "at least 2 control points required, got {}",
                control_points.len()
            ))
            .into());
        }
        let first = control_points[0].position;
        let coincident = control_points
            .iter()
            .all(|cp| (cp.position - first).norm() < TOLERANCE);
        if coincident {
            return Err(GeometryError::InvalidCurve(
                "all control points coincide; arc length is zero".into(),
            )
            .into());
        }
        Ok(Self { control_points })
    }

    /// Returns the control points.
    #[must_use]
    pub fn control_points(&self) -> &[ControlPoint] {
        &self.control_points
    }

    /// Number of control points (and therefore segments).
    #[must_use]
    pub fn len(&self) -> usize {
        self.control_points.len()
    }

    /// Always `false`; a constructed curve has at least two points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.control_points.is_empty()
    }

    /// Returns a copy of this curve with tangents re-derived by `rule`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] for a cardinal tension
    /// outside `[0, 1]`.
    pub fn with_tangent_rule(&self, rule: TangentRule) -> Result<Self> {
        let positions: Vec<Point3> = self.control_points.iter().map(|cp| cp.position).collect();
        Self::new(&positions, rule)
    }

    /// Smallest distance between consecutive control-point samples.
    #[must_use]
    pub fn min_separation(&self) -> f64 {
        self.control_separation().min
    }

    /// Largest distance between consecutive control-point samples.
    ///
    /// `len() * max_separation()` bounds how far the curve moves per unit of
    /// native parameter, which is what the arc-length table's step rule
    /// relies on.
    #[must_use]
    pub fn max_separation(&self) -> f64 {
        self.control_separation().max
    }

    #[allow(clippy::cast_precision_loss)]
    fn control_separation(&self) -> SeparationBounds {
        self.separation_bounds(1.0 / self.len() as f64)
    }

    /// Splits `u` into a segment index and a local parameter in `[0, 1)`.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn localize(&self, u: f64) -> (usize, f64) {
        let n = self.len();
        let scaled = u.rem_euclid(1.0) * n as f64;
        let segment = (scaled.floor() as usize).min(n - 1);
        (segment, (scaled - segment as f64).clamp(0.0, 1.0))
    }
}

impl Curve for HermiteCurve {
    fn position(&self, u: f64) -> Point3 {
        let (segment, t) = self.localize(u);
        let a = &self.control_points[segment];
        let b = &self.control_points[(segment + 1) % self.len()];

        let t2 = t * t;
        let t3 = t2 * t;
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        Point3::from(
            a.position.coords * h00 + a.tangent * h10 + b.position.coords * h01 + b.tangent * h11,
        )
    }
}

/// Overwrites every tangent in `cps` using its two neighbours on the loop.
fn apply_tangent_rule(cps: &mut [ControlPoint], rule: TangentRule) {
    let n = cps.len();
    if n < 2 {
        return;
    }
    let scale = rule.scale();
    let positions: Vec<Point3> = cps.iter().map(|cp| cp.position).collect();
    for (i, cp) in cps.iter_mut().enumerate() {
        let next = positions[(i + 1) % n];
        let prev = positions[(i + n - 1) % n];
        cp.tangent = (next - prev) * scale;
    }
}
