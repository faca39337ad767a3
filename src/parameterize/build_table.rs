use tracing::{debug, warn};

use crate::error::{GeometryError, ParameterizationError, Result};
use crate::geometry::curve::{step_count, Curve, HermiteCurve};
use crate::math::TOLERANCE;

use super::ArcLengthTable;

/// Smallest parameter step handed out by [`parameter_step_for`].
///
/// Bounds table construction to a million curve evaluations.
pub const MIN_PARAMETER_STEP: f64 = 1e-6;

/// Lower bound on the number of parameter steps taken per curve segment.
pub const MIN_STEPS_PER_SEGMENT: f64 = 16.0;

/// Most entries a table may hold. A resolution that would need more is
/// rejected rather than filling memory.
pub const MAX_TABLE_ENTRIES: usize = 1 << 22;

/// Chooses a parameter step fine enough for arc-length resolution
/// `delta_s`.
///
/// The curve moves at most about `len() * max_separation()` per unit of
/// `u`, so `delta_u = fraction * delta_s / (len() * max_separation())`
/// keeps each step well under `delta_s`. The result is clamped to
/// `[MIN_PARAMETER_STEP, 1 / (16 * len())]`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn parameter_step_for(curve: &HermiteCurve, delta_s: f64, fraction: f64) -> f64 {
    let segments = curve.len() as f64;
    let speed_bound = segments * curve.max_separation();
    let coarsest = 1.0 / (segments * MIN_STEPS_PER_SEGMENT);
    if speed_bound < TOLERANCE {
        return coarsest;
    }
    (fraction * delta_s / speed_bound).clamp(MIN_PARAMETER_STEP, coarsest)
}

/// Builds an [`ArcLengthTable`] by walking a curve in fixed parameter steps.
#[derive(Debug, Clone, Copy)]
pub struct BuildArcLengthTable {
    delta_s: f64,
    delta_u: f64,
}

impl BuildArcLengthTable {
    /// Creates a new `BuildArcLengthTable` operation.
    ///
    /// * `delta_s` - arc-length spacing between table entries
    /// * `delta_u` - parameter step used to walk the curve
    #[must_use]
    pub fn new(delta_s: f64, delta_u: f64) -> Self {
        Self { delta_s, delta_u }
    }

    /// Creates the operation with a parameter step picked by
    /// [`parameter_step_for`].
    #[must_use]
    pub fn for_curve(curve: &HermiteCurve, delta_s: f64, fraction: f64) -> Self {
        Self::new(delta_s, parameter_step_for(curve, delta_s, fraction))
    }

    /// Parameter step this operation walks with.
    #[must_use]
    pub fn delta_u(&self) -> f64 {
        self.delta_u
    }

    /// Executes the walk.
    ///
    /// Distance accumulates as the sum of chords between consecutive
    /// samples. Every multiple of `delta_s` crossed inside a step becomes
    /// an entry, placed by interpolating `u` within that step. The highest
    /// sample and the distance at which it is first reached are recorded
    /// along the way.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterizationError::InvalidParameters`] for a
    /// non-positive or non-finite step, or when `delta_s` is so fine that
    /// the table would exceed [`MAX_TABLE_ENTRIES`]. Returns
    /// [`GeometryError::InvalidCurve`] when the curve has zero length.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute<C: Curve + ?Sized>(&self, curve: &C) -> Result<ArcLengthTable> {
        self.validate()?;

        let steps = step_count(self.delta_u);
        let mut values = Vec::new();
        let mut traveled = 0.0;
        let mut prev = curve.position(0.0);
        let mut prev_u = 0.0;
        let mut max_height = prev.y;
        let mut max_height_position = 0.0;
        let mut max_step_length = 0.0_f64;

        for i in 1..=steps {
            let u = (i as f64 * self.delta_u).min(1.0);
            let next = curve.position(u);
            let step = (next - prev).norm();
            let reached = traveled + step;

            loop {
                let target = values.len() as f64 * self.delta_s;
                if target >= reached {
                    break;
                }
                if values.len() >= MAX_TABLE_ENTRIES {
                    return Err(ParameterizationError::InvalidParameters(format!(
                        "delta_s = {} needs more than {MAX_TABLE_ENTRIES} table entries",
                        self.delta_s
                    ))
                    .into());
                }
                let fraction = if step > TOLERANCE {
                    (target - traveled) / step
                } else {
                    0.0
                };
                values.push(prev_u + (u - prev_u) * fraction);
            }

            // The final sample is the start point again
            if i < steps && next.y > max_height {
                max_height = next.y;
                max_height_position = reached;
            }

            max_step_length = max_step_length.max(step);
            traveled = reached;
            prev = next;
            prev_u = u;
        }

        if traveled < TOLERANCE {
            return Err(GeometryError::InvalidCurve("curve has zero arc length".into()).into());
        }

        let table = ArcLengthTable {
            values,
            delta_s: self.delta_s,
            delta_u: self.delta_u,
            total_length: traveled,
            max_height,
            max_height_position,
            max_step_length,
        };

        debug!(
            entries = table.len(),
            total_length = table.total_length,
            delta_s = self.delta_s,
            delta_u = self.delta_u,
            max_height,
            "built arc-length table"
        );
        if let Some(diagnostic) = table.check_sampling() {
            warn!("{diagnostic}");
        }

        Ok(table)
    }

    fn validate(&self) -> std::result::Result<(), ParameterizationError> {
        if !(self.delta_s.is_finite() && self.delta_s > 0.0) {
            return Err(ParameterizationError::InvalidParameters(format!(
                "delta_s must be positive, got {}",
                self.delta_s
            )));
        }
        if !(self.delta_u.is_finite() && self.delta_u > 0.0) {
            return Err(ParameterizationError::InvalidParameters(format!(
                "delta_u must be positive, got {}",
                self.delta_u
            )));
        }
        Ok(())
    }
}
