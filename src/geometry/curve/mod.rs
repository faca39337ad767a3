mod circle;
mod hermite;

pub use circle::Circle;
pub use hermite::{ControlPoint, HermiteCurve, TangentRule};

use crate::math::Point3;

/// Separation between consecutive curve samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparationBounds {
    /// Smallest distance between two consecutive samples.
    pub min: f64,
    /// Largest distance between two consecutive samples.
    pub max: f64,
}

/// A closed parametric curve over the unit parameter `u`.
///
/// `u` is periodic: `position(u)` and `position(u + 1.0)` name the same
/// point, and `u = 1.0` closes the loop back onto `u = 0.0`.
pub trait Curve {
    /// Evaluates the curve at native parameter `u`.
    fn position(&self, u: f64) -> Point3;

    /// Approximates the total length by summing chords of width `step_u`.
    ///
    /// Accuracy is governed entirely by `step_u`. Non-positive steps yield
    /// `0.0`.
    #[allow(clippy::cast_precision_loss)]
    fn arc_length(&self, step_u: f64) -> f64 {
        if step_u <= 0.0 || !step_u.is_finite() {
            return 0.0;
        }
        let steps = step_count(step_u);
        let mut length = 0.0;
        let mut prev = self.position(0.0);
        for i in 1..=steps {
            let u = (i as f64 * step_u).min(1.0);
            let next = self.position(u);
            length += (next - prev).norm();
            prev = next;
        }
        length
    }

    /// Scans consecutive samples `step_u` apart and returns the distance
    /// bounds between neighbours, closing pair included.
    #[allow(clippy::cast_precision_loss)]
    fn separation_bounds(&self, step_u: f64) -> SeparationBounds {
        if step_u <= 0.0 || !step_u.is_finite() {
            return SeparationBounds { min: 0.0, max: 0.0 };
        }
        let steps = step_count(step_u);
        let mut min = f64::INFINITY;
        let mut max = 0.0_f64;
        let mut prev = self.position(0.0);
        for i in 1..=steps {
            let next = self.position((i as f64 * step_u).min(1.0));
            let d = (next - prev).norm();
            min = min.min(d);
            max = max.max(d);
            prev = next;
        }
        SeparationBounds { min, max }
    }

    /// Returns `count` positions at uniformly spaced native parameters.
    #[allow(clippy::cast_precision_loss)]
    fn sample(&self, count: usize) -> Vec<Point3> {
        (0..count)
            .map(|i| self.position(i as f64 / count as f64))
            .collect()
    }
}

/// Number of steps of width `step_u` needed to cover `[0, 1]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn step_count(step_u: f64) -> usize {
    // Guard against the float error in 1/step landing just above an integer
    ((1.0 / step_u) - 1e-9).ceil().max(1.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_count_exact_division() {
        assert_eq!(step_count(0.25), 4);
        assert_eq!(step_count(0.1), 10);
    }

    #[test]
    fn step_count_partial_step() {
        assert_eq!(step_count(0.3), 4);
        assert_eq!(step_count(2.0), 1);
    }
}
