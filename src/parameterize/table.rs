use crate::error::Diagnostic;
use crate::math::{wrap_periodic, TOLERANCE};

/// Map from arc length `s` to the native curve parameter `u`.
///
/// Entry `i` holds the parameter reached after travelling `i * delta_s`
/// along the curve. The curve is closed, so the entry after the last one
/// is `u = 1.0`, which is the same point as `u = 0.0`.
///
/// Tables are built by [`BuildArcLengthTable`](super::BuildArcLengthTable)
/// and are read-only afterwards.
#[derive(Debug, Clone)]
pub struct ArcLengthTable {
    pub(super) values: Vec<f64>,
    pub(super) delta_s: f64,
    pub(super) delta_u: f64,
    pub(super) total_length: f64,
    pub(super) max_height: f64,
    pub(super) max_height_position: f64,
    pub(super) max_step_length: f64,
}

impl ArcLengthTable {
    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Arc-length resolution between consecutive entries.
    #[must_use]
    pub fn delta_s(&self) -> f64 {
        self.delta_s
    }

    /// Parameter step the table was sampled with.
    #[must_use]
    pub fn delta_u(&self) -> f64 {
        self.delta_u
    }

    /// Total arc length of the closed curve.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Highest y-coordinate seen while sampling the curve.
    #[must_use]
    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    /// Arc length at which [`max_height`](Self::max_height) is first reached.
    #[must_use]
    pub fn max_height_position(&self) -> f64 {
        self.max_height_position
    }

    /// The raw entries.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Wraps `s` into `[0, total_length)`. Negative distances wrap around
    /// the loop.
    #[must_use]
    pub fn wrap(&self, s: f64) -> f64 {
        wrap_periodic(s, self.total_length)
    }

    /// Returns the native parameter at arc length `s`, linearly
    /// interpolated between the bracketing entries.
    ///
    /// Periodic in `total_length` and monotonically non-decreasing over one
    /// lap for a well-sampled table.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn lookup(&self, s: f64) -> f64 {
        let Some(last) = self.values.len().checked_sub(1) else {
            return 0.0;
        };
        let s = self.wrap(s);
        let index = ((s / self.delta_s).floor() as usize).min(last);
        let start = index as f64 * self.delta_s;

        let u_a = self.values[index];
        // The final stretch is shorter than delta_s and ends at u = 1
        let (u_b, span) = if index < last {
            (self.values[index + 1], self.delta_s)
        } else {
            (1.0, self.total_length - start)
        };

        let fraction = if span > TOLERANCE {
            ((s - start) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        u_a + (u_b - u_a) * fraction
    }

    /// Returns the entry nearest to `s` without interpolation.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn nearest_value_to(&self, s: f64) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let index = (self.wrap(s) / self.delta_s).round() as usize;
        // Rounding past the last entry lands on the start of the loop
        self.values.get(index).copied().unwrap_or(self.values[0])
    }

    /// Reports under-resolved sampling.
    ///
    /// A table is suspect when its entries decrease anywhere or when one
    /// parameter step moved further than `delta_s`.
    #[must_use]
    pub fn check_sampling(&self) -> Option<Diagnostic> {
        let monotonic = self.values.windows(2).all(|w| w[1] >= w[0]);
        if monotonic && self.max_step_length <= self.delta_s {
            return None;
        }
        Some(Diagnostic::DegenerateSampling {
            delta_u: self.delta_u,
            delta_s: self.delta_s,
            step_length: self.max_step_length,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Table for a curve of length 1.0 sampled every 0.25, with uneven
    /// parameter spacing.
    fn handmade() -> ArcLengthTable {
        ArcLengthTable {
            values: vec![0.0, 0.1, 0.4, 0.7],
            delta_s: 0.25,
            delta_u: 0.01,
            total_length: 1.0,
            max_height: 0.0,
            max_height_position: 0.0,
            max_step_length: 0.05,
        }
    }

    #[test]
    fn lookup_hits_entries() {
        let t = handmade();
        assert_relative_eq!(t.lookup(0.0), 0.0);
        assert_relative_eq!(t.lookup(0.25), 0.1, epsilon = 1e-12);
        assert_relative_eq!(t.lookup(0.5), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn lookup_interpolates() {
        let t = handmade();
        assert_relative_eq!(t.lookup(0.375), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn lookup_last_stretch_reaches_one() {
        let t = handmade();
        assert_relative_eq!(t.lookup(0.875), 0.85, epsilon = 1e-12);
        assert!(t.lookup(0.999_999) > 0.999);
    }

    #[test]
    fn lookup_wraps_negative() {
        let t = handmade();
        assert_relative_eq!(t.lookup(-0.625), t.lookup(0.375), epsilon = 1e-12);
        assert_relative_eq!(t.lookup(1.375), t.lookup(0.375), epsilon = 1e-12);
    }

    #[test]
    fn nearest_value() {
        let t = handmade();
        assert_relative_eq!(t.nearest_value_to(0.3), 0.1);
        assert_relative_eq!(t.nearest_value_to(0.4), 0.4);
        assert_relative_eq!(t.nearest_value_to(0.95), 0.0);
    }

    #[test]
    fn well_sampled_has_no_diagnostic() {
        assert!(handmade().check_sampling().is_none());
    }

    #[test]
    fn decreasing_entries_flagged() {
        let mut t = handmade();
        t.values = vec![0.0, 0.4, 0.3, 0.7];
        assert!(matches!(
            t.check_sampling(),
            Some(Diagnostic::DegenerateSampling { .. })
        ));
    }

    #[test]
    fn long_step_flagged() {
        let mut t = handmade();
        t.max_step_length = 0.3;
        assert!(t.check_sampling().is_some());
    }

    #[test]
    fn empty_table_lookup_is_zero() {
        let mut t = handmade();
        t.values.clear();
        assert!(t.is_empty());
        assert_relative_eq!(t.lookup(0.5), 0.0);
    }
}
