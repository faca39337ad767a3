use tracing::warn;

use crate::config::{MotionParams, SamplingParams};
use crate::error::Result;
use crate::geometry::curve::{Curve, HermiteCurve};
use crate::math::{Matrix4, Point3};
use crate::parameterize::{ArcLengthTable, BuildArcLengthTable};

use super::frame::{estimate_frame, CartFrame};
use super::speed::SpeedProfile;

/// A curve together with everything derived from it.
///
/// A `Track` is immutable: changing the curve, the sampling or the motion
/// parameters produces a new `Track`. All queries take an arc length `s`,
/// which wraps around the lap, so callers never need to clamp it.
#[derive(Debug, Clone)]
pub struct Track {
    curve: HermiteCurve,
    table: ArcLengthTable,
    params: MotionParams,
    profile: SpeedProfile,
}

impl Track {
    /// Builds the arc-length table for `curve` and derives the speed model.
    ///
    /// # Errors
    ///
    /// Returns an error if either parameter set is out of range or the
    /// table cannot be built.
    pub fn new(
        curve: HermiteCurve,
        sampling: &SamplingParams,
        params: MotionParams,
    ) -> Result<Self> {
        sampling.validate()?;
        params.validate()?;
        let table =
            BuildArcLengthTable::for_curve(&curve, sampling.delta_s, sampling.step_fraction)
                .execute(&curve)?;
        Ok(Self::assemble(curve, table, params))
    }

    /// Same curve and motion, rebuilt at a new arc-length resolution.
    ///
    /// # Errors
    ///
    /// Returns an error if `sampling` is out of range.
    pub fn resampled(&self, sampling: &SamplingParams) -> Result<Self> {
        Self::new(self.curve.clone(), sampling, self.params)
    }

    /// Same curve and table with new motion parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` is out of range.
    pub fn with_params(&self, params: MotionParams) -> Result<Self> {
        params.validate()?;
        Ok(Self::assemble(self.curve.clone(), self.table.clone(), params))
    }

    fn assemble(curve: HermiteCurve, table: ArcLengthTable, params: MotionParams) -> Self {
        let profile = SpeedProfile::new(&params, &table, |s| curve.position(table.lookup(s)).y);
        Self {
            curve,
            table,
            params,
            profile,
        }
    }

    #[must_use]
    pub fn curve(&self) -> &HermiteCurve {
        &self.curve
    }

    #[must_use]
    pub fn table(&self) -> &ArcLengthTable {
        &self.table
    }

    #[must_use]
    pub fn params(&self) -> &MotionParams {
        &self.params
    }

    #[must_use]
    pub fn profile(&self) -> &SpeedProfile {
        &self.profile
    }

    /// Length of one lap.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.table.total_length()
    }

    /// Position on the curve at arc length `s`.
    #[must_use]
    pub fn position_at(&self, s: f64) -> Point3 {
        self.curve.position(self.table.lookup(s))
    }

    /// Cart speed at arc length `s`.
    #[must_use]
    pub fn speed_at(&self, s: f64) -> f64 {
        self.profile.speed_at(s, self.position_at(s).y)
    }

    /// Banked cart frame at arc length `s`.
    ///
    /// Samples the track at `s - look_ahead`, `s` and `s + look_ahead`.
    /// An unstable estimate is logged and still returned.
    #[must_use]
    pub fn frame_at(&self, s: f64) -> CartFrame {
        let h = self.params.look_ahead;
        let position = self.position_at(s);
        let estimate = estimate_frame(
            &self.position_at(s - h),
            &position,
            &self.position_at(s + h),
            self.speed_at(s),
        );
        if let Some(diagnostic) = estimate.diagnostic() {
            warn!(s, "{diagnostic}");
        }
        CartFrame {
            position,
            tangent: estimate.tangent,
            up: estimate.up,
            side: estimate.side,
        }
    }

    /// Rigid transform of a cart at arc length `s`.
    #[must_use]
    pub fn transform_at(&self, s: f64) -> Matrix4 {
        self.frame_at(s).to_matrix()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::motion::SpeedRegion;
    use crate::test_curves::{hill, square};
    use approx::assert_relative_eq;

    fn track(curve: HermiteCurve) -> Track {
        Track::new(curve, &SamplingParams::default(), MotionParams::default()).unwrap()
    }

    #[test]
    fn hill_profile_scenario() {
        let t = track(hill());
        let profile = t.profile();
        assert_relative_eq!(profile.max_height(), 10.0, epsilon = 1e-3);

        // The apex is where the lift ends; the cart crests at min speed
        let apex = profile.freefall_start();
        assert_relative_eq!(t.speed_at(apex), 5.0, epsilon = 0.05);

        // Anything lower on the coasting stretch is faster
        let lower = apex + 0.25 * (profile.decel_start() - apex);
        assert_eq!(profile.region(lower), SpeedRegion::Cruise);
        assert!(t.position_at(lower).y < 10.0 - 1.0);
        assert!(t.speed_at(lower) > 5.0);
    }

    #[test]
    fn speed_floor() {
        let t = track(hill());
        let total = t.total_length();
        let mut s = -total;
        while s < 2.0 * total {
            assert!(t.speed_at(s) >= 5.0);
            s += 0.1;
        }
    }

    #[test]
    fn speed_is_continuous_at_region_boundaries() {
        let t = track(hill());
        let p = *t.profile();
        for boundary in [p.freefall_start(), p.decel_start()] {
            let below = t.speed_at(boundary - 1e-4);
            let above = t.speed_at(boundary + 1e-4);
            assert!((below - above).abs() < 0.05, "jump at {boundary}: {below} vs {above}");
        }
    }

    #[test]
    fn braking_before_apex_starts_from_lift_speed() {
        let t = track(hill())
            .with_params(MotionParams {
                decel_fraction: 0.3,
                ..MotionParams::default()
            })
            .unwrap();
        let p = *t.profile();
        assert!(p.decel_start() < p.freefall_start());
        assert_relative_eq!(p.decel_speed(), 5.0);

        let below = t.speed_at(p.decel_start() - 1e-4);
        let above = t.speed_at(p.decel_start() + 1e-4);
        assert_relative_eq!(below, above, epsilon = 1e-9);
        assert_eq!(p.region(p.freefall_start()), SpeedRegion::Braking);
        assert_relative_eq!(t.speed_at(p.freefall_start() + 5.0), 5.0);
    }

    #[test]
    fn speed_returns_to_minimum_at_lap_end() {
        let t = track(hill());
        assert_relative_eq!(t.speed_at(t.total_length() - 1e-6), 5.0, epsilon = 1e-3);
    }

    #[test]
    fn queries_wrap() {
        let t = track(hill());
        let total = t.total_length();
        assert_relative_eq!(t.position_at(3.0), t.position_at(3.0 + total), epsilon = 1e-6);
        assert_relative_eq!(t.position_at(-3.0), t.position_at(total - 3.0), epsilon = 1e-6);
        assert_relative_eq!(t.speed_at(-3.0), t.speed_at(total - 3.0), epsilon = 1e-6);
    }

    #[test]
    fn flat_square_banks_at_height_maximum() {
        let t = track(square());
        // All points share y = 0; the recorded maximum is the start of the lap
        let s = t.profile().freefall_start();
        assert_relative_eq!(s, 0.0);
        let frame = t.frame_at(s);
        // Control point 0 is a rounded corner: the cart tilts into the turn
        assert!(frame.up.y > 0.0 && frame.up.y < 1.0 - 1e-3);
        assert!(frame.up.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn frames_are_orthonormal_everywhere() {
        let t = track(hill());
        let total = t.total_length();
        for i in 0..200 {
            let f = t.frame_at(total * f64::from(i) / 200.0);
            assert_relative_eq!(f.up.norm(), 1.0, epsilon = 1e-9);
            assert_relative_eq!(f.side.norm(), 1.0, epsilon = 1e-9);
            assert!(f.up.dot(&f.tangent).abs() < 1e-6);
            assert!(f.side.dot(&f.tangent).abs() < 1e-6);
        }
    }

    #[test]
    fn transform_places_cart_on_curve() {
        let t = track(hill());
        let m = t.transform_at(12.0);
        let origin = m.transform_point(&Point3::origin());
        assert_relative_eq!(origin, t.position_at(12.0), epsilon = 1e-9);
    }

    #[test]
    fn with_params_keeps_table() {
        let t = track(hill());
        let slower = t
            .with_params(MotionParams {
                min_speed: 2.0,
                ..MotionParams::default()
            })
            .unwrap();
        assert_eq!(slower.table().len(), t.table().len());
        assert_relative_eq!(slower.speed_at(0.1), 2.0);
    }

    #[test]
    fn resampled_changes_resolution() {
        let t = track(hill());
        let fine = t
            .resampled(&SamplingParams {
                delta_s: 0.1,
                ..SamplingParams::default()
            })
            .unwrap();
        assert!(fine.table().len() > t.table().len());
        assert_relative_eq!(fine.total_length(), t.total_length(), epsilon = 1e-2);
    }

    #[test]
    fn invalid_params_rejected() {
        let r = Track::new(
            hill(),
            &SamplingParams::default(),
            MotionParams {
                look_ahead: 0.0,
                ..MotionParams::default()
            },
        );
        assert!(r.is_err());
    }
}
