//! Explicit simulation parameters.
//!
//! Every rebuild of the coaster takes its inputs from these structs; the
//! core never reads shared or global state.

use crate::error::{GeometryError, Result};
use crate::layout::MAX_LAYOUT_STOPS;

/// Controls arc-length table resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    /// Arc-length spacing between table entries.
    pub delta_s: f64,
    /// Safety fraction in the parameter step rule. Smaller is finer.
    pub step_fraction: f64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            delta_s: 0.34,
            step_fraction: 0.1,
        }
    }
}

impl SamplingParams {
    /// Checks every field.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] for a non-positive
    /// `delta_s` or a `step_fraction` outside `(0, 1]`.
    pub fn validate(&self) -> Result<()> {
        GeometryError::check_range("delta_s", self.delta_s, f64::MIN_POSITIVE, f64::MAX)?;
        GeometryError::check_range("step_fraction", self.step_fraction, f64::MIN_POSITIVE, 1.0)?;
        Ok(())
    }
}

/// Cart motion and track piece parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    /// Arc-length distance between consecutive track pieces.
    pub piece_spacing: f64,
    /// Speed floor, also the chain-lift and braking target speed.
    pub min_speed: f64,
    /// Fraction of the lap after which braking starts.
    pub decel_fraction: f64,
    /// Half-width of the three-point frame estimate, in arc length.
    pub look_ahead: f64,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            piece_spacing: 0.5,
            min_speed: 5.0,
            decel_fraction: 0.9,
            look_ahead: 0.5,
        }
    }
}

impl MotionParams {
    /// Checks every field.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] for non-positive
    /// spacing or look-ahead, a negative minimum speed, or a deceleration
    /// fraction outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        GeometryError::check_range(
            "piece_spacing",
            self.piece_spacing,
            f64::MIN_POSITIVE,
            f64::MAX,
        )?;
        GeometryError::check_range("min_speed", self.min_speed, 0.0, f64::MAX)?;
        GeometryError::check_range("decel_fraction", self.decel_fraction, 0.0, 1.0)?;
        GeometryError::check_range("look_ahead", self.look_ahead, f64::MIN_POSITIVE, f64::MAX)?;
        Ok(())
    }
}

/// Placement of decorative geometry around the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneryParams {
    /// Arc-length distance between support posts.
    pub support_spacing: f64,
    /// Number of props scattered along the track.
    pub prop_count: usize,
    /// Sideways distance of props from the track centreline.
    pub prop_offset: f64,
    /// Height of the ground plane supports stand on.
    pub ground_height: f64,
}

impl Default for SceneryParams {
    fn default() -> Self {
        Self {
            support_spacing: 20.0,
            prop_count: 30,
            prop_offset: 6.0,
            ground_height: -10.0,
        }
    }
}

impl SceneryParams {
    /// Checks every field.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] for a non-positive
    /// support spacing, non-finite offsets, or more props than a layout
    /// may hold.
    #[allow(clippy::cast_precision_loss)]
    pub fn validate(&self) -> Result<()> {
        GeometryError::check_range(
            "support_spacing",
            self.support_spacing,
            f64::MIN_POSITIVE,
            f64::MAX,
        )?;
        GeometryError::check_range(
            "prop_count",
            self.prop_count as f64,
            0.0,
            MAX_LAYOUT_STOPS as f64,
        )?;
        GeometryError::check_range("prop_offset", self.prop_offset, f64::MIN, f64::MAX)?;
        GeometryError::check_range("ground_height", self.ground_height, f64::MIN, f64::MAX)?;
        Ok(())
    }
}

/// Full configuration of a [`RollerCoaster`](crate::motion::RollerCoaster).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoasterConfig {
    pub sampling: SamplingParams,
    pub motion: MotionParams,
    pub scenery: SceneryParams,
}

impl CoasterConfig {
    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range parameter found.
    pub fn validate(&self) -> Result<()> {
        self.sampling.validate()?;
        self.motion.validate()?;
        self.scenery.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(CoasterConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_spacing() {
        let motion = MotionParams {
            piece_spacing: 0.0,
            ..MotionParams::default()
        };
        assert!(motion.validate().is_err());
    }

    #[test]
    fn rejects_decel_fraction_above_one() {
        let motion = MotionParams {
            decel_fraction: 1.2,
            ..MotionParams::default()
        };
        assert!(motion.validate().is_err());
    }

    #[test]
    fn rejects_nan_delta_s() {
        let sampling = SamplingParams {
            delta_s: f64::NAN,
            ..SamplingParams::default()
        };
        assert!(sampling.validate().is_err());
    }

    #[test]
    fn zero_min_speed_allowed() {
        let motion = MotionParams {
            min_speed: 0.0,
            ..MotionParams::default()
        };
        assert!(motion.validate().is_ok());
    }

    #[test]
    fn rejects_prop_count_beyond_layout_cap() {
        let scenery = SceneryParams {
            prop_count: usize::MAX,
            ..SceneryParams::default()
        };
        assert!(scenery.validate().is_err());
    }
}
