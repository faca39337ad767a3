use tracing::info;

use crate::config::{CoasterConfig, MotionParams, SamplingParams, SceneryParams};
use crate::error::Result;
use crate::geometry::curve::HermiteCurve;
use crate::layout::{check_spacing, LayoutPieces, LayoutProps, LayoutSupports, PieceLayout};
use crate::math::{Matrix4, Point3};

use super::frame::CartFrame;
use super::track::Track;

/// A track and every layout derived from it.
///
/// The update entry points build the replacement track and layouts first
/// and swap them in only on success, so a failed update leaves the coaster
/// unchanged and queries never observe a half-built state.
#[derive(Debug, Clone)]
pub struct RollerCoaster {
    track: Track,
    sampling: SamplingParams,
    scenery: SceneryParams,
    pieces: PieceLayout,
    supports: PieceLayout,
    props: PieceLayout,
}

impl RollerCoaster {
    /// Builds a coaster on `curve`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is out of range, the arc-length table
    /// cannot be built, or a spacing is too fine for the track length.
    pub fn new(curve: HermiteCurve, config: &CoasterConfig) -> Result<Self> {
        config.validate()?;
        let track = Track::new(curve, &config.sampling, config.motion)?;
        let coaster = Self::assemble(track, config.sampling, config.scenery)?;
        coaster.log_curve_update();
        Ok(coaster)
    }

    fn assemble(track: Track, sampling: SamplingParams, scenery: SceneryParams) -> Result<Self> {
        let piece_spacing = track.params().piece_spacing;
        check_spacing("piece_spacing", piece_spacing, track.total_length())?;
        let pieces = LayoutPieces::new(piece_spacing).execute(&track);
        let (supports, props) = scenery_layouts(&track, &scenery)?;
        Ok(Self {
            track,
            sampling,
            scenery,
            pieces,
            supports,
            props,
        })
    }

    /// Replaces the curve, rebuilding the table, speed model and layouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the arc-length table cannot be built or a
    /// spacing is too fine for the new track length.
    pub fn set_curve(&mut self, curve: HermiteCurve) -> Result<()> {
        let track = Track::new(curve, &self.sampling, *self.track.params())?;
        *self = Self::assemble(track, self.sampling, self.scenery)?;
        self.log_curve_update();
        Ok(())
    }

    /// Rebuilds the table at arc-length resolution `delta_s`, keeping the
    /// curve.
    ///
    /// # Errors
    ///
    /// Returns an error if `delta_s` is not positive or is too fine for
    /// the table to hold.
    pub fn set_arc_length_resolution(&mut self, delta_s: f64) -> Result<()> {
        let sampling = SamplingParams {
            delta_s,
            ..self.sampling
        };
        let track = self.track.resampled(&sampling)?;
        *self = Self::assemble(track, sampling, self.scenery)?;
        Ok(())
    }

    /// Applies new motion parameters without rebuilding the table.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` is out of range or the piece spacing
    /// is too fine for the track length.
    pub fn set_motion_params(&mut self, params: MotionParams) -> Result<()> {
        let track = self.track.with_params(params)?;
        *self = Self::assemble(track, self.sampling, self.scenery)?;
        Ok(())
    }

    /// Re-scatters supports and props; the track is untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if `scenery` is out of range or the support spacing
    /// is too fine for the track length.
    pub fn set_scenery_params(&mut self, scenery: SceneryParams) -> Result<()> {
        scenery.validate()?;
        let (supports, props) = scenery_layouts(&self.track, &scenery)?;
        self.scenery = scenery;
        self.supports = supports;
        self.props = props;
        Ok(())
    }

    fn log_curve_update(&self) {
        let profile = self.track.profile();
        info!(
            control_points = self.track.curve().len(),
            total_length = self.track.total_length(),
            max_height = profile.max_height(),
            decel_speed = profile.decel_speed(),
            "curve updated"
        );
    }

    #[must_use]
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// The configuration currently in effect.
    #[must_use]
    pub fn config(&self) -> CoasterConfig {
        CoasterConfig {
            sampling: self.sampling,
            motion: *self.track.params(),
            scenery: self.scenery,
        }
    }

    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.track.total_length()
    }

    /// Cart speed at arc length `s`; wraps around the lap.
    #[must_use]
    pub fn speed_at(&self, s: f64) -> f64 {
        self.track.speed_at(s)
    }

    /// Curve position at arc length `s`; wraps around the lap.
    #[must_use]
    pub fn position_at(&self, s: f64) -> Point3 {
        self.track.position_at(s)
    }

    /// Banked cart frame at arc length `s`; wraps around the lap.
    #[must_use]
    pub fn frame_at(&self, s: f64) -> CartFrame {
        self.track.frame_at(s)
    }

    /// Cart transform at arc length `s`; wraps around the lap.
    #[must_use]
    pub fn transform_at(&self, s: f64) -> Matrix4 {
        self.track.transform_at(s)
    }

    #[must_use]
    pub fn pieces(&self) -> &PieceLayout {
        &self.pieces
    }

    #[must_use]
    pub fn supports(&self) -> &PieceLayout {
        &self.supports
    }

    #[must_use]
    pub fn props(&self) -> &PieceLayout {
        &self.props
    }
}

fn scenery_layouts(track: &Track, scenery: &SceneryParams) -> Result<(PieceLayout, PieceLayout)> {
    check_spacing("support_spacing", scenery.support_spacing, track.total_length())?;
    let supports =
        LayoutSupports::new(scenery.support_spacing, scenery.ground_height).execute(track);
    let props = LayoutProps::new(scenery.prop_count, scenery.prop_offset, scenery.ground_height)
        .execute(track);
    Ok((supports, props))
}
