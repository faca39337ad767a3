//! Discrete transforms placed at fixed arc-length intervals.
//!
//! Track pieces, support posts and scenery props are all generated the same
//! way: walk the track in fixed distance increments and record a transform
//! per stop. Layouts are rebuilt wholesale whenever the track changes.

mod pieces;
mod props;
mod supports;

pub use pieces::LayoutPieces;
pub use props::LayoutProps;
pub use supports::LayoutSupports;

use crate::error::{Diagnostic, GeometryError, Result};
use crate::math::Matrix4;

/// Most stops a single layout may hold.
pub const MAX_LAYOUT_STOPS: usize = 1 << 20;

/// An ordered set of rigid transforms along the track.
#[derive(Debug, Clone, Default)]
pub struct PieceLayout {
    transforms: Vec<Matrix4>,
    spacing: f64,
    diagnostic: Option<Diagnostic>,
}

impl PieceLayout {
    pub(crate) fn new(
        transforms: Vec<Matrix4>,
        spacing: f64,
        diagnostic: Option<Diagnostic>,
    ) -> Self {
        Self {
            transforms,
            spacing,
            diagnostic,
        }
    }

    /// The transforms, in order of increasing arc length.
    #[must_use]
    pub fn transforms(&self) -> &[Matrix4] {
        &self.transforms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Arc-length distance between consecutive entries.
    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Set when the spacing is too coarse for the track length.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        self.diagnostic.as_ref()
    }
}

/// Distances `0, spacing, 2 * spacing, ...` up to and including
/// `total_length`: `floor(total_length / spacing) + 1` stops.
///
/// The last stop may coincide with the first on a closed track. Never
/// returns more than `MAX_LAYOUT_STOPS + 1` stops; [`check_spacing`]
/// rejects spacings that would need more.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn layout_distances(total_length: f64, spacing: f64) -> Vec<f64> {
    if !(spacing > 0.0 && total_length >= 0.0 && total_length.is_finite()) {
        return Vec::new();
    }
    let last = (total_length / spacing).floor().min(MAX_LAYOUT_STOPS as f64) as usize;
    (0..=last).map(|i| i as f64 * spacing).collect()
}

/// Checks that `spacing` needs at most [`MAX_LAYOUT_STOPS`] stops on a
/// track of `total_length`.
///
/// # Errors
///
/// Returns [`GeometryError::ParameterOutOfRange`] naming `parameter` when
/// the spacing is too fine, non-positive or non-finite.
#[allow(clippy::cast_precision_loss)]
pub fn check_spacing(parameter: &'static str, spacing: f64, total_length: f64) -> Result<()> {
    let finest = (total_length / MAX_LAYOUT_STOPS as f64).max(f64::MIN_POSITIVE);
    GeometryError::check_range(parameter, spacing, finest, f64::MAX)?;
    Ok(())
}

/// `SparseLayout` when `spacing` exceeds a tenth of the track length.
#[must_use]
pub fn sparse_layout_check(total_length: f64, spacing: f64) -> Option<Diagnostic> {
    (spacing > 0.1 * total_length).then_some(Diagnostic::SparseLayout {
        spacing,
        total_length,
    })
}
