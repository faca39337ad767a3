use crate::math::{Matrix4, Vector3, TOLERANCE};
use crate::motion::Track;

use super::{PieceLayout, MAX_LAYOUT_STOPS};

/// Places vertical support posts under the track.
///
/// Each post is a unit-height model scaled to reach from the ground up to
/// the track. Stops where the track is at or below the ground are skipped.
pub struct LayoutSupports {
    spacing: f64,
    ground_height: f64,
}

impl LayoutSupports {
    /// Creates a new `LayoutSupports` operation.
    #[must_use]
    pub fn new(spacing: f64, ground_height: f64) -> Self {
        Self {
            spacing,
            ground_height,
        }
    }

    /// Executes the layout.
    #[must_use]
    pub fn execute(&self, track: &Track) -> PieceLayout {
        let total_length = track.total_length();
        if self.spacing.is_nan() || self.spacing <= 0.0 {
            return PieceLayout::new(Vec::new(), self.spacing, None);
        }

        // The stop at total_length would duplicate the one at 0
        let transforms = (0..)
            .take(MAX_LAYOUT_STOPS)
            .map(|i| f64::from(i) * self.spacing)
            .take_while(|&s| s < total_length)
            .filter_map(|s| {
                let p = track.position_at(s);
                let height = p.y - self.ground_height;
                (height > TOLERANCE).then(|| {
                    Matrix4::new_translation(&Vector3::new(p.x, self.ground_height, p.z))
                        * Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, height, 1.0))
                })
            })
            .collect();
        PieceLayout::new(transforms, self.spacing, None)
    }
}
