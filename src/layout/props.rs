use crate::math::{Matrix4, Point3, Vector3};
use crate::motion::Track;

use super::PieceLayout;

/// Scatters upright scenery props beside the track.
///
/// `count` props are spread evenly over one lap and pushed sideways by
/// `offset`, alternating left and right, then dropped to the ground.
pub struct LayoutProps {
    count: usize,
    offset: f64,
    ground_height: f64,
}

impl LayoutProps {
    /// Creates a new `LayoutProps` operation.
    #[must_use]
    pub fn new(count: usize, offset: f64, ground_height: f64) -> Self {
        Self {
            count,
            offset,
            ground_height,
        }
    }

    /// Executes the layout.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self, track: &Track) -> PieceLayout {
        if self.count == 0 {
            return PieceLayout::default();
        }
        let spacing = track.total_length() / self.count as f64;
        let transforms = (0..self.count)
            .map(|i| {
                let frame = track.frame_at(i as f64 * spacing);
                let across = horizontal(&frame.side)
                    .or_else(|| horizontal(&frame.tangent).map(|t| Vector3::y().cross(&t)))
                    .unwrap_or_else(Vector3::x);
                let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
                let spot = frame.position + across * (self.offset * sign);
                Matrix4::new_translation(&Point3::new(spot.x, self.ground_height, spot.z).coords)
            })
            .collect();
        PieceLayout::new(transforms, spacing, None)
    }
}

/// Projects `v` onto the ground plane and normalizes it.
fn horizontal(v: &Vector3) -> Option<Vector3> {
    Vector3::new(v.x, 0.0, v.z).try_normalize(1e-6)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{MotionParams, SamplingParams};
    use crate::test_curves::square;
    use approx::assert_relative_eq;

    fn track() -> Track {
        Track::new(square(), &SamplingParams::default(), MotionParams::default()).unwrap()
    }

    #[test]
    fn props_sit_on_ground_beside_track() {
        let t = track();
        let layout = LayoutProps::new(30, 6.0, -10.0).execute(&t);
        assert_eq!(layout.len(), 30);
        for (i, m) in layout.transforms().iter().enumerate() {
            let p = m.transform_point(&Point3::origin());
            assert_relative_eq!(p.y, -10.0, epsilon = 1e-12);
            let on_track = t.position_at(i as f64 * layout.spacing());
            let dx = p.x - on_track.x;
            let dz = p.z - on_track.z;
            assert_relative_eq!((dx * dx + dz * dz).sqrt(), 6.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn props_alternate_sides() {
        let t = track();
        let layout = LayoutProps::new(2, 6.0, 0.0).execute(&t);
        let centre = Point3::new(10.0, 0.0, 10.0);
        let a = layout.transforms()[0].transform_point(&Point3::origin());
        let b = layout.transforms()[1].transform_point(&Point3::origin());
        let track_a = t.position_at(0.0);
        let track_b = t.position_at(layout.spacing());
        // One prop lands inside the loop, the other outside
        let inside_a = (a - centre).norm() < (track_a - centre).norm();
        let inside_b = (b - centre).norm() < (track_b - centre).norm();
        assert_ne!(inside_a, inside_b);
    }

    #[test]
    fn zero_props() {
        assert!(LayoutProps::new(0, 6.0, 0.0).execute(&track()).is_empty());
    }
}
