use tracing::warn;

use crate::motion::Track;

use super::{layout_distances, sparse_layout_check, PieceLayout};

/// Places track pieces every `spacing` along the track.
pub struct LayoutPieces {
    spacing: f64,
}

impl LayoutPieces {
    /// Creates a new `LayoutPieces` operation.
    #[must_use]
    pub fn new(spacing: f64) -> Self {
        Self { spacing }
    }

    /// Executes the layout.
    ///
    /// Piece `i` carries the banked cart transform at `s = i * spacing`,
    /// for `floor(length / spacing) + 1` pieces. A spacing above a tenth of
    /// the lap is logged and reported on the layout, which is still built.
    #[must_use]
    pub fn execute(&self, track: &Track) -> PieceLayout {
        let total_length = track.total_length();
        let diagnostic = sparse_layout_check(total_length, self.spacing);
        if let Some(d) = &diagnostic {
            warn!("{d}");
        }
        let transforms = layout_distances(total_length, self.spacing)
            .into_iter()
            .map(|s| track.transform_at(s))
            .collect();
        PieceLayout::new(transforms, self.spacing, diagnostic)
    }
}
