use crate::{MarkerIndex, MarkerName, MarkerPair};

/// Position of a timeline relative to the markers surrounding it.
///
/// Names make a phase portable between timelines whose marker lists differ;
/// the indices are only meaningful for the list the phase was computed on.
/// A `None` name stands for the boundary of a non-looping timeline.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PhasePosition {
    pub prev_marker_name: Option<MarkerName>,
    pub next_marker_name: Option<MarkerName>,
    pub prev_marker_index: MarkerIndex,
    pub next_marker_index: MarkerIndex,
    /// Fraction of the way from the previous to the next marker, in `[0, 1]`.
    pub position_between_markers: f32,
}

impl PhasePosition {
    pub fn marker_pair(&self) -> MarkerPair {
        MarkerPair::new(self.prev_marker_index, self.next_marker_index)
    }
}
