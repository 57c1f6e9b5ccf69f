use crate::{MarkerError, MarkerIndex, MarkerName};

/// A named point on a timeline, e.g. a foot plant.
#[derive(Clone, Debug, PartialEq)]
pub struct SyncMarker {
    name: MarkerName,
    position: f32,
}

impl SyncMarker {
    pub fn new(name: impl Into<MarkerName>, position: f32) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }

    pub fn name(&self) -> &MarkerName {
        &self.name
    }

    pub fn position(&self) -> f32 {
        self.position
    }
}

/// Checks that a marker list can drive marker-based synchronization: it must be
/// non-empty, and positions must be finite, non-negative and non-decreasing.
pub fn validate_sync_markers(markers: &[SyncMarker]) -> Result<(), MarkerError> {
    if markers.is_empty() {
        return Err(MarkerError::Empty);
    }

    let mut previous = 0.0;
    for (index, marker) in markers.iter().enumerate() {
        let position = marker.position;
        if !position.is_finite() || position < 0.0 {
            return Err(MarkerError::InvalidPosition { index, position });
        }
        if position < previous {
            return Err(MarkerError::Unsorted {
                index,
                position,
                previous,
            });
        }
        previous = position;
    }

    Ok(())
}

pub(crate) fn marker_name(markers: &[SyncMarker], index: MarkerIndex) -> Option<&MarkerName> {
    index.get().and_then(|i| markers.get(i)).map(SyncMarker::name)
}
