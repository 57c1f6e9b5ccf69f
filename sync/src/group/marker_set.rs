use std::collections::HashSet;

use crate::{validate_sync_markers, MarkerName, SyncMarker};

/// Collects the marker names every member with usable markers shares with the
/// leader. Returns true if the group can synchronize on markers.
///
/// Members whose markers are empty or fail validation are left out of the
/// intersection instead of emptying it. A leader without usable markers
/// disables marker synchronization for the whole group.
pub fn intersect_sync_markers<'a, I>(
    leader_markers: &[SyncMarker],
    member_markers: I,
    valid_markers: &mut HashSet<MarkerName>,
) -> bool
where
    I: IntoIterator<Item = &'a [SyncMarker]>,
{
    valid_markers.clear();
    if validate_sync_markers(leader_markers).is_err() {
        return false;
    }

    valid_markers.extend(leader_markers.iter().map(|marker| marker.name().clone()));

    for markers in member_markers {
        if validate_sync_markers(markers).is_err() {
            continue;
        }
        valid_markers.retain(|name| markers.iter().any(|marker| marker.name() == name));
    }

    !valid_markers.is_empty()
}
