use crate::{
    timeline::sync_marker::marker_name, MarkerIndex, MarkerPair, PhasePosition, SyncMarker,
    TimelineState,
};

const SMALL_NUMBER: f32 = 1.0e-8;

fn lerp(from: f32, to: f32, alpha: f32) -> f32 {
    from + alpha * (to - from)
}

fn marker_position(markers: &[SyncMarker], index: MarkerIndex) -> Option<f32> {
    index
        .get()
        .and_then(|i| markers.get(i))
        .map(SyncMarker::position)
}

/// A list whose last marker repeats its first one, e.g. `[R, L, R]`: the
/// closing marker sits on the loop seam and duplicates the opening one.
fn is_loop_shaped(markers: &[SyncMarker]) -> bool {
    match (markers.first(), markers.last()) {
        (Some(first), Some(last)) if markers.len() > 1 => first.name() == last.name(),
        _ => false,
    }
}

/// Maps an index into a list onto a list of `target_len` markers that repeats
/// the same pattern.
fn remap_marker_index(index: usize, target_len: usize, loop_shaped: bool) -> Option<usize> {
    if target_len == 0 {
        return None;
    }
    if index < target_len {
        return Some(index);
    }
    if loop_shaped && target_len > 1 {
        // the duplicated closing marker is not part of the repeating cycle
        Some(((index - 1) % (target_len - 1)) + 1)
    } else {
        Some(index % target_len)
    }
}

/// Whether a phase computed on one marker list can be replayed on the other.
///
/// Every marker of the longer list must be matched, by name, by the marker the
/// remapped index points to in the shorter list. Lists sharing an alternating
/// pattern such as `[L, R]` and `[L, R, L, R]` match; `[L, R]` and `[R, L]` do not.
pub fn can_phase_match(markers_a: &[SyncMarker], markers_b: &[SyncMarker]) -> bool {
    let (longest, shortest) = if markers_a.len() >= markers_b.len() {
        (markers_a, markers_b)
    } else {
        (markers_b, markers_a)
    };

    if shortest.is_empty() {
        return false;
    }

    let loop_shaped = is_loop_shaped(longest);
    longest.iter().enumerate().all(|(index, marker)| {
        remap_marker_index(index, shortest.len(), loop_shaped)
            .and_then(|short_index| shortest.get(short_index))
            .map_or(false, |short_marker| short_marker.name() == marker.name())
    })
}

/// Converts a phase computed on `from_markers` into the same phase on `to_markers`.
///
/// Returns `None` when the remapped indices do not land on markers carrying
/// the phase's names, which only happens if [`can_phase_match`] is false.
pub fn find_matching_phase_position(
    from_markers: &[SyncMarker],
    phase: &PhasePosition,
    to_markers: &[SyncMarker],
) -> Option<PhasePosition> {
    let longest = if from_markers.len() >= to_markers.len() {
        from_markers
    } else {
        to_markers
    };
    let loop_shaped = is_loop_shaped(longest);

    let remap = |index: MarkerIndex| match index {
        MarkerIndex::At(index) => {
            remap_marker_index(index, to_markers.len(), loop_shaped).map(MarkerIndex::At)
        }
        MarkerIndex::Boundary => Some(MarkerIndex::Boundary),
        MarkerIndex::Uninitialized => None,
    };

    let prev_marker_index = remap(phase.prev_marker_index)?;
    let next_marker_index = remap(phase.next_marker_index)?;

    if marker_name(to_markers, prev_marker_index) != phase.prev_marker_name.as_ref()
        || marker_name(to_markers, next_marker_index) != phase.next_marker_name.as_ref()
    {
        return None;
    }

    Some(PhasePosition {
        prev_marker_name: phase.prev_marker_name.clone(),
        next_marker_name: phase.next_marker_name.clone(),
        prev_marker_index,
        next_marker_index,
        position_between_markers: phase.position_between_markers,
    })
}

/// Computes where `state` sits between the two markers of `pair`.
///
/// A boundary on either side stands for the start or the end of the timeline.
/// Pairs straddling the loop seam are unwrapped first, and a pair made of a
/// single marker spans a whole loop.
pub fn calculate_phase_position(
    markers: &[SyncMarker],
    state: &TimelineState,
    pair: MarkerPair,
) -> PhasePosition {
    let duration = state.duration();
    let mut current_time = state.position();

    let mut phase = PhasePosition {
        prev_marker_index: pair.prev,
        next_marker_index: pair.next,
        ..PhasePosition::default()
    };

    let mut prev_time = 0.0;
    if let Some(marker) = pair.prev.get().and_then(|i| markers.get(i)) {
        prev_time = marker.position();
        phase.prev_marker_name = Some(marker.name().clone());
    }

    let mut next_time = duration;
    if let Some(marker) = pair.next.get().and_then(|i| markers.get(i)) {
        next_time = marker.position();
        phase.next_marker_name = Some(marker.name().clone());
    }

    if prev_time > next_time {
        if prev_time > current_time {
            prev_time -= duration;
        }
        if next_time < current_time {
            next_time += duration;
        }
    } else if prev_time > current_time {
        current_time += duration;
    }

    if prev_time == next_time {
        next_time += duration;
    }

    let span = (next_time - prev_time).max(SMALL_NUMBER);
    let position = (current_time - prev_time) / span;
    phase.position_between_markers = if position.is_nan() {
        0.0
    } else {
        position.clamp(0.0, 1.0)
    };

    phase
}

/// Time on `state`'s timeline that sits `position_between_markers` of the way
/// from the previous to the next marker of `pair`. Clamped to the timeline.
pub fn time_from_phase_position(
    markers: &[SyncMarker],
    state: &TimelineState,
    pair: MarkerPair,
    position_between_markers: f32,
) -> f32 {
    let duration = state.duration();
    let mut prev_time = marker_position(markers, pair.prev).unwrap_or(0.0);
    let next_time = marker_position(markers, pair.next).unwrap_or(duration);

    if prev_time >= next_time {
        prev_time -= duration;
    }

    let mut desired_time = lerp(prev_time, next_time, position_between_markers);
    if desired_time < 0.0 {
        desired_time += duration;
    }

    desired_time.clamp(0.0, duration.max(0.0))
}

/// Signed time that elapsed between two states of the same timeline, assuming
/// it wrapped at most once in the direction of play.
pub fn calculate_elapsed_time(
    start: &TimelineState,
    end: &TimelineState,
    is_playing_forward: bool,
) -> f32 {
    let start_time = start.position();
    let end_time = end.position();
    let duration = end.duration();

    if is_playing_forward {
        if end_time >= start_time {
            end_time - start_time
        } else {
            (duration - start_time) + end_time
        }
    } else if end_time <= start_time {
        end_time - start_time
    } else {
        (end_time - duration) - start_time
    }
}
