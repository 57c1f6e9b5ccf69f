use std::ops::Range;

use crate::{
    timeline::sync_marker::marker_name, MarkerIndex, MarkerName, MarkerPair, PhasePosition,
    SyncMarker, TimelineState,
};

fn first_valid<F>(markers: &[SyncMarker], range: Range<usize>, is_valid: &F) -> Option<usize>
where
    F: Fn(&MarkerName) -> bool,
{
    range
        .into_iter()
        .find(|&index| is_valid(markers[index].name()))
}

fn last_valid<F>(markers: &[SyncMarker], range: Range<usize>, is_valid: &F) -> Option<usize>
where
    F: Fn(&MarkerName) -> bool,
{
    range
        .into_iter()
        .rev()
        .find(|&index| is_valid(markers[index].name()))
}

/// The valid marker following `index`, wrapping on looping timelines.
pub(crate) fn next_valid_index<F>(
    markers: &[SyncMarker],
    index: usize,
    is_looping: bool,
    is_valid: &F,
) -> MarkerIndex
where
    F: Fn(&MarkerName) -> bool,
{
    let len = markers.len();
    if let Some(next) = first_valid(markers, (index + 1).min(len)..len, is_valid) {
        return MarkerIndex::At(next);
    }
    if !is_looping {
        return MarkerIndex::Boundary;
    }
    first_valid(markers, 0..(index + 1).min(len), is_valid)
        .map_or(MarkerIndex::Boundary, MarkerIndex::At)
}

/// The valid marker preceding `index`, wrapping on looping timelines.
pub(crate) fn prev_valid_index<F>(
    markers: &[SyncMarker],
    index: usize,
    is_looping: bool,
    is_valid: &F,
) -> MarkerIndex
where
    F: Fn(&MarkerName) -> bool,
{
    let len = markers.len();
    if let Some(prev) = last_valid(markers, 0..index.min(len), is_valid) {
        return MarkerIndex::At(prev);
    }
    if !is_looping {
        return MarkerIndex::Boundary;
    }
    last_valid(markers, index.min(len)..len, is_valid)
        .map_or(MarkerIndex::Boundary, MarkerIndex::At)
}

/// Finds the valid markers directly around the state's position.
///
/// Markers rejected by `is_valid` are skipped as if they did not exist.
/// Looping timelines wrap around the seam; non-looping ones report a
/// [`MarkerIndex::Boundary`] on the side that has no marker.
pub fn nearest_valid_markers_at<F>(
    markers: &[SyncMarker],
    state: &TimelineState,
    is_valid: F,
) -> MarkerPair
where
    F: Fn(&MarkerName) -> bool,
{
    let len = markers.len();
    let position = state.position();
    let is_looping = state.is_looping();

    // first marker strictly after the position
    let guess = markers.partition_point(|marker| marker.position() <= position);

    let prev = match last_valid(markers, 0..guess, &is_valid) {
        Some(index) => MarkerIndex::At(index),
        None if is_looping => {
            last_valid(markers, 0..len, &is_valid).map_or(MarkerIndex::Boundary, MarkerIndex::At)
        }
        None => MarkerIndex::Boundary,
    };

    let next = match first_valid(markers, guess..len, &is_valid) {
        Some(index) => MarkerIndex::At(index),
        None if is_looping => {
            first_valid(markers, 0..len, &is_valid).map_or(MarkerIndex::Boundary, MarkerIndex::At)
        }
        None => MarkerIndex::Boundary,
    };

    MarkerPair::new(prev, next)
}

cfg_if! {
    if #[cfg(debug_assertions)] {
        /// Asserts that `pair.next` is the valid successor of `pair.prev`.
        pub(crate) fn debug_validate_marker_pair<F>(
            markers: &[SyncMarker],
            pair: MarkerPair,
            is_looping: bool,
            is_valid: &F,
        ) where
            F: Fn(&MarkerName) -> bool,
        {
            let expected_next = match pair.prev {
                MarkerIndex::At(prev) => next_valid_index(markers, prev, is_looping, is_valid),
                MarkerIndex::Boundary => first_valid(markers, 0..markers.len(), is_valid)
                    .map_or(MarkerIndex::Boundary, MarkerIndex::At),
                MarkerIndex::Uninitialized => MarkerIndex::Uninitialized,
            };
            debug_assert!(
                pair.is_initialized() && pair.next == expected_next,
                "inconsistent leader marker pair {:?}, expected next {:?}",
                pair,
                expected_next
            );
        }
    } else {
        pub(crate) fn debug_validate_marker_pair<F>(
            _markers: &[SyncMarker],
            _pair: MarkerPair,
            _is_looping: bool,
            _is_valid: &F,
        ) where
            F: Fn(&MarkerName) -> bool,
        {
        }
    }
}

/// Finds the follower markers named like the leader's phase, nearest to the
/// follower's current position.
///
/// Returns an uninitialized pair when the follower lacks the names.
pub fn nearest_matching_markers(
    phase: &PhasePosition,
    markers: &[SyncMarker],
    state: &TimelineState,
) -> MarkerPair {
    match (&phase.prev_marker_name, &phase.next_marker_name) {
        (None, Some(next_name)) => MarkerPair::new(
            MarkerIndex::Boundary,
            markers
                .iter()
                .position(|marker| marker.name() == next_name)
                .map_or(MarkerIndex::Uninitialized, MarkerIndex::At),
        ),
        (Some(prev_name), None) => MarkerPair::new(
            markers
                .iter()
                .rposition(|marker| marker.name() == prev_name)
                .map_or(MarkerIndex::Uninitialized, MarkerIndex::At),
            MarkerIndex::Boundary,
        ),
        (Some(prev_name), Some(next_name)) => {
            exact_matching_markers_at(prev_name, next_name, phase, markers, state)
        }
        (None, None) => MarkerPair::default(),
    }
}

fn exact_matching_markers_at(
    prev_name: &MarkerName,
    next_name: &MarkerName,
    phase: &PhasePosition,
    markers: &[SyncMarker],
    state: &TimelineState,
) -> MarkerPair {
    let len = markers.len();
    let duration = state.duration();
    let current_time = state.position();
    let is_looping = state.is_looping();

    let mut best: Option<(f32, MarkerPair)> = None;

    for (prev_index, prev_marker) in markers.iter().enumerate() {
        if prev_marker.name() != prev_name {
            continue;
        }
        let prev_time = prev_marker.position();
        let search_end = if is_looping { len + prev_index + 1 } else { len };

        let mut found_next = false;
        for candidate in prev_index + 1..search_end {
            let next_index = candidate % len;
            if markers[next_index].name() != next_name {
                continue;
            }

            let looped = next_index <= prev_index;
            let mut next_time = markers[next_index].position();
            if looped {
                next_time += duration;
            }

            let desired_time =
                prev_time + phase.position_between_markers * (next_time - prev_time);
            let mut delta = (desired_time - current_time).abs();
            if looped {
                delta = delta.min((desired_time - duration - current_time).abs());
            }

            if best.map_or(true, |(best_delta, _)| delta < best_delta) {
                best = Some((
                    delta,
                    MarkerPair::new(MarkerIndex::At(prev_index), MarkerIndex::At(next_index)),
                ));
            }
            found_next = true;
            break;
        }

        if !found_next && best.is_none() {
            // nothing named like the leader's next marker follows: the follower
            // ran out of markers, keep the last one not ahead of it
            let prev = (prev_index..len)
                .take_while(|&index| markers[index].position() <= current_time)
                .last()
                .unwrap_or(prev_index);
            return MarkerPair::new(MarkerIndex::At(prev), MarkerIndex::Boundary);
        }
    }

    best.map(|(_, pair)| pair).unwrap_or_default()
}

pub(crate) fn step_forward(markers: &[SyncMarker], index: MarkerIndex, is_looping: bool) -> MarkerIndex {
    match index {
        MarkerIndex::At(i) if i + 1 < markers.len() => MarkerIndex::At(i + 1),
        MarkerIndex::At(_) if is_looping && !markers.is_empty() => MarkerIndex::At(0),
        MarkerIndex::At(_) => MarkerIndex::Boundary,
        other => other,
    }
}

pub(crate) fn step_backward(
    markers: &[SyncMarker],
    index: MarkerIndex,
    is_looping: bool,
) -> MarkerIndex {
    match index {
        MarkerIndex::At(i) if i > 0 => MarkerIndex::At(i - 1),
        MarkerIndex::At(_) if is_looping && !markers.is_empty() => {
            MarkerIndex::At(markers.len() - 1)
        }
        MarkerIndex::At(_) => MarkerIndex::Boundary,
        other => other,
    }
}

/// Walks forward from `from` (inclusive) to the first marker called `name`.
///
/// Stops on the boundary of a non-looping timeline. A looping search that
/// goes all the way around without a match ends where it started.
pub fn seek_marker_forward(
    markers: &[SyncMarker],
    from: MarkerIndex,
    is_looping: bool,
    name: Option<&MarkerName>,
) -> MarkerIndex {
    let mut index = from;
    for _ in 0..markers.len() {
        if marker_name(markers, index) == name || index.get().is_none() {
            return index;
        }
        index = step_forward(markers, index, is_looping);
    }
    index
}

/// Walks backward from `from` (inclusive) to the first marker called `name`.
pub fn seek_marker_backward(
    markers: &[SyncMarker],
    from: MarkerIndex,
    is_looping: bool,
    name: Option<&MarkerName>,
) -> MarkerIndex {
    let mut index = from;
    for _ in 0..markers.len() {
        if marker_name(markers, index) == name || index.get().is_none() {
            return index;
        }
        index = step_backward(markers, index, is_looping);
    }
    index
}

/// Repairs a follower pair so its names literally match the leader's phase.
///
/// Sequences can share marker names yet order them differently, so the nearest
/// pair may carry the wrong name on one side. The search runs in the playing
/// direction. Returns false if the names cannot be matched.
pub fn sanitize_follower_markers(
    phase: &PhasePosition,
    markers: &[SyncMarker],
    is_playing_forward: bool,
    is_looping: bool,
    pair: &mut MarkerPair,
) -> bool {
    if !pair.is_initialized() || markers.is_empty() {
        return false;
    }

    let prev_name = phase.prev_marker_name.as_ref();
    let next_name = phase.next_marker_name.as_ref();
    let last = markers.len() - 1;

    if is_playing_forward {
        if marker_name(markers, pair.prev) != prev_name {
            let from = match pair.prev {
                MarkerIndex::Boundary => MarkerIndex::At(0),
                other => other,
            };
            pair.prev = seek_marker_forward(markers, from, is_looping, prev_name);
            pair.next = match pair.prev {
                // ran off the end looking for the start boundary
                MarkerIndex::Boundary => MarkerIndex::At(0),
                other => step_forward(markers, other, is_looping),
            };
        }
        if marker_name(markers, pair.next) != next_name {
            pair.next = seek_marker_forward(markers, pair.next, is_looping, next_name);
        }
    } else {
        if marker_name(markers, pair.next) != next_name {
            let from = match pair.next {
                MarkerIndex::Boundary => MarkerIndex::At(last),
                other => other,
            };
            pair.next = seek_marker_backward(markers, from, is_looping, next_name);
            pair.prev = match pair.next {
                MarkerIndex::Boundary => MarkerIndex::At(last),
                other => step_backward(markers, other, is_looping),
            };
        }
        if marker_name(markers, pair.prev) != prev_name {
            pair.prev = seek_marker_backward(markers, pair.prev, is_looping, prev_name);
        }
    }

    marker_name(markers, pair.prev) == prev_name && marker_name(markers, pair.next) == next_name
}
