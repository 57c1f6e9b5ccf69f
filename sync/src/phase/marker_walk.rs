use crate::{
    phase::marker_search::{
        next_valid_index, prev_valid_index, seek_marker_backward, seek_marker_forward,
        step_backward, step_forward,
    },
    time_from_phase_position, MarkerIndex, MarkerName, MarkerPair, PhasePosition, SyncMarker,
    TimelineState,
};

/// Walks `elapsed_time` from the state's position across the valid markers,
/// updating `pair` and collecting the names of every marker passed, in order.
///
/// `state` is the timeline before it advanced. A marker exactly at the end of
/// the walk is not passed yet. Non-looping timelines stop at the boundary.
pub fn advance_and_collect_markers_passed<F>(
    state: &TimelineState,
    elapsed_time: f32,
    is_playing_forward: bool,
    markers: &[SyncMarker],
    is_valid: F,
    pair: &mut MarkerPair,
    markers_passed: &mut Vec<MarkerName>,
) where
    F: Fn(&MarkerName) -> bool,
{
    markers_passed.clear();

    let duration = state.duration();
    let is_looping = state.is_looping();
    let mut remaining = elapsed_time.abs();
    let mut current_time = state.position();

    if !remaining.is_finite() || (is_looping && duration <= 0.0) {
        return;
    }

    if is_playing_forward {
        // next marker lies one loop ahead while the pair straddles the seam
        let mut loop_offset = match (pair.prev, pair.next) {
            (MarkerIndex::At(prev), MarkerIndex::At(next))
                if is_looping && next <= prev && current_time >= markers[prev].position() =>
            {
                duration
            }
            _ => 0.0,
        };

        while remaining > 0.0 {
            let MarkerIndex::At(next) = pair.next else {
                break;
            };
            let marker = &markers[next];
            let marker_time = marker.position() + loop_offset;
            if current_time + remaining <= marker_time {
                break;
            }

            markers_passed.push(marker.name().clone());
            remaining -= (marker_time - current_time).max(0.0);
            current_time = marker_time;

            pair.prev = pair.next;
            pair.next = next_valid_index(markers, next, is_looping, &is_valid);
            if let MarkerIndex::At(following) = pair.next {
                if following <= next {
                    loop_offset += duration;
                }
            }
        }
    } else {
        let mut loop_offset = match (pair.prev, pair.next) {
            (MarkerIndex::At(prev), MarkerIndex::At(next))
                if is_looping && next <= prev && current_time < markers[prev].position() =>
            {
                -duration
            }
            _ => 0.0,
        };

        while remaining > 0.0 {
            let MarkerIndex::At(prev) = pair.prev else {
                break;
            };
            let marker = &markers[prev];
            let marker_time = marker.position() + loop_offset;
            if current_time - remaining >= marker_time {
                break;
            }

            markers_passed.push(marker.name().clone());
            remaining -= (current_time - marker_time).max(0.0);
            current_time = marker_time;

            pair.next = pair.prev;
            pair.prev = prev_valid_index(markers, prev, is_looping, &is_valid);
            if let MarkerIndex::At(preceding) = pair.prev {
                if preceding >= prev {
                    loop_offset -= duration;
                }
            }
        }
    }
}

/// Replays the markers a leader passed on a follower's own markers and
/// returns the follower time matching the leader's end phase.
///
/// `pair` starts as the follower's pair for the leader's start phase and ends
/// as the pair for its end phase.
pub fn replay_markers_passed(
    state: &TimelineState,
    is_playing_forward: bool,
    leader_end: &PhasePosition,
    markers: &[SyncMarker],
    markers_passed: &[MarkerName],
    pair: &mut MarkerPair,
) -> f32 {
    let is_looping = state.is_looping();

    if !markers_passed.is_empty() {
        if is_playing_forward {
            for (passed_index, passed) in markers_passed.iter().enumerate() {
                let from = if passed_index == 0 {
                    pair.next
                } else {
                    step_forward(markers, pair.next, is_looping)
                };
                if from.get().is_none() {
                    if passed_index > 0 {
                        pair.prev = pair.next;
                        pair.next = MarkerIndex::Boundary;
                    }
                    break;
                }
                pair.prev = pair.next;
                pair.next = seek_marker_forward(markers, from, is_looping, Some(passed));
            }

            if leader_end.next_marker_name.is_none() {
                pair.next = MarkerIndex::Boundary;
            } else if pair.next.get().is_some() {
                pair.prev = pair.next;
                let from = step_forward(markers, pair.next, is_looping);
                pair.next = seek_marker_forward(
                    markers,
                    from,
                    is_looping,
                    leader_end.next_marker_name.as_ref(),
                );
            }
        } else {
            for (passed_index, passed) in markers_passed.iter().enumerate() {
                let from = if passed_index == 0 {
                    pair.prev
                } else {
                    step_backward(markers, pair.prev, is_looping)
                };
                if from.get().is_none() {
                    if passed_index > 0 {
                        pair.next = pair.prev;
                        pair.prev = MarkerIndex::Boundary;
                    }
                    break;
                }
                pair.next = pair.prev;
                pair.prev = seek_marker_backward(markers, from, is_looping, Some(passed));
            }

            if leader_end.prev_marker_name.is_none() {
                pair.prev = MarkerIndex::Boundary;
            } else if pair.prev.get().is_some() {
                pair.next = pair.prev;
                let from = step_backward(markers, pair.prev, is_looping);
                pair.prev = seek_marker_backward(
                    markers,
                    from,
                    is_looping,
                    leader_end.prev_marker_name.as_ref(),
                );
            }
        }
    }

    time_from_phase_position(
        markers,
        state,
        *pair,
        leader_end.position_between_markers,
    )
}
