use log::{debug, warn};

use crate::{
    advance_and_collect_markers_passed, calculate_elapsed_time, calculate_phase_position,
    group::{
        group_state::GroupState,
        scratch::{GroupContext, TickScratch},
    },
    intersect_sync_markers, nearest_valid_markers_at,
    phase::marker_search::debug_validate_marker_pair,
    time_from_phase_position, validate_sync_markers, GroupMember, MarkerError, MarkerName,
    PlayerArena, SyncDebugMode, SyncGroupConfig, SyncMarker, Timeline,
};

/// Copies every member's markers and decides whether the group can
/// synchronize on them this tick.
pub(crate) fn collect_group_markers(
    config: &SyncGroupConfig,
    group: &GroupState,
    scratch: &mut TickScratch,
    players: &mut dyn PlayerArena,
) {
    // a lone member has nobody to synchronize with
    if group.members().len() <= 1 || config.debug_mode == SyncDebugMode::TimeOnly {
        return;
    }

    let TickScratch {
        members,
        group: context,
    } = scratch;

    for (member, member_context) in group.members().iter().zip(members.iter_mut()) {
        let Some(timeline) = players.timeline(member.key()) else {
            continue;
        };
        member_context
            .sync_markers
            .extend_from_slice(timeline.sync_markers());

        match validate_sync_markers(&member_context.sync_markers) {
            Ok(()) => member_context.use_marker_syncing = true,
            Err(MarkerError::Empty) => {}
            Err(error) => {
                if config.sync_log {
                    debug!(
                        "[{}] [{:?}] Ignoring sync markers: {}",
                        group.name(),
                        member.key(),
                        error
                    );
                }
            }
        }
    }

    let member_count = group.members().len();
    let leader_index = context.leader_index;
    let leader_markers = members[leader_index].sync_markers.as_slice();
    let other_markers = members[..member_count]
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != leader_index)
        .map(|(_, member_context)| member_context.sync_markers.as_slice());

    context.can_group_use_marker_syncing =
        intersect_sync_markers(leader_markers, other_markers, &mut context.valid_markers);
}

pub(crate) fn advance_leader(
    config: &SyncGroupConfig,
    group: &GroupState,
    scratch: &mut TickScratch,
    players: &mut dyn PlayerArena,
) {
    let TickScratch {
        members,
        group: context,
    } = scratch;

    let Some(leader) = group.members().get(context.leader_index) else {
        return;
    };
    let Some(timeline) = players.timeline(leader.key()) else {
        warn!(
            "[{}] [{:?}] Leader has no timeline, skipping group",
            group.name(),
            leader.key()
        );
        return;
    };

    if context.can_group_use_marker_syncing {
        let leader_markers = &members[context.leader_index].sync_markers;
        advance_leader_marker_based(config, group, leader, leader_markers, context, timeline);
    } else {
        advance_leader_time_based(config, group, leader, context, timeline);
    }
}

fn should_seek_on_join(group: &GroupState, leader: &GroupMember) -> bool {
    leader.just_joined() && leader.request().match_sync_point && !group.just_formed()
}

fn advance_leader_time_based(
    config: &SyncGroupConfig,
    group: &GroupState,
    leader: &GroupMember,
    context: &mut GroupContext,
    timeline: &mut dyn Timeline,
) {
    let mut start_state = timeline.state();
    let play_rate = start_state.effective_play_rate();

    let seek = should_seek_on_join(group, leader);
    if seek {
        let desired_time = group.previous_leader_ratio() * start_state.duration();
        timeline.advance_by((desired_time - start_state.position()) / play_rate, false);
        start_state = timeline.state();
    }

    context.leader_start_ratio = start_state.position_ratio();

    let delta_time = leader.update_state().delta_time;
    timeline.advance_by(delta_time, true);

    let end_state = timeline.state();
    context.leader_state = end_state;
    context.is_leader_playing_forward = delta_time * play_rate >= 0.0;
    context.leader_end_ratio = end_state.position_ratio();

    if config.sync_log {
        debug!(
            "[{}] [{:?}] Leader [Time] [{:.3} {:+.3} -> {:.3} / {:.3} ({:.1}%)]{}",
            group.name(),
            leader.key(),
            start_state.position(),
            delta_time * play_rate,
            end_state.position(),
            end_state.duration(),
            context.leader_end_ratio * 100.0,
            if seek { " (joined, seeked)" } else { "" }
        );
    }
}

fn advance_leader_marker_based(
    config: &SyncGroupConfig,
    group: &GroupState,
    leader: &GroupMember,
    leader_markers: &[SyncMarker],
    context: &mut GroupContext,
    timeline: &mut dyn Timeline,
) {
    let mut start_state = timeline.state();
    let play_rate = start_state.effective_play_rate();

    let mut join_mode = "";
    if should_seek_on_join(group, leader) {
        let matched_phase = group
            .previous_leader()
            .and_then(|previous| previous.matching_phase(leader_markers));

        let desired_time = match &matched_phase {
            Some(phase) => {
                join_mode = " (joined, phase matched)";
                time_from_phase_position(
                    leader_markers,
                    &start_state,
                    phase.marker_pair(),
                    phase.position_between_markers,
                )
            }
            None => {
                join_mode = " (joined, ratio matched)";
                group.previous_leader_ratio() * start_state.duration()
            }
        };

        timeline.advance_by((desired_time - start_state.position()) / play_rate, false);
        start_state = timeline.state();
    }

    let valid_markers = &context.valid_markers;
    let is_valid = |name: &MarkerName| valid_markers.contains(name);
    let is_looping = start_state.is_looping();

    let start_pair = nearest_valid_markers_at(leader_markers, &start_state, &is_valid);
    debug_validate_marker_pair(leader_markers, start_pair, is_looping, &is_valid);
    context.leader_phase_start = calculate_phase_position(leader_markers, &start_state, start_pair);
    context.leader_start_ratio = start_state.position_ratio();

    let delta_time = leader.update_state().delta_time;
    timeline.advance_by(delta_time, true);

    let end_state = timeline.state();
    let is_playing_forward = delta_time * play_rate >= 0.0;
    let elapsed_time = calculate_elapsed_time(&start_state, &end_state, is_playing_forward);

    let mut end_pair = start_pair;
    advance_and_collect_markers_passed(
        &start_state,
        elapsed_time,
        is_playing_forward,
        leader_markers,
        &is_valid,
        &mut end_pair,
        &mut context.markers_passed,
    );
    debug_validate_marker_pair(leader_markers, end_pair, is_looping, &is_valid);

    context.leader_phase_end = calculate_phase_position(leader_markers, &end_state, end_pair);
    context.leader_state = end_state;
    context.is_leader_playing_forward = is_playing_forward;
    context.leader_end_ratio = end_state.position_ratio();

    if config.sync_log {
        debug!(
            "[{}] [{:?}] Leader [Mark] [{:.3} {:+.3} -> {:.3} / {:.3} ({:.1}%)] passed {:?}{}",
            group.name(),
            leader.key(),
            start_state.position(),
            elapsed_time,
            end_state.position(),
            end_state.duration(),
            context.leader_end_ratio * 100.0,
            context.markers_passed,
            join_mode
        );
    }
}
