use log::{debug, warn};

use crate::{
    can_phase_match, find_matching_phase_position,
    group::{
        group_state::GroupState,
        scratch::{GroupContext, TickScratch},
    },
    nearest_matching_markers, replay_markers_passed, sanitize_follower_markers,
    time_from_phase_position, GroupMember, PlayerArena, PlayerKey, SyncDebugMode,
    SyncGroupConfig, SyncMarker, SyncRole, Timeline,
};

#[derive(Default)]
pub(crate) struct FollowerOutcome {
    pub followers_advanced: usize,
    pub solo_members: Vec<PlayerKey>,
}

pub(crate) fn advance_followers(
    config: &SyncGroupConfig,
    group: &GroupState,
    scratch: &TickScratch,
    players: &mut dyn PlayerArena,
) -> FollowerOutcome {
    let mut outcome = FollowerOutcome::default();
    if group.members().len() <= 1 {
        return outcome;
    }

    let context = &scratch.group;
    let leader_markers = scratch.leader_markers();

    for (index, member) in group.members().iter().enumerate() {
        if index == context.leader_index {
            continue;
        }
        let Some(timeline) = players.timeline(member.key()) else {
            warn!(
                "[{}] [{:?}] Follower has no timeline, skipping",
                group.name(),
                member.key()
            );
            continue;
        };

        if member.role() == SyncRole::ExclusiveAlwaysLeader
            || config.debug_mode == SyncDebugMode::NoSync
        {
            advance_follower_solo(config, group, member, timeline);
            outcome.solo_members.push(member.key());
            continue;
        }

        let follower_markers = scratch.members[index].sync_markers.as_slice();
        let use_marker_syncing =
            context.can_group_use_marker_syncing && scratch.members[index].use_marker_syncing;

        let followed_markers = use_marker_syncing
            && advance_follower_marker_based(
                config,
                group,
                member,
                context,
                leader_markers,
                follower_markers,
                timeline,
            );
        if !followed_markers {
            advance_follower_time_based(config, group, member, context, timeline);
        }
        outcome.followers_advanced += 1;
    }

    outcome
}

fn advance_follower_solo(
    config: &SyncGroupConfig,
    group: &GroupState,
    member: &GroupMember,
    timeline: &mut dyn Timeline,
) {
    let start_state = timeline.state();
    let delta_time = member.update_state().delta_time;
    timeline.advance_by(delta_time, true);

    if config.sync_log {
        let end_state = timeline.state();
        debug!(
            "[{}] [{:?}] Solo [{:.3} {:+.3} -> {:.3} / {:.3}]",
            group.name(),
            member.key(),
            start_state.position(),
            delta_time * start_state.play_rate(),
            end_state.position(),
            end_state.duration()
        );
    }
}

fn advance_follower_time_based(
    config: &SyncGroupConfig,
    group: &GroupState,
    member: &GroupMember,
    context: &GroupContext,
    timeline: &mut dyn Timeline,
) {
    let mut start_state = timeline.state();
    let play_rate = start_state.effective_play_rate();

    if member.just_joined() {
        let desired_time = context.leader_start_ratio * start_state.duration();
        timeline.advance_by((desired_time - start_state.position()) / play_rate, false);
        start_state = timeline.state();
    }

    let previous_time = start_state.position();
    let duration = start_state.duration();
    let mut desired_time = context.leader_end_ratio * duration;

    if context.is_leader_playing_forward {
        if desired_time < previous_time {
            desired_time += duration;
        }
    } else if desired_time > previous_time {
        desired_time -= duration;
    }

    let delta_time = (desired_time - previous_time) / play_rate;
    timeline.advance_by(delta_time, true);

    if config.sync_log {
        let end_state = timeline.state();
        debug!(
            "[{}] [{:?}] Follower [Time] [{:.3} {:+.3} -> {:.3} / {:.3} ({:.1}%)]{}",
            group.name(),
            member.key(),
            previous_time,
            delta_time * play_rate,
            end_state.position(),
            end_state.duration(),
            end_state.position_ratio() * 100.0,
            if member.just_joined() { " (joined)" } else { "" }
        );
    }
}

/// Follows the leader on markers. Returns false, without touching the
/// timeline, when the follower's markers cannot be paired with the leader's.
fn advance_follower_marker_based(
    config: &SyncGroupConfig,
    group: &GroupState,
    member: &GroupMember,
    context: &GroupContext,
    leader_markers: &[SyncMarker],
    follower_markers: &[SyncMarker],
    timeline: &mut dyn Timeline,
) -> bool {
    let mut start_state = timeline.state();
    let play_rate = start_state.effective_play_rate();
    let is_playing_forward = context.is_leader_playing_forward;
    let match_on_join = member.just_joined() && member.request().match_sync_point;

    // on join, look for markers around where the follower is about to seek to
    let mut search_state = start_state;
    let mut join_mode = "";
    if match_on_join {
        let matched_phase = if can_phase_match(leader_markers, follower_markers) {
            find_matching_phase_position(
                leader_markers,
                &context.leader_phase_start,
                follower_markers,
            )
        } else {
            None
        };

        let desired_time = match matched_phase {
            Some(phase) => {
                join_mode = " (joined, phase matched)";
                time_from_phase_position(
                    follower_markers,
                    &start_state,
                    phase.marker_pair(),
                    phase.position_between_markers,
                )
            }
            None => {
                join_mode = " (joined, ratio matched)";
                context.leader_start_ratio * start_state.duration()
            }
        };
        search_state = start_state.with_position(desired_time);
    }

    let mut pair =
        nearest_matching_markers(&context.leader_phase_start, follower_markers, &search_state);
    if !sanitize_follower_markers(
        &context.leader_phase_start,
        follower_markers,
        is_playing_forward,
        start_state.is_looping(),
        &mut pair,
    ) {
        warn!(
            "[{}] [{:?}] No markers matching leader phase {:?} -> {:?}, following on time",
            group.name(),
            member.key(),
            context.leader_phase_start.prev_marker_name,
            context.leader_phase_start.next_marker_name
        );
        return false;
    }

    if match_on_join {
        let desired_time = time_from_phase_position(
            follower_markers,
            &start_state,
            pair,
            context.leader_phase_start.position_between_markers,
        );
        timeline.advance_by((desired_time - start_state.position()) / play_rate, false);
        start_state = timeline.state();
    }

    let current_time = start_state.position();
    let duration = start_state.duration();

    let mut end_pair = pair;
    let mut desired_time = replay_markers_passed(
        &start_state,
        is_playing_forward,
        &context.leader_phase_end,
        follower_markers,
        &context.markers_passed,
        &mut end_pair,
    );

    if is_playing_forward {
        if desired_time < current_time {
            desired_time += duration;
        }
    } else if desired_time > current_time {
        desired_time -= duration;
    }

    let delta_time = (desired_time - current_time) / play_rate;
    timeline.advance_by(delta_time, true);

    if config.sync_log {
        let end_state = timeline.state();
        debug!(
            "[{}] [{:?}] Follower [Mark] [{:.3} {:+.3} -> {:.3} / {:.3}] markers {:?} -> {:?}{}",
            group.name(),
            member.key(),
            current_time,
            delta_time * play_rate,
            end_state.position(),
            end_state.duration(),
            pair,
            end_pair,
            join_mode
        );
    }

    true
}
