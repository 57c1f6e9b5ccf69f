use log::debug;

use crate::{
    find_leader_index,
    group::{
        follower::advance_followers,
        group_state::GroupState,
        leader::{advance_leader, collect_group_markers},
        scratch::TickScratch,
    },
    GroupTickReport, PlayerArena, SyncGroupConfig, SyncMethod,
};

/// Runs one tick of synchronization for `group`: elect, intersect markers,
/// advance the leader, then every follower. Returns `None` for an empty group.
pub(crate) fn synchronize_group(
    config: &SyncGroupConfig,
    group: &mut GroupState,
    scratch: &mut TickScratch,
    players: &mut dyn PlayerArena,
) -> Option<GroupTickReport> {
    scratch.begin_group(group.members().len());

    let leader_index = find_leader_index(
        group
            .members()
            .iter()
            .map(|member| (member.role(), member.update_state().total_weight)),
    )?;
    let leader_key = group.members().get(leader_index)?.key();
    scratch.group.leader_index = leader_index;

    if config.sync_log && group.previous_leader_key() != Some(leader_key) {
        debug!("[{}] [{:?}] Is New Leader", group.name(), leader_key);
    }

    collect_group_markers(config, group, scratch, players);
    advance_leader(config, group, scratch, players);
    let outcome = advance_followers(config, group, scratch, players);

    let context = &scratch.group;
    let method = if context.can_group_use_marker_syncing {
        SyncMethod::MarkerBased
    } else {
        SyncMethod::TimeBased
    };

    group.store_leader_snapshot(
        leader_key,
        context.leader_state,
        scratch.leader_markers(),
        match method {
            SyncMethod::MarkerBased => Some(&context.leader_phase_end),
            SyncMethod::TimeBased => None,
        },
    );

    Some(GroupTickReport {
        group_name: group.name().clone(),
        leader: leader_key,
        method,
        just_formed: group.just_formed(),
        followers_advanced: outcome.followers_advanced,
        solo_members: outcome.solo_members,
        markers_passed: context.markers_passed.clone(),
    })
}
