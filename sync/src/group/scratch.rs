use std::collections::HashSet;

use crate::{MarkerName, PhasePosition, SyncMarker, TimelineState};

/// Per-member working data for the group being synchronized.
#[derive(Default)]
pub(crate) struct MemberContext {
    pub sync_markers: Vec<SyncMarker>,
    /// Markers are non-empty and validly sorted.
    pub use_marker_syncing: bool,
}

/// What the leader did this tick, read by every follower.
#[derive(Default)]
pub(crate) struct GroupContext {
    pub leader_index: usize,
    pub leader_state: TimelineState,
    pub is_leader_playing_forward: bool,
    pub leader_start_ratio: f32,
    pub leader_end_ratio: f32,
    pub can_group_use_marker_syncing: bool,
    pub leader_phase_start: PhasePosition,
    pub leader_phase_end: PhasePosition,
    pub markers_passed: Vec<MarkerName>,
    pub valid_markers: HashSet<MarkerName>,
}

/// Temporaries reused by every group, every tick. Nothing here survives
/// from one group to the next.
#[derive(Default)]
pub(crate) struct TickScratch {
    pub members: Vec<MemberContext>,
    pub group: GroupContext,
}

impl TickScratch {
    pub fn begin_group(&mut self, member_count: usize) {
        if self.members.len() < member_count {
            self.members.resize_with(member_count, MemberContext::default);
        }
        for member in &mut self.members[..member_count] {
            member.sync_markers.clear();
            member.use_marker_syncing = false;
        }

        let group = &mut self.group;
        group.leader_index = 0;
        group.leader_state = TimelineState::default();
        group.is_leader_playing_forward = true;
        group.leader_start_ratio = 0.0;
        group.leader_end_ratio = 0.0;
        group.can_group_use_marker_syncing = false;
        group.leader_phase_start = PhasePosition::default();
        group.leader_phase_end = PhasePosition::default();
        group.markers_passed.clear();
        group.valid_markers.clear();
    }

    pub fn leader_markers(&self) -> &[SyncMarker] {
        self.members
            .get(self.group.leader_index)
            .map_or(&[][..], |member| member.sync_markers.as_slice())
    }
}
