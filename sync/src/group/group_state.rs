use crate::{
    can_phase_match, find_matching_phase_position, GroupMember, GroupName, PhasePosition,
    PlayerKey, SyncMarker, TimelineState,
};

/// What the group's leader looked like at the end of the previous tick.
pub(crate) struct LeaderSnapshot {
    pub key: PlayerKey,
    pub timeline_state: TimelineState,
    pub sync_markers: Vec<SyncMarker>,
    /// Only set when the group synchronized on markers.
    pub phase_position: Option<PhasePosition>,
}

impl LeaderSnapshot {
    /// The previous leader's end phase, expressed on `markers`.
    pub fn matching_phase(&self, markers: &[SyncMarker]) -> Option<PhasePosition> {
        let phase = self.phase_position.as_ref()?;
        if !can_phase_match(&self.sync_markers, markers) {
            return None;
        }
        find_matching_phase_position(&self.sync_markers, phase, markers)
    }
}

pub(crate) struct GroupState {
    name: GroupName,
    members: Vec<GroupMember>,
    previous_leader: Option<LeaderSnapshot>,
    is_active: bool,
    just_formed: bool,
}

impl GroupState {
    pub fn new(name: GroupName) -> Self {
        Self {
            name,
            members: Vec::new(),
            previous_leader: None,
            is_active: true,
            just_formed: true,
        }
    }

    pub fn name(&self) -> &GroupName {
        &self.name
    }

    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn just_formed(&self) -> bool {
        self.just_formed
    }

    pub fn previous_leader(&self) -> Option<&LeaderSnapshot> {
        self.previous_leader.as_ref()
    }

    pub fn previous_leader_key(&self) -> Option<PlayerKey> {
        self.previous_leader.as_ref().map(|snapshot| snapshot.key)
    }

    /// Normalized position the previous leader ended the last tick at.
    pub fn previous_leader_ratio(&self) -> f32 {
        self.previous_leader
            .as_ref()
            .map_or(0.0, |snapshot| snapshot.timeline_state.position_ratio())
    }

    pub fn member_mut(&mut self, key: PlayerKey) -> Option<&mut GroupMember> {
        self.members.iter_mut().find(|member| member.key() == key)
    }

    pub fn push_member(&mut self, member: GroupMember) {
        self.members.push(member);
    }

    pub fn mark_active(&mut self) {
        self.is_active = true;
    }

    pub fn clear_members(&mut self) {
        self.members.clear();
    }

    pub fn reset_for_tick(&mut self) {
        for member in &mut self.members {
            member.reset_for_tick();
        }
        self.is_active = false;
        // an empty group is rebuilt from scratch by this tick's registrations
        self.just_formed = self.members.is_empty();
    }

    /// Drops members that did not register this tick or that `keep` rejects.
    /// Returns the keys removed.
    pub fn retain_members<F>(&mut self, mut keep: F) -> Vec<PlayerKey>
    where
        F: FnMut(&GroupMember) -> bool,
    {
        let mut removed = Vec::new();
        self.members.retain(|member| {
            let retained = member.is_active() && keep(member);
            if !retained {
                removed.push(member.key());
            }
            retained
        });
        removed
    }

    /// Marks the group as just formed when every remaining member is new.
    /// Returns true if the flag changed.
    pub fn refresh_just_formed(&mut self) -> bool {
        let has_established_member = self.members.iter().any(|member| !member.just_joined());
        if !has_established_member && !self.members.is_empty() && !self.just_formed {
            self.just_formed = true;
            return true;
        }
        false
    }

    pub fn store_leader_snapshot(
        &mut self,
        key: PlayerKey,
        timeline_state: TimelineState,
        sync_markers: &[SyncMarker],
        phase_position: Option<&PhasePosition>,
    ) {
        let snapshot = self.previous_leader.get_or_insert_with(|| LeaderSnapshot {
            key,
            timeline_state,
            sync_markers: Vec::new(),
            phase_position: None,
        });
        snapshot.key = key;
        snapshot.timeline_state = timeline_state;
        snapshot.sync_markers.clear();
        snapshot.sync_markers.extend_from_slice(sync_markers);
        snapshot.phase_position = phase_position.cloned();
    }
}
