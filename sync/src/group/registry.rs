use std::collections::HashMap;

use log::{debug, warn};

use crate::{
    group::{
        group_state::GroupState, scratch::TickScratch, synchronizer::synchronize_group,
        unique_name::UniqueNameAllocator,
    },
    GroupMember, GroupName, GroupTickReport, MemberUpdateState, MembershipRequest, PlayerArena,
    PlayerKey, RegistryError, SyncGroupConfig,
};

/// Result of a successful `register_member` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    /// First registration of the player into the group.
    Joined,
    /// The player was already a member last tick.
    Rejoined,
    /// The request opts out of synchronization; the caller advances the
    /// player on its own.
    Ungrouped,
}

/// Owns every sync group of one scheduling unit across ticks.
///
/// Each tick: [`pre_tick`](Self::pre_tick), then one
/// [`register_member`](Self::register_member) per participating player, then
/// [`post_tick`](Self::post_tick), which drops stale members and groups and
/// advances every player registered this tick.
pub struct SyncGroupRegistry {
    config: SyncGroupConfig,
    groups: Vec<GroupState>,
    group_indices: HashMap<GroupName, usize>,
    unique_names: UniqueNameAllocator,
    scratch: TickScratch,
}

impl SyncGroupRegistry {
    pub fn new() -> Self {
        Self::with_config(SyncGroupConfig::default())
    }

    pub fn with_config(config: SyncGroupConfig) -> Self {
        let unique_names = UniqueNameAllocator::new(&config.unique_name_prefix);
        Self {
            config,
            groups: Vec::new(),
            group_indices: HashMap::new(),
            unique_names,
            scratch: TickScratch::default(),
        }
    }

    pub fn config(&self) -> &SyncGroupConfig {
        &self.config
    }

    pub fn register_member(
        &mut self,
        request: &MembershipRequest,
        key: PlayerKey,
        update_state: MemberUpdateState,
    ) -> Result<Registration, RegistryError> {
        if !request.participates() {
            return Ok(Registration::Ungrouped);
        }

        let sync_log = self.config.sync_log;
        let group_index = match self.group_indices.get(&request.group_name) {
            Some(index) => *index,
            None => {
                let index = self.groups.len();
                self.groups.push(GroupState::new(request.group_name.clone()));
                self.group_indices.insert(request.group_name.clone(), index);
                if sync_log {
                    debug!("[{}] Created", request.group_name);
                }
                index
            }
        };

        let group = &mut self.groups[group_index];
        group.mark_active();

        match group.member_mut(key) {
            Some(member) => {
                if member.is_active() {
                    return Err(RegistryError::DuplicateRegistration {
                        group: request.group_name.clone(),
                        key,
                    });
                }
                member.refresh(request, update_state);
                Ok(Registration::Rejoined)
            }
            None => {
                group.push_member(GroupMember::new(key, request, update_state));
                if sync_log {
                    debug!("[{}] [{:?}] Joined", request.group_name, key);
                }
                Ok(Registration::Joined)
            }
        }
    }

    /// Clears this tick's membership flags. Call before members register.
    pub fn pre_tick(&mut self) {
        for group in &mut self.groups {
            group.reset_for_tick();
        }
    }

    /// Purges members and groups nobody registered this tick, then
    /// synchronizes every remaining group in creation order.
    pub fn post_tick(&mut self, players: &mut dyn PlayerArena) -> Vec<GroupTickReport> {
        self.purge(players);

        let Self {
            config,
            groups,
            scratch,
            ..
        } = self;

        let mut reports = Vec::with_capacity(groups.len());
        for group in groups.iter_mut() {
            if let Some(report) = synchronize_group(config, group, scratch, players) {
                reports.push(report);
            }
        }
        reports
    }

    fn purge(&mut self, players: &mut dyn PlayerArena) {
        let sync_log = self.config.sync_log;
        let group_count = self.groups.len();

        self.groups.retain_mut(|group| {
            if !group.is_active() {
                if sync_log {
                    debug!("[{}] Released", group.name());
                }
                return false;
            }

            let removed = group.retain_members(|member| players.timeline(member.key()).is_some());
            if sync_log {
                for key in removed {
                    debug!("[{}] [{:?}] Left", group.name(), key);
                }
            }

            if group.members().is_empty() {
                if sync_log {
                    debug!("[{}] Released", group.name());
                }
                return false;
            }

            if group.refresh_just_formed() && sync_log {
                debug!("[{}] Refreshed", group.name());
            }
            true
        });

        if self.groups.len() != group_count {
            self.group_indices.clear();
            for (index, group) in self.groups.iter().enumerate() {
                self.group_indices.insert(group.name().clone(), index);
            }
        }
    }

    /// Allocates a group name no other group uses.
    pub fn allocate_unique_name(&mut self) -> GroupName {
        self.unique_names.allocate()
    }

    /// Returns a name from [`allocate_unique_name`](Self::allocate_unique_name)
    /// for reuse. Members still registered under it are dropped, so a new
    /// owner of the name starts a fresh group.
    pub fn release_unique_name(&mut self, name: &GroupName) -> Result<(), RegistryError> {
        self.unique_names.release(name)?;
        if let Some(index) = self.group_indices.get(name) {
            self.groups[*index].clear_members();
        }
        Ok(())
    }

    pub fn allocated_unique_names(&self) -> usize {
        self.unique_names.allocated_count()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn has_group(&self, name: &GroupName) -> bool {
        self.group_indices.contains_key(name)
    }

    pub fn group_members(&self, name: &GroupName) -> Option<&[GroupMember]> {
        self.group(name).map(GroupState::members)
    }

    pub fn is_just_formed(&self, name: &GroupName) -> Option<bool> {
        self.group(name).map(GroupState::just_formed)
    }

    /// Leader elected during the group's latest `post_tick`.
    pub fn leader_of(&self, name: &GroupName) -> Option<PlayerKey> {
        self.group(name).and_then(GroupState::previous_leader_key)
    }

    fn group(&self, name: &GroupName) -> Option<&GroupState> {
        self.group_indices
            .get(name)
            .and_then(|index| self.groups.get(*index))
    }
}

impl Default for SyncGroupRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SyncGroupRegistry {
    fn drop(&mut self) {
        let allocated = self.unique_names.allocated_count();
        if allocated > 0 {
            warn!(
                "Sync group registry dropped with {} unique group names still allocated",
                allocated
            );
        }
    }
}
