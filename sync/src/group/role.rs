use crate::GroupName;

/// How a member takes part in leader election.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SyncRole {
    /// Leads when it carries the highest blend weight.
    #[default]
    CanBeLeader,
    /// Never leads unless nobody else can.
    AlwaysFollower,
    /// Always leads; the last one registered wins when several ask.
    AlwaysLeader,
    /// Same as `CanBeLeader`, set on the destination of a transition.
    TransitionLeader,
    /// Same as `AlwaysFollower`, set on the source of a transition.
    TransitionFollower,
    /// Leads like `AlwaysLeader`, but runs solo instead of following when
    /// another member wins the election.
    ExclusiveAlwaysLeader,
}

impl SyncRole {
    pub fn is_always_leader(self) -> bool {
        matches!(self, SyncRole::AlwaysLeader | SyncRole::ExclusiveAlwaysLeader)
    }

    pub fn is_leader_candidate(self) -> bool {
        matches!(self, SyncRole::CanBeLeader | SyncRole::TransitionLeader)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SyncMode {
    NoSynchronization,
    /// Join the group named in the request.
    #[default]
    UsingGroupName,
    /// Join a group whose name was allocated for the requesting sub-instance
    /// and forwarded to its children.
    UsingUniqueGroupName,
}

/// Group membership a player asks for this tick.
#[derive(Clone, Debug, PartialEq)]
pub struct MembershipRequest {
    pub group_name: GroupName,
    pub role: SyncRole,
    pub mode: SyncMode,
    /// Seek to the group's current position when joining, instead of snapping
    /// the newcomer's own phase into the group as-is.
    pub match_sync_point: bool,
}

impl MembershipRequest {
    pub fn new(group_name: impl Into<GroupName>, role: SyncRole) -> Self {
        Self {
            group_name: group_name.into(),
            role,
            mode: SyncMode::UsingGroupName,
            match_sync_point: true,
        }
    }

    pub fn with_mode(mut self, mode: SyncMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_match_sync_point(mut self, match_sync_point: bool) -> Self {
        self.match_sync_point = match_sync_point;
        self
    }

    /// False for requests that opt out of synchronization.
    pub fn participates(&self) -> bool {
        !self.group_name.is_none() && self.mode != SyncMode::NoSynchronization
    }
}
