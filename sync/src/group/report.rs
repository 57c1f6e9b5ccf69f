use crate::{GroupName, MarkerName, PlayerKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncMethod {
    /// Followers matched the leader's normalized position.
    TimeBased,
    /// Followers replayed the markers the leader passed.
    MarkerBased,
}

/// Outcome of synchronizing one group for one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupTickReport {
    pub group_name: GroupName,
    pub leader: PlayerKey,
    pub method: SyncMethod,
    pub just_formed: bool,
    /// Members that followed the leader, on markers or on time.
    pub followers_advanced: usize,
    /// Members that lost the election while holding `ExclusiveAlwaysLeader`,
    /// or every follower when synchronization is disabled for debugging.
    pub solo_members: Vec<PlayerKey>,
    /// Markers the leader passed, in the order it passed them.
    pub markers_passed: Vec<MarkerName>,
}
