use std::fmt;

/// Opaque handle to a player living in the host's arena.
///
/// Groups only ever store keys. Resolving a key back into a timeline goes
/// through [`PlayerArena`](crate::PlayerArena) once per member per tick.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerKey(u64);

impl PlayerKey {
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for PlayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player({})", self.0)
    }
}

/// What a member contributes to this tick's update.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct MemberUpdateState {
    /// Blend weight of the member, used to elect the leader.
    pub total_weight: f32,
    /// Delta time the member would advance by if it were unsynchronized.
    pub delta_time: f32,
}

impl MemberUpdateState {
    pub fn new(total_weight: f32, delta_time: f32) -> Self {
        Self {
            total_weight,
            delta_time,
        }
    }
}
