use std::collections::HashMap;

use crate::{PlayerKey, SyncMarker, TimelineState};

/// A player whose playback position a sync group can read and drive.
pub trait Timeline {
    /// Current position, duration, play rate and looping flag.
    fn state(&self) -> TimelineState;

    /// Sync markers ordered by position. May be empty.
    fn sync_markers(&self) -> &[SyncMarker];

    /// Moves the playback position by `delta_time` scaled by the play rate.
    ///
    /// With `dispatch_events == false` the move is a silent seek: notifies,
    /// marker callbacks and any other side-effecting events must not fire.
    fn advance_by(&mut self, delta_time: f32, dispatch_events: bool);
}

/// Resolves player keys into the timeline capability.
///
/// A key that resolves to `None` belongs to a player without a timeline (or
/// one that no longer exists); its group membership is dropped on the next
/// `post_tick`.
pub trait PlayerArena {
    fn timeline(&mut self, key: PlayerKey) -> Option<&mut dyn Timeline>;
}

impl<T: Timeline> PlayerArena for HashMap<PlayerKey, T> {
    fn timeline(&mut self, key: PlayerKey) -> Option<&mut dyn Timeline> {
        self.get_mut(&key).map(|player| player as &mut dyn Timeline)
    }
}
