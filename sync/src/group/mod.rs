//! # Sync groups
//!
//! Players registering under the same [`GroupName`](crate::GroupName) during a
//! tick form a group. Once registration is over, every group elects a leader,
//! the leader advances on its own delta time, and followers derive their delta
//! time from how far the leader moved.
//!
//! ## Overview
//! | phase             | where                                  |
//! |-------------------|----------------------------------------|
//! | membership        | `registry::SyncGroupRegistry`          |
//! | leader election   | `election::find_leader_index`          |
//! | marker agreement  | `marker_set::intersect_sync_markers`   |
//! | leader advance    | `leader`                               |
//! | follower advance  | `follower`                             |
//!
//! Groups synchronize on markers when the leader's markers are usable and
//! share at least one name with every other member holding usable markers.
//! Otherwise they synchronize on normalized time.

pub mod election;
mod follower;
pub(crate) mod group_state;
mod leader;
pub mod marker_set;
pub mod member;
pub mod registry;
pub mod report;
pub mod role;
pub(crate) mod scratch;
mod synchronizer;
pub mod unique_name;
