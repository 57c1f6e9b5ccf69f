//! # Cadence Sync
//! Keeps groups of animation timelines playing in step: one member leads each
//! tick and the others follow it, either on normalized time or by replaying
//! the sync markers the leader passed.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

mod config;
mod error;
mod group;
mod name;
mod phase;
mod timeline;
mod types;

pub use config::{SyncDebugMode, SyncGroupConfig};
pub use error::{MarkerError, RegistryError};
pub use group::{
    election::find_leader_index,
    marker_set::intersect_sync_markers,
    member::GroupMember,
    registry::{Registration, SyncGroupRegistry},
    report::{GroupTickReport, SyncMethod},
    role::{MembershipRequest, SyncMode, SyncRole},
    unique_name::UniqueNameAllocator,
};
pub use name::{GroupName, MarkerName};
pub use phase::{
    marker_pair::{MarkerIndex, MarkerPair},
    marker_search::{
        nearest_matching_markers, nearest_valid_markers_at, sanitize_follower_markers,
        seek_marker_backward, seek_marker_forward,
    },
    marker_walk::{advance_and_collect_markers_passed, replay_markers_passed},
    phase_matcher::{
        calculate_elapsed_time, calculate_phase_position, can_phase_match,
        find_matching_phase_position, time_from_phase_position,
    },
    phase_position::PhasePosition,
};
pub use timeline::{
    sync_marker::{validate_sync_markers, SyncMarker},
    timeline::{PlayerArena, Timeline},
    timeline_state::TimelineState,
};
pub use types::{MemberUpdateState, PlayerKey};
