use thiserror::Error;

use crate::{GroupName, PlayerKey};

/// Errors reported while validating a timeline's sync markers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarkerError {
    /// The timeline exposes no sync markers at all
    #[error("Sync marker list is empty")]
    Empty,

    /// A marker sits at a negative or non-finite position
    #[error("Sync marker {index} has invalid position {position}")]
    InvalidPosition { index: usize, position: f32 },

    /// A marker is positioned before the marker preceding it
    #[error("Sync marker {index} at {position} precedes previous marker at {previous}")]
    Unsorted {
        index: usize,
        position: f32,
        previous: f32,
    },
}

/// Errors returned by the sync group registry API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The same player registered twice into one group within a single tick
    #[error("Player {key:?} already registered into group '{group}' this tick")]
    DuplicateRegistration { group: GroupName, key: PlayerKey },

    /// Attempted to release a unique group name that is not currently allocated
    #[error("Unique group name '{name}' is not allocated")]
    UnknownUniqueName { name: GroupName },
}
