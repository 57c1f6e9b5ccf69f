//! # Sync group configuration
//!
//! Tunables for a [`SyncGroupRegistry`](crate::SyncGroupRegistry). Every
//! registry owns its own copy, so two schedulers hosting different player sets
//! may run with different settings side by side.
//!
//! | field                | default                         | effect                                   |
//! |----------------------|---------------------------------|------------------------------------------|
//! | `sync_log`           | `true`                          | per-tick `debug!` trace of every advance |
//! | `debug_mode`         | [`SyncDebugMode::Auto`]         | force time-only or no synchronization    |
//! | `unique_name_prefix` | `"CADENCE_UNIQUE_GROUP_NAME"`   | prefix of allocated unique group names   |

/// Overrides how groups synchronize. Meant for debugging desyncs in the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SyncDebugMode {
    /// Marker-based when every usable marker list agrees, time-based otherwise.
    #[default]
    Auto,
    /// Ignore sync markers; every group synchronizes on normalized time.
    TimeOnly,
    /// Every follower advances on its own delta time, as if it ran solo.
    NoSync,
}

#[derive(Clone, Debug)]
pub struct SyncGroupConfig {
    /// Emit a `debug!` line for every leader, follower and solo advance, plus
    /// membership changes (created, joined, left, released, refreshed).
    pub sync_log: bool,
    /// Synchronization override, see [`SyncDebugMode`].
    pub debug_mode: SyncDebugMode,
    /// Prefix of names handed out by `allocate_unique_name`; the counter is
    /// appended as `<prefix>_<n>`.
    pub unique_name_prefix: String,
}

impl Default for SyncGroupConfig {
    fn default() -> Self {
        Self {
            sync_log: true,
            debug_mode: SyncDebugMode::Auto,
            unique_name_prefix: "CADENCE_UNIQUE_GROUP_NAME".to_string(),
        }
    }
}
