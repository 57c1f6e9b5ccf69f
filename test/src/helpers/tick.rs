use log::debug;

use cadence_sync::{
    GroupName, GroupTickReport, MemberUpdateState, MembershipRequest, PlayerKey,
    SyncGroupRegistry, SyncRole,
};

use crate::TestPlayers;

/// A player's registration for one tick
#[derive(Clone, Debug)]
pub struct TickMember {
    pub key: PlayerKey,
    pub request: MembershipRequest,
    pub update_state: MemberUpdateState,
}

impl TickMember {
    pub fn new(key: PlayerKey, group: &str, role: SyncRole, weight: f32, delta_time: f32) -> Self {
        Self {
            key,
            request: MembershipRequest::new(group, role),
            update_state: MemberUpdateState::new(weight, delta_time),
        }
    }

    pub fn without_sync_point_match(mut self) -> Self {
        self.request.match_sync_point = false;
        self
    }
}

/// Runs pre_tick, registers every member, then post_tick
pub fn run_tick(
    registry: &mut SyncGroupRegistry,
    players: &mut TestPlayers,
    members: &[TickMember],
) -> Vec<GroupTickReport> {
    registry.pre_tick();
    for member in members {
        let registration = registry
            .register_member(&member.request, member.key, member.update_state)
            .expect("registration should succeed");
        debug!(
            "[{}] [{:?}] {:?} as {:?}",
            member.request.group_name, member.key, registration, member.request.role
        );
    }
    let reports = registry.post_tick(players);
    debug!(
        "Tick done: {} members, {} groups synchronized",
        members.len(),
        reports.len()
    );
    reports
}

/// The report for `group`, panicking if the group was not synchronized
pub fn report_for<'a>(reports: &'a [GroupTickReport], group: &str) -> &'a GroupTickReport {
    let name = GroupName::new(group);
    reports
        .iter()
        .find(|report| report.group_name == name)
        .unwrap_or_else(|| panic!("no report for group {}", group))
}

/// Installs env_logger once so `RUST_LOG=debug` shows sync trace lines
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
