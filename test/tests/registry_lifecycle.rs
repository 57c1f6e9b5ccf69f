/// Group lifetime across ticks
/// Creation, refresh, member purge, release of idle groups and unique names.
use cadence_sync::{
    GroupName, MembershipRequest, Registration, SyncGroupRegistry, SyncMode, SyncRole,
};
use cadence_test::{
    assert_no_seeks, assert_time_near, init_logging, run_tick, TestPlayerBuilder, TestPlayers,
    TickMember,
};

fn walk() -> GroupName {
    GroupName::new("Walk")
}

#[test]
fn new_group_is_just_formed_then_established() {
    init_logging();
    let mut registry = SyncGroupRegistry::new();
    let mut players = TestPlayers::new();
    let a = players.insert(TestPlayerBuilder::new(1.0).build());
    let b = players.insert(TestPlayerBuilder::new(1.0).build());
    let members = [
        TickMember::new(a, "Walk", SyncRole::CanBeLeader, 1.0, 0.1),
        TickMember::new(b, "Walk", SyncRole::CanBeLeader, 0.5, 0.1),
    ];

    run_tick(&mut registry, &mut players, &members);
    assert_eq!(registry.is_just_formed(&walk()), Some(true));
    assert_eq!(registry.leader_of(&walk()), Some(a));

    run_tick(&mut registry, &mut players, &members);
    assert_eq!(registry.is_just_formed(&walk()), Some(false));
    assert!(registry
        .group_members(&walk())
        .map_or(false, |members| members.iter().all(|member| !member.just_joined())));
}

#[test]
fn group_with_only_new_members_is_refreshed() {
    init_logging();
    let mut registry = SyncGroupRegistry::new();
    let mut players = TestPlayers::new();
    let a = players.insert(TestPlayerBuilder::new(1.0).build());

    run_tick(
        &mut registry,
        &mut players,
        &[TickMember::new(a, "Walk", SyncRole::CanBeLeader, 1.0, 0.5)],
    );

    // b replaces a entirely, so b must not seek to a's old position
    let b = players.insert(TestPlayerBuilder::new(1.0).at(0.1).build());
    run_tick(
        &mut registry,
        &mut players,
        &[TickMember::new(b, "Walk", SyncRole::CanBeLeader, 1.0, 0.1)],
    );

    assert_eq!(registry.is_just_formed(&walk()), Some(true));
    assert_eq!(registry.leader_of(&walk()), Some(b));
    assert_no_seeks!(players.get(b));
    assert_time_near!(players.get(b).position(), 0.2);
}

#[test]
fn member_missing_a_tick_leaves_group() {
    init_logging();
    let mut registry = SyncGroupRegistry::new();
    let mut players = TestPlayers::new();
    let a = players.insert(TestPlayerBuilder::new(1.0).build());
    let b = players.insert(TestPlayerBuilder::new(1.0).build());

    run_tick(
        &mut registry,
        &mut players,
        &[
            TickMember::new(a, "Walk", SyncRole::CanBeLeader, 1.0, 0.1),
            TickMember::new(b, "Walk", SyncRole::CanBeLeader, 0.5, 0.1),
        ],
    );
    run_tick(
        &mut registry,
        &mut players,
        &[TickMember::new(a, "Walk", SyncRole::CanBeLeader, 1.0, 0.1)],
    );

    let members = registry.group_members(&walk()).map(|members| members.len());
    assert_eq!(members, Some(1));
    assert_time_near!(players.get(b).position(), 0.1);
}

#[test]
fn idle_group_is_released() {
    init_logging();
    let mut registry = SyncGroupRegistry::new();
    let mut players = TestPlayers::new();
    let a = players.insert(TestPlayerBuilder::new(1.0).build());
    let b = players.insert(TestPlayerBuilder::new(1.0).build());

    run_tick(
        &mut registry,
        &mut players,
        &[
            TickMember::new(a, "Walk", SyncRole::CanBeLeader, 1.0, 0.1),
            TickMember::new(b, "Run", SyncRole::CanBeLeader, 1.0, 0.1),
        ],
    );
    assert_eq!(registry.group_count(), 2);

    run_tick(
        &mut registry,
        &mut players,
        &[TickMember::new(b, "Run", SyncRole::CanBeLeader, 1.0, 0.1)],
    );
    assert_eq!(registry.group_count(), 1);
    assert!(!registry.has_group(&walk()));
    assert!(registry.has_group(&GroupName::new("Run")));
    assert_eq!(registry.leader_of(&GroupName::new("Run")), Some(b));
}

#[test]
fn member_without_timeline_is_purged() {
    init_logging();
    let mut registry = SyncGroupRegistry::new();
    let mut players = TestPlayers::new();
    let a = players.insert(TestPlayerBuilder::new(1.0).build());
    let ghost = players.insert_without_timeline();

    let reports = run_tick(
        &mut registry,
        &mut players,
        &[
            TickMember::new(ghost, "Walk", SyncRole::AlwaysLeader, 1.0, 0.1),
            TickMember::new(a, "Walk", SyncRole::CanBeLeader, 1.0, 0.1),
        ],
    );

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].leader, a);
    let members = registry.group_members(&walk()).map(|members| members.len());
    assert_eq!(members, Some(1));
}

#[test]
fn group_of_only_timeline_less_members_is_released() {
    init_logging();
    let mut registry = SyncGroupRegistry::new();
    let mut players = TestPlayers::new();
    let ghost = players.insert_without_timeline();
    assert!(players.contains(ghost));

    let reports = run_tick(
        &mut registry,
        &mut players,
        &[TickMember::new(ghost, "Walk", SyncRole::CanBeLeader, 1.0, 0.1)],
    );

    assert!(reports.is_empty());
    assert_eq!(registry.group_count(), 0);
}

#[test]
fn removed_player_is_dropped_from_group() {
    init_logging();
    let mut registry = SyncGroupRegistry::new();
    let mut players = TestPlayers::new();
    let a = players.insert(TestPlayerBuilder::new(1.0).build());
    let b = players.insert(TestPlayerBuilder::new(1.0).build());
    let members = [
        TickMember::new(a, "Walk", SyncRole::CanBeLeader, 1.0, 0.1),
        TickMember::new(b, "Walk", SyncRole::CanBeLeader, 0.5, 0.1),
    ];

    run_tick(&mut registry, &mut players, &members);
    assert!(players.remove(b).is_some());
    run_tick(&mut registry, &mut players, &members);

    let members = registry.group_members(&walk()).map(|members| members.len());
    assert_eq!(members, Some(1));
}

#[test]
fn released_unique_name_starts_fresh_group() {
    init_logging();
    let mut registry = SyncGroupRegistry::new();
    let key = cadence_sync::PlayerKey::from_u64(7);
    let update = cadence_sync::MemberUpdateState::new(1.0, 0.1);

    let name = registry.allocate_unique_name();
    let request = MembershipRequest::new(name.clone(), SyncRole::CanBeLeader)
        .with_mode(SyncMode::UsingUniqueGroupName);

    assert_eq!(
        registry.register_member(&request, key, update),
        Ok(Registration::Joined)
    );
    registry.pre_tick();
    assert_eq!(
        registry.register_member(&request, key, update),
        Ok(Registration::Rejoined)
    );

    assert!(registry.release_unique_name(&name).is_ok());
    assert_eq!(registry.allocated_unique_names(), 0);
    assert_eq!(
        registry.group_members(&name).map(|members| members.len()),
        Some(0)
    );

    registry.pre_tick();
    assert_eq!(
        registry.register_member(&request, key, update),
        Ok(Registration::Joined)
    );
}

#[test]
fn unique_names_are_distinct_groups() {
    init_logging();
    let mut registry = SyncGroupRegistry::new();
    let mut players = TestPlayers::new();
    let a = players.insert(TestPlayerBuilder::new(1.0).build());
    let b = players.insert(TestPlayerBuilder::new(1.0).build());

    let first = registry.allocate_unique_name();
    let second = registry.allocate_unique_name();
    assert_ne!(first, second);

    registry.pre_tick();
    for (key, name) in [(a, &first), (b, &second)] {
        let request = MembershipRequest::new(name.clone(), SyncRole::CanBeLeader)
            .with_mode(SyncMode::UsingUniqueGroupName);
        registry
            .register_member(&request, key, cadence_sync::MemberUpdateState::new(1.0, 0.1))
            .expect("registration should succeed");
    }
    let reports = registry.post_tick(&mut players);

    assert_eq!(reports.len(), 2);
    assert_eq!(registry.leader_of(&first), Some(a));
    assert_eq!(registry.leader_of(&second), Some(b));

    assert!(registry.release_unique_name(&first).is_ok());
    assert!(registry.release_unique_name(&second).is_ok());
}

#[test]
fn hash_map_of_timelines_serves_as_arena() {
    init_logging();
    let mut registry = SyncGroupRegistry::new();
    let mut players = std::collections::HashMap::new();
    let a = cadence_sync::PlayerKey::from_u64(1);
    let b = cadence_sync::PlayerKey::from_u64(2);
    players.insert(a, TestPlayerBuilder::new(1.0).build());
    players.insert(b, TestPlayerBuilder::new(2.0).build());

    registry.pre_tick();
    for (key, weight) in [(a, 1.0), (b, 0.5)] {
        let request = MembershipRequest::new("Walk", SyncRole::CanBeLeader);
        registry
            .register_member(&request, key, cadence_sync::MemberUpdateState::new(weight, 0.25))
            .expect("registration should succeed");
    }
    let reports = registry.post_tick(&mut players);

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].leader, a);
    assert_time_near!(players[&a].position(), 0.25);
    assert_time_near!(players[&b].position(), 0.5);
}
