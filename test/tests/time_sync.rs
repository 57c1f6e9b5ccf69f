/// Time-based synchronization
/// Followers land on the leader's position ratio when the group has no
/// marker set in common, or when debugging modes force it.
use cadence_sync::{SyncDebugMode, SyncGroupConfig, SyncGroupRegistry, SyncMethod, SyncRole};
use cadence_test::{
    assert_time_near, init_logging, report_for, run_tick, TestPlayerBuilder, TestPlayers,
    TickMember,
};

#[test]
fn follower_tracks_leader_ratio_across_loop() {
    init_logging();
    let mut registry = SyncGroupRegistry::new();
    let mut players = TestPlayers::new();
    let leader = players.insert(TestPlayerBuilder::new(1.0).at(0.2).build());
    let follower = players.insert(TestPlayerBuilder::new(2.0).at(0.4).build());

    let reports = run_tick(
        &mut registry,
        &mut players,
        &[
            TickMember::new(leader, "Walk", SyncRole::CanBeLeader, 1.0, 0.3),
            TickMember::new(follower, "Walk", SyncRole::CanBeLeader, 0.5, 0.3),
        ],
    );
    assert_eq!(report_for(&reports, "Walk").method, SyncMethod::TimeBased);
    assert_time_near!(players.get(leader).position(), 0.5);
    assert_time_near!(players.get(follower).position(), 1.0);

    run_tick(
        &mut registry,
        &mut players,
        &[
            TickMember::new(leader, "Walk", SyncRole::CanBeLeader, 1.0, 0.6),
            TickMember::new(follower, "Walk", SyncRole::CanBeLeader, 0.5, 0.6),
        ],
    );
    assert_time_near!(players.get(leader).position(), 0.1);
    // forward through the seam instead of jumping back
    let last = players.get(follower).advances().last().copied();
    assert!(last.map_or(false, |record| record.delta_time > 0.0));
    assert_time_near!(players.get(follower).position(), 0.2);
}

#[test]
fn follower_delta_accounts_for_play_rate() {
    init_logging();
    let mut registry = SyncGroupRegistry::new();
    let mut players = TestPlayers::new();
    let leader = players.insert(TestPlayerBuilder::new(1.0).build());
    let follower = players.insert(TestPlayerBuilder::new(1.0).play_rate(2.0).build());

    run_tick(
        &mut registry,
        &mut players,
        &[
            TickMember::new(leader, "Walk", SyncRole::CanBeLeader, 1.0, 0.25),
            TickMember::new(follower, "Walk", SyncRole::CanBeLeader, 0.5, 0.25),
        ],
    );

    let last = players.get(follower).advances().last().copied();
    assert_time_near!(last.map_or(0.0, |record| record.delta_time), 0.125);
    assert_time_near!(players.get(follower).position(), 0.25);
}

#[test]
fn backward_leader_pulls_follower_backward() {
    init_logging();
    let mut registry = SyncGroupRegistry::new();
    let mut players = TestPlayers::new();
    let leader = players.insert(TestPlayerBuilder::new(1.0).at(0.5).build());
    let follower = players.insert(TestPlayerBuilder::new(2.0).at(1.0).build());

    run_tick(
        &mut registry,
        &mut players,
        &[
            TickMember::new(leader, "Walk", SyncRole::CanBeLeader, 1.0, -0.2),
            TickMember::new(follower, "Walk", SyncRole::CanBeLeader, 0.5, -0.2),
        ],
    );

    assert_time_near!(players.get(leader).position(), 0.3);
    assert_time_near!(players.get(follower).position(), 0.6);
}

#[test]
fn time_only_mode_ignores_markers() {
    init_logging();
    let config = SyncGroupConfig {
        debug_mode: SyncDebugMode::TimeOnly,
        ..SyncGroupConfig::default()
    };
    let mut registry = SyncGroupRegistry::with_config(config);
    assert_eq!(registry.config().debug_mode, SyncDebugMode::TimeOnly);
    let mut players = TestPlayers::new();
    let leader = players.insert(
        TestPlayerBuilder::new(1.0)
            .markers(&[("L", 0.0), ("R", 0.5)])
            .build(),
    );
    let follower = players.insert(
        TestPlayerBuilder::new(2.0)
            .markers(&[("L", 0.0), ("R", 0.5), ("L", 1.0), ("R", 1.5)])
            .build(),
    );

    let reports = run_tick(
        &mut registry,
        &mut players,
        &[
            TickMember::new(leader, "Walk", SyncRole::CanBeLeader, 1.0, 0.6),
            TickMember::new(follower, "Walk", SyncRole::CanBeLeader, 0.5, 0.6),
        ],
    );

    let report = report_for(&reports, "Walk");
    assert_eq!(report.method, SyncMethod::TimeBased);
    assert!(report.markers_passed.is_empty());
    assert_time_near!(players.get(follower).position(), 1.2);
}

#[test]
fn no_sync_mode_runs_every_follower_solo() {
    init_logging();
    let config = SyncGroupConfig {
        debug_mode: SyncDebugMode::NoSync,
        ..SyncGroupConfig::default()
    };
    let mut registry = SyncGroupRegistry::with_config(config);
    let mut players = TestPlayers::new();
    let leader = players.insert(TestPlayerBuilder::new(1.0).build());
    let first = players.insert(TestPlayerBuilder::new(2.0).at(1.5).build());
    let second = players.insert(TestPlayerBuilder::new(2.0).build());

    let reports = run_tick(
        &mut registry,
        &mut players,
        &[
            TickMember::new(leader, "Walk", SyncRole::CanBeLeader, 1.0, 0.25),
            TickMember::new(first, "Walk", SyncRole::CanBeLeader, 0.5, 0.1),
            TickMember::new(second, "Walk", SyncRole::CanBeLeader, 0.5, 0.3),
        ],
    );

    let report = report_for(&reports, "Walk");
    assert_eq!(report.followers_advanced, 0);
    assert_eq!(report.solo_members, vec![first, second]);
    assert_time_near!(players.get(leader).position(), 0.25);
    assert_time_near!(players.get(first).position(), 1.6);
    assert_time_near!(players.get(second).position(), 0.3);
}

#[test]
fn lone_member_advances_without_sync() {
    init_logging();
    let mut registry = SyncGroupRegistry::new();
    let mut players = TestPlayers::new();
    let only = players.insert(
        TestPlayerBuilder::new(1.0)
            .markers(&[("L", 0.0), ("R", 0.5)])
            .build(),
    );

    let reports = run_tick(
        &mut registry,
        &mut players,
        &[TickMember::new(only, "Walk", SyncRole::AlwaysFollower, 1.0, 0.7)],
    );

    let report = report_for(&reports, "Walk");
    assert_eq!(report.leader, only);
    assert_eq!(report.method, SyncMethod::TimeBased);
    assert!(report.markers_passed.is_empty());
    assert_eq!(report.followers_advanced, 0);
    assert_time_near!(players.get(only).position(), 0.7);
}
