use std::time::Duration;

use arena_survivor_core::{
    Command, EnemyKind, Event, PickupId, PlayerProgress, PlayerStats, Rarity, SessionPhase,
    SessionSummary, ShotKind, ShotSpec, TimerId, Upgrade, UpgradeOffer, Vec2,
};
use arena_survivor_world::{
    self as world, progression::ProgressionState, query, World, WorldConfig,
};

fn tick(world: &mut World, millis: u64) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::Tick {
            dt: Duration::from_millis(millis),
        },
        &mut events,
    );
    events
}

/// Kills one fresh enemy with a bullet and returns the dropped pickup.
fn drop_pickup(world: &mut World) -> PickupId {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::SpawnEnemy {
            kind: EnemyKind::Normal,
            position: Vec2::new(400.0, 400.0),
            hp: 1.0,
        },
        &mut events,
    );
    world::apply(
        world,
        Command::FireVolley {
            shots: vec![ShotSpec {
                kind: ShotKind::Bullet,
                origin: Vec2::new(400.0, 400.0),
                velocity: Vec2::ZERO,
                damage: 20.0,
                lifetime: Duration::from_secs(2),
            }],
        },
        &mut events,
    );
    let enemy = query::enemy_view(world)
        .iter()
        .last()
        .map(|enemy| enemy.id)
        .expect("enemy spawned");
    let projectile = query::projectile_view(world)
        .iter()
        .last()
        .map(|projectile| projectile.id)
        .expect("bullet fired");

    events.clear();
    world::apply(
        world,
        Command::ResolveProjectileHit { projectile, enemy },
        &mut events,
    );
    events
        .iter()
        .find_map(|event| match event {
            Event::PickupSpawned { pickup, .. } => Some(*pickup),
            _ => None,
        })
        .expect("kill drops a pickup")
}

fn collect(world: &mut World, pickup: PickupId) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::CollectPickup { pickup }, &mut events);
    events
}

fn world_near_level_up(stats: PlayerStats) -> World {
    World::with_config(WorldConfig {
        stats,
        progress: PlayerProgress {
            xp: 90,
            ..PlayerProgress::default()
        },
        ..WorldConfig::default()
    })
}

#[test]
fn crossing_the_threshold_levels_up_once_and_suspends_time() {
    let mut world = world_near_level_up(PlayerStats::default());
    let pickup = drop_pickup(&mut world);

    let events = collect(&mut world, pickup);
    assert_eq!(
        events,
        vec![
            Event::PickupCollected { pickup, xp: 20 },
            Event::LeveledUp {
                level: 2,
                required_xp: 150,
            },
        ]
    );

    let progress = query::player_progress(&world);
    assert_eq!(progress.xp, 0);
    assert_eq!(progress.required_xp, 150);
    assert_eq!(query::phase(&world), SessionPhase::LevelingUp);
    assert_eq!(
        query::progression_state(&world),
        ProgressionState::LevelingUp
    );

    assert!(tick(&mut world, 5_000).is_empty());
    assert_eq!(query::clock(&world), Duration::ZERO);
}

#[test]
fn pickups_wait_while_an_upgrade_is_pending() {
    let mut world = world_near_level_up(PlayerStats::default());
    let first = drop_pickup(&mut world);
    let second = drop_pickup(&mut world);
    let _ = collect(&mut world, first);

    assert!(collect(&mut world, second).is_empty());
    assert_eq!(query::pickup_view(&world).len(), 1);
}

#[test]
fn offers_are_published_and_cleared_by_the_choice() {
    let mut world = world_near_level_up(PlayerStats::default());
    let pickup = drop_pickup(&mut world);
    let _ = collect(&mut world, pickup);

    let offers = vec![
        UpgradeOffer {
            upgrade: Upgrade::Damage,
            rarity: Rarity::Common,
        },
        UpgradeOffer {
            upgrade: Upgrade::Beam,
            rarity: Rarity::Epic,
        },
    ];
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::OfferUpgrades {
            offers: offers.clone(),
        },
        &mut events,
    );
    assert_eq!(events, vec![Event::UpgradeChoiceRequested { offers }]);
    assert_eq!(query::pending_offers(&world).len(), 2);

    events.clear();
    world::apply(
        &mut world,
        Command::ResumeWithUpgrade {
            upgrade: "damage".to_owned(),
        },
        &mut events,
    );
    assert_eq!(
        events,
        vec![
            Event::UpgradeApplied {
                upgrade: Upgrade::Damage,
            },
            Event::Resumed,
        ]
    );
    assert!(query::pending_offers(&world).is_empty());
    assert_eq!(query::player_stats(&world).damage, 30.0);
    assert_eq!(query::phase(&world), SessionPhase::Running);
    assert_eq!(query::progression_state(&world), ProgressionState::Idle);
}

#[test]
fn unknown_upgrade_resumes_without_changes() {
    let mut world = world_near_level_up(PlayerStats::default());
    let pickup = drop_pickup(&mut world);
    let _ = collect(&mut world, pickup);

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ResumeWithUpgrade {
            upgrade: "orbital_laser".to_owned(),
        },
        &mut events,
    );

    assert_eq!(
        events,
        vec![
            Event::UpgradeIgnored {
                upgrade: "orbital_laser".to_owned(),
            },
            Event::Resumed,
        ]
    );
    assert_eq!(query::player_stats(&world), PlayerStats::default());
    assert_eq!(query::phase(&world), SessionPhase::Running);
}

#[test]
fn attack_speed_restarts_autofire_from_the_moment_of_choice() {
    let mut world = world_near_level_up(PlayerStats {
        fire_rate_ms: 500.0,
        ..PlayerStats::default()
    });
    let fired_autofire = |events: &[Event]| {
        events.contains(&Event::TimerFired {
            timer: TimerId::Autofire,
        })
    };

    assert!(!fired_autofire(&tick(&mut world, 300)));
    let pickup = drop_pickup(&mut world);
    let _ = collect(&mut world, pickup);

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ResumeWithUpgrade {
            upgrade: "attack_speed".to_owned(),
        },
        &mut events,
    );
    assert!(events.contains(&Event::TimerRestarted {
        timer: TimerId::Autofire,
        period: Duration::from_millis(400),
    }));
    assert_eq!(query::player_stats(&world).fire_rate_ms, 400.0);
    assert_eq!(
        query::timer_next_due(&world, TimerId::Autofire),
        Some(Duration::from_millis(700))
    );

    assert!(!fired_autofire(&tick(&mut world, 399)), "old cadence survived");
    assert!(fired_autofire(&tick(&mut world, 1)));
}

#[test]
fn pause_freezes_and_resume_continues() {
    let mut world = World::new();
    let _ = tick(&mut world, 500);

    let mut events = Vec::new();
    world::apply(&mut world, Command::Pause, &mut events);
    world::apply(
        &mut world,
        Command::ResumeWithUpgrade {
            upgrade: "damage".to_owned(),
        },
        &mut events,
    );
    assert_eq!(events, vec![Event::Paused]);
    assert_eq!(query::player_stats(&world), PlayerStats::default());

    assert!(tick(&mut world, 10_000).is_empty());

    events.clear();
    world::apply(&mut world, Command::Resume, &mut events);
    assert_eq!(events, vec![Event::Resumed]);

    let events = tick(&mut world, 500);
    assert!(events.contains(&Event::GameSecondElapsed { elapsed_seconds: 1 }));
    assert_eq!(query::elapsed_seconds(&world), 1);
}

#[test]
fn game_over_summary_counts_kills_and_levels_gained() {
    let mut world = World::with_config(WorldConfig {
        contact_damage: 100.0,
        crit_chance: 0.0,
        progress: PlayerProgress {
            xp: 90,
            ..PlayerProgress::default()
        },
        ..WorldConfig::default()
    });
    let _ = tick(&mut world, 2_000);
    let pickup = drop_pickup(&mut world);
    let _ = collect(&mut world, pickup);
    assert_eq!(query::phase(&world), SessionPhase::LevelingUp);

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ResumeWithUpgrade {
            upgrade: "damage".to_owned(),
        },
        &mut events,
    );
    let _ = tick(&mut world, 1_000);

    events.clear();
    world::apply(
        &mut world,
        Command::SpawnEnemy {
            kind: EnemyKind::Normal,
            position: Vec2::new(1_250.0, 1_250.0),
            hp: 10.0,
        },
        &mut events,
    );
    let attacker = match events.as_slice() {
        [Event::EnemySpawned { enemy, .. }] => *enemy,
        other => panic!("unexpected spawn events: {other:?}"),
    };

    events.clear();
    world::apply(
        &mut world,
        Command::ResolvePlayerContact { enemy: attacker },
        &mut events,
    );

    let expected = SessionSummary {
        elapsed_seconds: 3,
        level: 2,
        kill_count: 1,
    };
    assert_eq!(events.last(), Some(&Event::GameOver { summary: expected }));
    assert_eq!(query::summary(&world), Some(expected));
}
