use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use arena_survivor_core::{
    AxisIntent, Event, MovementIntent, SessionPhase, SessionSummary, TimerId, Vec2,
};
use arena_survivor_session::{Control, Session, SessionConfig, SessionInput};
use arena_survivor_world::query;

const MAX_STEPS: usize = 200;

/// Tiny arena where spawns clamp right next to the player.
fn cramped(contact_damage: f32) -> SessionConfig {
    SessionConfig {
        world_size: 200.0,
        spawn_margin: 10.0,
        contact_damage,
        ..SessionConfig::default()
    }
}

fn step_until<F>(session: &mut Session, mut done: F) -> Vec<Event>
where
    F: FnMut(&[Event]) -> bool,
{
    for _ in 0..MAX_STEPS {
        let events = session.step(&SessionInput::default());
        if done(&events) {
            return events;
        }
    }
    panic!("condition not reached within {MAX_STEPS} steps");
}

/// Runs a session for `steps` steps, always picking the first offered upgrade.
fn replay_hash(seed: u64, steps: usize) -> u64 {
    let mut session = Session::new(SessionConfig {
        seed,
        ..SessionConfig::default()
    })
    .expect("valid config");
    let input = SessionInput {
        movement: MovementIntent {
            horizontal: AxisIntent::Positive,
            vertical: AxisIntent::Neutral,
        },
    };

    let mut hasher = DefaultHasher::new();
    for _ in 0..steps {
        for event in session.step(&input) {
            format!("{event:?}").hash(&mut hasher);
        }
        if session.phase() == SessionPhase::LevelingUp {
            let choice = session.snapshot().pending_offers[0].upgrade.id().to_owned();
            for event in session.command(Control::ChooseUpgrade(choice)) {
                format!("{event:?}").hash(&mut hasher);
            }
        }
    }
    hasher.finish()
}

#[test]
fn fresh_session_starts_with_five_enemies_around_a_centred_player() {
    let session = Session::new(SessionConfig::default()).expect("valid config");
    let snapshot = session.snapshot();

    assert_eq!(snapshot.enemies.len(), 5);
    let player = snapshot.player.expect("player present");
    assert_eq!(player.position, Vec2::new(1_250.0, 1_250.0));
    for enemy in snapshot.enemies.iter() {
        let distance = enemy.position.distance(player.position);
        assert!((699.9..=900.1).contains(&distance), "distance {distance}");
        assert_eq!(enemy.hp, 10.0);
    }

    assert_eq!(snapshot.hud.health, 100.0);
    assert_eq!(snapshot.hud.level, 1);
    assert_eq!(snapshot.hud.required_xp, 100);
    assert_eq!(snapshot.hud.elapsed_seconds, 0);
    assert_eq!(session.phase(), SessionPhase::Running);
}

#[test]
fn first_contact_costs_fixed_damage_and_removes_the_enemy() {
    let mut session = Session::new(cramped(10.0)).expect("valid config");
    let before = session.snapshot().enemies.len();

    let events = step_until(&mut session, |events| {
        events
            .iter()
            .any(|event| matches!(event, Event::PlayerHurt { .. }))
    });

    let (despawned, hurt) = events.iter().fold((0, None), |(count, hurt), event| {
        match event {
            Event::EnemyDespawned { .. } => (count + 1, hurt),
            Event::PlayerHurt { health, .. } if hurt.is_none() => (count, Some(*health)),
            _ => (count, hurt),
        }
    });
    assert_eq!(hurt, Some(90.0));
    assert!(despawned >= 1);
    assert!(session.snapshot().enemies.len() < before);
    assert_eq!(session.snapshot().hud.kill_count, 0);
}

#[test]
fn lethal_contact_ends_the_session_with_a_summary() {
    let mut session = Session::new(cramped(100.0)).expect("valid config");

    let events = step_until(&mut session, |events| {
        events
            .iter()
            .any(|event| matches!(event, Event::GameOver { .. }))
    });

    let expected = SessionSummary {
        elapsed_seconds: 0,
        level: 1,
        kill_count: 0,
    };
    assert!(events.contains(&Event::GameOver { summary: expected }));
    assert_eq!(session.summary(), Some(expected));
    assert_eq!(session.phase(), SessionPhase::GameOver);

    let frozen = session.snapshot();
    for _ in 0..10 {
        assert!(session.step(&SessionInput::default()).is_empty());
    }
    let after = session.snapshot();
    assert_eq!(frozen.enemies.len(), after.enemies.len());
    assert_eq!(frozen.projectiles.len(), after.projectiles.len());
    assert!(after.player.is_none());
    assert!(session
        .command(Control::ChooseUpgrade("damage".to_owned()))
        .is_empty());
}

#[test]
fn paused_session_does_not_advance() {
    let mut session = Session::new(SessionConfig::default()).expect("valid config");
    let _ = session.step(&SessionInput::default());
    let before = session.snapshot();

    assert_eq!(session.command(Control::Pause), vec![Event::Paused]);
    for _ in 0..50 {
        assert!(session.step(&SessionInput::default()).is_empty());
    }
    let paused = session.snapshot();
    let positions = |snapshot: &arena_survivor_session::FrameSnapshot| -> Vec<Vec2> {
        snapshot.enemies.iter().map(|enemy| enemy.position).collect()
    };
    assert_eq!(positions(&before), positions(&paused));

    assert_eq!(session.command(Control::Resume), vec![Event::Resumed]);
    assert!(!session.step(&SessionInput::default()).is_empty());
}

#[test]
fn player_moves_with_intent_and_stays_in_bounds() {
    let mut session = Session::new(SessionConfig {
        tick_ms: 100,
        ..SessionConfig::default()
    })
    .expect("valid config");
    let left = SessionInput {
        movement: MovementIntent::from_keys(false, false, true, false),
    };

    let _ = session.step(&left);
    let _ = session.step(&left);
    let position = session
        .snapshot()
        .player
        .map(|player| player.position)
        .expect("player present");
    assert!((position.x - 1_220.0).abs() < 1e-2, "x = {}", position.x);
    assert!((position.y - 1_250.0).abs() < 1e-2);
}

#[test]
fn same_seed_and_input_replay_identically() {
    assert_eq!(replay_hash(0x1234, 600), replay_hash(0x1234, 600));
}

#[test]
fn different_seeds_diverge() {
    assert_ne!(replay_hash(1, 300), replay_hash(2, 300));
}

/// Steps until `seconds` have elapsed, picking the first offer at every level-up.
/// Returns the spawn timer restarts as (elapsed seconds, period) pairs.
fn run_until_elapsed(session: &mut Session, seconds: u32) -> Vec<(u32, Duration)> {
    let mut restarts = Vec::new();
    while query::elapsed_seconds(session.world()) < seconds {
        assert_eq!(session.phase(), SessionPhase::Running);
        for event in session.step(&SessionInput::default()) {
            if let Event::TimerRestarted {
                timer: TimerId::Spawn,
                period,
            } = event
            {
                restarts.push((query::elapsed_seconds(session.world()), period));
            }
        }
        if session.phase() == SessionPhase::LevelingUp {
            let choice = session.snapshot().pending_offers[0].upgrade.id().to_owned();
            let _ = session.command(Control::ChooseUpgrade(choice));
        }
    }
    restarts
}

#[test]
fn spawn_cadence_tightens_every_minute_down_to_the_floor() {
    let mut session = Session::new(SessionConfig {
        tick_ms: 100,
        contact_damage: 0.0,
        ..SessionConfig::default()
    })
    .expect("valid config");
    let spawn_period = |session: &Session| query::timer_period(session.world(), TimerId::Spawn);
    assert_eq!(spawn_period(&session), Some(Duration::from_secs(2)));

    let early = run_until_elapsed(&mut session, 60);
    assert_eq!(early, vec![(60, Duration::from_millis(1_800))]);
    assert_eq!(spawn_period(&session), Some(Duration::from_millis(1_800)));

    let _ = run_until_elapsed(&mut session, 480);
    assert_eq!(spawn_period(&session), Some(Duration::from_millis(500)));

    let floored = run_until_elapsed(&mut session, 541);
    assert_eq!(floored, vec![(540, Duration::from_millis(500))]);
    assert_eq!(spawn_period(&session), Some(Duration::from_millis(500)));
}
