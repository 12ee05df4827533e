#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Arena Survivor session.

use std::{collections::BTreeMap, path::PathBuf};

use anyhow::{Context, Result};
use arena_survivor_core::{AudioCue, MovementIntent, SessionPhase};
use arena_survivor_session::{audio_cues, Control, Session, SessionConfig, SessionInput};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const ORBIT_LEG_STEPS: u64 = 90;

#[derive(Debug, Parser)]
#[command(name = "arena-survivor", about = "Runs a headless Arena Survivor session.")]
struct CliArgs {
    /// Optional TOML file overriding the session defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Overrides the seed from the configuration.
    #[arg(long)]
    seed: Option<u64>,
    /// Stops the run after this many steps if the player is still alive.
    #[arg(long, default_value_t = 75_000)]
    max_steps: u64,
    /// Movement pattern of the scripted player.
    #[arg(long, value_enum, default_value_t = Pilot::Idle)]
    pilot: Pilot,
    /// Upgrade id picked whenever it is among the offers.
    #[arg(long, value_name = "UPGRADE")]
    prefer: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Pilot {
    /// Stands still in the arena centre.
    Idle,
    /// Walks a square loop around the starting point.
    Orbit,
}

impl Pilot {
    fn input(self, step: u64) -> SessionInput {
        let movement = match self {
            Self::Idle => MovementIntent::IDLE,
            Self::Orbit => match (step / ORBIT_LEG_STEPS) % 4 {
                0 => MovementIntent::from_keys(false, false, false, true),
                1 => MovementIntent::from_keys(false, true, false, false),
                2 => MovementIntent::from_keys(false, false, true, false),
                _ => MovementIntent::from_keys(true, false, false, false),
            },
        };
        SessionInput { movement }
    }
}

/// Entry point for the Arena Survivor command-line interface.
fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("failed to load session config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut session = Session::new(config).context("failed to start session")?;
    info!(seed = session.config().seed, pilot = ?args.pilot, "running headless session");

    let mut cues: BTreeMap<AudioCue, u64> = BTreeMap::new();
    let mut steps = 0;
    while steps < args.max_steps && session.phase() != SessionPhase::GameOver {
        let events = session.step(&args.pilot.input(steps));
        steps += 1;
        for cue in audio_cues(&events) {
            *cues.entry(cue).or_insert(0) += 1;
        }

        if session.phase() == SessionPhase::LevelingUp {
            choose_upgrade(&mut session, args.prefer.as_deref());
        }
    }

    let hud = session.snapshot().hud;
    match session.summary() {
        Some(summary) => println!(
            "game over after {}s: level {}, {} kills",
            summary.elapsed_seconds, summary.level, summary.kill_count
        ),
        None => println!(
            "stopped after {steps} steps at {}s: level {}, {} kills, {:.0}/{:.0} health",
            hud.elapsed_seconds, hud.level, hud.kill_count, hud.health, hud.max_health
        ),
    }
    for (cue, count) in &cues {
        println!("{cue:?}: {count}");
    }

    Ok(())
}

fn choose_upgrade(session: &mut Session, prefer: Option<&str>) {
    let offers = session.snapshot().pending_offers;
    let preferred = prefer.and_then(|id| offers.iter().find(|offer| offer.upgrade.id() == id));
    let Some(offer) = preferred.or_else(|| offers.first()) else {
        warn!("level-up without offers, resuming without an upgrade");
        let _ = session.command(Control::ChooseUpgrade(String::new()));
        return;
    };

    info!(
        upgrade = offer.upgrade.display_name(),
        rarity = ?offer.rarity,
        "upgrade chosen"
    );
    let _ = session.command(Control::ChooseUpgrade(offer.upgrade.id().to_owned()));
}
