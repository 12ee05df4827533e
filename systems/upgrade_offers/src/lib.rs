#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Draws upgrade offers for the selection collaborator whenever the player
//! levels up.

use arena_survivor_core::{Command, Event, Rarity, Upgrade, UpgradeOffer};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of options presented per level-up.
pub const OFFER_COUNT: usize = 3;

/// Pure system that answers every level-up with a batch of offers.
#[derive(Debug)]
pub struct UpgradeOffers {
    rng: ChaCha8Rng,
}

impl UpgradeOffers {
    /// Creates the system with a deterministic random stream.
    #[must_use]
    pub fn new(rng_seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(rng_seed),
        }
    }

    /// Consumes world events and emits offers for each level-up.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if matches!(event, Event::LeveledUp { .. }) {
                out.push(Command::OfferUpgrades {
                    offers: draw_offers(&mut self.rng, OFFER_COUNT),
                });
            }
        }
    }
}

/// Draws `count` distinct catalog upgrades, each tagged with a rarity roll in `1..=100`.
pub fn draw_offers<R>(rng: &mut R, count: usize) -> Vec<UpgradeOffer>
where
    R: Rng + ?Sized,
{
    let picks: Vec<Upgrade> = Upgrade::ALL.choose_multiple(rng, count).copied().collect();
    picks
        .into_iter()
        .map(|upgrade| UpgradeOffer {
            upgrade,
            rarity: Rarity::from_roll(rng.gen_range(1..=100)),
        })
        .collect()
}
