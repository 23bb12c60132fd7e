use std::collections::BTreeSet;

use anyhow::{Result, bail};
use clap::Parser;
use menhir::{
    AdvanceStopReason, Arena, CHAMPION_STARTING_HP, Game, MatchConfig, Tabard, Terrain, Tile,
    TileKind, Weapon,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tools::config::{ControllerKind, ControllerSpec};
use tools::controllers;
use tracing::{info, info_span};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Plays random matches on generated arenas and checks engine invariants", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 100)]
    matches: u32,
    #[arg(short, long, default_value_t = 200_000)]
    cycles: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

/// Mostly land with scattered sea, walls and loot.
fn generate_arena(rng: &mut ChaCha8Rng) -> Arena {
    let width = 6 + rng.next_u64() as usize % 14;
    let height = 6 + rng.next_u64() as usize % 14;
    let loot = [Weapon::Knife, Weapon::Sword, Weapon::Axe, Weapon::bow(), Weapon::Amulet];

    let rows = (0..height)
        .map(|_| {
            (0..width)
                .map(|_| {
                    let tile = match rng.next_u64() % 20 {
                        0 | 1 => Tile::new(TileKind::Wall),
                        2 => Tile::new(TileKind::Sea),
                        3 => Tile::with_loot(TileKind::Land, choose(rng, &loot)),
                        _ => Tile::new(TileKind::Land),
                    };
                    Some(tile)
                })
                .collect()
        })
        .collect();
    Arena::new("generated", Terrain::from_rows(rows))
}

fn check_invariants(game: &Game) -> Result<()> {
    let mut occupied = BTreeSet::new();
    for id in game.spawn_order() {
        let Some(champion) = game.arena().champion(*id) else {
            bail!("Invariant failed: champion vanished from the arena");
        };
        if champion.health() > CHAMPION_STARTING_HP {
            bail!("Invariant failed: health above maximum");
        }
        if !champion.alive() {
            continue;
        }
        if !occupied.insert(champion.position()) {
            bail!("Invariant failed: two champions on {}", champion.position());
        }
        match game.arena().terrain().tile(champion.position()) {
            Some(tile) if tile.character == Some(*id) && tile.kind == TileKind::Land => {}
            _ => bail!("Invariant failed: champion not standing on its land tile"),
        }
    }
    Ok(())
}

fn run_match(seed: u64, max_cycles: u32) -> Result<Option<u64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let arena = generate_arena(&mut rng);
    let kinds = [ControllerKind::RandomWalker, ControllerKind::Sentinel, ControllerKind::MenhirSeeker];
    let count = 2 + rng.next_u64() as usize % 5;
    let controllers = (0..count)
        .map(|idx| {
            let spec = ControllerSpec {
                kind: choose(&mut rng, &kinds),
                name: format!("bot{idx}"),
                tabard: Some(Tabard::Stripes),
            };
            controllers::build(&spec, seed.wrapping_add(idx as u64))
        })
        .collect();

    let mut game = Game::new(seed, arena, controllers, MatchConfig::default())?;
    let mut radius = game.arena().mist_radius();
    let mut total = 0;
    while total < max_cycles {
        let result = game.advance(10);
        total += result.simulated_cycles;
        check_invariants(&game)?;

        let current = game.arena().mist_radius();
        if current > radius {
            bail!("Invariant failed: mist radius grew from {radius} to {current}");
        }
        radius = current;

        if result.stop_reason == AdvanceStopReason::Finished {
            if game.deaths().len() != game.spawn_order().len() {
                bail!("Invariant failed: deaths ledger incomplete");
            }
            let scores = game.score()?;
            if scores.len() != game.spawn_order().len() {
                bail!("Invariant failed: not every controller was scored");
            }
            return Ok(Some(game.episode()));
        }
    }
    Ok(None)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    println!("Starting fuzz harness on seed {} for {} matches...", args.seed, args.matches);

    let mut finished = 0;
    let mut stalled = 0;
    for idx in 0..args.matches {
        let seed = args.seed.wrapping_add(u64::from(idx));
        let span = info_span!("fuzz_match", seed);
        let _guard = span.enter();
        match run_match(seed, args.cycles) {
            Ok(Some(episodes)) => {
                finished += 1;
                info!(episodes, "match finished");
            }
            Ok(None) => stalled += 1,
            Err(error) => bail!("seed {seed}: {error:#}"),
        }
    }

    println!("Fuzz complete: {finished} finished, {stalled} hit the cycle cap.");
    Ok(())
}
