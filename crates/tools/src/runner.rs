//! Drives configured tournaments: every arena, every round, one match each.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use menhir::{AdvanceStopReason, Controller, Game, LedgerWriter, MatchRecord};
use tracing::{info, info_span, warn};

use crate::config::RunnerConfig;
use crate::controllers;

pub const CREATED_BY: &str = concat!("menhir-tools ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Default)]
pub struct TournamentSummary {
    pub matches: Vec<MatchRecord>,
    pub abandoned: usize,
    pub totals: BTreeMap<String, u64>,
}

impl TournamentSummary {
    /// Controllers ordered by total score, best first.
    pub fn standings(&self) -> Vec<(&str, u64)> {
        let mut standings: Vec<(&str, u64)> =
            self.totals.iter().map(|(name, total)| (name.as_str(), *total)).collect();
        standings.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        standings
    }
}

pub fn run_tournament(config: &RunnerConfig, mut ledger: Option<&mut LedgerWriter>) -> Result<TournamentSummary> {
    let mut controllers: Vec<Box<dyn Controller>> = config
        .controllers
        .iter()
        .enumerate()
        .map(|(idx, spec)| controllers::build(spec, config.seed.wrapping_add(idx as u64)))
        .collect();

    let mut summary = TournamentSummary::default();
    let mut match_index: u64 = 0;
    for round in 0..config.rounds {
        for arena in &config.arenas {
            let seed = config.seed.wrapping_add(match_index);
            match_index += 1;

            let span = info_span!("match", arena = %arena, round, seed);
            let _guard = span.enter();

            let (record, returned) = play_match(config, arena, seed, controllers)?;
            controllers = returned;
            let Some(record) = record else {
                summary.abandoned += 1;
                continue;
            };

            if let Some(writer) = ledger.as_deref_mut() {
                writer.append(&record).context("failed to append to the score ledger")?;
            }
            for (name, score) in &record.scores {
                *summary.totals.entry(name.clone()).or_insert(0) += u64::from(*score);
            }
            summary.matches.push(record);
        }
    }
    Ok(summary)
}

/// Plays one match and hands the controllers back. Returns no record when the
/// match hit the cycle cap before a winner emerged.
fn play_match(
    config: &RunnerConfig,
    arena: &str,
    seed: u64,
    controllers: Vec<Box<dyn Controller>>,
) -> Result<(Option<MatchRecord>, Vec<Box<dyn Controller>>)> {
    let mut game = Game::load(&config.arena_dir, arena, seed, controllers, config.match_config())
        .with_context(|| format!("failed to start a match on arena '{arena}'"))?;

    let result = game.advance(config.max_cycles);
    if result.stop_reason != AdvanceStopReason::Finished {
        warn!(cycles = result.simulated_cycles, "match abandoned at the cycle cap");
        return Ok((None, game.into_controllers()));
    }

    game.praise().context("finished match could not be scored")?;
    let scores = game.score().context("finished match could not be scored")?;
    info!(episodes = game.episode(), ?scores, "match scored");

    let record = MatchRecord { arena: arena.to_string(), seed, episodes: game.episode(), scores };
    Ok((Some(record), game.into_controllers()))
}
