//! Elimination-order scoring.

use std::collections::BTreeMap;
use std::iter;

use tracing::info;

use super::*;

impl Game {
    /// Controller name to score. The Nth champion eliminated earns the Nth
    /// term of 1, 2, 3, 5, 8, ...; the survivor counts as eliminated last.
    /// Controllers sharing a name keep the later (higher) score.
    pub fn score(&self) -> Result<BTreeMap<String, u32>, GameError> {
        if !self.finished {
            return Err(GameError::NotFinished);
        }
        Ok(self
            .deaths
            .iter()
            .zip(elimination_scores())
            .map(|(death, score)| (death.controller_name.clone(), score))
            .collect())
    }

    /// Tells every controller its final score.
    pub fn praise(&mut self) -> Result<(), GameError> {
        let scores = self.score()?;
        for id in &self.spawn_order {
            let Some(champion) = self.arena.champion_mut(*id) else {
                continue;
            };
            let score = scores.get(champion.controller_name()).copied().unwrap_or_default();
            info!(controller = %champion.controller_name(), score, "praising controller");
            champion.controller_mut().praise(score);
        }
        Ok(())
    }
}

fn elimination_scores() -> impl Iterator<Item = u32> {
    iter::successors(Some((1u32, 2u32)), |&(current, next)| Some((next, current.saturating_add(next))))
        .map(|(current, _)| current)
}
