#![allow(dead_code)]

use menhir::{
    Action, ArenaDescription, ChampionKnowledge, Controller, ControllerError, Facing, Tabard,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

/// Uniformly random actions from its own seeded stream.
pub struct RandomBot {
    name: String,
    seed: u64,
    rng: ChaCha8Rng,
}

impl RandomBot {
    pub fn boxed(name: &str, seed: u64) -> Box<dyn Controller> {
        Box::new(Self { name: name.to_string(), seed, rng: ChaCha8Rng::seed_from_u64(seed) })
    }
}

impl Controller for RandomBot {
    fn reset(&mut self, _arena: &ArenaDescription) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }

    fn decide(&mut self, _knowledge: &ChampionKnowledge) -> Result<Action, ControllerError> {
        let idx = self.rng.next_u64() as usize % Action::ALL.len();
        Ok(Action::ALL[idx])
    }

    fn praise(&mut self, _score: u32) {}

    fn name(&self) -> &str {
        &self.name
    }

    fn preferred_tabard(&self) -> Tabard {
        Tabard::Orange
    }
}

/// Turns until it faces `target`, then attacks every turn.
pub struct Duelist {
    pub target: Facing,
}

impl Controller for Duelist {
    fn reset(&mut self, _arena: &ArenaDescription) {}

    fn decide(&mut self, knowledge: &ChampionKnowledge) -> Result<Action, ControllerError> {
        let me = knowledge
            .visible_tiles
            .get(&knowledge.position)
            .and_then(|tile| tile.character.as_ref())
            .ok_or_else(|| ControllerError::new("own tile missing from knowledge"))?;
        if me.facing == self.target { Ok(Action::Attack) } else { Ok(Action::TurnRight) }
    }

    fn praise(&mut self, _score: u32) {}

    fn name(&self) -> &str {
        "duelist"
    }

    fn preferred_tabard(&self) -> Tabard {
        Tabard::Red
    }
}

/// Never moves.
pub struct Statue(pub &'static str);

impl Controller for Statue {
    fn reset(&mut self, _arena: &ArenaDescription) {}

    fn decide(&mut self, _knowledge: &ChampionKnowledge) -> Result<Action, ControllerError> {
        Ok(Action::DoNothing)
    }

    fn praise(&mut self, _score: u32) {}

    fn name(&self) -> &str {
        self.0
    }

    fn preferred_tabard(&self) -> Tabard {
        Tabard::White
    }
}

pub fn land(width: usize, height: usize) -> String {
    let row = ".".repeat(width);
    (0..height).map(|_| format!("{row}\n")).collect()
}
