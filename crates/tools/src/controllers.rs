//! Reference controllers fielded by the runner.

use menhir::{
    Action, ArenaDescription, ChampionDescription, ChampionKnowledge, Controller, ControllerError,
    Coords, Facing, Tabard, TileKind,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

use crate::config::{ControllerKind, ControllerSpec};

pub fn build(spec: &ControllerSpec, seed: u64) -> Box<dyn Controller> {
    let name = spec.name.clone();
    match spec.kind {
        ControllerKind::RandomWalker => {
            Box::new(RandomWalker::new(name, spec.tabard.unwrap_or(Tabard::Lime), seed))
        }
        ControllerKind::Sentinel => {
            Box::new(Sentinel { name, tabard: spec.tabard.unwrap_or(Tabard::Grey) })
        }
        ControllerKind::MenhirSeeker => Box::new(MenhirSeeker {
            name,
            tabard: spec.tabard.unwrap_or(Tabard::Violet),
            menhir: None,
        }),
    }
}

fn own_description(knowledge: &ChampionKnowledge) -> Result<&ChampionDescription, ControllerError> {
    knowledge
        .visible_tiles
        .get(&knowledge.position)
        .and_then(|tile| tile.character.as_ref())
        .ok_or_else(|| ControllerError::new("own tile is missing from knowledge"))
}

fn enemy_ahead(knowledge: &ChampionKnowledge, facing: Facing) -> bool {
    let ahead = knowledge.position + facing.delta();
    knowledge.visible_tiles.get(&ahead).is_some_and(|tile| tile.character.is_some())
}

fn can_step(knowledge: &ChampionKnowledge, facing: Facing) -> bool {
    let ahead = knowledge.position + facing.delta();
    knowledge
        .visible_tiles
        .get(&ahead)
        .is_some_and(|tile| tile.kind == TileKind::Land && tile.character.is_none())
}

/// Wanders at random, preferring to walk.
pub struct RandomWalker {
    name: String,
    tabard: Tabard,
    seed: u64,
    rng: ChaCha8Rng,
}

impl RandomWalker {
    const WEIGHTED: [Action; 6] = [
        Action::StepForward,
        Action::StepForward,
        Action::StepForward,
        Action::TurnLeft,
        Action::TurnRight,
        Action::Attack,
    ];

    pub fn new(name: String, tabard: Tabard, seed: u64) -> Self {
        Self { name, tabard, seed, rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl Controller for RandomWalker {
    fn reset(&mut self, _arena: &ArenaDescription) {
        self.seed = self.seed.wrapping_add(1);
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }

    fn decide(&mut self, _knowledge: &ChampionKnowledge) -> Result<Action, ControllerError> {
        let idx = self.rng.next_u64() as usize % Self::WEIGHTED.len();
        Ok(Self::WEIGHTED[idx])
    }

    fn praise(&mut self, _score: u32) {}

    fn name(&self) -> &str {
        &self.name
    }

    fn preferred_tabard(&self) -> Tabard {
        self.tabard
    }
}

/// Holds its ground, sweeping around and striking whatever stands in front.
pub struct Sentinel {
    name: String,
    tabard: Tabard,
}

impl Controller for Sentinel {
    fn reset(&mut self, _arena: &ArenaDescription) {}

    fn decide(&mut self, knowledge: &ChampionKnowledge) -> Result<Action, ControllerError> {
        let me = own_description(knowledge)?;
        if enemy_ahead(knowledge, me.facing) { Ok(Action::Attack) } else { Ok(Action::TurnRight) }
    }

    fn praise(&mut self, _score: u32) {}

    fn name(&self) -> &str {
        &self.name
    }

    fn preferred_tabard(&self) -> Tabard {
        self.tabard
    }
}

/// Walks towards the menhir, fighting anyone in the way.
pub struct MenhirSeeker {
    name: String,
    tabard: Tabard,
    menhir: Option<Coords>,
}

impl MenhirSeeker {
    fn desired_facing(position: Coords, menhir: Coords) -> Option<Facing> {
        let offset = menhir - position;
        if offset == Coords::default() {
            return None;
        }
        let facing = if offset.x.abs() >= offset.y.abs() {
            if offset.x > 0 { Facing::Right } else { Facing::Left }
        } else if offset.y > 0 {
            Facing::Down
        } else {
            Facing::Up
        };
        Some(facing)
    }
}

impl Controller for MenhirSeeker {
    fn reset(&mut self, arena: &ArenaDescription) {
        self.menhir = arena.menhir_position;
    }

    fn decide(&mut self, knowledge: &ChampionKnowledge) -> Result<Action, ControllerError> {
        let me = own_description(knowledge)?;
        if enemy_ahead(knowledge, me.facing) {
            return Ok(Action::Attack);
        }
        let Some(menhir) = self.menhir else {
            return Ok(Action::TurnRight);
        };
        // The menhir tile itself is impassable; standing next to it is the goal.
        let offset = menhir - knowledge.position;
        if offset.x.abs() + offset.y.abs() <= 1 {
            return Ok(Action::TurnRight);
        }
        match Self::desired_facing(knowledge.position, menhir) {
            Some(facing) if facing == me.facing && can_step(knowledge, facing) => Ok(Action::StepForward),
            Some(facing) if facing == me.facing => Ok(Action::TurnLeft),
            Some(facing) if facing == me.facing.turn_left() => Ok(Action::TurnLeft),
            Some(_) => Ok(Action::TurnRight),
            None => Ok(Action::DoNothing),
        }
    }

    fn praise(&mut self, _score: u32) {}

    fn name(&self) -> &str {
        &self.name
    }

    fn preferred_tabard(&self) -> Tabard {
        self.tabard
    }
}
