//! Shared test fixtures for the unit test suites.
//! Scripted controllers and small land arenas so each test only states what differs.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::arena::Arena;
use crate::controller::{Controller, ControllerError};
use crate::knowledge::{ArenaDescription, ChampionKnowledge};
use crate::terrain::Terrain;
use crate::tile::TileKind;
use crate::types::{Action, ChampionId, Coords, Facing, Tabard};

pub(crate) fn land_arena(width: usize, height: usize) -> Arena {
    Arena::new("test", Terrain::filled(width, height, TileKind::Land))
}

pub(crate) fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(0x5eed)
}

/// Spawns a champion and overrides the random facing.
pub(crate) fn place(
    arena: &mut Arena,
    coords: Coords,
    facing: Facing,
    controller: Box<dyn Controller>,
) -> ChampionId {
    let id = arena.spawn_champion(coords, controller, &mut test_rng()).expect("spawn champion");
    arena.champion_mut(id).expect("spawned champion").facing = facing;
    id
}

pub(crate) fn idle(name: &str) -> Box<dyn Controller> {
    scripted(name, &[])
}

/// Plays `actions` in order, then does nothing forever.
pub(crate) fn scripted(name: &str, actions: &[Action]) -> Box<dyn Controller> {
    Box::new(Scripted::new(name, actions))
}

pub(crate) struct Scripted {
    name: String,
    script: Vec<Action>,
    pending: VecDeque<Action>,
    pub(crate) log: Rc<RefCell<ControllerLog>>,
}

#[derive(Debug, Default)]
pub(crate) struct ControllerLog {
    pub(crate) resets: Vec<ArenaDescription>,
    pub(crate) decisions: usize,
    pub(crate) praise: Vec<u32>,
}

impl Scripted {
    pub(crate) fn new(name: &str, actions: &[Action]) -> Self {
        Self {
            name: name.to_string(),
            script: actions.to_vec(),
            pending: actions.iter().copied().collect(),
            log: Rc::default(),
        }
    }
}

impl Controller for Scripted {
    fn reset(&mut self, arena: &ArenaDescription) {
        self.pending = self.script.iter().copied().collect();
        self.log.borrow_mut().resets.push(arena.clone());
    }

    fn decide(&mut self, _knowledge: &ChampionKnowledge) -> Result<Action, ControllerError> {
        self.log.borrow_mut().decisions += 1;
        Ok(self.pending.pop_front().unwrap_or(Action::DoNothing))
    }

    fn praise(&mut self, score: u32) {
        self.log.borrow_mut().praise.push(score);
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn preferred_tabard(&self) -> Tabard {
        Tabard::Blue
    }
}

pub(crate) struct Failing;

impl Controller for Failing {
    fn reset(&mut self, _arena: &ArenaDescription) {}

    fn decide(&mut self, _knowledge: &ChampionKnowledge) -> Result<Action, ControllerError> {
        Err(ControllerError::new("no idea"))
    }

    fn praise(&mut self, _score: u32) {}

    fn name(&self) -> &str {
        "failing"
    }

    fn preferred_tabard(&self) -> Tabard {
        Tabard::Grey
    }
}

pub(crate) struct Panicking;

impl Controller for Panicking {
    fn reset(&mut self, _arena: &ArenaDescription) {}

    fn decide(&mut self, _knowledge: &ChampionKnowledge) -> Result<Action, ControllerError> {
        panic!("controller bug");
    }

    fn praise(&mut self, _score: u32) {}

    fn name(&self) -> &str {
        "panicking"
    }

    fn preferred_tabard(&self) -> Tabard {
        Tabard::Grey
    }
}

pub(crate) struct Slow {
    pub(crate) delay: Duration,
    pub(crate) action: Action,
}

impl Controller for Slow {
    fn reset(&mut self, _arena: &ArenaDescription) {}

    fn decide(&mut self, _knowledge: &ChampionKnowledge) -> Result<Action, ControllerError> {
        thread::sleep(self.delay);
        Ok(self.action)
    }

    fn praise(&mut self, _score: u32) {}

    fn name(&self) -> &str {
        "slow"
    }

    fn preferred_tabard(&self) -> Tabard {
        Tabard::Grey
    }
}
