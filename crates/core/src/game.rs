//! The turn scheduler. One `cycle` is either a single champion's action, the
//! environment step that closes an episode, or the application of pending
//! instant effects; the two kinds of step strictly alternate.

use std::collections::VecDeque;
use std::mem;
use std::path::Path;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use tracing::{debug, info};

use crate::arena::Arena;
use crate::config::MatchConfig;
use crate::controller::Controller;
use crate::error::GameError;
use crate::random::{sample, shuffle};
use crate::types::{ChampionId, Coords};

mod hash;
mod scoring;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CycleState {
    ActionsDone,
    InstantsTriggered,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChampionDeath {
    pub champion: ChampionId,
    pub controller_name: String,
    /// Episode during which the champion was removed from the roster.
    pub episode: u64,
}

/// Fixed spawn positions. Controllers without an entry in `champions` are
/// placed on random empty tiles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Placement {
    pub menhir: Option<Coords>,
    pub champions: Vec<Coords>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    Finished,
    BudgetExhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceResult {
    pub simulated_cycles: u32,
    pub stop_reason: AdvanceStopReason,
}

pub struct Game {
    seed: u64,
    rng: ChaCha8Rng,
    config: MatchConfig,
    arena: Arena,
    // Living roster in spawn order; pruned by the environment step.
    champions: Vec<ChampionId>,
    spawn_order: Vec<ChampionId>,
    action_queue: VecDeque<ChampionId>,
    episode: u64,
    deaths: Vec<ChampionDeath>,
    finished: bool,
    state: CycleState,
    cycles: u64,
}

impl Game {
    pub fn new(
        seed: u64,
        arena: Arena,
        controllers: Vec<Box<dyn Controller>>,
        config: MatchConfig,
    ) -> Result<Self, GameError> {
        Self::with_placement(seed, arena, controllers, Placement::default(), config)
    }

    /// Loads `<dir>/<arena_name>.arena` and starts a match on it.
    pub fn load(
        dir: &Path,
        arena_name: &str,
        seed: u64,
        controllers: Vec<Box<dyn Controller>>,
        config: MatchConfig,
    ) -> Result<Self, GameError> {
        let arena = Arena::load(dir, arena_name)?;
        Self::new(seed, arena, controllers, config)
    }

    pub fn with_placement(
        seed: u64,
        mut arena: Arena,
        mut controllers: Vec<Box<dyn Controller>>,
        placement: Placement,
        config: MatchConfig,
    ) -> Result<Self, GameError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let fixed = placement.champions.len().min(controllers.len());
        let menhir = arena.place_menhir(placement.menhir, &placement.champions[..fixed], &mut rng)?;
        let description = arena.description();
        for controller in &mut controllers {
            controller.reset(&description);
        }

        let mut positions = placement.champions[..fixed].to_vec();
        let remaining = controllers.len() - fixed;
        if remaining > 0 {
            let free: Vec<Coords> =
                arena.empty_coords().into_iter().filter(|coords| !positions.contains(coords)).collect();
            if free.len() < remaining {
                return Err(GameError::NotEnoughSpace { requested: remaining, available: free.len() });
            }
            positions.extend(sample(&mut rng, &free, remaining));
        }

        let mut spawn_order = Vec::with_capacity(controllers.len());
        for (controller, position) in controllers.into_iter().zip(positions) {
            spawn_order.push(arena.spawn_champion(position, controller, &mut rng)?);
        }

        info!(
            arena = arena.name(),
            seed,
            champions = spawn_order.len(),
            menhir = %menhir,
            "match started"
        );

        Ok(Self {
            seed,
            rng,
            config,
            arena,
            champions: spawn_order.clone(),
            spawn_order,
            action_queue: VecDeque::new(),
            episode: 0,
            deaths: Vec::new(),
            finished: false,
            state: CycleState::ActionsDone,
            cycles: 0,
        })
    }

    /// Runs one scheduler step. Does nothing once the match is finished.
    pub fn cycle(&mut self) {
        if self.finished {
            return;
        }
        match self.state {
            CycleState::ActionsDone => {
                self.arena.trigger_instants();
                self.state = CycleState::InstantsTriggered;
            }
            CycleState::InstantsTriggered => {
                match self.action_queue.pop_front() {
                    Some(id) => self.champion_action(id),
                    None => self.environment_action(),
                }
                self.state = CycleState::ActionsDone;
            }
        }
        self.cycles += 1;
    }

    /// Cycles until the match finishes or `max_cycles` steps have run.
    pub fn advance(&mut self, max_cycles: u32) -> AdvanceResult {
        let mut cycles = 0;
        while cycles < max_cycles {
            if self.finished {
                return AdvanceResult { simulated_cycles: cycles, stop_reason: AdvanceStopReason::Finished };
            }
            self.cycle();
            cycles += 1;
        }
        let stop_reason =
            if self.finished { AdvanceStopReason::Finished } else { AdvanceStopReason::BudgetExhausted };
        AdvanceResult { simulated_cycles: cycles, stop_reason }
    }

    fn champion_action(&mut self, id: ChampionId) {
        let alive = self.alive_count();
        self.arena.act(id, alive, self.config.decision_budget);
    }

    fn environment_action(&mut self) {
        let (alive, dead): (Vec<ChampionId>, Vec<ChampionId>) = self
            .champions
            .iter()
            .copied()
            .partition(|id| self.arena.champion(*id).is_some_and(|champion| champion.alive()));
        for id in dead {
            self.record_death(id);
        }
        self.champions = alive;

        if self.champions.len() <= 1 {
            for id in mem::take(&mut self.champions) {
                self.record_death(id);
            }
            self.finished = true;
            info!(episodes = self.episode, cycles = self.cycles, "match finished");
            return;
        }

        let mut queue = self.champions.clone();
        shuffle(&mut self.rng, &mut queue);
        self.action_queue = queue.into();
        self.episode += 1;

        if self.config.mist_tth > 0 && self.episode % self.config.mist_tth == 0 {
            self.arena.increase_mist();
            debug!(episode = self.episode, radius = self.arena.mist_radius(), "mist advanced");
        }
    }

    fn record_death(&mut self, id: ChampionId) {
        let controller_name =
            self.arena.champion(id).map(|champion| champion.controller_name().to_string()).unwrap_or_default();
        self.deaths.push(ChampionDeath { champion: id, controller_name, episode: self.episode });
    }

    fn alive_count(&self) -> usize {
        self.champions
            .iter()
            .filter(|id| self.arena.champion(**id).is_some_and(|champion| champion.alive()))
            .count()
    }

    /// Hands the controllers back in spawn order, ready for another match.
    pub fn into_controllers(mut self) -> Vec<Box<dyn Controller>> {
        self.spawn_order
            .iter()
            .filter_map(|id| self.arena.remove_champion(*id))
            .map(|champion| champion.into_controller())
            .collect()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Champions still on the roster, in spawn order.
    pub fn champions(&self) -> &[ChampionId] {
        &self.champions
    }

    pub fn spawn_order(&self) -> &[ChampionId] {
        &self.spawn_order
    }

    pub fn action_queue(&self) -> impl Iterator<Item = ChampionId> + '_ {
        self.action_queue.iter().copied()
    }

    pub fn episode(&self) -> u64 {
        self.episode
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn deaths(&self) -> &[ChampionDeath] {
        &self.deaths
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }
}
