//! Champions and the dispatch of their chosen actions.
//! This module owns the controller-call boundary: whatever a controller does,
//! the match keeps running.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::arena::Arena;
use crate::controller::Controller;
use crate::knowledge::{ChampionDescription, ChampionKnowledge, TileDescription};
use crate::types::{Action, ChampionId, Coords, Facing, Tabard};
use crate::weapons::Weapon;

pub const CHAMPION_STARTING_HP: u32 = 8;

pub struct Champion {
    pub(crate) position: Coords,
    pub(crate) facing: Facing,
    pub(crate) weapon: Weapon,
    health: u32,
    tabard: Tabard,
    controller_name: String,
    controller: Box<dyn Controller>,
}

impl Champion {
    pub(crate) fn new(position: Coords, facing: Facing, controller: Box<dyn Controller>) -> Self {
        Self {
            position,
            facing,
            weapon: Weapon::Knife,
            health: CHAMPION_STARTING_HP,
            tabard: controller.preferred_tabard(),
            controller_name: controller.name().to_string(),
            controller,
        }
    }

    pub fn position(&self) -> Coords {
        self.position
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn weapon(&self) -> Weapon {
        self.weapon
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn alive(&self) -> bool {
        self.health > 0
    }

    pub fn tabard(&self) -> Tabard {
        self.tabard
    }

    pub fn controller_name(&self) -> &str {
        &self.controller_name
    }

    pub fn description(&self) -> ChampionDescription {
        ChampionDescription {
            controller_name: self.controller_name.clone(),
            health: self.health,
            weapon: self.weapon,
            facing: self.facing,
        }
    }

    pub(crate) fn controller_mut(&mut self) -> &mut dyn Controller {
        self.controller.as_mut()
    }

    pub(crate) fn into_controller(self) -> Box<dyn Controller> {
        self.controller
    }

    /// Returns `true` only for the hit that takes health to zero.
    pub(crate) fn damage(&mut self, wounds: u32) -> bool {
        if !self.alive() {
            return false;
        }
        self.health = self.health.saturating_sub(wounds);
        !self.alive()
    }
}

impl fmt::Debug for Champion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Champion")
            .field("controller", &self.controller_name)
            .field("position", &self.position)
            .field("facing", &self.facing)
            .field("weapon", &self.weapon)
            .field("health", &self.health)
            .field("tabard", &self.tabard)
            .finish()
    }
}

impl Arena {
    /// One turn for a living champion: decide, perform, then suffer the tile.
    pub fn act(&mut self, id: ChampionId, alive: usize, budget: Option<Duration>) {
        if !self.champion(id).is_some_and(Champion::alive) {
            return;
        }
        let action = self.pick_action(id, alive, budget);
        if let Some(champion) = self.champion(id) {
            debug!(controller = %champion.controller_name(), ?action, "champion acts");
        }
        self.perform(id, action);
        self.stay(id);
    }

    /// Asks the controller for a decision. Errors, panics and budget overruns
    /// all become `DoNothing`.
    pub fn pick_action(&mut self, id: ChampionId, alive: usize, budget: Option<Duration>) -> Action {
        let Some(knowledge) = self.knowledge(id, alive) else {
            return Action::DoNothing;
        };
        let Some(champion) = self.champion_mut(id) else {
            return Action::DoNothing;
        };

        let started = Instant::now();
        let controller = champion.controller_mut();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| controller.decide(&knowledge)));
        let elapsed = started.elapsed();
        let name = champion.controller_name();

        match outcome {
            Ok(Ok(action)) => match budget {
                Some(budget) if elapsed > budget => {
                    warn!(
                        controller = %name,
                        elapsed_ms = elapsed.as_millis() as u64,
                        budget_ms = budget.as_millis() as u64,
                        "controller exceeded its decision budget"
                    );
                    Action::DoNothing
                }
                _ => action,
            },
            Ok(Err(error)) => {
                warn!(controller = %name, %error, "controller failed to decide");
                Action::DoNothing
            }
            Err(_) => {
                warn!(controller = %name, "controller panicked while deciding");
                Action::DoNothing
            }
        }
    }

    pub fn perform(&mut self, id: ChampionId, action: Action) {
        match action {
            Action::TurnLeft => {
                if let Some(champion) = self.champion_mut(id) {
                    champion.facing = champion.facing.turn_left();
                }
            }
            Action::TurnRight => {
                if let Some(champion) = self.champion_mut(id) {
                    champion.facing = champion.facing.turn_right();
                }
            }
            Action::StepForward => self.step_forward(id),
            Action::Attack => self.attack(id),
            Action::DoNothing => {}
        }
    }

    /// Registers a cut on every occupied cell the weapon reaches.
    pub fn attack(&mut self, id: ChampionId) {
        let Some(champion) = self.champion_mut(id) else {
            return;
        };
        let (position, facing) = (champion.position, champion.facing);
        let weapon = champion.weapon;
        if !champion.weapon.prepare_strike() {
            return;
        }

        let targets: Vec<_> = weapon
            .cut_positions(self.terrain(), position, facing)
            .into_iter()
            .filter(|coords| self.terrain().tile(*coords).is_some_and(|tile| tile.is_occupied()))
            .collect();
        for coords in targets {
            self.register_effect(weapon.cut_effect(), coords);
        }
    }

    pub fn tile_description(&self, coords: Coords) -> Option<TileDescription> {
        let tile = self.terrain().tile(coords)?;
        Some(TileDescription {
            kind: tile.kind,
            loot: tile.loot,
            character: tile.character.and_then(|id| self.champion(id)).map(Champion::description),
            effects: tile.effects.iter().copied().collect(),
        })
    }

    pub fn knowledge(&self, id: ChampionId, alive: usize) -> Option<ChampionKnowledge> {
        let champion = self.champion(id)?;
        let visible_tiles = self
            .visible_coords(id)
            .into_iter()
            .filter_map(|coords| self.tile_description(coords).map(|tile| (coords, tile)))
            .collect();
        Some(ChampionKnowledge {
            position: champion.position,
            no_of_champions_alive: alive,
            visible_tiles,
        })
    }
}
