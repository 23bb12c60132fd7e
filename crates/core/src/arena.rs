//! Terrain ownership, menhir placement, mist progression and tile effects.
//! Champions live in the arena's slot map; tiles only hold their keys.

use std::f64::consts::SQRT_2;
use std::mem;

use rand_chacha::ChaCha8Rng;
use slotmap::SlotMap;
use tracing::info;

use crate::champion::Champion;
use crate::controller::Controller;
use crate::effects::{Effect, EffectLifetime};
use crate::error::GameError;
use crate::knowledge::ArenaDescription;
use crate::random::pick_index;
use crate::terrain::Terrain;
use crate::tile::{Tile, TileKind};
use crate::types::{ChampionId, Coords, Facing};

mod loader;
mod visibility;

pub use loader::ARENA_EXTENSION;

pub struct Arena {
    name: String,
    terrain: Terrain,
    menhir_position: Option<Coords>,
    mist_radius: i32,
    champions: SlotMap<ChampionId, Champion>,
    // Tiles that received an instant effect since the last trigger.
    instant_effects: Vec<Coords>,
}

impl Arena {
    pub fn new(name: impl Into<String>, terrain: Terrain) -> Self {
        let mist_radius = (terrain.width() as f64 * SQRT_2) as i32;
        Self {
            name: name.into(),
            terrain,
            menhir_position: None,
            mist_radius,
            champions: SlotMap::with_key(),
            instant_effects: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `(width, height)`, one past the largest coordinate present.
    pub fn size(&self) -> (usize, usize) {
        (self.terrain.width(), self.terrain.height())
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn menhir_position(&self) -> Option<Coords> {
        self.menhir_position
    }

    pub fn mist_radius(&self) -> i32 {
        self.mist_radius
    }

    pub fn champion(&self, id: ChampionId) -> Option<&Champion> {
        self.champions.get(id)
    }

    pub(crate) fn champion_mut(&mut self, id: ChampionId) -> Option<&mut Champion> {
        self.champions.get_mut(id)
    }

    pub(crate) fn remove_champion(&mut self, id: ChampionId) -> Option<Champion> {
        self.champions.remove(id)
    }

    pub fn champions(&self) -> impl Iterator<Item = (ChampionId, &Champion)> {
        self.champions.iter()
    }

    pub fn description(&self) -> ArenaDescription {
        ArenaDescription { name: self.name.clone(), menhir_position: self.menhir_position }
    }

    pub fn empty_coords(&self) -> Vec<Coords> {
        self.terrain.iter().filter(|(_, tile)| tile.empty()).map(|(coords, _)| coords).collect()
    }

    /// Places the menhir at `position`, or at a random empty tile. Any previous
    /// menhir tile turns back into land first. An explicit position must be
    /// unoccupied land (or the current menhir).
    pub fn spawn_menhir(
        &mut self,
        position: Option<Coords>,
        rng: &mut ChaCha8Rng,
    ) -> Result<Coords, GameError> {
        self.place_menhir(position, &[], rng)
    }

    /// Like `spawn_menhir`, but a random placement never picks a `reserved` cell.
    pub(crate) fn place_menhir(
        &mut self,
        position: Option<Coords>,
        reserved: &[Coords],
        rng: &mut ChaCha8Rng,
    ) -> Result<Coords, GameError> {
        if let Some(position) = position {
            let tile = self.terrain.tile(position).ok_or(GameError::OutOfBounds(position))?;
            let land = tile.kind == TileKind::Land || self.menhir_position == Some(position);
            if !land || tile.character.is_some() {
                return Err(GameError::TileNotEmpty(position));
            }
        }

        if let Some(previous) = self.menhir_position.take() {
            self.terrain.set_kind(previous, TileKind::Land);
        }

        let position = match position {
            Some(position) => position,
            None => {
                let free: Vec<Coords> =
                    self.empty_coords().into_iter().filter(|coords| !reserved.contains(coords)).collect();
                if free.is_empty() {
                    return Err(GameError::NotEnoughSpace { requested: 1, available: 0 });
                }
                free[pick_index(rng, free.len())]
            }
        };

        if let Some(tile) = self.terrain.tile_mut(position) {
            tile.kind = TileKind::Menhir;
            tile.loot = None;
        }
        self.menhir_position = Some(position);
        Ok(position)
    }

    pub fn spawn_champion(
        &mut self,
        coords: Coords,
        controller: Box<dyn Controller>,
        rng: &mut ChaCha8Rng,
    ) -> Result<ChampionId, GameError> {
        match self.terrain.tile(coords) {
            None => return Err(GameError::OutOfBounds(coords)),
            Some(tile) if !tile.empty() => return Err(GameError::TileNotEmpty(coords)),
            Some(_) => {}
        }

        let champion = Champion::new(coords, Facing::random(rng), controller);
        let id = self.champions.insert(champion);
        if let Some(tile) = self.terrain.tile_mut(coords) {
            tile.character = Some(id);
        }
        Ok(id)
    }

    /// Moves one tile along the facing when the destination is passable.
    /// Entering a tile that holds loot swaps it with the champion's weapon.
    pub fn step_forward(&mut self, id: ChampionId) {
        let Some(champion) = self.champions.get_mut(id) else {
            return;
        };
        let destination = champion.position + champion.facing.delta();
        if !self.terrain.tile(destination).is_some_and(Tile::passable) {
            return;
        }

        if let Some(tile) = self.terrain.tile_mut(champion.position) {
            tile.character = None;
        }
        champion.position = destination;
        if let Some(tile) = self.terrain.tile_mut(destination) {
            tile.character = Some(id);
            if let Some(loot) = tile.loot.take() {
                tile.loot = Some(mem::replace(&mut champion.weapon, loot));
            }
        }
    }

    /// Shrinks the safe zone by one ring around the menhir.
    pub fn increase_mist(&mut self) {
        self.mist_radius = (self.mist_radius - 1).max(0);
        let Some(menhir) = self.menhir_position else {
            return;
        };

        let ring: Vec<Coords> = self
            .terrain
            .iter()
            .filter(|(coords, _)| mist_distance(*coords, menhir) == self.mist_radius)
            .map(|(coords, _)| coords)
            .collect();
        for coords in ring {
            self.register_effect(Effect::Mist, coords);
        }
    }

    pub fn register_effect(&mut self, effect: Effect, coords: Coords) {
        let Some(tile) = self.terrain.tile_mut(coords) else {
            return;
        };
        tile.effects.insert(effect);
        if effect.lifetime() == EffectLifetime::Instant {
            self.instant_effects.push(coords);
        }
    }

    /// Applies every pending instant effect to its tile's occupant and purges it.
    pub fn trigger_instants(&mut self) {
        for coords in mem::take(&mut self.instant_effects) {
            let Some(tile) = self.terrain.tile_mut(coords) else {
                continue;
            };
            let instants: Vec<Effect> = tile
                .effects
                .iter()
                .copied()
                .filter(|effect| effect.lifetime() == EffectLifetime::Instant)
                .collect();
            tile.effects.retain(|effect| effect.lifetime() != EffectLifetime::Instant);
            let occupant = tile.character;

            if let Some(id) = occupant {
                for effect in instants {
                    self.damage(id, effect.instant_wounds());
                }
            }
        }
    }

    /// Applies the eternal effects of the champion's current tile, in priority order.
    pub fn stay(&mut self, id: ChampionId) {
        let Some(position) = self.champions.get(id).map(Champion::position) else {
            return;
        };
        let Some(tile) = self.terrain.tile(position) else {
            return;
        };
        let effects: Vec<Effect> = tile.effects.iter().copied().collect();
        for effect in effects {
            let wounds = effect.stay_wounds();
            if wounds > 0 {
                self.damage(id, wounds);
            }
        }
    }

    pub fn damage(&mut self, id: ChampionId, wounds: u32) {
        let Some(champion) = self.champions.get_mut(id) else {
            return;
        };
        if champion.damage(wounds) {
            self.die(id);
        }
    }

    fn die(&mut self, id: ChampionId) {
        let Some(champion) = self.champions.get(id) else {
            return;
        };
        info!(
            controller = %champion.controller_name(),
            position = %champion.position(),
            weapon = champion.weapon().name(),
            "champion died"
        );
        if let Some(tile) = self.terrain.tile_mut(champion.position()) {
            tile.character = None;
            tile.loot = Some(champion.weapon());
        }
    }
}

/// Euclidean distance truncated to an integer ring index.
fn mist_distance(a: Coords, b: Coords) -> i32 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    (dx * dx + dy * dy).sqrt() as i32
}

#[cfg(test)]
mod tests;
