//! Stable snapshot hashing for deterministic verification.
//! Champions are hashed in spawn order and tiles in row-major order, so two
//! matches built from the same seed, arena and controllers hash identically.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;
use crate::weapons::Weapon;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.cycles);
        hasher.write_u64(self.episode);
        hasher.write_u8(match self.state {
            CycleState::ActionsDone => 0,
            CycleState::InstantsTriggered => 1,
        });
        hasher.write_u8(u8::from(self.finished));
        hasher.write_i32(self.arena.mist_radius());
        if let Some(menhir) = self.arena.menhir_position() {
            hasher.write_i32(menhir.x);
            hasher.write_i32(menhir.y);
        }

        for id in &self.spawn_order {
            let Some(champion) = self.arena.champion(*id) else {
                continue;
            };
            hasher.write_i32(champion.position().x);
            hasher.write_i32(champion.position().y);
            hasher.write_u8(champion.facing() as u8);
            write_weapon(&mut hasher, champion.weapon());
            hasher.write_u32(champion.health());
        }

        for id in &self.action_queue {
            if let Some(slot) = self.spawn_order.iter().position(|spawned| spawned == id) {
                hasher.write_usize(slot);
            }
        }
        hasher.write_usize(self.deaths.len());

        for (coords, tile) in self.arena.terrain().iter() {
            if tile.loot.is_none() && tile.effects.is_empty() {
                continue;
            }
            hasher.write_i32(coords.x);
            hasher.write_i32(coords.y);
            if let Some(loot) = tile.loot {
                write_weapon(&mut hasher, loot);
            }
            for effect in &tile.effects {
                hasher.write_u8(effect.priority());
            }
        }
        hasher.finish()
    }
}

fn write_weapon(hasher: &mut Xxh3, weapon: Weapon) {
    hasher.write_u32(u32::from(weapon.symbol()));
    hasher.write_u8(u8::from(matches!(weapon, Weapon::Bow { loaded: true })));
}
