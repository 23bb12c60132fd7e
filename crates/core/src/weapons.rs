//! Weapon classes and the cells each one threatens with a single attack.

use std::collections::BTreeSet;

use crate::effects::Effect;
use crate::terrain::Terrain;
use crate::types::{Coords, Facing};

const KNIFE_REACH: i32 = 1;
const SWORD_REACH: i32 = 3;
const BOW_REACH: i32 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Weapon {
    Knife,
    Sword,
    Bow { loaded: bool },
    Axe,
    Amulet,
}

impl Weapon {
    /// Bows are picked up and spawned unloaded.
    pub const fn bow() -> Weapon {
        Weapon::Bow { loaded: false }
    }

    pub fn from_symbol(symbol: char) -> Option<Weapon> {
        match symbol {
            'K' => Some(Weapon::Knife),
            'S' => Some(Weapon::Sword),
            'A' => Some(Weapon::Axe),
            'B' => Some(Weapon::bow()),
            'M' => Some(Weapon::Amulet),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Weapon::Knife => 'K',
            Weapon::Sword => 'S',
            Weapon::Axe => 'A',
            Weapon::Bow { .. } => 'B',
            Weapon::Amulet => 'M',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Weapon::Knife => "knife",
            Weapon::Sword => "sword",
            Weapon::Bow { loaded: false } => "bow_unloaded",
            Weapon::Bow { loaded: true } => "bow_loaded",
            Weapon::Axe => "axe",
            Weapon::Amulet => "amulet",
        }
    }

    /// Reach along the facing for line weapons; `None` for area weapons.
    pub fn reach(self) -> Option<i32> {
        match self {
            Weapon::Knife => Some(KNIFE_REACH),
            Weapon::Sword => Some(SWORD_REACH),
            Weapon::Bow { .. } => Some(BOW_REACH),
            Weapon::Axe | Weapon::Amulet => None,
        }
    }

    pub fn cut_positions(self, terrain: &Terrain, origin: Coords, facing: Facing) -> BTreeSet<Coords> {
        match self {
            Weapon::Knife | Weapon::Sword | Weapon::Bow { .. } => {
                line_cut_positions(terrain, origin, facing, self.reach().unwrap_or(0))
            }
            Weapon::Axe => axe_cut_positions(terrain, origin, facing),
            Weapon::Amulet => amulet_cut_positions(terrain, origin),
        }
    }

    pub fn cut_effect(self) -> Effect {
        Effect::WeaponCut
    }

    /// Readies one attack. Returns whether the attack lands this turn; an
    /// unloaded bow spends the turn loading instead.
    pub fn prepare_strike(&mut self) -> bool {
        match self {
            Weapon::Bow { loaded } => {
                let fires = *loaded;
                *loaded = !fires;
                fires
            }
            _ => true,
        }
    }
}

fn line_cut_positions(
    terrain: &Terrain,
    origin: Coords,
    facing: Facing,
    reach: i32,
) -> BTreeSet<Coords> {
    let mut positions = BTreeSet::new();
    let mut current = origin;
    for _ in 0..reach {
        current = current + facing.delta();
        let Some(tile) = terrain.tile(current) else {
            break;
        };
        positions.insert(current);
        if !tile.kind.terrain_transparent() {
            break;
        }
    }
    positions
}

fn axe_cut_positions(terrain: &Terrain, origin: Coords, facing: Facing) -> BTreeSet<Coords> {
    let centre = origin + facing.delta();
    [centre + facing.turn_left().delta(), centre, centre + facing.turn_right().delta()]
        .into_iter()
        .filter(|coords| terrain.contains(*coords))
        .collect()
}

fn amulet_cut_positions(terrain: &Terrain, origin: Coords) -> BTreeSet<Coords> {
    let mut positions = BTreeSet::new();
    for radius in 1..=2 {
        for (dx, dy) in [(1, 1), (-1, 1), (1, -1), (-1, -1)] {
            let coords = origin + Coords::new(dx * radius, dy * radius);
            if terrain.contains(coords) {
                positions.insert(coords);
            }
        }
    }
    positions
}
