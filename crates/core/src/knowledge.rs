//! Immutable snapshots handed to controllers.
//! Nothing here borrows engine state, so controllers can keep what they receive.

use std::collections::BTreeMap;

use crate::effects::Effect;
use crate::tile::TileKind;
use crate::types::{Coords, Facing};
use crate::weapons::Weapon;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaDescription {
    pub name: String,
    pub menhir_position: Option<Coords>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChampionDescription {
    pub controller_name: String,
    pub health: u32,
    pub weapon: Weapon,
    pub facing: Facing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileDescription {
    pub kind: TileKind,
    pub loot: Option<Weapon>,
    pub character: Option<ChampionDescription>,
    /// In application order.
    pub effects: Vec<Effect>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChampionKnowledge {
    pub position: Coords,
    pub no_of_champions_alive: usize,
    pub visible_tiles: BTreeMap<Coords, TileDescription>,
}
