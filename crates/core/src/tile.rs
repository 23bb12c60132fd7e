//! Cell terrain and occupancy.

use std::collections::BTreeSet;

use crate::effects::Effect;
use crate::types::ChampionId;
use crate::weapons::Weapon;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Land,
    Sea,
    Wall,
    Menhir,
}

impl TileKind {
    pub fn terrain_passable(self) -> bool {
        matches!(self, TileKind::Land)
    }

    pub fn terrain_transparent(self) -> bool {
        !matches!(self, TileKind::Wall)
    }

    pub fn from_symbol(symbol: char) -> Option<TileKind> {
        match symbol {
            '.' => Some(TileKind::Land),
            '=' => Some(TileKind::Sea),
            '#' => Some(TileKind::Wall),
            _ => None,
        }
    }

    /// Arena-file symbol. The menhir is never stored in arena files and renders as land.
    pub fn symbol(self) -> char {
        match self {
            TileKind::Land | TileKind::Menhir => '.',
            TileKind::Sea => '=',
            TileKind::Wall => '#',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TileKind::Land => "land",
            TileKind::Sea => "sea",
            TileKind::Wall => "wall",
            TileKind::Menhir => "menhir",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileKind,
    pub loot: Option<Weapon>,
    pub character: Option<ChampionId>,
    pub effects: BTreeSet<Effect>,
}

impl Tile {
    pub fn new(kind: TileKind) -> Self {
        Self { kind, loot: None, character: None, effects: BTreeSet::new() }
    }

    pub fn with_loot(kind: TileKind, loot: Weapon) -> Self {
        Self { loot: Some(loot), ..Self::new(kind) }
    }

    pub fn is_occupied(&self) -> bool {
        self.character.is_some()
    }

    pub fn passable(&self) -> bool {
        self.kind.terrain_passable() && !self.is_occupied()
    }

    pub fn transparent(&self) -> bool {
        self.kind.terrain_transparent() && !self.is_occupied()
    }

    pub fn empty(&self) -> bool {
        self.passable() && self.loot.is_none()
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    #[test]
    fn static_capabilities_match_terrain_table() {
        let table = [
            (TileKind::Land, true, true),
            (TileKind::Sea, false, true),
            (TileKind::Wall, false, false),
            (TileKind::Menhir, false, true),
        ];
        for (kind, passable, transparent) in table {
            assert_eq!(kind.terrain_passable(), passable, "{kind:?}");
            assert_eq!(kind.terrain_transparent(), transparent, "{kind:?}");
        }
    }

    #[test]
    fn occupant_blocks_passage_and_sight() {
        let mut ids: SlotMap<ChampionId, ()> = SlotMap::with_key();
        let mut tile = Tile::new(TileKind::Land);
        assert!(tile.passable() && tile.transparent() && tile.empty());

        tile.character = Some(ids.insert(()));
        assert!(!tile.passable());
        assert!(!tile.transparent());
        assert!(!tile.empty());
    }

    #[test]
    fn loot_makes_tile_non_empty_but_passable() {
        let tile = Tile::with_loot(TileKind::Land, Weapon::Sword);
        assert!(tile.passable());
        assert!(!tile.empty());
    }

    #[test]
    fn symbols_roundtrip_for_file_terrain() {
        for symbol in ['.', '=', '#'] {
            let kind = TileKind::from_symbol(symbol).expect("known symbol");
            assert_eq!(kind.symbol(), symbol);
        }
        assert_eq!(TileKind::from_symbol('K'), None);
        assert_eq!(TileKind::Menhir.symbol(), '.');
        assert_eq!(TileKind::Menhir.name(), "menhir");
    }
}
