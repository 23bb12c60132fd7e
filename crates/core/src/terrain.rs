//! Dense row-major tile grid owned by an arena.

use crate::tile::{Tile, TileKind};
use crate::types::Coords;

/// Cells missing from a ragged arena file are stored as `None` and behave as if
/// they were outside the terrain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Terrain {
    width: usize,
    height: usize,
    tiles: Vec<Option<Tile>>,
}

impl Terrain {
    /// A fully populated `width` x `height` grid of `kind`.
    pub fn filled(width: usize, height: usize, kind: TileKind) -> Self {
        Self { width, height, tiles: vec![Some(Tile::new(kind)); width * height] }
    }

    /// Builds terrain from rows of optional cells. Size comes from the longest row.
    pub fn from_rows(rows: Vec<Vec<Option<Tile>>>) -> Self {
        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut tiles = Vec::with_capacity(width * height);
        for mut row in rows {
            row.resize(width, None);
            tiles.extend(row);
        }
        Self { width, height, tiles }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, coords: Coords) -> bool {
        coords.x >= 0
            && coords.y >= 0
            && (coords.x as usize) < self.width
            && (coords.y as usize) < self.height
    }

    pub fn contains(&self, coords: Coords) -> bool {
        self.tile(coords).is_some()
    }

    pub fn tile(&self, coords: Coords) -> Option<&Tile> {
        let idx = self.index(coords)?;
        self.tiles[idx].as_ref()
    }

    pub fn tile_mut(&mut self, coords: Coords) -> Option<&mut Tile> {
        let idx = self.index(coords)?;
        self.tiles[idx].as_mut()
    }

    /// Replaces the terrain kind of an existing cell, keeping its occupancy.
    pub fn set_kind(&mut self, coords: Coords, kind: TileKind) {
        if let Some(tile) = self.tile_mut(coords) {
            tile.kind = kind;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coords, &Tile)> {
        let width = self.width;
        self.tiles.iter().enumerate().filter_map(move |(idx, tile)| {
            tile.as_ref().map(|tile| (Coords::new((idx % width) as i32, (idx / width) as i32), tile))
        })
    }

    fn index(&self, coords: Coords) -> Option<usize> {
        if !self.in_bounds(coords) {
            return None;
        }
        Some((coords.y as usize) * self.width + (coords.x as usize))
    }
}
