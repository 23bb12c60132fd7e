//! Arena text files: one character per cell, one line per row.

use std::fs;
use std::path::Path;

use super::*;
use crate::error::ArenaLoadError;
use crate::weapons::Weapon;

pub const ARENA_EXTENSION: &str = "arena";

impl Arena {
    /// Loads `<dir>/<name>.arena`.
    pub fn load(dir: &Path, name: &str) -> Result<Self, ArenaLoadError> {
        let path = dir.join(name).with_extension(ARENA_EXTENSION);
        Self::load_file(name, &path)
    }

    pub fn load_file(name: &str, path: &Path) -> Result<Self, ArenaLoadError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ArenaLoadError::Io { path: path.to_path_buf(), source })?;
        Self::parse(name, &text)
    }

    /// Parses arena text. `.` land, `=` sea, `#` wall; weapon letters are loot on land.
    pub fn parse(name: &str, text: &str) -> Result<Self, ArenaLoadError> {
        let mut rows = Vec::new();
        for (line_idx, line) in text.trim_end_matches(['\n', '\r']).lines().enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for (column_idx, symbol) in line.trim_end_matches('\r').chars().enumerate() {
                let tile = parse_symbol(symbol).ok_or_else(|| ArenaLoadError::UnknownSymbol {
                    arena: name.to_string(),
                    symbol,
                    line: line_idx + 1,
                    column: column_idx + 1,
                })?;
                row.push(Some(tile));
            }
            rows.push(row);
        }

        let terrain = Terrain::from_rows(rows);
        if terrain.iter().next().is_none() {
            return Err(ArenaLoadError::Empty { arena: name.to_string() });
        }
        Ok(Self::new(name, terrain))
    }

    /// Renders the current terrain and loot back into arena text. Absent cells
    /// at the end of a row are dropped; holes inside a row become land.
    pub fn to_text(&self) -> String {
        let (width, height) = self.size();
        let mut text = String::with_capacity((width + 1) * height);
        for y in 0..height as i32 {
            let mut line = String::with_capacity(width);
            for x in 0..width as i32 {
                let symbol = match self.terrain.tile(Coords::new(x, y)) {
                    Some(tile) => tile.loot.map_or(tile.kind.symbol(), Weapon::symbol),
                    None => ' ',
                };
                line.push(symbol);
            }
            let line = line.trim_end();
            text.push_str(&line.replace(' ', "."));
            text.push('\n');
        }
        text
    }
}

fn parse_symbol(symbol: char) -> Option<Tile> {
    if let Some(kind) = TileKind::from_symbol(symbol) {
        return Some(Tile::new(kind));
    }
    Weapon::from_symbol(symbol).map(|weapon| Tile::with_loot(TileKind::Land, weapon))
}
