pub mod arena;
pub mod champion;
pub mod config;
pub mod controller;
pub mod effects;
pub mod error;
pub mod game;
pub mod knowledge;
pub mod ledger;
mod random;
pub mod terrain;
#[cfg(test)]
mod test_support;
pub mod tile;
pub mod types;
pub mod weapons;

pub use arena::{ARENA_EXTENSION, Arena};
pub use champion::{CHAMPION_STARTING_HP, Champion};
pub use config::{MIST_TTH, MatchConfig};
pub use controller::{Controller, ControllerError};
pub use effects::{CUT_DAMAGE, Effect, EffectLifetime, MIST_DAMAGE};
pub use error::{ArenaLoadError, GameError};
pub use game::{AdvanceResult, AdvanceStopReason, ChampionDeath, CycleState, Game, Placement};
pub use knowledge::{ArenaDescription, ChampionDescription, ChampionKnowledge, TileDescription};
pub use ledger::{LedgerEntry, LedgerError, LedgerWriter, LoadedLedger, MatchRecord, load_ledger};
pub use terrain::Terrain;
pub use tile::{Tile, TileKind};
pub use types::*;
pub use weapons::Weapon;
