use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Coords;

/// Arena files are a hard precondition of a match; any of these aborts construction.
#[derive(Debug, Error)]
pub enum ArenaLoadError {
    #[error("failed to read arena file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("arena '{arena}' has unknown symbol {symbol:?} at line {line}, column {column}")]
    UnknownSymbol { arena: String, symbol: char, line: usize, column: usize },
    #[error("arena '{arena}' contains no tiles")]
    Empty { arena: String },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("match is not finished yet")]
    NotFinished,
    #[error("arena has {available} empty tiles but {requested} are needed")]
    NotEnoughSpace { requested: usize, available: usize },
    #[error("{0} is outside the arena")]
    OutOfBounds(Coords),
    #[error("{0} is not an empty tile")]
    TileNotEmpty(Coords),
    #[error(transparent)]
    Arena(#[from] ArenaLoadError),
}
