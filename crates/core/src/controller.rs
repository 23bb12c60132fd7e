//! The plugin boundary between the engine and externally authored bots.

use thiserror::Error;

use crate::knowledge::{ArenaDescription, ChampionKnowledge};
use crate::types::{Action, Tabard};

#[derive(Debug, Error)]
#[error("{message}")]
pub struct ControllerError {
    message: String,
}

impl ControllerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// A decision-making unit bound to one champion per match.
///
/// The engine only ever calls these five operations. A failing or panicking
/// `decide` never aborts a match: the champion does nothing that turn.
pub trait Controller {
    /// Called once per match, after the menhir is placed and before any decision.
    fn reset(&mut self, arena: &ArenaDescription);

    fn decide(&mut self, knowledge: &ChampionKnowledge) -> Result<Action, ControllerError>;

    /// Final score of the match this controller just played.
    fn praise(&mut self, score: u32);

    fn name(&self) -> &str;

    fn preferred_tabard(&self) -> Tabard;
}
