use serde::{Deserialize, Serialize};

use crate::core::game::event::GameEvent;
use crate::core::game::lineup::LineupEntry;
use crate::core::game::state::Game;

/// A game with its lineup entries and event log, as held in the session mirror.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSheet {
    pub game: Game,
    pub lineup: Vec<LineupEntry>,
    pub events: Vec<GameEvent>,
}

impl GameSheet {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            lineup: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn game_id(&self) -> &str {
        &self.game.game_id
    }

    pub fn entry_for(&self, player_id: &str) -> Option<&LineupEntry> {
        self.lineup.iter().find(|entry| entry.player_id == player_id)
    }
}
