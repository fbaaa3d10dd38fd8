// Named snapshots of the roster placement, reusable across games.

use serde::{Deserialize, Serialize};

use crate::core::game::lineup::Position;
use crate::core::roster::player::RosterLocation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupSlot {
    pub player_id: String,
    pub location: RosterLocation,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLineup {
    pub lineup_id: String,
    pub team_id: String,
    /// Unique per team.
    pub name: String,
    pub slots: Vec<LineupSlot>,
}

impl SavedLineup {
    /// Drop the slot of a player that left the roster.
    pub fn forget_player(&mut self, player_id: &str) {
        self.slots.retain(|slot| slot.player_id != player_id);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSavedLineup {
    pub team_id: String,
    pub name: String,
    pub slots: Vec<LineupSlot>,
}
