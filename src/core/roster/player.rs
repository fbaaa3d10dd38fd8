// Roster players and their planning placement.
//
// A roster placement is only a planning aid. Live games track placement on their own lineup
// entries, seeded from the roster when the game is scheduled or reset.

use serde::{Deserialize, Serialize};

use crate::core::game::lineup::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterLocation {
    Bench,
    Field,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: String,
    pub team_id: String,
    pub first_name: String,
    pub last_name: String,
    pub jersey_number: Option<String>,
    pub location: RosterLocation,
    /// Set only while the player is planned on the field.
    pub position: Option<Position>,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn placement(&self) -> PlayerPlacement {
        PlayerPlacement {
            player_id: self.player_id.clone(),
            location: self.location,
            position: self.position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDetails {
    pub first_name: String,
    pub last_name: String,
    pub jersey_number: Option<String>,
}

impl PlayerDetails {
    pub fn apply_to(&self, player: &mut Player) {
        player.first_name = self.first_name.clone();
        player.last_name = self.last_name.clone();
        player.jersey_number = self.jersey_number.clone();
    }
}

/// Row to insert for a new roster player. The store places them on the bench.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlayer {
    pub team_id: String,
    pub details: PlayerDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPlacement {
    pub player_id: String,
    pub location: RosterLocation,
    pub position: Option<Position>,
}

impl PlayerPlacement {
    pub fn apply_to(&self, player: &mut Player) {
        player.location = self.location;
        player.position = self.position;
    }
}
