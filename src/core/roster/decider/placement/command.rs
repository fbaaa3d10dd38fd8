// Command data types for planning placements on the roster, outside live games.

use crate::core::game::lineup::Position;
use crate::core::roster::player::RosterLocation;

#[derive(Debug, Clone, PartialEq)]
pub struct MoveRosterPlayer {
    pub player_id: String,
    pub to: RosterLocation,
    pub position: Option<Position>,
}

/// Exchange two players' placements. Applied as two independent updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRosterPlayers {
    pub first_player_id: String,
    pub second_player_id: String,
}
