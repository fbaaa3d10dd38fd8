// Command data type for moving a player between field, bench and inactive during a game.
//
// Responsibilities
// - Carry where the UI believes the player is (`from`) so stale intents are rejected.
// - Carry the drop position when the target is the field.

use crate::core::game::lineup::{Location, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct MovePlayerInGame {
    pub game_id: String,
    pub player_id: String,
    pub from: Location,
    pub to: Location,
    pub position: Option<Position>,
    pub at: i64,
    /// Required once the game is finished.
    pub confirmed: bool,
}

/// Planned substitution: one field player off, one bench player on in their spot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutePlayers {
    pub game_id: String,
    pub player_out_id: String,
    pub player_in_id: String,
    pub at: i64,
    pub confirmed: bool,
}
