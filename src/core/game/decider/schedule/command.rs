// Command data types for putting a game on the schedule and editing its details.

use crate::core::game::state::GameDetails;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleGame {
    pub team_id: String,
    pub details: GameDetails,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateGameDetails {
    pub game_id: String,
    pub details: GameDetails,
}
