use crate::core::roster::player::PlayerDetails;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddPlayer {
    pub team_id: String,
    pub details: PlayerDetails,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlayer {
    pub player_id: String,
    pub details: PlayerDetails,
}
