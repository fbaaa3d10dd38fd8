// Pure decision logic for roster, team profile and saved lineup commands.

use thiserror::Error;

use crate::core::roster::player::Player;

pub mod player {
    pub mod command;
    pub mod decide;
}
pub mod placement {
    pub mod command;
    pub mod decide;
}
pub mod saved_lineup {
    pub mod command;
    pub mod decide;
}
pub mod team_profile {
    pub mod command;
    pub mod decide;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RosterDecideError {
    #[error("first and last name are required")]
    MissingName,
    #[error("team name must not be empty")]
    EmptyTeamName,
    #[error("lineup name must not be empty")]
    EmptyLineupName,
    #[error("player {player_id} is not on the roster")]
    PlayerNotOnRoster { player_id: String },
    #[error("a player cannot be swapped with themselves")]
    SamePlayer,
}

pub(crate) fn roster_player<'a>(
    roster: &'a [Player],
    player_id: &str,
) -> Result<&'a Player, RosterDecideError> {
    roster
        .iter()
        .find(|player| player.player_id == player_id)
        .ok_or_else(|| RosterDecideError::PlayerNotOnRoster {
            player_id: player_id.to_string(),
        })
}

pub(crate) fn trimmed(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
