// Names are required and trimmed; a blank jersey number is no jersey number.

use crate::core::roster::decider::player::command::{AddPlayer, UpdatePlayer};
use crate::core::roster::decider::{RosterDecideError, trimmed};
use crate::core::roster::player::{NewPlayer, PlayerDetails};

fn normalise(details: &PlayerDetails) -> Result<PlayerDetails, RosterDecideError> {
    let (Some(first_name), Some(last_name)) =
        (trimmed(&details.first_name), trimmed(&details.last_name))
    else {
        return Err(RosterDecideError::MissingName);
    };
    Ok(PlayerDetails {
        first_name,
        last_name,
        jersey_number: details.jersey_number.as_deref().and_then(trimmed),
    })
}

pub fn decide_add_player(command: &AddPlayer) -> Result<NewPlayer, RosterDecideError> {
    Ok(NewPlayer {
        team_id: command.team_id.clone(),
        details: normalise(&command.details)?,
    })
}

pub fn decide_update_player(command: &UpdatePlayer) -> Result<PlayerDetails, RosterDecideError> {
    normalise(&command.details)
}
