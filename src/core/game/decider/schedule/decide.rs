// Pure decision functions for scheduling.
//
// Responsibilities
// - Require a non-blank opponent.
// - Normalise free text: trim names, turn blank season or competition labels into None.

use crate::core::game::decider::DecideError;
use crate::core::game::decider::schedule::command::{ScheduleGame, UpdateGameDetails};
use crate::core::game::state::{GameDetails, NewGame};

fn label(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(String::from)
}

fn normalise(details: &GameDetails) -> Result<GameDetails, DecideError> {
    let opponent = details.opponent.trim();
    if opponent.is_empty() {
        return Err(DecideError::EmptyOpponent);
    }
    Ok(GameDetails {
        opponent: opponent.to_string(),
        game_date: details.game_date,
        game_time: details.game_time,
        venue: details.venue,
        season: label(&details.season),
        competition: label(&details.competition),
    })
}

pub fn decide_schedule(command: &ScheduleGame) -> Result<NewGame, DecideError> {
    Ok(NewGame {
        team_id: command.team_id.clone(),
        details: normalise(&command.details)?,
    })
}

pub fn decide_update_details(command: &UpdateGameDetails) -> Result<GameDetails, DecideError> {
    normalise(&command.details)
}
