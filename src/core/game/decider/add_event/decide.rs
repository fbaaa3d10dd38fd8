// Pure decision function for appending an event.
//
// Responsibilities
// - Validate the event shape: an assist needs a scorer, nobody assists their own goal and a
//   substitution event carries exactly one of player_in or player_out.
// - Stamp the game-clock second, from the command or from the clock at `at`.
// - Keep the stored score in step: a goal bumps its side's score by exactly one.

use crate::core::game::change::{GameChange, GamePatch};
use crate::core::game::decider::add_event::command::RecordGameEvent;
use crate::core::game::decider::{DecideError, ensure_editable};
use crate::core::game::event::{GameEventKind, NewGameEvent};
use crate::core::game::sheet::GameSheet;
use crate::core::game::state::Side;

fn validate(kind: &GameEventKind) -> Result<(), DecideError> {
    match kind {
        GameEventKind::Goal {
            scorer_id: None,
            assist_id: Some(_),
        } => Err(DecideError::AssistWithoutScorer),
        GameEventKind::Goal {
            scorer_id: Some(scorer),
            assist_id: Some(assist),
        } if scorer == assist => Err(DecideError::SelfAssist),
        GameEventKind::Substitution {
            player_in_id,
            player_out_id,
        } if player_in_id.is_some() == player_out_id.is_some() => {
            Err(DecideError::InvalidSubstitution)
        }
        _ => Ok(()),
    }
}

pub fn decide_add_event(
    sheet: &GameSheet,
    command: &RecordGameEvent,
) -> Result<Vec<GameChange>, DecideError> {
    let game = &sheet.game;
    ensure_editable(game, command.confirmed)?;
    validate(&command.kind)?;

    let game_seconds = command
        .game_seconds
        .unwrap_or_else(|| game.clock_seconds(command.at).round() as u32);

    let mut changes = vec![GameChange::EventAppended(NewGameEvent {
        game_id: game.game_id.clone(),
        side: command.side,
        kind: command.kind.clone(),
        recorded_at: command.at,
        game_seconds,
    })];

    if matches!(command.kind, GameEventKind::Goal { .. }) {
        let next = game.score_of(command.side) + 1;
        changes.push(GameChange::GameUpdated(score_patch(command.side, next)));
    }
    Ok(changes)
}

pub(crate) fn score_patch(side: Side, score: u32) -> GamePatch {
    match side {
        Side::Home => GamePatch {
            home_score: Some(score),
            ..GamePatch::default()
        },
        Side::Away => GamePatch {
            away_score: Some(score),
            ..GamePatch::default()
        },
    }
}
