// Pure decision function for pausing the game clock.
//
// Responsibilities
// - Reject a clock that is not running.
// - Fold the running interval into the game's elapsed seconds and null the start instant.
// - Fold every running personal playtimer, wherever the player currently stands.

use crate::core::game::change::{GameChange, GamePatch, LineupPatch};
use crate::core::game::decider::DecideError;
use crate::core::game::decider::stop_timer::command::StopGameTimer;
use crate::core::game::playtime::fold_and_stop;
use crate::core::game::sheet::GameSheet;
use crate::core::game::state::{TimerStatus, seconds_between};

pub fn decide_stop_timer(
    sheet: &GameSheet,
    command: &StopGameTimer,
) -> Result<Vec<GameChange>, DecideError> {
    let game = &sheet.game;
    let started_at = match (game.timer_status, game.timer_started_at) {
        (TimerStatus::Running, Some(started_at)) => started_at,
        _ => return Err(DecideError::TimerNotRunning),
    };

    let mut changes = vec![GameChange::GameUpdated(GamePatch {
        timer_status: Some(TimerStatus::Stopped),
        timer_started_at: Some(None),
        elapsed_seconds: Some(game.elapsed_seconds + seconds_between(started_at, command.at)),
        ..GamePatch::default()
    })];

    let folds: Vec<LineupPatch> = sheet
        .lineup
        .iter()
        .filter_map(|entry| fold_and_stop(entry, command.at))
        .collect();
    if !folds.is_empty() {
        changes.push(GameChange::LineupUpdated(folds));
    }
    Ok(changes)
}
