// Pure decision function for sealing a game.
//
// Responsibilities
// - When the clock runs, fold it and every running playtimer exactly like a stop.
// - Otherwise null any dangling playtimer without folding it.
// - Always end stopped, with the finished flag set. Finishing twice is harmless.

use crate::core::game::change::{GameChange, GamePatch, LineupPatch};
use crate::core::game::decider::DecideError;
use crate::core::game::decider::finish::command::FinishGame;
use crate::core::game::playtime::fold_and_stop;
use crate::core::game::sheet::GameSheet;
use crate::core::game::state::{TimerStatus, seconds_between};

pub fn decide_finish(
    sheet: &GameSheet,
    command: &FinishGame,
) -> Result<Vec<GameChange>, DecideError> {
    let game = &sheet.game;
    let running_since = match (game.timer_status, game.timer_started_at) {
        (TimerStatus::Running, Some(started_at)) => Some(started_at),
        _ => None,
    };

    let elapsed = match running_since {
        Some(started_at) => game.elapsed_seconds + seconds_between(started_at, command.at),
        None => game.elapsed_seconds,
    };

    let patches: Vec<LineupPatch> = sheet
        .lineup
        .iter()
        .filter(|entry| entry.is_clocked())
        .filter_map(|entry| match running_since {
            Some(_) => fold_and_stop(entry, command.at),
            None => {
                let mut patch = LineupPatch::for_entry(&entry.entry_id);
                patch.playtimer_started_at = Some(None);
                Some(patch)
            }
        })
        .collect();

    // Lineup first, then the game. If the game write fails the clock keeps running with the
    // playtimers already stopped; finishing again still folds the clock from its start.
    let mut changes = Vec::with_capacity(2);
    if !patches.is_empty() {
        changes.push(GameChange::LineupUpdated(patches));
    }
    changes.push(GameChange::GameUpdated(GamePatch {
        timer_status: Some(TimerStatus::Stopped),
        timer_started_at: Some(None),
        elapsed_seconds: Some(elapsed),
        is_finished: Some(true),
        ..GamePatch::default()
    }));
    Ok(changes)
}
