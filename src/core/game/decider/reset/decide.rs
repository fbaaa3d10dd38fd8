// Pure decision function for wiping a game back to its scheduled state.
//
// Responsibilities
// - Refuse without explicit confirmation, whatever the phase.
// - Replace the lineup with one bench entry per current roster player.
// - Zero the score, the clock and the finished flag, and clear the event log.

use crate::core::game::change::{GameChange, GamePatch};
use crate::core::game::decider::DecideError;
use crate::core::game::decider::reset::command::ResetGameLineup;
use crate::core::game::lineup::NewLineupEntry;
use crate::core::game::sheet::GameSheet;
use crate::core::game::state::TimerStatus;

pub fn decide_reset(
    sheet: &GameSheet,
    command: &ResetGameLineup,
) -> Result<Vec<GameChange>, DecideError> {
    if !command.confirmed {
        return Err(DecideError::ConfirmationRequired);
    }
    let game_id = sheet.game_id().to_string();
    let fresh_entries = command
        .roster_player_ids
        .iter()
        .map(|player_id| NewLineupEntry {
            game_id: game_id.clone(),
            player_id: player_id.clone(),
        })
        .collect();

    Ok(vec![
        GameChange::LineupCleared,
        GameChange::LineupCreated(fresh_entries),
        GameChange::GameUpdated(GamePatch {
            timer_status: Some(TimerStatus::Stopped),
            timer_started_at: Some(None),
            elapsed_seconds: Some(0.0),
            is_finished: Some(false),
            home_score: Some(0),
            away_score: Some(0),
        }),
        GameChange::EventsCleared,
    ])
}

#[cfg(test)]
mod reset_decide_tests {
    use super::*;
    use crate::core::game::lineup::Location;
    use crate::core::game::state::{GamePhase, Side};
    use crate::test_support::fixtures::events::goal;
    use crate::test_support::fixtures::games::{GameBuilder, LineupEntryBuilder, apply_all, sheet};
    use rstest::rstest;

    fn played_sheet() -> GameSheet {
        let mut played = sheet(
            GameBuilder::new().elapsed(1_500.0).score(2, 0).finished().build(),
            vec![
                LineupEntryBuilder::new("p-1").on_field(10.0, 10.0).starter().playtime(1_500.0).build(),
                LineupEntryBuilder::new("p-2").starter().build(),
                LineupEntryBuilder::new("p-3").inactive().build(),
            ],
        );
        played.events = vec![
            goal("e-1", Side::Home, 300, 1_000),
            goal("e-2", Side::Home, 900, 2_000),
        ];
        played
    }

    fn reset(confirmed: bool) -> ResetGameLineup {
        ResetGameLineup {
            game_id: "game-1".into(),
            roster_player_ids: vec!["p-1".into(), "p-2".into(), "p-3".into()],
            confirmed,
        }
    }

    #[rstest]
    fn it_should_restore_a_scheduled_game_with_bench_defaults() {
        let played = played_sheet();
        let next = apply_all(played.clone(), decide_reset(&played, &reset(true)).unwrap());
        assert_eq!(next.game.phase(), GamePhase::NotStarted);
        assert_eq!((next.game.home_score, next.game.away_score), (0, 0));
        assert_eq!(next.game.elapsed_seconds, 0.0);
        assert!(next.events.is_empty());
        assert_eq!(next.lineup.len(), 3);
        assert!(next.lineup.iter().all(|entry| {
            entry.location == Location::Bench
                && !entry.is_starter
                && entry.playtime_seconds == 0.0
                && entry.position.is_none()
        }));
    }

    #[rstest]
    #[case(GameBuilder::new().build())]
    #[case(GameBuilder::new().running_since(1_000).build())]
    #[case(GameBuilder::new().elapsed(100.0).finished().build())]
    fn it_should_always_require_confirmation(#[case] game: crate::core::game::state::Game) {
        let target = sheet(game, vec![]);
        assert_eq!(
            decide_reset(&target, &reset(false)),
            Err(DecideError::ConfirmationRequired)
        );
    }
}
