// Pure decision function for starting the game clock.
//
// Responsibilities
// - Reject finished games and a clock that already runs.
// - On the very first start, mark every field and bench player a starter and capture the
//   field players' initial positions.
// - Start the personal playtimer of every field player.

use crate::core::game::change::{GameChange, GamePatch, LineupPatch};
use crate::core::game::decider::DecideError;
use crate::core::game::decider::start_timer::command::StartGameTimer;
use crate::core::game::lineup::Location;
use crate::core::game::sheet::GameSheet;
use crate::core::game::state::TimerStatus;

pub fn decide_start_timer(
    sheet: &GameSheet,
    command: &StartGameTimer,
) -> Result<Vec<GameChange>, DecideError> {
    let game = &sheet.game;
    if game.is_finished {
        return Err(DecideError::GameFinished);
    }
    if game.is_running() {
        return Err(DecideError::TimerAlreadyRunning);
    }
    let first_start = game.is_fresh();

    let patches: Vec<LineupPatch> = sheet
        .lineup
        .iter()
        .filter_map(|entry| {
            let mut patch = LineupPatch::for_entry(&entry.entry_id);
            match entry.location {
                Location::Field => {
                    patch.playtimer_started_at = Some(Some(command.at));
                    if first_start {
                        patch.is_starter = Some(true);
                        patch.initial_position = Some(entry.position);
                    }
                }
                Location::Bench if first_start => patch.is_starter = Some(true),
                _ => {}
            }
            (!patch.is_empty()).then_some(patch)
        })
        .collect();

    let mut changes = vec![GameChange::GameUpdated(GamePatch {
        timer_status: Some(TimerStatus::Running),
        timer_started_at: Some(Some(command.at)),
        ..GamePatch::default()
    })];
    if !patches.is_empty() {
        changes.push(GameChange::LineupUpdated(patches));
    }
    Ok(changes)
}

#[cfg(test)]
mod start_timer_decide_tests {
    use super::*;
    use crate::core::game::change::AppliedChange;
    use crate::core::game::evolve::evolve;
    use crate::core::game::lineup::Position;
    use crate::test_support::fixtures::games::{GameBuilder, LineupEntryBuilder, apply_all, sheet};
    use rstest::{fixture, rstest};

    const T0: i64 = 1_700_000_000_000;

    #[fixture]
    fn fresh_sheet() -> GameSheet {
        sheet(
            GameBuilder::new().build(),
            vec![
                LineupEntryBuilder::new("keeper").on_field(50.0, 90.0).build(),
                LineupEntryBuilder::new("striker").on_field(50.0, 20.0).build(),
                LineupEntryBuilder::new("sub").build(),
                LineupEntryBuilder::new("injured").inactive().build(),
            ],
        )
    }

    fn command() -> StartGameTimer {
        StartGameTimer {
            game_id: "game-1".into(),
            at: T0,
        }
    }

    #[rstest]
    fn it_should_start_the_clock(fresh_sheet: GameSheet) {
        let changes = decide_start_timer(&fresh_sheet, &command()).unwrap();
        let next = apply_all(fresh_sheet, changes);
        assert_eq!(next.game.timer_status, TimerStatus::Running);
        assert_eq!(next.game.timer_started_at, Some(T0));
    }

    #[rstest]
    fn it_should_mark_field_and_bench_starters_on_first_start(fresh_sheet: GameSheet) {
        let next = apply_all(
            fresh_sheet.clone(),
            decide_start_timer(&fresh_sheet, &command()).unwrap(),
        );
        let starter = |id: &str| next.entry_for(id).unwrap().is_starter;
        assert!(starter("keeper"));
        assert!(starter("striker"));
        assert!(starter("sub"));
        assert!(!starter("injured"));
    }

    #[rstest]
    fn it_should_capture_initial_positions_for_field_starters_only(fresh_sheet: GameSheet) {
        let next = apply_all(
            fresh_sheet.clone(),
            decide_start_timer(&fresh_sheet, &command()).unwrap(),
        );
        assert_eq!(
            next.entry_for("keeper").unwrap().initial_position,
            Some(Position::new(50.0, 90.0))
        );
        assert_eq!(next.entry_for("sub").unwrap().initial_position, None);
    }

    #[rstest]
    fn it_should_start_playtimers_for_field_players_only(fresh_sheet: GameSheet) {
        let next = apply_all(
            fresh_sheet.clone(),
            decide_start_timer(&fresh_sheet, &command()).unwrap(),
        );
        assert_eq!(next.entry_for("striker").unwrap().playtimer_started_at, Some(T0));
        assert_eq!(next.entry_for("sub").unwrap().playtimer_started_at, None);
        assert_eq!(next.entry_for("injured").unwrap().playtimer_started_at, None);
    }

    #[rstest]
    fn it_should_not_touch_starters_when_resuming() {
        let paused = sheet(
            GameBuilder::new().elapsed(300.0).build(),
            vec![
                LineupEntryBuilder::new("late-arrival").on_field(10.0, 10.0).build(),
                LineupEntryBuilder::new("sub").build(),
            ],
        );
        let changes = decide_start_timer(&paused, &command()).unwrap();
        let next = apply_all(paused, changes);
        let entry = next.entry_for("late-arrival").unwrap();
        assert!(!entry.is_starter);
        assert_eq!(entry.initial_position, None);
        assert_eq!(entry.playtimer_started_at, Some(T0));
        assert!(!next.entry_for("sub").unwrap().is_starter);
    }

    #[rstest]
    fn it_should_reject_a_running_clock() {
        let running = sheet(GameBuilder::new().running_since(T0).build(), vec![]);
        assert_eq!(
            decide_start_timer(&running, &command()),
            Err(DecideError::TimerAlreadyRunning)
        );
    }

    #[rstest]
    fn it_should_reject_a_finished_game() {
        let finished = sheet(GameBuilder::new().elapsed(3_000.0).finished().build(), vec![]);
        assert_eq!(
            decide_start_timer(&finished, &command()),
            Err(DecideError::GameFinished)
        );
    }

    #[rstest]
    fn it_should_only_update_the_game_when_nobody_is_affected() {
        let paused = sheet(
            GameBuilder::new().elapsed(300.0).build(),
            vec![LineupEntryBuilder::new("sub").build()],
        );
        let changes = decide_start_timer(&paused, &command()).unwrap();
        assert_eq!(changes.len(), 1);
        let next = evolve(
            paused,
            match &changes[0] {
                GameChange::GameUpdated(patch) => AppliedChange::GameUpdated(patch.clone()),
                other => panic!("unexpected change: {other:?}"),
            },
        );
        assert!(next.game.is_running());
    }
}
