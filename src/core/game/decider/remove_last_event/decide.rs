// Pure decision function for the decrement action.
//
// Responsibilities
// - Find the most recently recorded event of the given side and type (wall clock first,
//   game-clock second as tie breaker).
// - Remove it, and for a goal lower that side's stored score by one, never below zero.
// - Nothing to remove is not an error; no changes are produced.

use crate::core::game::change::GameChange;
use crate::core::game::decider::add_event::decide::score_patch;
use crate::core::game::decider::remove_last_event::command::RemoveLastEvent;
use crate::core::game::decider::{DecideError, ensure_editable};
use crate::core::game::event::EventType;
use crate::core::game::sheet::GameSheet;

pub fn decide_remove_last_event(
    sheet: &GameSheet,
    command: &RemoveLastEvent,
) -> Result<Vec<GameChange>, DecideError> {
    let game = &sheet.game;
    ensure_editable(game, command.confirmed)?;

    let latest = sheet
        .events
        .iter()
        .filter(|event| event.side == command.side && event.event_type() == command.event_type)
        .max_by_key(|event| (event.recorded_at, event.game_seconds));
    let Some(latest) = latest else {
        return Ok(Vec::new());
    };

    let mut changes = vec![GameChange::EventRemoved {
        event_id: latest.event_id.clone(),
    }];
    if command.event_type == EventType::Goal {
        let lowered = game.score_of(command.side).saturating_sub(1);
        changes.push(GameChange::GameUpdated(score_patch(command.side, lowered)));
    }
    Ok(changes)
}

#[cfg(test)]
mod remove_last_event_decide_tests {
    use super::*;
    use crate::core::game::event::GameEventKind;
    use crate::core::game::state::Side;
    use crate::test_support::fixtures::events::goal;
    use crate::test_support::fixtures::games::{GameBuilder, apply_all, sheet};
    use rstest::{fixture, rstest};

    fn decrement(side: Side, event_type: EventType) -> RemoveLastEvent {
        RemoveLastEvent {
            game_id: "game-1".into(),
            side,
            event_type,
            confirmed: false,
        }
    }

    #[fixture]
    fn two_home_goals() -> GameSheet {
        let mut scored = sheet(GameBuilder::new().elapsed(2_000.0).score(2, 1).build(), vec![]);
        scored.events = vec![
            goal("early", Side::Home, 600, 10_000),
            goal("late", Side::Home, 1_800, 20_000),
            goal("theirs", Side::Away, 1_900, 30_000),
        ];
        scored
    }

    #[rstest]
    fn it_should_remove_the_latest_goal_of_the_side(two_home_goals: GameSheet) {
        let changes = decide_remove_last_event(&two_home_goals, &decrement(Side::Home, EventType::Goal)).unwrap();
        let next = apply_all(two_home_goals, changes);
        let remaining: Vec<&str> = next.events.iter().map(|event| event.event_id.as_str()).collect();
        assert_eq!(remaining, vec!["early", "theirs"]);
        assert_eq!((next.game.home_score, next.game.away_score), (1, 1));
    }

    #[rstest]
    fn it_should_succeed_without_changes_when_nothing_matches(two_home_goals: GameSheet) {
        let changes =
            decide_remove_last_event(&two_home_goals, &decrement(Side::Home, EventType::Substitution)).unwrap();
        assert!(changes.is_empty());
    }

    #[rstest]
    fn it_should_floor_the_score_at_zero() {
        let mut out_of_sync = sheet(GameBuilder::new().elapsed(10.0).build(), vec![]);
        out_of_sync.events = vec![goal("e-1", Side::Away, 5, 1_000)];
        let changes = decide_remove_last_event(&out_of_sync, &decrement(Side::Away, EventType::Goal)).unwrap();
        let next = apply_all(out_of_sync, changes);
        assert_eq!(next.game.away_score, 0);
        assert!(next.events.is_empty());
    }

    #[rstest]
    fn it_should_leave_the_score_alone_for_substitutions() {
        let mut subbed = sheet(GameBuilder::new().elapsed(10.0).score(1, 0).build(), vec![]);
        let mut event = goal("sub-1", Side::Home, 5, 1_000);
        event.kind = GameEventKind::player_out("p-1");
        subbed.events = vec![event];
        let changes = decide_remove_last_event(&subbed, &decrement(Side::Home, EventType::Substitution)).unwrap();
        assert_eq!(changes.len(), 1);
    }
}
