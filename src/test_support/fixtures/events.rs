use crate::core::game::event::{GameEvent, GameEventKind};
use crate::core::game::state::Side;
use crate::test_support::fixtures::games::GAME_ID;

/// Unattributed goal.
pub fn goal(event_id: &str, side: Side, game_seconds: u32, recorded_at: i64) -> GameEvent {
    GameEvent {
        event_id: event_id.to_string(),
        game_id: GAME_ID.to_string(),
        side,
        kind: GameEventKind::Goal {
            scorer_id: None,
            assist_id: None,
        },
        recorded_at,
        game_seconds,
    }
}

/// Home goal by one of our players; recorded in game-clock order.
pub fn assisted_goal(event_id: &str, scorer: &str, assist: Option<&str>, game_seconds: u32) -> GameEvent {
    GameEvent {
        kind: GameEventKind::Goal {
            scorer_id: Some(scorer.to_string()),
            assist_id: assist.map(String::from),
        },
        ..goal(event_id, Side::Home, game_seconds, i64::from(game_seconds) * 1_000)
    }
}
