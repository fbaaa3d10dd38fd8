// Game events: goals and single-sided substitutions.
//
// A substitution is stored as two events sharing a game-clock second, one carrying only
// player_in_id and one carrying only player_out_id.
//
// Ordering for display is by game seconds, then by wall-clock stamp.

use serde::{Deserialize, Serialize};

use crate::core::game::state::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Goal,
    Substitution,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEventKind {
    Goal {
        scorer_id: Option<String>,
        assist_id: Option<String>,
    },
    Substitution {
        player_in_id: Option<String>,
        player_out_id: Option<String>,
    },
}

impl GameEventKind {
    pub fn event_type(&self) -> EventType {
        match self {
            GameEventKind::Goal { .. } => EventType::Goal,
            GameEventKind::Substitution { .. } => EventType::Substitution,
        }
    }

    pub fn player_in(player_id: impl Into<String>) -> Self {
        GameEventKind::Substitution {
            player_in_id: Some(player_id.into()),
            player_out_id: None,
        }
    }

    pub fn player_out(player_id: impl Into<String>) -> Self {
        GameEventKind::Substitution {
            player_in_id: None,
            player_out_id: Some(player_id.into()),
        }
    }

    /// Every player id the event refers to.
    pub fn player_ids(&self) -> impl Iterator<Item = &str> {
        let (first, second) = match self {
            GameEventKind::Goal {
                scorer_id,
                assist_id,
            } => (scorer_id, assist_id),
            GameEventKind::Substitution {
                player_in_id,
                player_out_id,
            } => (player_in_id, player_out_id),
        };
        first.iter().chain(second.iter()).map(String::as_str)
    }

    /// Drop references to a player that left the roster.
    pub fn forget_player(&mut self, player_id: &str) {
        let (first, second) = match self {
            GameEventKind::Goal {
                scorer_id,
                assist_id,
            } => (scorer_id, assist_id),
            GameEventKind::Substitution {
                player_in_id,
                player_out_id,
            } => (player_in_id, player_out_id),
        };
        for slot in [first, second] {
            if slot.as_deref() == Some(player_id) {
                *slot = None;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub event_id: String,
    pub game_id: String,
    pub side: Side,
    pub kind: GameEventKind,
    /// Wall-clock instant the event was recorded, epoch milliseconds.
    pub recorded_at: i64,
    pub game_seconds: u32,
}

/// Event to append; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameEvent {
    pub game_id: String,
    pub side: Side,
    pub kind: GameEventKind,
    pub recorded_at: i64,
    pub game_seconds: u32,
}

impl NewGameEvent {
    pub fn into_event(self, event_id: impl Into<String>) -> GameEvent {
        GameEvent {
            event_id: event_id.into(),
            game_id: self.game_id,
            side: self.side,
            kind: self.kind,
            recorded_at: self.recorded_at,
            game_seconds: self.game_seconds,
        }
    }
}

impl GameEvent {
    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }
}

/// Events sorted for display: game seconds first, wall clock second.
pub fn in_display_order(events: &[GameEvent]) -> Vec<&GameEvent> {
    let mut ordered: Vec<&GameEvent> = events.iter().collect();
    ordered.sort_by_key(|event| (event.game_seconds, event.recorded_at));
    ordered
}
