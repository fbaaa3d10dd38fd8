// Changes a decider asks the application to persist, and their persisted counterparts.
//
// Purpose
// - GameChange is the output of every game decider: an ordered list of writes.
// - AppliedChange is what the store returned for each write; evolve folds it into the sheet.
//
// Patches
// - A None field means "leave as is". Option<Option<T>> fields distinguish "leave" from "clear".
// - A lineup patch that folds playtime always nulls the start instant in the same patch, so the
//   fold and the null land in one row update.

use serde::{Deserialize, Serialize};

use crate::core::game::event::{GameEvent, NewGameEvent};
use crate::core::game::lineup::{LineupEntry, Location, NewLineupEntry, Position};
use crate::core::game::state::{Game, TimerStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GamePatch {
    pub timer_status: Option<TimerStatus>,
    pub timer_started_at: Option<Option<i64>>,
    pub elapsed_seconds: Option<f64>,
    pub is_finished: Option<bool>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
}

impl GamePatch {
    pub fn apply_to(&self, game: &mut Game) {
        if let Some(status) = self.timer_status {
            game.timer_status = status;
        }
        if let Some(started_at) = self.timer_started_at {
            game.timer_started_at = started_at;
        }
        if let Some(elapsed) = self.elapsed_seconds {
            game.elapsed_seconds = elapsed;
        }
        if let Some(finished) = self.is_finished {
            game.is_finished = finished;
        }
        if let Some(score) = self.home_score {
            game.home_score = score;
        }
        if let Some(score) = self.away_score {
            game.away_score = score;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupPatch {
    pub entry_id: String,
    pub location: Option<Location>,
    pub position: Option<Option<Position>>,
    pub initial_position: Option<Option<Position>>,
    pub playtime_seconds: Option<f64>,
    pub playtimer_started_at: Option<Option<i64>>,
    pub is_starter: Option<bool>,
    pub subbed_on_count: Option<u32>,
    pub subbed_off_count: Option<u32>,
}

impl LineupPatch {
    pub fn for_entry(entry_id: impl Into<String>) -> Self {
        Self {
            entry_id: entry_id.into(),
            location: None,
            position: None,
            initial_position: None,
            playtime_seconds: None,
            playtimer_started_at: None,
            is_starter: None,
            subbed_on_count: None,
            subbed_off_count: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.location.is_none()
            && self.position.is_none()
            && self.initial_position.is_none()
            && self.playtime_seconds.is_none()
            && self.playtimer_started_at.is_none()
            && self.is_starter.is_none()
            && self.subbed_on_count.is_none()
            && self.subbed_off_count.is_none()
    }

    pub fn apply_to(&self, entry: &mut LineupEntry) {
        if let Some(location) = self.location {
            entry.location = location;
        }
        if let Some(position) = self.position {
            entry.position = position;
        }
        if let Some(initial) = self.initial_position {
            entry.initial_position = initial;
        }
        if let Some(playtime) = self.playtime_seconds {
            entry.playtime_seconds = playtime;
        }
        if let Some(started_at) = self.playtimer_started_at {
            entry.playtimer_started_at = started_at;
        }
        // one-way flag
        if self.is_starter == Some(true) {
            entry.is_starter = true;
        }
        if let Some(count) = self.subbed_on_count {
            entry.subbed_on_count = count;
        }
        if let Some(count) = self.subbed_off_count {
            entry.subbed_off_count = count;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameChange {
    GameUpdated(GamePatch),
    LineupUpdated(Vec<LineupPatch>),
    LineupCleared,
    LineupCreated(Vec<NewLineupEntry>),
    EventAppended(NewGameEvent),
    EventRemoved { event_id: String },
    EventsCleared,
}

impl GameChange {
    pub fn label(&self) -> &'static str {
        match self {
            GameChange::GameUpdated(_) => "game update",
            GameChange::LineupUpdated(_) => "lineup update",
            GameChange::LineupCleared => "lineup clear",
            GameChange::LineupCreated(_) => "lineup creation",
            GameChange::EventAppended(_) => "event insert",
            GameChange::EventRemoved { .. } => "event delete",
            GameChange::EventsCleared => "event clear",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppliedChange {
    GameUpdated(GamePatch),
    LineupUpdated(Vec<LineupPatch>),
    LineupCleared,
    LineupCreated(Vec<LineupEntry>),
    EventAppended(GameEvent),
    EventRemoved { event_id: String },
    EventsCleared,
}

#[cfg(test)]
mod change_tests {
    use super::*;
    use crate::test_support::fixtures::games::{GameBuilder, LineupEntryBuilder};
    use rstest::rstest;

    #[rstest]
    fn it_should_leave_untouched_game_fields_alone() {
        let mut game = GameBuilder::new().elapsed(30.0).build();
        let patch = GamePatch {
            home_score: Some(2),
            ..GamePatch::default()
        };
        patch.apply_to(&mut game);
        assert_eq!(game.home_score, 2);
        assert_eq!(game.elapsed_seconds, 30.0);
    }

    #[rstest]
    fn it_should_clear_nullable_fields_when_asked() {
        let mut game = GameBuilder::new().running_since(1_000).build();
        let patch = GamePatch {
            timer_status: Some(TimerStatus::Stopped),
            timer_started_at: Some(None),
            ..GamePatch::default()
        };
        patch.apply_to(&mut game);
        assert_eq!(game.timer_started_at, None);
    }

    #[rstest]
    fn it_should_never_clear_the_starter_flag() {
        let mut entry = LineupEntryBuilder::new("p-1").starter().build();
        let mut patch = LineupPatch::for_entry(&entry.entry_id);
        patch.is_starter = Some(false);
        patch.apply_to(&mut entry);
        assert!(entry.is_starter);
    }

    #[rstest]
    fn it_should_report_empty_patches() {
        assert!(LineupPatch::for_entry("x").is_empty());
    }
}
