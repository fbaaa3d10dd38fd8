// Builders for games, lineup entries and game sheets, plus a helper that plays decider output
// through evolve the way the store would accept it.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::core::game::change::{AppliedChange, GameChange};
use crate::core::game::evolve::evolve;
use crate::core::game::lineup::{LineupEntry, Location, NewLineupEntry, Position};
use crate::core::game::sheet::GameSheet;
use crate::core::game::state::{Game, Side, TimerStatus};

pub const GAME_ID: &str = "game-1";
pub const TEAM_ID: &str = "team-1";

pub struct GameBuilder {
    inner: Game,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl GameBuilder {
    pub fn new() -> Self {
        Self {
            inner: Game {
                game_id: GAME_ID.to_string(),
                team_id: TEAM_ID.to_string(),
                opponent: "Rovers".to_string(),
                game_date: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap_or_default(),
                game_time: NaiveTime::from_hms_opt(10, 30, 0),
                venue: Side::Home,
                season: None,
                competition: None,
                home_score: 0,
                away_score: 0,
                timer_status: TimerStatus::Stopped,
                timer_started_at: None,
                elapsed_seconds: 0.0,
                is_finished: false,
            },
        }
    }

    pub fn id(mut self, game_id: impl Into<String>) -> Self {
        self.inner.game_id = game_id.into();
        self
    }

    pub fn venue(mut self, venue: Side) -> Self {
        self.inner.venue = venue;
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.inner.game_date = date;
        self
    }

    pub fn season(mut self, season: impl Into<String>) -> Self {
        self.inner.season = Some(season.into());
        self
    }

    pub fn competition(mut self, competition: impl Into<String>) -> Self {
        self.inner.competition = Some(competition.into());
        self
    }

    pub fn score(mut self, home: u32, away: u32) -> Self {
        self.inner.home_score = home;
        self.inner.away_score = away;
        self
    }

    pub fn elapsed(mut self, seconds: f64) -> Self {
        self.inner.elapsed_seconds = seconds;
        self
    }

    pub fn running_since(mut self, at: i64) -> Self {
        self.inner.timer_status = TimerStatus::Running;
        self.inner.timer_started_at = Some(at);
        self
    }

    pub fn finished(mut self) -> Self {
        self.inner.is_finished = true;
        self.inner.timer_status = TimerStatus::Stopped;
        self.inner.timer_started_at = None;
        self
    }

    pub fn build(self) -> Game {
        self.inner
    }
}

pub struct LineupEntryBuilder {
    inner: LineupEntry,
}

#[allow(dead_code)]
impl LineupEntryBuilder {
    /// A bench entry of `player_id` in the default game.
    pub fn new(player_id: &str) -> Self {
        let new_entry = NewLineupEntry {
            game_id: GAME_ID.to_string(),
            player_id: player_id.to_string(),
        };
        Self {
            inner: new_entry.into_entry(format!("entry-{player_id}")),
        }
    }

    pub fn on_field(mut self, x: f64, y: f64) -> Self {
        self.inner.location = Location::Field;
        self.inner.position = Some(Position::new(x, y));
        self
    }

    pub fn inactive(mut self) -> Self {
        self.inner.location = Location::Inactive;
        self.inner.position = None;
        self
    }

    pub fn initial(mut self, x: f64, y: f64) -> Self {
        self.inner.initial_position = Some(Position::new(x, y));
        self
    }

    pub fn playtime(mut self, seconds: f64) -> Self {
        self.inner.playtime_seconds = seconds;
        self
    }

    pub fn clocked_since(mut self, at: i64) -> Self {
        self.inner.playtimer_started_at = Some(at);
        self
    }

    pub fn starter(mut self) -> Self {
        self.inner.is_starter = true;
        self
    }

    pub fn build(self) -> LineupEntry {
        self.inner
    }
}

pub fn sheet(game: Game, lineup: Vec<LineupEntry>) -> GameSheet {
    let game_id = game.game_id.clone();
    GameSheet {
        game,
        lineup: lineup
            .into_iter()
            .map(|entry| LineupEntry {
                game_id: game_id.clone(),
                ..entry
            })
            .collect(),
        events: Vec::new(),
    }
}

/// Accept every change as-is, assigning identifiers to new rows, and fold it into the sheet.
pub fn apply_all(sheet: GameSheet, changes: Vec<GameChange>) -> GameSheet {
    changes.into_iter().fold(sheet, |sheet, change| {
        let applied = match change {
            GameChange::GameUpdated(patch) => AppliedChange::GameUpdated(patch),
            GameChange::LineupUpdated(patches) => AppliedChange::LineupUpdated(patches),
            GameChange::LineupCleared => AppliedChange::LineupCleared,
            GameChange::LineupCreated(entries) => AppliedChange::LineupCreated(
                entries
                    .into_iter()
                    .map(|entry| {
                        let entry_id = format!("entry-{}", entry.player_id);
                        entry.into_entry(entry_id)
                    })
                    .collect(),
            ),
            GameChange::EventAppended(event) => {
                AppliedChange::EventAppended(event.into_event(Uuid::now_v7().to_string()))
            }
            GameChange::EventRemoved { event_id } => AppliedChange::EventRemoved { event_id },
            GameChange::EventsCleared => AppliedChange::EventsCleared,
        };
        evolve(sheet, applied)
    })
}
