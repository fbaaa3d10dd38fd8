// Game record and the match clock phases derived from it.
//
// Purpose
// - Hold the persisted shape of a game: schedule details, stored score and the timer snapshot.
// - Derive the clock phase (NotStarted, Running, Paused, Finished) from the stored fields.
//
// Timestamps
// - All i64 instants are epoch milliseconds. Elapsed time is f64 seconds.
//
// Invariants
// - timer_started_at is Some exactly when timer_status is Running.
// - elapsed_seconds never decreases outside an explicit reset.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    NotStarted,
    Running,
    Paused,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub game_id: String,
    pub team_id: String,
    pub opponent: String,
    pub game_date: NaiveDate,
    pub game_time: Option<NaiveTime>,
    /// The side our team plays as. Substitution events are recorded for this side.
    pub venue: Side,
    pub season: Option<String>,
    pub competition: Option<String>,
    pub home_score: u32,
    pub away_score: u32,
    pub timer_status: TimerStatus,
    pub timer_started_at: Option<i64>,
    pub elapsed_seconds: f64,
    pub is_finished: bool,
}

impl Game {
    pub fn phase(&self) -> GamePhase {
        if self.is_finished {
            GamePhase::Finished
        } else if self.timer_status == TimerStatus::Running {
            GamePhase::Running
        } else if self.elapsed_seconds > 0.0 {
            GamePhase::Paused
        } else {
            GamePhase::NotStarted
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer_status == TimerStatus::Running
    }

    /// Running, or stopped after some time was played.
    pub fn is_active(&self) -> bool {
        self.is_running() || self.elapsed_seconds > 0.0
    }

    /// True before the clock has ever been started.
    pub fn is_fresh(&self) -> bool {
        self.elapsed_seconds == 0.0 && self.timer_started_at.is_none()
    }

    /// Game-clock seconds at `now`: the frozen snapshot plus the running interval, if any.
    pub fn clock_seconds(&self, now: i64) -> f64 {
        match (self.timer_status, self.timer_started_at) {
            (TimerStatus::Running, Some(started_at)) => {
                self.elapsed_seconds + seconds_between(started_at, now)
            }
            _ => self.elapsed_seconds,
        }
    }

    pub fn score_of(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_score,
            Side::Away => self.away_score,
        }
    }
}

/// Schedule details a coach can edit at any time, independent of the clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDetails {
    pub opponent: String,
    pub game_date: NaiveDate,
    pub game_time: Option<NaiveTime>,
    pub venue: Side,
    pub season: Option<String>,
    pub competition: Option<String>,
}

impl GameDetails {
    pub fn apply_to(&self, game: &mut Game) {
        game.opponent = self.opponent.clone();
        game.game_date = self.game_date;
        game.game_time = self.game_time;
        game.venue = self.venue;
        game.season = self.season.clone();
        game.competition = self.competition.clone();
    }
}

/// Row to insert for a scheduled game. The store fills a stopped, zeroed clock and score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGame {
    pub team_id: String,
    pub details: GameDetails,
}

impl NewGame {
    pub fn into_game(self, game_id: impl Into<String>) -> Game {
        Game {
            game_id: game_id.into(),
            team_id: self.team_id,
            opponent: self.details.opponent,
            game_date: self.details.game_date,
            game_time: self.details.game_time,
            venue: self.details.venue,
            season: self.details.season,
            competition: self.details.competition,
            home_score: 0,
            away_score: 0,
            timer_status: TimerStatus::Stopped,
            timer_started_at: None,
            elapsed_seconds: 0.0,
            is_finished: false,
        }
    }
}

/// Whole-interval seconds between two epoch-millisecond instants, never negative.
pub fn seconds_between(from: i64, to: i64) -> f64 {
    (to - from).max(0) as f64 / 1000.0
}

#[cfg(test)]
mod game_state_tests {
    use super::*;
    use crate::test_support::fixtures::games::GameBuilder;
    use rstest::rstest;

    #[rstest]
    fn it_should_derive_not_started_for_a_fresh_game() {
        let game = GameBuilder::new().build();
        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert!(game.is_fresh());
        assert!(!game.is_active());
    }

    #[rstest]
    fn it_should_derive_running_while_the_clock_runs() {
        let game = GameBuilder::new().running_since(1_000).build();
        assert_eq!(game.phase(), GamePhase::Running);
        assert!(game.is_active());
    }

    #[rstest]
    fn it_should_derive_paused_once_time_was_played() {
        let game = GameBuilder::new().elapsed(12.0).build();
        assert_eq!(game.phase(), GamePhase::Paused);
        assert!(game.is_active());
    }

    #[rstest]
    fn it_should_derive_finished_regardless_of_elapsed_time() {
        let game = GameBuilder::new().elapsed(0.0).finished().build();
        assert_eq!(game.phase(), GamePhase::Finished);
    }

    #[rstest]
    #[case(0, 0.0)]
    #[case(30_000, 30.0)]
    #[case(90_500, 90.5)]
    fn it_should_add_the_running_interval_to_the_clock(#[case] offset: i64, #[case] expected: f64) {
        let game = GameBuilder::new().elapsed(600.0).running_since(1_000).build();
        assert_eq!(game.clock_seconds(1_000 + offset), 600.0 + expected);
    }

    #[rstest]
    fn it_should_freeze_the_clock_while_stopped() {
        let game = GameBuilder::new().elapsed(42.0).build();
        assert_eq!(game.clock_seconds(9_999_999), 42.0);
    }

    #[rstest]
    fn it_should_never_produce_negative_intervals() {
        assert_eq!(seconds_between(5_000, 1_000), 0.0);
    }
}
