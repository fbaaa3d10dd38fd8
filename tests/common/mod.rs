// Shared setup for the integration tests: a signed-in team with a squad and one scheduled game.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;

use matchday::adapters::in_memory::in_memory_database::InMemoryDatabase;
use matchday::adapters::in_memory::static_token_authenticator::StaticTokenAuthenticator;
use matchday::application::command_handlers::event_log_handler::EventLogHandler;
use matchday::application::command_handlers::game_clock_handler::GameClockHandler;
use matchday::application::command_handlers::lineup_handler::LineupHandler;
use matchday::application::command_handlers::roster_handler::RosterHandler;
use matchday::application::command_handlers::schedule_handler::ScheduleHandler;
use matchday::application::command_handlers::session_handler::SessionHandler;
use matchday::application::session::{SessionRegistry, TeamSession};
use matchday::core::game::decider::add_event::command::RecordGameEvent;
use matchday::core::game::decider::move_player::command::MovePlayerInGame;
use matchday::core::game::decider::start_timer::command::StartGameTimer;
use matchday::core::game::decider::stop_timer::command::StopGameTimer;
use matchday::core::game::event::GameEventKind;
use matchday::core::game::lineup::{LineupEntry, Location, Position};
use matchday::core::game::sheet::GameSheet;
use matchday::core::game::state::{GameDetails, Side};
use matchday::core::roster::player::PlayerDetails;

pub const T0: i64 = 1_790_000_000_000;

pub fn secs(seconds: i64) -> i64 {
    T0 + seconds * 1_000
}

pub struct Match {
    pub store: Arc<InMemoryDatabase>,
    pub session: Arc<TeamSession>,
    pub clock: GameClockHandler<InMemoryDatabase>,
    pub lineup: LineupHandler<InMemoryDatabase>,
    pub events: EventLogHandler<InMemoryDatabase>,
    pub game_id: String,
    pub player_ids: Vec<String>,
}

/// Sign in, add `players` to the roster and schedule one home game against Rovers.
pub async fn kick_off_setup(players: usize) -> Match {
    let store = Arc::new(InMemoryDatabase::new());
    let sessions = SessionHandler::new(
        store.clone(),
        Arc::new(StaticTokenAuthenticator::new([("coach-token", "coach")])),
        Arc::new(SessionRegistry::new()),
        "Lions",
    );
    let session = sessions.sign_in("coach-token").await.unwrap();

    let roster = RosterHandler::new(store.clone());
    let mut player_ids = Vec::new();
    for number in 1..=players {
        let player = roster
            .add_player(
                &session,
                PlayerDetails {
                    first_name: format!("Kid{number}"),
                    last_name: "Lion".into(),
                    jersey_number: Some(number.to_string()),
                },
            )
            .await
            .unwrap();
        player_ids.push(player.player_id);
    }

    let sheet = ScheduleHandler::new(store.clone())
        .add_game(
            &session,
            GameDetails {
                opponent: "Rovers".into(),
                game_date: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
                game_time: None,
                venue: Side::Home,
                season: Some("2026/27".into()),
                competition: Some("League".into()),
            },
        )
        .await
        .unwrap();

    Match {
        clock: GameClockHandler::new(store.clone()),
        lineup: LineupHandler::new(store.clone()),
        events: EventLogHandler::new(store.clone()),
        store,
        session,
        game_id: sheet.game.game_id,
        player_ids,
    }
}

impl Match {
    pub fn player(&self, index: usize) -> &str {
        &self.player_ids[index]
    }

    pub async fn sheet(&self) -> GameSheet {
        self.session.game_sheet(&self.game_id).await.unwrap()
    }

    pub async fn entry(&self, index: usize) -> LineupEntry {
        self.sheet()
            .await
            .entry_for(self.player(index))
            .cloned()
            .unwrap()
    }

    pub async fn start(&self, at: i64) -> GameSheet {
        self.clock
            .start(&self.session, StartGameTimer { game_id: self.game_id.clone(), at })
            .await
            .unwrap()
    }

    pub async fn stop(&self, at: i64) -> GameSheet {
        self.clock
            .stop(&self.session, StopGameTimer { game_id: self.game_id.clone(), at })
            .await
            .unwrap()
    }

    pub fn move_command(&self, index: usize, from: Location, to: Location, at: i64) -> MovePlayerInGame {
        MovePlayerInGame {
            game_id: self.game_id.clone(),
            player_id: self.player(index).to_string(),
            from,
            to,
            position: (to == Location::Field).then(|| Position::new(50.0, 50.0)),
            at,
            confirmed: false,
        }
    }

    pub async fn move_player(&self, index: usize, from: Location, to: Location, at: i64) -> GameSheet {
        self.lineup
            .move_player(&self.session, self.move_command(index, from, to, at))
            .await
            .unwrap()
    }

    pub fn goal(&self, side: Side, game_seconds: u32) -> RecordGameEvent {
        RecordGameEvent {
            game_id: self.game_id.clone(),
            side,
            kind: GameEventKind::Goal {
                scorer_id: None,
                assist_id: None,
            },
            at: secs(i64::from(game_seconds)),
            game_seconds: Some(game_seconds),
            confirmed: false,
        }
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
