use std::sync::Arc;

use crate::adapters::in_memory::in_memory_database::InMemoryDatabase;
use crate::adapters::in_memory::static_token_authenticator::StaticTokenAuthenticator;
use crate::adapters::inbound::graphql::{AppSchema, build_schema};
use crate::application::command_handlers::event_log_handler::EventLogHandler;
use crate::application::command_handlers::game_clock_handler::GameClockHandler;
use crate::application::command_handlers::lineup_handler::LineupHandler;
use crate::application::command_handlers::roster_handler::RosterHandler;
use crate::application::command_handlers::saved_lineup_handler::SavedLineupHandler;
use crate::application::command_handlers::schedule_handler::ScheduleHandler;
use crate::application::command_handlers::session_handler::SessionHandler;
use crate::application::live_ticker::LiveTicker;
use crate::application::session::SessionRegistry;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionHandler<InMemoryDatabase, StaticTokenAuthenticator>>,
    pub clock: Arc<GameClockHandler<InMemoryDatabase>>,
    pub lineup: Arc<LineupHandler<InMemoryDatabase>>,
    pub events: Arc<EventLogHandler<InMemoryDatabase>>,
    pub schedule: Arc<ScheduleHandler<InMemoryDatabase>>,
    pub roster: Arc<RosterHandler<InMemoryDatabase>>,
    pub saved_lineups: Arc<SavedLineupHandler<InMemoryDatabase>>,
    pub schema: AppSchema,
}

impl AppState {
    pub fn new(
        store: Arc<InMemoryDatabase>,
        authenticator: StaticTokenAuthenticator,
        default_team_name: &str,
        ticker: Arc<LiveTicker>,
    ) -> Self {
        Self {
            sessions: Arc::new(SessionHandler::new(
                store.clone(),
                Arc::new(authenticator),
                Arc::new(SessionRegistry::new()),
                default_team_name,
            )),
            clock: Arc::new(GameClockHandler::new(store.clone())),
            lineup: Arc::new(LineupHandler::new(store.clone())),
            events: Arc::new(EventLogHandler::new(store.clone())),
            schedule: Arc::new(ScheduleHandler::new(store.clone())),
            roster: Arc::new(RosterHandler::new(store.clone())),
            saved_lineups: Arc::new(SavedLineupHandler::new(store)),
            schema: build_schema(ticker),
        }
    }
}

#[cfg(test)]
pub fn test_state() -> AppState {
    use std::time::Duration;

    AppState::new(
        Arc::new(InMemoryDatabase::new()),
        StaticTokenAuthenticator::new([("token-1", "user-1")]),
        "Test FC",
        Arc::new(LiveTicker::new(Duration::from_secs(1))),
    )
}
