// Event log command handler: record goals and substitutions, and undo the latest one.
//
// A goal is two writes, the event and the score. A failed score write after the event landed
// is reported as partially applied; the mirror then holds the event with the old score,
// exactly like the store.

use std::sync::Arc;

use crate::application::command_handlers::game_changes::{commit, rejected};
use crate::application::errors::ApplicationError;
use crate::application::session::TeamSession;
use crate::core::game::decider::add_event::command::RecordGameEvent;
use crate::core::game::decider::add_event::decide::decide_add_event;
use crate::core::game::decider::remove_last_event::command::RemoveLastEvent;
use crate::core::game::decider::remove_last_event::decide::decide_remove_last_event;
use crate::core::game::sheet::GameSheet;
use crate::core::ports::MatchStore;

pub struct EventLogHandler<TStore>
where
    TStore: MatchStore + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> EventLogHandler<TStore>
where
    TStore: MatchStore + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    pub async fn add_event(
        &self,
        session: &TeamSession,
        command: RecordGameEvent,
    ) -> Result<GameSheet, ApplicationError> {
        let _busy = session.begin(&command.game_id)?;
        let sheet = session.game_sheet(&command.game_id).await?;
        let changes = decide_add_event(&sheet, &command)
            .map_err(|error| rejected(&command.game_id, "event", error))?;

        let sheet = commit(&*self.store, session, "event", sheet, changes).await?;
        tracing::info!(
            game_id = %command.game_id,
            side = command.side.as_str(),
            home_score = sheet.game.home_score,
            away_score = sheet.game.away_score,
            "event recorded"
        );
        Ok(sheet)
    }

    pub async fn remove_last_event(
        &self,
        session: &TeamSession,
        command: RemoveLastEvent,
    ) -> Result<GameSheet, ApplicationError> {
        let _busy = session.begin(&command.game_id)?;
        let sheet = session.game_sheet(&command.game_id).await?;
        let changes = decide_remove_last_event(&sheet, &command)
            .map_err(|error| rejected(&command.game_id, "event removal", error))?;
        if changes.is_empty() {
            tracing::debug!(game_id = %command.game_id, "no event to remove");
            return Ok(sheet);
        }

        let sheet = commit(&*self.store, session, "event removal", sheet, changes).await?;
        tracing::info!(
            game_id = %command.game_id,
            side = command.side.as_str(),
            home_score = sheet.game.home_score,
            away_score = sheet.game.away_score,
            "last event removed"
        );
        Ok(sheet)
    }
}
