// Game clock command handler: start, stop and finish.
//
// Responsibilities
// - Take the busy guard of the game so a second clock action cannot overlap the first.
// - Decide against the mirrored sheet, persist the changes in order, mirror what landed.

use std::sync::Arc;

use crate::application::command_handlers::game_changes::{commit, rejected};
use crate::application::errors::ApplicationError;
use crate::application::session::TeamSession;
use crate::core::game::decider::finish::command::FinishGame;
use crate::core::game::decider::finish::decide::decide_finish;
use crate::core::game::decider::start_timer::command::StartGameTimer;
use crate::core::game::decider::start_timer::decide::decide_start_timer;
use crate::core::game::decider::stop_timer::command::StopGameTimer;
use crate::core::game::decider::stop_timer::decide::decide_stop_timer;
use crate::core::game::sheet::GameSheet;
use crate::core::ports::MatchStore;

pub struct GameClockHandler<TStore>
where
    TStore: MatchStore + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> GameClockHandler<TStore>
where
    TStore: MatchStore + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    pub async fn start(
        &self,
        session: &TeamSession,
        command: StartGameTimer,
    ) -> Result<GameSheet, ApplicationError> {
        let _busy = session.begin(&command.game_id)?;
        let sheet = session.game_sheet(&command.game_id).await?;
        let changes = decide_start_timer(&sheet, &command)
            .map_err(|error| rejected(&command.game_id, "clock start", error))?;

        let sheet = commit(&*self.store, session, "clock start", sheet, changes).await?;
        tracing::info!(
            game_id = %command.game_id,
            at = command.at,
            elapsed_seconds = sheet.game.elapsed_seconds,
            "game clock started"
        );
        Ok(sheet)
    }

    pub async fn stop(
        &self,
        session: &TeamSession,
        command: StopGameTimer,
    ) -> Result<GameSheet, ApplicationError> {
        let _busy = session.begin(&command.game_id)?;
        let sheet = session.game_sheet(&command.game_id).await?;
        let changes = decide_stop_timer(&sheet, &command)
            .map_err(|error| rejected(&command.game_id, "clock stop", error))?;

        let sheet = commit(&*self.store, session, "clock stop", sheet, changes).await?;
        tracing::info!(
            game_id = %command.game_id,
            at = command.at,
            elapsed_seconds = sheet.game.elapsed_seconds,
            "game clock stopped"
        );
        Ok(sheet)
    }

    pub async fn finish(
        &self,
        session: &TeamSession,
        command: FinishGame,
    ) -> Result<GameSheet, ApplicationError> {
        let _busy = session.begin(&command.game_id)?;
        let sheet = session.game_sheet(&command.game_id).await?;
        let changes = decide_finish(&sheet, &command)
            .map_err(|error| rejected(&command.game_id, "finish", error))?;

        let sheet = commit(&*self.store, session, "finish", sheet, changes).await?;
        tracing::info!(
            game_id = %command.game_id,
            elapsed_seconds = sheet.game.elapsed_seconds,
            home_score = sheet.game.home_score,
            away_score = sheet.game.away_score,
            "game finished"
        );
        Ok(sheet)
    }
}
