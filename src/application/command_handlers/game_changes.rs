// Persisting decider output for one game, step by step.
//
// Responsibilities
// - Send each GameChange to the matching store call, in order.
// - Fold every accepted change into a working copy of the game sheet.
// - Stop at the first failure. If an earlier step already landed, report the failure as
//   partially applied; the working copy then still reflects exactly what the store holds.
// - Publish the working copy to the session mirror once anything was accepted.

use crate::application::errors::ApplicationError;
use crate::application::session::TeamSession;
use crate::core::game::change::{AppliedChange, GameChange};
use crate::core::game::evolve::evolve;
use crate::core::game::sheet::GameSheet;
use crate::core::ports::{MatchStore, PersistenceError};

async fn persist_change<TStore>(
    store: &TStore,
    team_id: &str,
    game_id: &str,
    change: GameChange,
) -> Result<AppliedChange, PersistenceError>
where
    TStore: MatchStore + ?Sized,
{
    Ok(match change {
        GameChange::GameUpdated(patch) => {
            store.update_game(team_id, game_id, &patch).await?;
            AppliedChange::GameUpdated(patch)
        }
        GameChange::LineupUpdated(patches) => {
            store.update_entries(team_id, &patches).await?;
            AppliedChange::LineupUpdated(patches)
        }
        GameChange::LineupCleared => {
            store.delete_entries(team_id, game_id).await?;
            AppliedChange::LineupCleared
        }
        GameChange::LineupCreated(entries) => {
            AppliedChange::LineupCreated(store.insert_entries(team_id, entries).await?)
        }
        GameChange::EventAppended(event) => {
            AppliedChange::EventAppended(store.insert_event(team_id, event).await?)
        }
        GameChange::EventRemoved { event_id } => {
            store.delete_event(team_id, &event_id).await?;
            AppliedChange::EventRemoved { event_id }
        }
        GameChange::EventsCleared => {
            store.delete_events(team_id, game_id).await?;
            AppliedChange::EventsCleared
        }
    })
}

/// A best-effort write of one logical game action.
pub(crate) struct GameWrite<'a, TStore: ?Sized> {
    store: &'a TStore,
    session: &'a TeamSession,
    action: &'static str,
    sheet: GameSheet,
    applied_steps: usize,
}

impl<'a, TStore> GameWrite<'a, TStore>
where
    TStore: MatchStore + ?Sized,
{
    pub(crate) fn new(
        store: &'a TStore,
        session: &'a TeamSession,
        action: &'static str,
        sheet: GameSheet,
    ) -> Self {
        Self {
            store,
            session,
            action,
            sheet,
            applied_steps: 0,
        }
    }

    pub(crate) fn sheet(&self) -> &GameSheet {
        &self.sheet
    }

    pub(crate) async fn persist(&mut self, changes: Vec<GameChange>) -> Result<(), ApplicationError> {
        let team_id = self.session.team_id().to_string();
        let game_id = self.sheet.game_id().to_string();
        for change in changes {
            let label = change.label();
            match persist_change(self.store, &team_id, &game_id, change).await {
                Ok(applied) => {
                    self.sheet = evolve(self.sheet.clone(), applied);
                    self.applied_steps += 1;
                }
                Err(source) if self.applied_steps > 0 => {
                    tracing::warn!(
                        game_id = %game_id,
                        action = self.action,
                        failed_step = label,
                        applied_steps = self.applied_steps,
                        error = %source,
                        "action partially applied"
                    );
                    return Err(ApplicationError::PartiallyApplied {
                        action: self.action,
                        source,
                    });
                }
                Err(source) => return Err(source.into()),
            }
        }
        Ok(())
    }

    /// Mirror whatever landed and hand back the resulting sheet.
    pub(crate) async fn finish(self) -> GameSheet {
        if self.applied_steps > 0 {
            self.session.replace_sheet(self.sheet.clone()).await;
        }
        self.sheet
    }
}

/// Persist a single decider's output and mirror it.
pub(crate) async fn commit<TStore>(
    store: &TStore,
    session: &TeamSession,
    action: &'static str,
    sheet: GameSheet,
    changes: Vec<GameChange>,
) -> Result<GameSheet, ApplicationError>
where
    TStore: MatchStore + ?Sized,
{
    let mut write = GameWrite::new(store, session, action, sheet);
    let outcome = write.persist(changes).await;
    let sheet = write.finish().await;
    outcome.map(|()| sheet)
}

/// Log a local rejection before handing it back.
pub(crate) fn rejected<E>(game_id: &str, action: &'static str, error: E) -> ApplicationError
where
    E: Into<ApplicationError>,
{
    let error = error.into();
    tracing::warn!(game_id, action, error = %error, "action rejected");
    error
}
