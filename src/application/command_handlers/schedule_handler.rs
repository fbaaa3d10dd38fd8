// Schedule command handler: add, edit and delete games.
//
// Responsibilities
// - Insert a new game, then one bench entry per current roster player. The second step is
//   best effort: when it fails the game exists without a lineup and the error says so.
// - Edit schedule details under the game's busy guard.
// - Delete a game; the store cascades its lineup and events.
//
// Adding a game holds the roster guard so the roster cannot change while entries are seeded.

use std::sync::Arc;

use crate::application::errors::ApplicationError;
use crate::application::session::{ROSTER_KEY, TeamSession};
use crate::core::game::decider::schedule::command::{ScheduleGame, UpdateGameDetails};
use crate::core::game::decider::schedule::decide::{decide_schedule, decide_update_details};
use crate::core::game::lineup::NewLineupEntry;
use crate::core::game::sheet::GameSheet;
use crate::core::game::state::GameDetails;
use crate::core::ports::MatchStore;

pub struct ScheduleHandler<TStore>
where
    TStore: MatchStore + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> ScheduleHandler<TStore>
where
    TStore: MatchStore + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    pub async fn add_game(
        &self,
        session: &TeamSession,
        details: GameDetails,
    ) -> Result<GameSheet, ApplicationError> {
        let _busy = session.begin(ROSTER_KEY)?;
        let command = ScheduleGame {
            team_id: session.team_id().to_string(),
            details,
        };
        let new_game = decide_schedule(&command)?;

        let game = self.store.insert_game(new_game).await?;
        let game_id = game.game_id.clone();
        let mut sheet = GameSheet::new(game);
        session.replace_sheet(sheet.clone()).await;

        let entries: Vec<NewLineupEntry> = session
            .roster()
            .await
            .into_iter()
            .map(|player| NewLineupEntry {
                game_id: game_id.clone(),
                player_id: player.player_id,
            })
            .collect();
        if !entries.is_empty() {
            match self.store.insert_entries(session.team_id(), entries).await {
                Ok(lineup) => sheet.lineup = lineup,
                Err(source) => {
                    tracing::warn!(game_id = %game_id, error = %source, "game created without lineup");
                    return Err(ApplicationError::PartiallyApplied {
                        action: "game creation",
                        source,
                    });
                }
            }
            session.replace_sheet(sheet.clone()).await;
        }

        tracing::info!(game_id = %game_id, entries = sheet.lineup.len(), "game scheduled");
        Ok(sheet)
    }

    pub async fn update_game(
        &self,
        session: &TeamSession,
        command: UpdateGameDetails,
    ) -> Result<GameSheet, ApplicationError> {
        let _busy = session.begin(&command.game_id)?;
        let mut sheet = session.game_sheet(&command.game_id).await?;
        let details = decide_update_details(&command)?;

        self.store
            .update_game_details(session.team_id(), &command.game_id, &details)
            .await?;
        details.apply_to(&mut sheet.game);
        session.replace_sheet(sheet.clone()).await;
        tracing::info!(game_id = %command.game_id, "game details updated");
        Ok(sheet)
    }

    pub async fn delete_game(
        &self,
        session: &TeamSession,
        game_id: &str,
    ) -> Result<(), ApplicationError> {
        let _busy = session.begin(game_id)?;
        session.game_sheet(game_id).await?;

        self.store.delete_game(session.team_id(), game_id).await?;
        session
            .update(|mirror| mirror.games.remove(game_id))
            .await;
        tracing::info!(game_id, "game deleted");
        Ok(())
    }
}
