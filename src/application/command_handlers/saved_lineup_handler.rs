// Saved lineup command handler: snapshot, restore and delete roster placements by name.
//
// Saving without overwrite fails on a taken name with the store's unique violation, which the
// error layer turns into "A lineup with this name already exists.". Loading applies the
// snapshot one player at a time.

use std::sync::Arc;

use crate::application::command_handlers::roster_handler::apply_placements;
use crate::application::errors::ApplicationError;
use crate::application::session::{ROSTER_KEY, TeamSession};
use crate::core::ports::MatchStore;
use crate::core::roster::decider::saved_lineup::command::{LoadLineup, SaveLineup};
use crate::core::roster::decider::saved_lineup::decide::{decide_load_lineup, decide_save_lineup};
use crate::core::roster::player::Player;
use crate::core::roster::saved_lineup::SavedLineup;

pub struct SavedLineupHandler<TStore>
where
    TStore: MatchStore + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> SavedLineupHandler<TStore>
where
    TStore: MatchStore + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    pub async fn save(
        &self,
        session: &TeamSession,
        name: &str,
        overwrite: bool,
    ) -> Result<SavedLineup, ApplicationError> {
        let _busy = session.begin(ROSTER_KEY)?;
        let command = SaveLineup {
            team_id: session.team_id().to_string(),
            name: name.to_string(),
            overwrite,
        };
        let new_lineup = decide_save_lineup(&session.roster().await, &command)?;

        let saved = if command.overwrite {
            self.store.upsert_saved_lineup(new_lineup).await?
        } else {
            self.store.insert_saved_lineup(new_lineup).await?
        };
        session
            .update(|mirror| {
                mirror
                    .saved_lineups
                    .retain(|known| known.lineup_id != saved.lineup_id && known.name != saved.name);
                mirror.saved_lineups.push(saved.clone());
                mirror.saved_lineups.sort_by(|a, b| a.name.cmp(&b.name));
            })
            .await;
        tracing::info!(lineup_id = %saved.lineup_id, slots = saved.slots.len(), overwrite, "lineup saved");
        Ok(saved)
    }

    pub async fn load(
        &self,
        session: &TeamSession,
        command: LoadLineup,
    ) -> Result<Vec<Player>, ApplicationError> {
        let _busy = session.begin(ROSTER_KEY)?;
        let mirror = session.snapshot().await;
        let lineup = mirror
            .saved_lineups
            .iter()
            .find(|lineup| lineup.lineup_id == command.lineup_id)
            .ok_or_else(|| ApplicationError::NotFound {
                what: "saved lineup",
                id: command.lineup_id.clone(),
            })?;
        let placements = decide_load_lineup(&mirror.players, lineup);
        let changed = placements.len();

        apply_placements(&*self.store, session, "lineup load", placements).await?;
        tracing::info!(lineup_id = %command.lineup_id, changed, "lineup loaded");
        Ok(session.roster().await)
    }

    pub async fn delete(&self, session: &TeamSession, lineup_id: &str) -> Result<(), ApplicationError> {
        let _busy = session.begin(ROSTER_KEY)?;
        self.store
            .delete_saved_lineup(session.team_id(), lineup_id)
            .await?;
        session
            .update(|mirror| {
                mirror
                    .saved_lineups
                    .retain(|lineup| lineup.lineup_id != lineup_id)
            })
            .await;
        tracing::info!(lineup_id, "lineup deleted");
        Ok(())
    }
}

#[cfg(test)]
mod saved_lineup_handler_tests {
    use super::*;
    use crate::application::command_handlers::roster_handler::RosterHandler;
    use crate::core::game::lineup::Position;
    use crate::core::roster::decider::RosterDecideError;
    use crate::core::roster::decider::placement::command::MoveRosterPlayer;
    use crate::core::roster::player::RosterLocation;
    use crate::test_support::fixtures::world::{World, seeded_world};
    use rstest::{fixture, rstest};

    #[fixture]
    async fn world() -> World {
        seeded_world(3).await
    }

    async fn field(world: &World, player: usize) {
        RosterHandler::new(world.store.clone())
            .move_player(
                &world.session,
                MoveRosterPlayer {
                    player_id: world.player_ids[player].clone(),
                    to: RosterLocation::Field,
                    position: Some(Position::new(30.0, 30.0)),
                },
            )
            .await
            .unwrap();
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_name_a_duplicate_unless_overwriting(#[future] world: World) {
        let world = world.await;
        let handler = SavedLineupHandler::new(world.store.clone());
        let first = handler.save(&world.session, "4-3-3", false).await.unwrap();

        let duplicate = handler.save(&world.session, " 4-3-3 ", false).await.unwrap_err();
        assert_eq!(duplicate.user_message(), "A lineup with this name already exists.");

        field(&world, 0).await;
        let replaced = handler.save(&world.session, "4-3-3", true).await.unwrap();
        assert_eq!(replaced.lineup_id, first.lineup_id);
        assert_eq!(world.session.snapshot().await.saved_lineups, vec![replaced]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_an_empty_name(#[future] world: World) {
        let world = world.await;
        let handler = SavedLineupHandler::new(world.store.clone());

        assert!(matches!(
            handler.save(&world.session, "  ", false).await,
            Err(ApplicationError::Roster(RosterDecideError::EmptyLineupName))
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_restore_a_snapshot_and_bench_the_rest(#[future] world: World) {
        let world = world.await;
        let handler = SavedLineupHandler::new(world.store.clone());
        field(&world, 0).await;
        let saved = handler.save(&world.session, "Base", false).await.unwrap();
        field(&world, 1).await;

        let roster = handler
            .load(
                &world.session,
                LoadLineup {
                    lineup_id: saved.lineup_id.clone(),
                },
            )
            .await
            .unwrap();

        let location_of = |id: &str| {
            roster
                .iter()
                .find(|player| player.player_id == id)
                .map(|player| player.location)
                .unwrap()
        };
        assert_eq!(location_of(&world.player_ids[0]), RosterLocation::Field);
        assert_eq!(location_of(&world.player_ids[1]), RosterLocation::Bench);

        handler.delete(&world.session, &saved.lineup_id).await.unwrap();
        assert!(world.session.snapshot().await.saved_lineups.is_empty());
        assert!(matches!(
            handler
                .load(&world.session, LoadLineup { lineup_id: saved.lineup_id })
                .await,
            Err(ApplicationError::NotFound { what: "saved lineup", .. })
        ));
    }
}
