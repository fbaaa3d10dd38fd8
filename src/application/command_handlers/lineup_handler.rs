// Lineup command handler: in-game moves, planned substitutions and lineup resets.
//
// Responsibilities
// - Serialize every lineup mutation of one game behind its busy guard.
// - Persist a substitution as two moves, the outgoing player first. When the second move
//   fails after the first landed, report the substitution as partially applied.
// - Rebuild the lineup of a reset game from the current roster in the mirror.

use std::sync::Arc;

use crate::application::command_handlers::game_changes::{GameWrite, commit, rejected};
use crate::application::errors::ApplicationError;
use crate::application::session::TeamSession;
use crate::core::game::decider::move_player::command::{MovePlayerInGame, SubstitutePlayers};
use crate::core::game::decider::move_player::decide::{decide_move_player, decide_substitution};
use crate::core::game::decider::reset::command::ResetGameLineup;
use crate::core::game::decider::reset::decide::decide_reset;
use crate::core::game::sheet::GameSheet;
use crate::core::ports::MatchStore;

pub struct LineupHandler<TStore>
where
    TStore: MatchStore + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> LineupHandler<TStore>
where
    TStore: MatchStore + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    pub async fn move_player(
        &self,
        session: &TeamSession,
        command: MovePlayerInGame,
    ) -> Result<GameSheet, ApplicationError> {
        let _busy = session.begin(&command.game_id)?;
        let sheet = session.game_sheet(&command.game_id).await?;
        let changes = decide_move_player(&sheet, &command)
            .map_err(|error| rejected(&command.game_id, "move", error))?;

        let sheet = commit(&*self.store, session, "move", sheet, changes).await?;
        tracing::info!(
            game_id = %command.game_id,
            player_id = %command.player_id,
            from = %command.from,
            to = %command.to,
            clock_seconds = sheet.game.clock_seconds(command.at),
            "player moved"
        );
        Ok(sheet)
    }

    pub async fn substitute(
        &self,
        session: &TeamSession,
        command: SubstitutePlayers,
    ) -> Result<GameSheet, ApplicationError> {
        let _busy = session.begin(&command.game_id)?;
        let sheet = session.game_sheet(&command.game_id).await?;
        let (off, on) = decide_substitution(&sheet, &command)
            .map_err(|error| rejected(&command.game_id, "substitution", error))?;
        let off_changes = decide_move_player(&sheet, &off)
            .map_err(|error| rejected(&command.game_id, "substitution", error))?;

        let mut write = GameWrite::new(&*self.store, session, "substitution", sheet);
        let mut outcome = write.persist(off_changes).await;
        if outcome.is_ok() {
            outcome = match decide_move_player(write.sheet(), &on) {
                Ok(on_changes) => write.persist(on_changes).await,
                Err(error) => Err(rejected(&command.game_id, "substitution", error)),
            };
        }
        let sheet = write.finish().await;
        outcome?;

        tracing::info!(
            game_id = %command.game_id,
            player_out_id = %command.player_out_id,
            player_in_id = %command.player_in_id,
            clock_seconds = sheet.game.clock_seconds(command.at),
            "substitution made"
        );
        Ok(sheet)
    }

    /// Wipe events, score and clock and give every roster player a fresh bench entry.
    pub async fn reset(
        &self,
        session: &TeamSession,
        game_id: &str,
        confirmed: bool,
    ) -> Result<GameSheet, ApplicationError> {
        let _busy = session.begin(game_id)?;
        let sheet = session.game_sheet(game_id).await?;
        let command = ResetGameLineup {
            game_id: game_id.to_string(),
            roster_player_ids: session.update(|mirror| mirror.roster_ids()).await,
            confirmed,
        };
        let changes =
            decide_reset(&sheet, &command).map_err(|error| rejected(game_id, "reset", error))?;

        let sheet = commit(&*self.store, session, "reset", sheet, changes).await?;
        tracing::info!(game_id, entries = sheet.lineup.len(), "game reset");
        Ok(sheet)
    }
}

#[cfg(test)]
mod lineup_handler_tests {
    use super::*;
    use crate::application::command_handlers::game_clock_handler::GameClockHandler;
    use crate::core::game::decider::DecideError;
    use crate::core::game::decider::start_timer::command::StartGameTimer;
    use crate::core::game::decider::stop_timer::command::StopGameTimer;
    use crate::core::game::event::EventType;
    use crate::core::game::lineup::{Location, Position};
    use crate::core::ports::LineupStore;
    use crate::test_support::fixtures::world::{World, seeded_world};
    use rstest::{fixture, rstest};

    const T0: i64 = 1_700_000_000_000;

    #[fixture]
    async fn world() -> World {
        seeded_world(3).await
    }

    fn move_command(world: &World, player: usize, from: Location, to: Location, at: i64) -> MovePlayerInGame {
        MovePlayerInGame {
            game_id: world.game_id.clone(),
            player_id: world.player_ids[player].clone(),
            from,
            to,
            position: (to == Location::Field).then(|| Position::new(40.0, 60.0)),
            at,
            confirmed: false,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_count_only_field_intervals_as_playtime(#[future] world: World) {
        let world = world.await;
        let lineup = LineupHandler::new(world.store.clone());
        let clock = GameClockHandler::new(world.store.clone());

        lineup
            .move_player(&world.session, move_command(&world, 0, Location::Bench, Location::Field, T0))
            .await
            .unwrap();
        clock
            .start(&world.session, StartGameTimer { game_id: world.game_id.clone(), at: T0 })
            .await
            .unwrap();
        lineup
            .move_player(
                &world.session,
                move_command(&world, 0, Location::Field, Location::Bench, T0 + 30_000),
            )
            .await
            .unwrap();
        lineup
            .move_player(
                &world.session,
                move_command(&world, 0, Location::Bench, Location::Field, T0 + 60_000),
            )
            .await
            .unwrap();
        let sheet = clock
            .stop(&world.session, StopGameTimer { game_id: world.game_id.clone(), at: T0 + 100_000 })
            .await
            .unwrap();

        let entry = sheet.entry_for(&world.player_ids[0]).unwrap();
        assert_eq!(entry.playtime_seconds, 70.0);
        assert_eq!(entry.playtimer_started_at, None);
        assert!(entry.is_starter);
        assert_eq!((entry.subbed_off_count, entry.subbed_on_count), (1, 1));
        assert_eq!(sheet.events.len(), 2);
        assert!(sheet.events.iter().all(|event| event.event_type() == EventType::Substitution));

        let stored = world
            .store
            .list_entries(world.session.team_id(), &world.game_id)
            .await
            .unwrap();
        assert_eq!(stored.iter().find(|row| row.entry_id == entry.entry_id), Some(entry));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_a_stale_move_without_writing(#[future] world: World) {
        let world = world.await;
        let lineup = LineupHandler::new(world.store.clone());
        let writes = world.store.write_count();

        let result = lineup
            .move_player(&world.session, move_command(&world, 1, Location::Field, Location::Bench, T0))
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::Decide(DecideError::LocationMismatch { .. }))
        ));
        assert_eq!(world.store.write_count(), writes);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_put_the_incoming_player_on_the_outgoing_spot(#[future] world: World) {
        let world = world.await;
        let lineup = LineupHandler::new(world.store.clone());
        lineup
            .move_player(&world.session, move_command(&world, 0, Location::Bench, Location::Field, T0))
            .await
            .unwrap();

        let sheet = lineup
            .substitute(
                &world.session,
                SubstitutePlayers {
                    game_id: world.game_id.clone(),
                    player_out_id: world.player_ids[0].clone(),
                    player_in_id: world.player_ids[1].clone(),
                    at: T0 + 1_000,
                    confirmed: false,
                },
            )
            .await
            .unwrap();

        let outgoing = sheet.entry_for(&world.player_ids[0]).unwrap();
        let incoming = sheet.entry_for(&world.player_ids[1]).unwrap();
        assert_eq!(outgoing.location, Location::Bench);
        assert_eq!(outgoing.position, None);
        assert_eq!(incoming.location, Location::Field);
        assert_eq!(incoming.position, Some(Position::new(40.0, 60.0)));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_keep_the_first_half_of_a_failed_substitution(#[future] world: World) {
        let world = world.await;
        let lineup = LineupHandler::new(world.store.clone());
        let clock = GameClockHandler::new(world.store.clone());
        lineup
            .move_player(&world.session, move_command(&world, 0, Location::Bench, Location::Field, T0))
            .await
            .unwrap();
        clock
            .start(&world.session, StartGameTimer { game_id: world.game_id.clone(), at: T0 })
            .await
            .unwrap();
        // the outgoing move writes its entry and its event, then the budget is spent
        world.store.fail_writes_after(2);

        let result = lineup
            .substitute(
                &world.session,
                SubstitutePlayers {
                    game_id: world.game_id.clone(),
                    player_out_id: world.player_ids[0].clone(),
                    player_in_id: world.player_ids[1].clone(),
                    at: T0 + 45_000,
                    confirmed: false,
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::PartiallyApplied { action: "substitution", .. })
        ));
        let mirrored = world.session.game_sheet(&world.game_id).await.unwrap();
        assert_eq!(
            mirrored.entry_for(&world.player_ids[0]).unwrap().location,
            Location::Bench
        );
        assert_eq!(
            mirrored.entry_for(&world.player_ids[1]).unwrap().location,
            Location::Bench
        );
        world.store.fail_writes_after(usize::MAX);
        let stored = world
            .store
            .list_entries(world.session.team_id(), &world.game_id)
            .await
            .unwrap();
        let mut stored_sorted = stored.clone();
        stored_sorted.sort_by(|a, b| a.entry_id.cmp(&b.entry_id));
        let mut mirrored_sorted = mirrored.lineup.clone();
        mirrored_sorted.sort_by(|a, b| a.entry_id.cmp(&b.entry_id));
        assert_eq!(stored_sorted, mirrored_sorted);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reset_to_bench_defaults_for_the_roster(#[future] world: World) {
        let world = world.await;
        let lineup = LineupHandler::new(world.store.clone());
        let clock = GameClockHandler::new(world.store.clone());
        lineup
            .move_player(&world.session, move_command(&world, 2, Location::Bench, Location::Field, T0))
            .await
            .unwrap();
        clock
            .start(&world.session, StartGameTimer { game_id: world.game_id.clone(), at: T0 })
            .await
            .unwrap();

        assert!(matches!(
            lineup.reset(&world.session, &world.game_id, false).await,
            Err(ApplicationError::Decide(DecideError::ConfirmationRequired))
        ));
        let sheet = lineup.reset(&world.session, &world.game_id, true).await.unwrap();

        assert_eq!(sheet.lineup.len(), 3);
        assert!(sheet.lineup.iter().all(|entry| entry.location == Location::Bench
            && !entry.is_starter
            && entry.playtime_seconds == 0.0));
        assert_eq!(sheet.game.elapsed_seconds, 0.0);
        assert!(sheet.events.is_empty());
    }
}
