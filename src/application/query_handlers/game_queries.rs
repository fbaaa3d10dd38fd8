// Read-only views of the games in a session mirror.
//
// Nothing here touches the store. The mirror already matches what the store accepted.

use crate::application::errors::ApplicationError;
use crate::application::session::TeamSession;
use crate::core::game::live::{LiveBoard, live_board};
use crate::core::game::report::{GameSummary, game_summary};
use crate::core::game::sheet::GameSheet;
use crate::core::game::state::Game;

/// Games of the team, most recent first.
pub async fn list_games(session: &TeamSession) -> Vec<Game> {
    let mirror = session.snapshot().await;
    let mut games: Vec<Game> = mirror.games.into_values().map(|sheet| sheet.game).collect();
    games.sort_by(|a, b| {
        b.game_date
            .cmp(&a.game_date)
            .then_with(|| b.game_time.cmp(&a.game_time))
    });
    games
}

pub async fn game_sheet(session: &TeamSession, game_id: &str) -> Result<GameSheet, ApplicationError> {
    session.game_sheet(game_id).await
}

pub async fn summary(session: &TeamSession, game_id: &str) -> Result<GameSummary, ApplicationError> {
    let mirror = session.snapshot().await;
    Ok(game_summary(mirror.sheet(game_id)?, &mirror.players))
}

pub async fn board(
    session: &TeamSession,
    game_id: &str,
    now: i64,
) -> Result<LiveBoard, ApplicationError> {
    let sheet = session.game_sheet(game_id).await?;
    Ok(live_board(&sheet, now))
}

#[cfg(test)]
mod game_queries_tests {
    use super::*;
    use crate::application::command_handlers::event_log_handler::EventLogHandler;
    use crate::application::command_handlers::schedule_handler::ScheduleHandler;
    use crate::core::game::decider::add_event::command::RecordGameEvent;
    use crate::core::game::event::GameEventKind;
    use crate::core::game::state::{GamePhase, Side};
    use crate::test_support::fixtures::world::{details, seeded_world};
    use chrono::NaiveDate;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_list_the_latest_game_first() {
        let world = seeded_world(1).await;
        let mut later = details("Later");
        later.game_date = NaiveDate::from_ymd_opt(2026, 10, 3).unwrap();
        ScheduleHandler::new(world.store.clone())
            .add_game(&world.session, later)
            .await
            .unwrap();

        let opponents: Vec<String> = list_games(&world.session)
            .await
            .into_iter()
            .map(|game| game.opponent)
            .collect();
        assert_eq!(opponents, vec!["Later".to_string(), "Rovers".to_string()]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_summarise_with_roster_names() {
        let world = seeded_world(1).await;
        EventLogHandler::new(world.store.clone())
            .add_event(
                &world.session,
                RecordGameEvent {
                    game_id: world.game_id.clone(),
                    side: Side::Home,
                    kind: GameEventKind::Goal {
                        scorer_id: Some(world.player_ids[0].clone()),
                        assist_id: None,
                    },
                    at: 5_000,
                    game_seconds: Some(300),
                    confirmed: false,
                },
            )
            .await
            .unwrap();

        let summary = summary(&world.session, &world.game_id).await.unwrap();
        assert_eq!(summary.timeline.len(), 1);
        assert_eq!(summary.timeline[0].minute, "6'");
        assert_eq!(summary.timeline[0].primary_name.as_deref(), Some("Player1 Tester"));
        assert_eq!(summary.final_score.home, 1);

        let board = board(&world.session, &world.game_id, 10_000).await.unwrap();
        assert_eq!(board.phase, GamePhase::NotStarted);
        assert_eq!(board.score.home, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_report_unknown_games() {
        let world = seeded_world(0).await;
        assert!(matches!(
            summary(&world.session, "missing").await,
            Err(ApplicationError::NotFound { what: "game", .. })
        ));
    }
}
