// A seeded in-memory store with a loaded session, for handler tests.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::adapters::in_memory::in_memory_database::InMemoryDatabase;
use crate::application::command_handlers::session_handler::load_mirror;
use crate::application::session::TeamSession;
use crate::core::game::lineup::NewLineupEntry;
use crate::core::game::state::{GameDetails, NewGame, Side};
use crate::core::ports::{GameStore, LineupStore, PlayerStore, TeamStore};
use crate::core::roster::player::{NewPlayer, PlayerDetails};
use crate::core::team::NewTeam;

pub const USER_ID: &str = "user-1";

pub struct World {
    pub store: Arc<InMemoryDatabase>,
    pub session: TeamSession,
    pub game_id: String,
    pub player_ids: Vec<String>,
}

pub fn details(opponent: &str) -> GameDetails {
    GameDetails {
        opponent: opponent.to_string(),
        game_date: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
        game_time: None,
        venue: Side::Home,
        season: Some("2026/27".into()),
        competition: Some("League".into()),
    }
}

/// One team with `players` roster players and one scheduled game seeded with bench entries.
pub async fn seeded_world(players: usize) -> World {
    let store = Arc::new(InMemoryDatabase::new());
    let team = store
        .insert_team(NewTeam {
            owner_id: USER_ID.into(),
            name: "Lions".into(),
        })
        .await
        .unwrap();

    let mut player_ids = Vec::new();
    for number in 1..=players {
        let player = store
            .insert_player(NewPlayer {
                team_id: team.team_id.clone(),
                details: PlayerDetails {
                    first_name: format!("Player{number}"),
                    last_name: "Tester".into(),
                    jersey_number: Some(number.to_string()),
                },
            })
            .await
            .unwrap();
        player_ids.push(player.player_id);
    }

    let game = store
        .insert_game(NewGame {
            team_id: team.team_id.clone(),
            details: details("Rovers"),
        })
        .await
        .unwrap();
    if !player_ids.is_empty() {
        store
            .insert_entries(
                &team.team_id,
                player_ids
                    .iter()
                    .map(|player_id| NewLineupEntry {
                        game_id: game.game_id.clone(),
                        player_id: player_id.clone(),
                    })
                    .collect(),
            )
            .await
            .unwrap();
    }

    let mirror = load_mirror(&*store, team).await.unwrap();
    World {
        store,
        session: TeamSession::new(USER_ID, mirror),
        game_id: game.game_id,
        player_ids,
    }
}
