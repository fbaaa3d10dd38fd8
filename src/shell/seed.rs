// Demo data for local runs: one team with a squad and an upcoming game.

use chrono::{Days, NaiveTime, Utc};

use crate::core::game::lineup::NewLineupEntry;
use crate::core::game::state::{GameDetails, NewGame, Side};
use crate::core::ports::{MatchStore, PersistenceError};
use crate::core::roster::player::{NewPlayer, PlayerDetails};
use crate::core::team::{NewTeam, Team};

const SQUAD: [(&str, &str, &str); 9] = [
    ("Noor", "Jansen", "1"),
    ("Daan", "de Vries", "2"),
    ("Sem", "Bakker", "3"),
    ("Lotte", "Visser", "4"),
    ("Finn", "Smit", "5"),
    ("Mila", "Meijer", "7"),
    ("Luuk", "de Boer", "8"),
    ("Saar", "Mulder", "9"),
    ("Jesse", "Bos", "10"),
];

/// Create the demo team for `owner_id` unless it already has one.
pub async fn seed_demo<TStore>(store: &TStore, owner_id: &str, team_name: &str) -> Result<Team, PersistenceError>
where
    TStore: MatchStore,
{
    if let Some(team) = store.find_team_by_owner(owner_id).await? {
        return Ok(team);
    }

    let team = store
        .insert_team(NewTeam {
            owner_id: owner_id.to_string(),
            name: team_name.to_string(),
        })
        .await?;

    let mut player_ids = Vec::with_capacity(SQUAD.len());
    for (first_name, last_name, jersey_number) in SQUAD {
        let player = store
            .insert_player(NewPlayer {
                team_id: team.team_id.clone(),
                details: PlayerDetails {
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    jersey_number: Some(jersey_number.to_string()),
                },
            })
            .await?;
        player_ids.push(player.player_id);
    }

    let today = Utc::now().date_naive();
    let game = store
        .insert_game(NewGame {
            team_id: team.team_id.clone(),
            details: GameDetails {
                opponent: "Rovers".to_string(),
                game_date: today.checked_add_days(Days::new(7)).unwrap_or(today),
                game_time: NaiveTime::from_hms_opt(10, 30, 0),
                venue: Side::Home,
                season: Some("2026/27".to_string()),
                competition: Some("League".to_string()),
            },
        })
        .await?;
    store
        .insert_entries(
            &team.team_id,
            player_ids
                .into_iter()
                .map(|player_id| NewLineupEntry {
                    game_id: game.game_id.clone(),
                    player_id,
                })
                .collect(),
        )
        .await?;

    tracing::info!(team_id = %team.team_id, players = SQUAD.len(), "demo team seeded");
    Ok(team)
}

#[cfg(test)]
mod seed_tests {
    use super::*;
    use crate::adapters::in_memory::in_memory_database::InMemoryDatabase;
    use crate::core::ports::{GameStore, LineupStore, PlayerStore};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_seed_once_per_owner() {
        let store = InMemoryDatabase::new();

        let first = seed_demo(&store, "demo-user", "Demo FC").await.unwrap();
        let second = seed_demo(&store, "demo-user", "Other name").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.list_players(&first.team_id).await.unwrap().len(), SQUAD.len());
        let games = store.list_games(&first.team_id).await.unwrap();
        assert_eq!(games.len(), 1);
        let entries = store
            .list_entries(&first.team_id, &games[0].game_id)
            .await
            .unwrap();
        assert_eq!(entries.len(), SQUAD.len());
    }
}
