// Season statistics across games.
//
// Purpose
// - Per-player appearances, starts, goals, assists and playtime over a filtered set of games.
// - The team record over finished games, seen from the side the team played as.
// - Season and competition labels in use, most recent first.
//
// Boundaries
// - Pure functions over game sheets already loaded by the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::game::report::player_tallies;
use crate::core::game::sheet::GameSheet;
use crate::core::game::state::{Game, Side};
use crate::core::roster::player::Player;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsFilter {
    pub season: Option<String>,
    pub competition: Option<String>,
}

impl StatsFilter {
    pub fn matches(&self, game: &Game) -> bool {
        let season_ok = self
            .season
            .as_deref()
            .is_none_or(|season| game.season.as_deref() == Some(season));
        let competition_ok = self
            .competition
            .as_deref()
            .is_none_or(|competition| game.competition.as_deref() == Some(competition));
        season_ok && competition_ok
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeasonLine {
    pub player_id: String,
    pub name: String,
    pub appearances: u32,
    pub starts: u32,
    pub goals: u32,
    pub assists: u32,
    pub playtime_seconds: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonStats {
    pub filter: StatsFilter,
    pub games_counted: u32,
    pub record: TeamRecord,
    pub players: Vec<PlayerSeasonLine>,
}

fn opposite(side: Side) -> Side {
    match side {
        Side::Home => Side::Away,
        Side::Away => Side::Home,
    }
}

pub fn team_record<'a>(games: impl IntoIterator<Item = &'a Game>) -> TeamRecord {
    let mut record = TeamRecord::default();
    for game in games.into_iter().filter(|game| game.is_finished) {
        let scored = game.score_of(game.venue);
        let conceded = game.score_of(opposite(game.venue));
        record.played += 1;
        record.goals_for += scored;
        record.goals_against += conceded;
        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => record.wins += 1,
            std::cmp::Ordering::Equal => record.draws += 1,
            std::cmp::Ordering::Less => record.losses += 1,
        }
    }
    record
}

pub fn season_stats(sheets: &[GameSheet], roster: &[Player], filter: &StatsFilter) -> SeasonStats {
    let selected: Vec<&GameSheet> = sheets
        .iter()
        .filter(|sheet| filter.matches(&sheet.game))
        .collect();

    let mut lines: BTreeMap<&str, PlayerSeasonLine> = roster
        .iter()
        .map(|player| {
            (
                player.player_id.as_str(),
                PlayerSeasonLine {
                    player_id: player.player_id.clone(),
                    name: player.full_name(),
                    appearances: 0,
                    starts: 0,
                    goals: 0,
                    assists: 0,
                    playtime_seconds: 0.0,
                },
            )
        })
        .collect();

    for sheet in &selected {
        for entry in &sheet.lineup {
            let Some(line) = lines.get_mut(entry.player_id.as_str()) else {
                continue;
            };
            if entry.playtime_seconds > 0.0 || entry.is_starter {
                line.appearances += 1;
            }
            if entry.is_starter {
                line.starts += 1;
            }
            line.playtime_seconds += entry.playtime_seconds;
        }
    }

    let tallies = player_tallies(selected.iter().flat_map(|sheet| sheet.events.iter()));
    for (player_id, tally) in tallies {
        if let Some(line) = lines.get_mut(player_id.as_str()) {
            line.goals = tally.goals;
            line.assists = tally.assists;
        }
    }

    let mut players: Vec<PlayerSeasonLine> = lines.into_values().collect();
    players.sort_by(|a, b| b.goals.cmp(&a.goals).then_with(|| a.name.cmp(&b.name)));

    SeasonStats {
        filter: filter.clone(),
        games_counted: selected.len() as u32,
        record: team_record(selected.iter().map(|sheet| &sheet.game)),
        players,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameHistory {
    pub seasons: Vec<String>,
    pub competitions: Vec<String>,
}

/// Distinct season and competition labels, ordered by the most recent game using them.
pub fn game_history(games: &[Game]) -> GameHistory {
    let mut by_recency: Vec<&Game> = games.iter().collect();
    by_recency.sort_by(|a, b| {
        b.game_date
            .cmp(&a.game_date)
            .then_with(|| b.game_time.cmp(&a.game_time))
    });

    let mut history = GameHistory::default();
    for game in by_recency {
        if let Some(season) = &game.season {
            if !history.seasons.contains(season) {
                history.seasons.push(season.clone());
            }
        }
        if let Some(competition) = &game.competition {
            if !history.competitions.contains(competition) {
                history.competitions.push(competition.clone());
            }
        }
    }
    history
}

#[cfg(test)]
mod season_stats_tests {
    use super::*;
    use crate::core::game::state::Side;
    use crate::test_support::fixtures::events::assisted_goal;
    use crate::test_support::fixtures::games::{GameBuilder, LineupEntryBuilder, sheet};
    use crate::test_support::fixtures::roster::PlayerBuilder;
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).unwrap()
    }

    #[fixture]
    fn roster() -> Vec<Player> {
        vec![
            PlayerBuilder::new("nine").named("Nia", "Nine").build(),
            PlayerBuilder::new("ten").named("Tom", "Ten").build(),
            PlayerBuilder::new("two").named("Ada", "Two").build(),
        ]
    }

    #[fixture]
    fn sheets() -> Vec<GameSheet> {
        let mut league_win = sheet(
            GameBuilder::new()
                .id("g-1")
                .season("2026")
                .competition("League")
                .score(3, 1)
                .elapsed(3_000.0)
                .finished()
                .build(),
            vec![
                LineupEntryBuilder::new("nine").starter().playtime(3_000.0).build(),
                LineupEntryBuilder::new("ten").playtime(600.0).build(),
                LineupEntryBuilder::new("two").build(),
            ],
        );
        league_win.events = vec![
            assisted_goal("e-1", "nine", Some("ten"), 100),
            assisted_goal("e-2", "nine", None, 200),
        ];
        let away_loss = sheet(
            GameBuilder::new()
                .id("g-2")
                .season("2026")
                .competition("Cup")
                .venue(Side::Away)
                .score(2, 0)
                .elapsed(3_000.0)
                .finished()
                .build(),
            vec![LineupEntryBuilder::new("two").starter().playtime(3_000.0).build()],
        );
        let unfinished = sheet(
            GameBuilder::new().id("g-3").season("2026").competition("League").elapsed(900.0).build(),
            vec![LineupEntryBuilder::new("ten").starter().playtime(900.0).build()],
        );
        vec![league_win, away_loss, unfinished]
    }

    #[rstest]
    fn it_should_count_appearances_starts_and_playtime(sheets: Vec<GameSheet>, roster: Vec<Player>) {
        let stats = season_stats(&sheets, &roster, &StatsFilter::default());
        let line = |id: &str| stats.players.iter().find(|line| line.player_id == id).unwrap();
        assert_eq!(stats.games_counted, 3);
        assert_eq!((line("nine").appearances, line("nine").starts, line("nine").goals), (1, 1, 2));
        assert_eq!((line("ten").appearances, line("ten").starts, line("ten").assists), (2, 1, 1));
        assert_eq!(line("ten").playtime_seconds, 1_500.0);
        assert_eq!(line("two").appearances, 1);
        assert_eq!(stats.players[0].player_id, "nine");
    }

    #[rstest]
    fn it_should_build_the_record_from_finished_games_only(sheets: Vec<GameSheet>, roster: Vec<Player>) {
        let stats = season_stats(&sheets, &roster, &StatsFilter::default());
        assert_eq!(
            stats.record,
            TeamRecord {
                played: 2,
                wins: 1,
                draws: 0,
                losses: 1,
                goals_for: 3,
                goals_against: 3,
            }
        );
    }

    #[rstest]
    fn it_should_filter_by_competition(sheets: Vec<GameSheet>, roster: Vec<Player>) {
        let filter = StatsFilter {
            season: Some("2026".into()),
            competition: Some("Cup".into()),
        };
        let stats = season_stats(&sheets, &roster, &filter);
        assert_eq!(stats.games_counted, 1);
        assert_eq!(stats.record.losses, 1);
    }

    #[rstest]
    fn it_should_list_labels_most_recent_first() {
        let games = vec![
            GameBuilder::new().date(date(3, 1)).season("2025/26").competition("Winter Cup").build(),
            GameBuilder::new().date(date(9, 20)).season("2026/27").competition("League").build(),
            GameBuilder::new().date(date(9, 27)).season("2026/27").build(),
            GameBuilder::new().date(date(4, 2)).season("2025/26").competition("League").build(),
        ];
        let history = game_history(&games);
        assert_eq!(history.seasons, vec!["2026/27", "2025/26"]);
        assert_eq!(history.competitions, vec!["League", "Winter Cup"]);
    }
}
