// Season statistics and schedule history over the session mirror.

use crate::application::session::TeamSession;
use crate::core::game::sheet::GameSheet;
use crate::core::game::state::Game;
use crate::core::stats::{GameHistory, SeasonStats, StatsFilter, game_history, season_stats};

pub async fn stats(session: &TeamSession, filter: &StatsFilter) -> SeasonStats {
    let mirror = session.snapshot().await;
    let sheets: Vec<GameSheet> = mirror.games.into_values().collect();
    season_stats(&sheets, &mirror.players, filter)
}

pub async fn history(session: &TeamSession) -> GameHistory {
    let mirror = session.snapshot().await;
    let games: Vec<Game> = mirror.games.into_values().map(|sheet| sheet.game).collect();
    game_history(&games)
}
