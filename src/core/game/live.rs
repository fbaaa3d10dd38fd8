// Live board: what the clock display shows at a given instant.
//
// Every value is recomputed from the stored snapshot plus start instants, so a board is never
// a source of truth and nothing on it is persisted.

use serde::{Deserialize, Serialize};

use crate::core::game::lineup::Location;
use crate::core::game::playtime::fold_elapsed;
use crate::core::game::report::Scoreline;
use crate::core::game::sheet::GameSheet;
use crate::core::game::state::GamePhase;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivePlayer {
    pub player_id: String,
    pub location: Location,
    pub playtime_seconds: f64,
    pub is_clocked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveBoard {
    pub game_id: String,
    pub at: i64,
    pub phase: GamePhase,
    pub clock_seconds: f64,
    pub score: Scoreline,
    pub players: Vec<LivePlayer>,
}

pub fn live_board(sheet: &GameSheet, now: i64) -> LiveBoard {
    LiveBoard {
        game_id: sheet.game.game_id.clone(),
        at: now,
        phase: sheet.game.phase(),
        clock_seconds: sheet.game.clock_seconds(now),
        score: Scoreline {
            home: sheet.game.home_score,
            away: sheet.game.away_score,
        },
        players: sheet
            .lineup
            .iter()
            .map(|entry| LivePlayer {
                player_id: entry.player_id.clone(),
                location: entry.location,
                playtime_seconds: fold_elapsed(entry, now),
                is_clocked: entry.is_clocked(),
            })
            .collect(),
    }
}
