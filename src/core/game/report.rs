// Derived, read-only views over a game's event log and lineup.
//
// Purpose
// - Score at a game-clock second, goal and assist tallies, minute labels.
// - The post-game summary: a timeline with running score and resolved names, plus the starters.
//
// Boundaries
// - Pure functions. Nothing here is persisted; the stored score is kept in step by the deciders.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::core::game::event::{GameEvent, GameEventKind, in_display_order};
use crate::core::game::lineup::Position;
use crate::core::game::sheet::GameSheet;
use crate::core::game::state::Side;
use crate::core::roster::player::Player;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreline {
    pub home: u32,
    pub away: u32,
}

impl Scoreline {
    fn add(&mut self, side: Side) {
        match side {
            Side::Home => self.home += 1,
            Side::Away => self.away += 1,
        }
    }
}

/// Goals with game seconds at or before `game_seconds`, per side.
pub fn score_as_of(events: &[GameEvent], game_seconds: u32) -> Scoreline {
    let mut score = Scoreline::default();
    events
        .iter()
        .filter(|event| matches!(event.kind, GameEventKind::Goal { .. }))
        .filter(|event| event.game_seconds <= game_seconds)
        .for_each(|event| score.add(event.side));
    score
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTally {
    pub goals: u32,
    pub assists: u32,
}

pub fn player_tallies<'a>(
    events: impl IntoIterator<Item = &'a GameEvent>,
) -> BTreeMap<String, PlayerTally> {
    let mut tallies: BTreeMap<String, PlayerTally> = BTreeMap::new();
    for event in events {
        if let GameEventKind::Goal {
            scorer_id,
            assist_id,
        } = &event.kind
        {
            if let Some(scorer) = scorer_id {
                tallies.entry(scorer.clone()).or_default().goals += 1;
            }
            if let Some(assist) = assist_id {
                tallies.entry(assist.clone()).or_default().assists += 1;
            }
        }
    }
    tallies
}

/// Match minute for display. Stoppage time is shown past the 45th minute (until the 50th)
/// and past the 90th, but only between whole minutes.
pub fn minute_label(game_seconds: u32) -> String {
    let minute = game_seconds / 60;
    let between_minutes = game_seconds % 60 > 0;
    if minute >= 90 && between_minutes {
        format!("90+{}'", (game_seconds - 90 * 60).div_ceil(60))
    } else if (45..50).contains(&minute) && between_minutes {
        format!("45+{}'", (game_seconds - 45 * 60).div_ceil(60))
    } else {
        format!("{}'", minute + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub event_id: String,
    pub minute: String,
    pub game_seconds: u32,
    pub side: Side,
    pub kind: GameEventKind,
    /// Score right after this event; unchanged for substitutions.
    pub score: Scoreline,
    pub primary_name: Option<String>,
    pub secondary_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarterView {
    pub player_id: String,
    pub name: String,
    pub initial_position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub game_id: String,
    pub opponent: String,
    pub final_score: Scoreline,
    pub timeline: Vec<TimelineItem>,
    pub field_starters: Vec<StarterView>,
    pub bench_starters: Vec<StarterView>,
    pub tallies: BTreeMap<String, PlayerTally>,
}

pub fn game_summary(sheet: &GameSheet, roster: &[Player]) -> GameSummary {
    let names: HashMap<&str, String> = roster
        .iter()
        .map(|player| (player.player_id.as_str(), player.full_name()))
        .collect();
    let name_of = |id: &Option<String>| id.as_deref().and_then(|id| names.get(id).cloned());

    let mut running = Scoreline::default();
    let timeline = in_display_order(&sheet.events)
        .into_iter()
        .map(|event| {
            let (primary, secondary) = match &event.kind {
                GameEventKind::Goal {
                    scorer_id,
                    assist_id,
                } => {
                    running.add(event.side);
                    (name_of(scorer_id), name_of(assist_id))
                }
                GameEventKind::Substitution {
                    player_in_id,
                    player_out_id,
                } => (name_of(player_in_id), name_of(player_out_id)),
            };
            TimelineItem {
                event_id: event.event_id.clone(),
                minute: minute_label(event.game_seconds),
                game_seconds: event.game_seconds,
                side: event.side,
                kind: event.kind.clone(),
                score: running,
                primary_name: primary,
                secondary_name: secondary,
            }
        })
        .collect();

    // a starter who was later moved to inactive is listed with the bench starters
    let (field_starters, bench_starters): (Vec<StarterView>, Vec<StarterView>) = sheet
        .lineup
        .iter()
        .filter(|entry| entry.is_starter)
        .map(|entry| StarterView {
            player_id: entry.player_id.clone(),
            name: names
                .get(entry.player_id.as_str())
                .cloned()
                .unwrap_or_else(|| entry.player_id.clone()),
            initial_position: entry.initial_position,
        })
        .partition(|starter| starter.initial_position.is_some());

    GameSummary {
        game_id: sheet.game.game_id.clone(),
        opponent: sheet.game.opponent.clone(),
        final_score: Scoreline {
            home: sheet.game.home_score,
            away: sheet.game.away_score,
        },
        timeline,
        field_starters,
        bench_starters,
        tallies: player_tallies(&sheet.events),
    }
}
